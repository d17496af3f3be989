//! Command-line interface of the `artis` binary.

use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "artis")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Headless Artis shell: routes, guards and account registration")]
pub(crate) struct Cli {
    /// Configuration file (TOML, JSON or YAML). Defaults to ./artis.* when present.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Print the route table
    Routes {},
    /// Navigate to a path and print the redirects taken
    Navigate {
        path: String,
        /// Navigate as a signed-in user
        #[arg(long)]
        signed_in: bool,
        /// The signed-in user has confirmed their email or phone
        #[arg(long, requires = "signed_in")]
        verified: bool,
        /// Role held by the signed-in user (repeatable)
        #[arg(long = "role", requires = "signed_in")]
        roles: Vec<String>,
    },
    /// Fill in and submit the registration page
    #[command(group(ArgGroup::new("contact").required(true).args(["email", "phone"])))]
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: Option<String>,
        /// National number, spaces allowed
        #[arg(long, requires = "dial_code")]
        phone: Option<String>,
        /// International dialing code such as +44
        #[arg(long)]
        dial_code: Option<String>,
        #[arg(long)]
        password: String,
        #[arg(long)]
        accept_terms: bool,
        /// Country lookup response to serve instead of the demo table
        #[arg(long, conflicts_with = "offline")]
        countries: Option<PathBuf>,
        /// Make the country lookup fail
        #[arg(long)]
        offline: bool,
    },
}
