mod cli;

use crate::cli::{Cli, Command};
use anyhow::{Context, Result};
use artis::domain::config::{AppConfig, LoggingConfig};
use artis::domain::roles::RoleSet;
use artis::domain::session::Session;
use artis::features::auth::service::{AuthService, InMemoryAuthService};
use artis::kernel::config::load_config;
use artis::kernel::routing::{NavigationOutcome, RedirectCause, RouteTarget, app_routes};
use artis_logger::{LevelFilter, LogFormat, Logger};
use artis_shell::{Contact, Registration, RegistrationOutcome, Shell, demo};
use clap::Parser;
use std::io::{self, Write};
use std::sync::Arc;

#[artis_runtime::main(event_loop)]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config: AppConfig = load_config(cli.config.as_ref()).context("Critical: Configuration is malformed")?;
    let _logger = init_logger(&config.logging)?;

    let mut out = io::stdout().lock();
    match cli.command {
        Command::Routes {} => print_routes(&mut out)?,
        Command::Navigate { path, signed_in, verified, roles } => {
            let session = if signed_in {
                let session = Session::signed_in(roles.iter().collect::<RoleSet>());
                if verified { session.verified() } else { session }
            } else {
                Session::anonymous()
            };
            let shell = Shell::builder().config(config).session(session).build()?;
            let outcome = shell.navigate(&path).await?;
            print_navigation(&mut out, &outcome)?;
        },
        Command::Register {
            first_name,
            last_name,
            email,
            phone,
            dial_code,
            password,
            accept_terms,
            countries,
            offline,
        } => {
            let service: Arc<dyn AuthService> = match (countries, offline) {
                (_, true) => Arc::new(InMemoryAuthService::without_countries()),
                (Some(path), false) => Arc::new(InMemoryAuthService::new(demo::countries_from_file(path)?)),
                (None, false) => Arc::new(InMemoryAuthService::new(demo::countries())),
            };
            let contact = match (email, phone) {
                (Some(email), _) => Contact::Email(email),
                (None, number) => {
                    Contact::Phone { number: number.unwrap_or_default(), dial_code: dial_code.unwrap_or_default() }
                },
            };
            let registration = Registration { first_name, last_name, contact, password, accept_terms };

            let shell = Shell::builder().config(config).service(service).build()?;
            writeln!(out, "role {}", shell.config().registration_role())?;
            let outcome = shell.register(&registration).await?;
            print_registration(&mut out, &outcome)?;
        },
    }

    Ok(())
}

fn init_logger(cfg: &LoggingConfig) -> Result<Option<Logger>> {
    if !cfg.console && cfg.directory.is_none() {
        return Ok(None);
    }

    let level = cfg.level.parse::<LevelFilter>().unwrap_or(LevelFilter::INFO);
    let format = if cfg.json { LogFormat::Json } else { LogFormat::Text };
    let mut builder =
        Logger::builder().name(env!("CARGO_PKG_NAME")).console(cfg.console).console_format(format).level(level);
    if let Some(filter) = &cfg.filter {
        builder = builder.env_filter(filter);
    }

    let logger = match &cfg.directory {
        Some(dir) => builder.path(dir).file_format(format).init()?,
        None => builder.init()?,
    };
    Ok(Some(logger))
}

fn print_routes(out: &mut impl Write) -> Result<()> {
    for route in app_routes().iter() {
        let target = match &route.target {
            RouteTarget::Module(name) => format!("module:{name}"),
            RouteTarget::Component(name) => format!("component:{name}"),
            RouteTarget::Redirect(to) => format!("redirect:{to}"),
        };
        let guards = route.guards.iter().map(AsRef::as_ref).collect::<Vec<&str>>().join(",");
        let roles = route.roles.map(|r| r.names().collect::<Vec<_>>().join(",")).unwrap_or_default();

        writeln!(out, "/{:<18} {target:<22} guards=[{guards}] roles=[{roles}]", route.path)?;
    }
    Ok(())
}

fn print_navigation(out: &mut impl Write, outcome: &NavigationOutcome) -> Result<()> {
    for redirect in outcome.redirects() {
        let cause = match redirect.cause {
            RedirectCause::Route => "route".to_owned(),
            RedirectCause::Guard(guard) => format!("guard {guard}"),
        };
        writeln!(out, "redirect /{} -> /{} ({cause})", redirect.from, redirect.to)?;
    }

    match outcome {
        NavigationOutcome::Activated { path, route, .. } => match &route.target {
            RouteTarget::Module(name) => writeln!(out, "activated /{path} module={name}")?,
            RouteTarget::Component(name) => writeln!(out, "activated /{path} component={name}")?,
            RouteTarget::Redirect(_) => writeln!(out, "activated /{path}")?,
        },
        NavigationOutcome::NotFound { path, .. } => writeln!(out, "not found /{path}")?,
    }
    Ok(())
}

fn print_registration(out: &mut impl Write, outcome: &RegistrationOutcome) -> Result<()> {
    match outcome {
        RegistrationOutcome::Toast { kind, message } => writeln!(out, "toast {kind}: {message}")?,
        RegistrationOutcome::Navigated { path } => writeln!(out, "navigated {path}")?,
        RegistrationOutcome::Invalid { fields } => {
            for (name, errors) in fields {
                let keys = errors.iter().map(AsRef::as_ref).collect::<Vec<&str>>().join(",");
                writeln!(out, "invalid {name}: {keys}")?;
            }
        },
    }
    Ok(())
}
