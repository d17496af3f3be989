//! # Domain Models
//!
//! Plain data shared by the shell, the router and the feature slices:
//! sessions and roles, registration payloads, country records and the
//! application configuration. Dependencies stay at `serde` and `bitflags`.

pub mod account;
pub mod config;
pub mod constants;
pub mod registry;
pub mod roles;
pub mod session;
