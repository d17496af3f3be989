//! Route table, lazy module activation and the navigation loop.

mod error;
mod modules;
mod navigator;
mod route;
mod router;
mod table;

pub use error::{RoutingError, RoutingErrorExt};
pub use modules::{ModuleLoadError, ModuleLoader, ModuleRegistry};
pub use navigator::{BusNavigator, NavigationFailed, NavigationRequested, Navigator};
pub use route::{PathMatch, RouteDescriptor, RouteTarget, normalize_path};
pub use router::{
    CurrentNavigation, MAX_REDIRECTS, NavigationOutcome, Redirect, RedirectCause, Router,
};
pub use table::{RouteTable, app_routes};
