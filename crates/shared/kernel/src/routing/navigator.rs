use super::error::{RoutingError, RoutingErrorExt};
use artis_event_bus::EventBus;
use tracing::debug;

/// Request to move to `path`, consumed by [`super::Router::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequested {
    pub path: String,
}

/// A requested navigation that could not complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationFailed {
    pub path: String,
    pub reason: String,
}

/// Fire-and-forget navigation used by pages.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str) -> Result<(), RoutingError>;
}

/// [`Navigator`] publishing [`NavigationRequested`] on the bus.
#[derive(Debug, Clone)]
pub struct BusNavigator {
    bus: EventBus,
}

impl BusNavigator {
    #[must_use]
    pub const fn new(bus: EventBus) -> Self {
        Self { bus }
    }
}

impl Navigator for BusNavigator {
    fn navigate(&self, path: &str) -> Result<(), RoutingError> {
        let reached = self
            .bus
            .publish(NavigationRequested { path: path.to_owned() })
            .context("Navigation request")?;
        debug!(path, reached, "Navigation requested");
        Ok(())
    }
}
