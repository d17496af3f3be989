use super::error::{RoutingError, RoutingErrorExt};
use super::modules::ModuleRegistry;
use super::navigator::{NavigationFailed, NavigationRequested};
use super::route::{RouteDescriptor, RouteTarget, normalize_path};
use super::table::RouteTable;
use crate::security::{AccessController, Guard, SessionSource};
use artis_domain::registry::InitializedSlice;
use artis_event_bus::{EventBus, EventReceiverExt, Lifetime};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Upper bound of redirects followed by a single navigation.
pub const MAX_REDIRECTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectCause {
    /// The route itself is a redirect.
    Route,
    /// A guard denied access.
    Guard(Guard),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub from: String,
    pub to: String,
    pub cause: RedirectCause,
}

/// Where a navigation ended up.
#[derive(Debug, Clone)]
pub enum NavigationOutcome {
    Activated {
        /// Normalized path that was asked for.
        requested: String,
        /// Normalized path that was activated.
        path: String,
        route: RouteDescriptor,
        /// Slice of the target module, for module routes.
        module: Option<Arc<InitializedSlice>>,
        redirects: Vec<Redirect>,
    },
    NotFound {
        requested: String,
        path: String,
        redirects: Vec<Redirect>,
    },
}

impl NavigationOutcome {
    /// Final normalized path.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Activated { path, .. } | Self::NotFound { path, .. } => path,
        }
    }

    #[must_use]
    pub fn redirects(&self) -> &[Redirect] {
        match self {
            Self::Activated { redirects, .. } | Self::NotFound { redirects, .. } => redirects,
        }
    }

    #[must_use]
    pub const fn is_activated(&self) -> bool {
        matches!(self, Self::Activated { .. })
    }
}

/// Latest navigation published by [`Router::run`].
#[derive(Debug, Clone, Default)]
pub struct CurrentNavigation(pub Option<NavigationOutcome>);

/// Resolves paths, enforces guards and activates modules.
#[derive(Debug)]
pub struct Router<S> {
    table: RouteTable,
    access: AccessController<S>,
    modules: Arc<ModuleRegistry>,
}

impl<S: SessionSource> Router<S> {
    pub fn new(table: RouteTable, sessions: S, modules: Arc<ModuleRegistry>) -> Self {
        Self { table, access: AccessController::new(sessions), modules }
    }

    #[must_use]
    pub const fn modules(&self) -> &Arc<ModuleRegistry> {
        &self.modules
    }

    /// Navigates to `path`, following route redirects and guard fallbacks.
    ///
    /// # Errors
    /// * [`RoutingError::RedirectLoop`] after [`MAX_REDIRECTS`] redirects.
    /// * [`RoutingError::ModuleNotRegistered`] / [`RoutingError::ModuleLoad`] when the
    ///   target module cannot be activated.
    pub async fn navigate(&self, path: &str) -> Result<NavigationOutcome, RoutingError> {
        let requested = normalize_path(path);
        let mut current = requested.clone();
        let mut redirects = Vec::new();

        loop {
            let Some(route) = self.table.resolve(&current) else {
                debug!(path = %current, "No route matched");
                return Ok(NavigationOutcome::NotFound { requested, path: current, redirects });
            };

            let next = if let RouteTarget::Redirect(to) = &route.target {
                Some((to.to_string(), RedirectCause::Route))
            } else {
                let decision = self.access.evaluate(route).await;
                decision.denial().map(|d| (d.redirect.to_owned(), RedirectCause::Guard(d.guard)))
            };

            if let Some((to, cause)) = next {
                if redirects.len() >= MAX_REDIRECTS {
                    return Err(RoutingError::RedirectLoop {
                        message: format!("{requested} -> {to}").into(),
                        context: Some(format!("{MAX_REDIRECTS} redirects").into()),
                    });
                }
                let to = normalize_path(&to);
                debug!(from = %current, to = %to, ?cause, "Redirecting");
                redirects.push(Redirect { from: std::mem::replace(&mut current, to.clone()), to, cause });
                continue;
            }

            let module = match &route.target {
                RouteTarget::Module(name) => Some(self.modules.activate(name)?),
                RouteTarget::Component(_) | RouteTarget::Redirect(_) => None,
            };

            info!(requested = %requested, path = %current, redirects = redirects.len(), "Navigation activated");
            return Ok(NavigationOutcome::Activated {
                requested,
                path: current,
                route: route.clone(),
                module,
                redirects,
            });
        }
    }

    /// Serves [`NavigationRequested`] events until `lifetime` ends or the bus closes.
    ///
    /// Every completed navigation replaces the [`CurrentNavigation`] watch value;
    /// failures are published as [`NavigationFailed`].
    pub async fn run(&self, bus: &EventBus, lifetime: Lifetime) -> Result<(), RoutingError> {
        let requests = bus.subscribe::<NavigationRequested>().context("Router subscription")?;
        self.serve(bus, requests, lifetime).await
    }

    /// Same as [`Router::run`] on a receiver the caller subscribed earlier, so
    /// requests published right after spawning the router are not missed.
    pub async fn serve(
        &self,
        bus: &EventBus,
        mut requests: broadcast::Receiver<Arc<NavigationRequested>>,
        mut lifetime: Lifetime,
    ) -> Result<(), RoutingError> {
        if bus.latest::<CurrentNavigation>().context("Router state")?.is_none() {
            bus.publish_watch(CurrentNavigation::default()).context("Router state")?;
        }

        while let Some(request) = requests.recv_until(&mut lifetime).await {
            match self.navigate(&request.path).await {
                Ok(outcome) => {
                    bus.publish_watch(CurrentNavigation(Some(outcome))).context("Router state")?;
                },
                Err(e) => {
                    warn!(path = %request.path, error = %e, "Navigation failed");
                    bus.publish(NavigationFailed { path: request.path.clone(), reason: e.to_string() })
                        .context("Navigation failure")?;
                },
            }
        }

        debug!("Router stopped");
        Ok(())
    }
}
