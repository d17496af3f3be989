//! # Artis Shell
//!
//! Composition root of the application. Wires the event bus, the router with
//! its guards, the toast center, the translation catalog and the feature
//! modules, then drives them headlessly.
//!
//! ## Example
//! ```no_run
//! use artis_shell::Shell;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let shell = Shell::builder().build()?;
//!     let outcome = shell.navigate("/").await?;
//!     assert_eq!(outcome.path(), "login");
//!     Ok(())
//! }
//! ```

pub mod demo;
mod registration;

pub use crate::registration::{Contact, Registration, RegistrationOutcome};

use anyhow::{Context, Result, bail};
use artis::domain::config::AppConfig;
use artis::domain::session::Session;
use artis::events::{EventBus, EventReceiverExt, Unsubscriber};
use artis::features::auth::register::PageContext;
use artis::features::auth::service::{AuthService, InMemoryAuthService};
use artis::kernel::dialog::BusDialogs;
use artis::kernel::i18n::Catalog;
use artis::kernel::notify::ToastCenter;
use artis::kernel::routing::{
    BusNavigator, CurrentNavigation, NavigationFailed, NavigationOutcome, NavigationRequested, Navigator,
    Router, app_routes,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::{broadcast, watch};
use tokio::time::timeout;
use tracing::{debug, error, info};

/// How long the shell waits for the router or a page to react.
pub const DEFAULT_WAIT: Duration = Duration::from_secs(5);

type SessionCell = watch::Receiver<Arc<Session>>;

/// A fluent builder for the [`Shell`].
#[must_use = "builders do nothing unless you call .build()"]
pub struct ShellBuilder {
    config: AppConfig,
    service: Option<Arc<dyn AuthService>>,
    session: Session,
    wait: Duration,
}

impl std::fmt::Debug for ShellBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShellBuilder")
            .field("config", &self.config)
            .field("session", &self.session)
            .field("wait", &self.wait)
            .finish_non_exhaustive()
    }
}

impl Default for ShellBuilder {
    fn default() -> Self {
        Self { config: AppConfig::default(), service: None, session: Session::anonymous(), wait: DEFAULT_WAIT }
    }
}

impl ShellBuilder {
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Account backend. Defaults to an in-memory one serving [`demo::countries`].
    pub fn service(mut self, service: Arc<dyn AuthService>) -> Self {
        self.service = Some(service);
        self
    }

    /// Session the guards see at start.
    pub fn session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    pub const fn wait(mut self, wait: Duration) -> Self {
        self.wait = wait;
        self
    }

    /// Builds the shell and starts its router on the current runtime.
    ///
    /// # Errors
    /// * No tokio runtime is running.
    /// * The configured translation catalog cannot be read.
    pub fn build(self) -> Result<Shell> {
        let handle = Handle::try_current().context("The shell needs a tokio runtime")?;
        let Self { config, service, session, wait } = self;

        let translator = Arc::new(load_catalog(&config)?);
        let bus = EventBus::new();
        let toasts = Arc::new(ToastCenter::new(config.notifications.clone()).with_bus(bus.clone()));

        let sessions: SessionCell = bus.subscribe_watch(session)?;
        let service = service.unwrap_or_else(|| Arc::new(InMemoryAuthService::new(demo::countries())));
        let modules = artis::modules(&config, &bus, service);
        let router = Arc::new(Router::new(app_routes(), sessions, Arc::new(modules)));

        bus.publish_watch(CurrentNavigation::default())?;
        let requests = bus.subscribe::<NavigationRequested>()?;
        let unsubscriber = Unsubscriber::new();

        let (task_router, task_bus, lifetime) = (router.clone(), bus.clone(), unsubscriber.lifetime());
        handle.spawn(async move {
            if let Err(e) = task_router.serve(&task_bus, requests, lifetime).await {
                error!(error = %e, "Router stopped");
            }
        });

        info!(locale = translator.locale(), role = config.registration_role(), "Shell started");
        Ok(Shell { config, bus, router, toasts, translator, wait, unsubscriber })
    }
}

/// The running application.
#[derive(Debug)]
pub struct Shell {
    config: AppConfig,
    bus: EventBus,
    router: Arc<Router<SessionCell>>,
    toasts: Arc<ToastCenter>,
    translator: Arc<Catalog>,
    wait: Duration,
    unsubscriber: Unsubscriber,
}

impl Shell {
    pub fn builder() -> ShellBuilder {
        ShellBuilder::default()
    }

    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub const fn bus(&self) -> &EventBus {
        &self.bus
    }

    #[must_use]
    pub const fn toasts(&self) -> &Arc<ToastCenter> {
        &self.toasts
    }

    #[must_use]
    pub const fn translator(&self) -> &Arc<Catalog> {
        &self.translator
    }

    /// Names of the feature modules the router can activate.
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.router.modules().names()
    }

    /// Replaces the session read by the guards.
    pub fn sign_in(&self, session: Session) -> Result<()> {
        debug!(?session, "Session replaced");
        self.bus.publish_watch(session)?;
        Ok(())
    }

    /// Presentation collaborators handed to pages.
    #[must_use]
    pub fn page_context(&self) -> PageContext {
        PageContext {
            notifier: self.toasts.clone(),
            translator: self.translator.clone(),
            navigator: Arc::new(BusNavigator::new(self.bus.clone())),
            dialogs: Arc::new(BusDialogs::new(self.bus.clone())),
        }
    }

    /// Requests `path` from the router and waits for where it lands.
    ///
    /// # Errors
    /// The router reported a failure (redirect loop, missing module) or did not
    /// answer in time.
    pub async fn navigate(&self, path: &str) -> Result<NavigationOutcome> {
        let mut current = self.bus.subscribe_watch(CurrentNavigation::default())?;
        let mut failures = self.bus.subscribe::<NavigationFailed>()?;

        BusNavigator::new(self.bus.clone()).navigate(path)?;

        timeout(self.wait, settle(&mut current, &mut failures))
            .await
            .with_context(|| format!("Navigation to {path} timed out"))?
    }

    pub(crate) const fn wait_limit(&self) -> Duration {
        self.wait
    }

    /// Stops the router. Idempotent.
    pub fn shutdown(&mut self) {
        if !self.unsubscriber.is_unsubscribed() {
            self.unsubscriber.unsubscribe();
            info!("Shell stopped");
        }
    }
}

impl Drop for Shell {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn settle(
    current: &mut watch::Receiver<Arc<CurrentNavigation>>,
    failures: &mut broadcast::Receiver<Arc<NavigationFailed>>,
) -> Result<NavigationOutcome> {
    loop {
        tokio::select! {
            state = EventReceiverExt::recv(current) => {
                let state = state.context("Router closed")?;
                if let CurrentNavigation(Some(outcome)) = state.as_ref() {
                    return Ok(outcome.clone());
                }
            },
            failed = EventReceiverExt::recv(failures) => {
                let failed = failed.context("Router closed")?;
                bail!("Navigation to /{} failed: {}", failed.path.trim_start_matches('/'), failed.reason);
            },
        }
    }
}

fn load_catalog(config: &AppConfig) -> Result<Catalog> {
    let builtin = Catalog::builtin();
    let Some(path) = &config.localization.catalog else {
        return Ok(builtin);
    };

    let catalog = Catalog::load(config.localization.locale.as_str(), path)
        .with_context(|| format!("Failed to load catalog {}", path.display()))?;
    Ok(builtin.merge(catalog))
}
