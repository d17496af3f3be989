//! Global auth state on the event bus.
//!
//! Actions go through [`AuthStore::dispatch`]. State lives in two watch
//! cells read through the selectors [`AuthStore::register_user`] and
//! [`AuthStore::auth_error`].

use crate::error::{AuthError, AuthErrorExt};
use crate::service::AuthService;
use artis_domain::account::{RegisteredUser, RegistrationRequest};
use artis_event_bus::EventBus;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Payload of [`AuthAction::ResetAuthState`]. Empty strings clear the state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetParams {
    pub error: String,
    pub success: String,
}

/// Every action is also published on the bus as it is dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    Register(RegistrationRequest),
    ResetAuthState(ResetParams),
}

/// Latest registration result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterUserState(pub Option<RegisteredUser>);

/// Latest registration error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthErrorState(pub Option<String>);

pub type Selector<T> = watch::Receiver<Arc<T>>;

#[derive(Clone)]
pub struct AuthStore {
    bus: EventBus,
    service: Arc<dyn AuthService>,
}

impl std::fmt::Debug for AuthStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthStore").field("bus", &self.bus).finish_non_exhaustive()
    }
}

impl AuthStore {
    /// Seeds both state cells on `bus` when they do not exist yet.
    pub fn new(bus: EventBus, service: Arc<dyn AuthService>) -> Result<Self, AuthError> {
        if bus.latest::<RegisterUserState>().context("Auth store")?.is_none() {
            bus.publish_watch(RegisterUserState::default()).context("Auth store")?;
        }
        if bus.latest::<AuthErrorState>().context("Auth store")?.is_none() {
            bus.publish_watch(AuthErrorState::default()).context("Auth store")?;
        }
        Ok(Self { bus, service })
    }

    #[must_use]
    pub const fn bus(&self) -> &EventBus {
        &self.bus
    }

    #[must_use]
    pub fn service(&self) -> Arc<dyn AuthService> {
        self.service.clone()
    }

    /// Applies `action` without waiting for its effects.
    ///
    /// `Register` runs the backend call on a spawned task, so a tokio runtime
    /// must be current.
    pub fn dispatch(&self, action: AuthAction) -> Result<(), AuthError> {
        self.bus.publish(action.clone()).context("Auth action")?;

        match action {
            AuthAction::ResetAuthState(params) => {
                debug!("Auth state reset");
                self.bus.publish_watch(AuthErrorState(non_empty(params.error))).context("Auth reset")?;
                // A success message carries no user record.
                self.bus.publish_watch(RegisterUserState(None)).context("Auth reset")?;
            },
            AuthAction::Register(request) => {
                let handle = Handle::try_current().map_err(|e| AuthError::Internal {
                    message: e.to_string().into(),
                    context: Some("Register dispatched outside a runtime".into()),
                })?;
                let (bus, service) = (self.bus.clone(), self.service.clone());
                handle.spawn(async move { register_effect(&bus, service.as_ref(), request).await });
            },
        }
        Ok(())
    }

    /// Selector of the registration result.
    pub fn register_user(&self) -> Result<Selector<RegisterUserState>, AuthError> {
        self.bus.subscribe_watch(RegisterUserState::default()).context("register_user selector")
    }

    /// Selector of the registration error.
    pub fn auth_error(&self) -> Result<Selector<AuthErrorState>, AuthError> {
        self.bus.subscribe_watch(AuthErrorState::default()).context("auth_error selector")
    }
}

async fn register_effect(bus: &EventBus, service: &dyn AuthService, request: RegistrationRequest) {
    let published = match service.register(request).await {
        Ok(user) => {
            info!(id = ?user.id, "Registration succeeded");
            bus.publish_watch(RegisterUserState(Some(user)))
        },
        Err(e) => {
            warn!(error = %e, "Registration failed");
            bus.publish_watch(AuthErrorState(Some(e.user_message())))
        },
    };
    if let Err(e) = published {
        warn!(error = %e, "Registration result not stored");
    }
}

fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}
