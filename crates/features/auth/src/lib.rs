//! Account registration feature slice.
//!
//! * [`store`]: auth state on the event bus (`Register`, `ResetAuthState`).
//! * [`register`]: the registration form and its page controller.
//! * [`service`]: backend contract plus an in-memory implementation.

mod error;
pub mod register;
pub mod service;
pub mod store;

pub use crate::error::{AuthError, AuthErrorExt};

use crate::register::{PageContext, RegisterPage};
use crate::service::AuthService;
use crate::store::AuthStore;
use artis_domain::config::AppConfig;
use artis_event_bus::EventBus;
use artis_kernel::domain::registry::InitializedSlice;
use std::sync::Arc;

/// Auth feature state.
#[artis_derive::artis_slice]
pub struct Auth {
    pub store: AuthStore,
    /// Role attached to new registrations.
    pub registration_role: String,
}

impl Auth {
    /// Opens the registration page on this slice's store.
    pub fn register_page(&self, ctx: PageContext) -> Result<RegisterPage, AuthError> {
        RegisterPage::init(self.store.clone(), ctx, self.registration_role.clone())
    }
}

/// Initializes the auth feature on `bus`.
pub fn init(bus: EventBus, service: Arc<dyn AuthService>, config: &AppConfig) -> Result<InitializedSlice, AuthError> {
    let inner = AuthInner {
        store: AuthStore::new(bus, service)?,
        registration_role: config.registration_role().to_owned(),
    };
    tracing::info!(role = %inner.registration_role, "Auth slice initialized");

    Ok(InitializedSlice::new(Auth::new(inner)))
}
