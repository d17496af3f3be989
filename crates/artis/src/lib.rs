//! Facade crate for Artis features and shared modules.
//! Re-exports domain/kernel primitives and wires feature slices into the module registry.
//! Keep this crate thin: it should compose other crates, not implement business logic.

pub use artis_domain as domain;
pub use artis_event_bus as events;
pub use artis_kernel as kernel;

pub mod placeholder;

#[cfg(feature = "auth")]
use artis_domain::config::AppConfig;
#[cfg(feature = "auth")]
use artis_event_bus::EventBus;
#[cfg(feature = "auth")]
use artis_domain::registry::InitializedSlice;
#[cfg(feature = "auth")]
use artis_kernel::routing::ModuleLoadError;
use artis_kernel::routing::ModuleRegistry;
#[cfg(feature = "auth")]
use std::sync::Arc;

/// Feature registry for runtime introspection.
pub mod features {
    #[cfg(feature = "auth")]
    pub use artis_auth as auth;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "auth")]
        "auth",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Lazy loaders of every enabled feature module, keyed by route module name.
///
/// Route modules without a feature crate (dashboard, podcast, ...) load a
/// [`placeholder::Placeholder`].
#[cfg(feature = "auth")]
#[must_use]
pub fn modules(
    config: &AppConfig,
    bus: &EventBus,
    auth_service: Arc<dyn features::auth::service::AuthService>,
) -> ModuleRegistry {
    let (config, bus) = (config.clone(), bus.clone());
    tracing::debug!(features = ?features::ENABLED, "Registering feature modules");

    placeholder::register(ModuleRegistry::new()).register(
        "auth",
        move || -> Result<InitializedSlice, ModuleLoadError> {
            features::auth::init(bus.clone(), auth_service.clone(), &config).map_err(Into::into)
        },
    )
}

#[cfg(not(feature = "auth"))]
#[must_use]
pub fn modules() -> ModuleRegistry {
    placeholder::register(ModuleRegistry::new())
}
