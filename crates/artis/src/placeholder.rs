//! Stand-in slices for route modules this workspace does not implement yet.

use artis_domain::registry::InitializedSlice;
use artis_kernel::routing::{ModuleLoadError, ModuleRegistry};

/// Module names of the signed-in area. Each activates a [`Placeholder`].
pub const MODULES: &[&str] = &["setup", "dashboard", "podcast", "skits", "profile", "finance", "music"];

/// An empty page standing in for a module.
#[artis_derive::artis_slice]
pub struct Placeholder {
    pub module: &'static str,
}

/// Registers a [`Placeholder`] loader for every name in [`MODULES`].
#[must_use]
pub fn register(registry: ModuleRegistry) -> ModuleRegistry {
    MODULES.iter().fold(registry, |registry, &module| {
        registry.register(module, move || -> Result<InitializedSlice, ModuleLoadError> {
            Ok(InitializedSlice::new(Placeholder::new(PlaceholderInner { module })))
        })
    })
}
