use super::error::RoutingError;
use artis_domain::registry::InitializedSlice;
use fxhash::FxHashMap;
use parking_lot::Mutex;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub type ModuleLoadError = Box<dyn std::error::Error + Send + Sync>;

/// Initializes a lazily loaded feature module.
pub trait ModuleLoader: Send + Sync {
    fn load(&self) -> Result<InitializedSlice, ModuleLoadError>;
}

impl<F> ModuleLoader for F
where
    F: Fn() -> Result<InitializedSlice, ModuleLoadError> + Send + Sync,
{
    fn load(&self) -> Result<InitializedSlice, ModuleLoadError> {
        self()
    }
}

struct Entry {
    loader: Box<dyn ModuleLoader>,
    slice: Mutex<Option<Arc<InitializedSlice>>>,
}

/// Lazy feature modules by name. Each loader runs on first activation only;
/// a failed load is not cached.
#[derive(Default)]
pub struct ModuleRegistry {
    entries: FxHashMap<Cow<'static, str>, Entry>,
}

impl fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleRegistry").field("modules", &self.names().collect::<Vec<_>>()).finish()
    }
}

impl ModuleRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `loader` under `name`, replacing any previous registration.
    #[must_use]
    pub fn register(mut self, name: impl Into<Cow<'static, str>>, loader: impl ModuleLoader + 'static) -> Self {
        let name = name.into();
        debug!(module = %name, "Module registered");
        self.entries.insert(name, Entry { loader: Box::new(loader), slice: Mutex::new(None) });
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(AsRef::as_ref)
    }

    #[must_use]
    pub fn is_loaded(&self, name: &str) -> bool {
        self.entries.get(name).is_some_and(|entry| entry.slice.lock().is_some())
    }

    /// The module's slice, loading it on first use.
    pub fn activate(&self, name: &str) -> Result<Arc<InitializedSlice>, RoutingError> {
        let entry = self.entries.get(name).ok_or_else(|| RoutingError::ModuleNotRegistered {
            message: name.to_owned().into(),
            context: None,
        })?;

        let mut slot = entry.slice.lock();
        if let Some(slice) = slot.as_ref() {
            return Ok(slice.clone());
        }

        let slice = entry.loader.load().map(Arc::new).map_err(|e| {
            warn!(module = name, error = %e, "Module failed to load");
            RoutingError::ModuleLoad { message: e.to_string().into(), context: Some(name.to_owned().into()) }
        })?;
        info!(module = name, "Module loaded");
        *slot = Some(slice.clone());
        Ok(slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artis_domain::registry::FeatureSlice;
    use std::any::Any;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct Podcast;

    impl FeatureSlice for Podcast {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn test_loader_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let registry = ModuleRegistry::new().register("podcast", move || -> Result<InitializedSlice, ModuleLoadError> {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(InitializedSlice::new(Podcast))
        });

        assert!(!registry.is_loaded("podcast"));
        let first = registry.activate("podcast").unwrap();
        let second = registry.activate("podcast").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(first.downcast_ref::<Podcast>().is_some());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_load_is_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let registry = ModuleRegistry::new().register("skits", move || -> Result<InitializedSlice, ModuleLoadError> {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                return Err("offline".into());
            }
            Ok(InitializedSlice::new(Podcast))
        });

        assert!(matches!(registry.activate("skits"), Err(RoutingError::ModuleLoad { .. })));
        assert!(registry.activate("skits").is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_unknown_module() {
        let err = ModuleRegistry::new().activate("finance").unwrap_err();
        assert!(matches!(err, RoutingError::ModuleNotRegistered { .. }));
    }
}
