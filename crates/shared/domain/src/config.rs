use crate::constants::DEFAULT_ROLE;
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level shell configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfigInner {
    /// Platform flavor; doubles as the role of new registrations.
    pub application_type: Option<String>,
    pub api: ApiConfig,
    pub notifications: NotificationConfig,
    pub localization: LocalizationConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(flatten, default)]
    inner: Arc<AppConfigInner>,
}

impl Deref for AppConfig {
    type Target = AppConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for AppConfig {
    fn deref_mut(&mut self) -> &mut AppConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

impl AppConfig {
    /// Role for new registrations: the configured application type, or
    /// [`DEFAULT_ROLE`] when it is missing or blank.
    #[must_use]
    pub fn registration_role(&self) -> &str {
        self.application_type.as_deref().map(str::trim).filter(|t| !t.is_empty()).unwrap_or(DEFAULT_ROLE)
    }
}

/// Backend endpoints consumed by the HTTP collaborator.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
}

/// Toast behavior.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub close_button: bool,
    /// Upper bound of simultaneously visible toasts.
    pub max_opened: usize,
    pub auto_dismiss: bool,
    pub prevent_duplicates: bool,
    pub timeout_ms: u64,
    pub position_class: String,
}

/// Translation catalog selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocalizationConfig {
    pub locale: String,
    /// JSON catalog overriding the built-in strings.
    pub catalog: Option<PathBuf>,
}

/// Subscriber settings for the shell binary.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub console: bool,
    pub json: bool,
    pub directory: Option<PathBuf>,
    pub filter: Option<String>,
}

// --- Default ---

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: "http://localhost:8000/api".to_owned() }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            close_button: true,
            max_opened: 2,
            auto_dismiss: true,
            prevent_duplicates: true,
            timeout_ms: 5000,
            position_class: "toast-top-full-width".to_owned(),
        }
    }
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self { locale: "en".to_owned(), catalog: None }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), console: true, json: false, directory: None, filter: None }
    }
}
