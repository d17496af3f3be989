use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::info;

/// File stem looked up when no explicit path is given (`artis.toml`, `artis.json`, ...).
pub const DEFAULT_CONFIG_STEM: &str = "artis";
/// Prefix of environment overrides, e.g. `ARTIS__NOTIFICATIONS__MAX_OPENED`.
pub const ENV_PREFIX: &str = "ARTIS";

#[artis_derive::artis_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Layered configuration loader: a file source overlaid with `ARTIS__` environment variables.
///
/// An explicit `path` must exist. Without one, the `artis` file in the working directory is
/// optional and the target falls back to its serde defaults.
///
/// Nested keys use double underscores: `ARTIS__API__BASE_URL` maps to `api.base_url`.
///
/// # Errors
/// * The explicit file is missing or malformed.
/// * The merged values do not match the structure of `T`.
///
/// # Example
/// ```rust
/// use artis_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct Settings {
///     #[serde(default)]
///     locale: Option<String>,
/// }
///
/// let settings: Settings = load_config(None::<&str>).unwrap_or_default();
/// # let _ = settings.locale;
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let file = match &path {
        Some(p) => {
            info!(path = %p.as_ref().display(), "Loading config");
            File::from(p.as_ref()).required(true)
        },
        None => File::with_name(DEFAULT_CONFIG_STEM).required(false),
    };

    let config = Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .convert_case(config::Case::Snake),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
