//! Message catalogs.
//!
//! Catalogs are JSON objects; nested objects flatten into dotted keys, so
//! `{"auth": {"title": "Sign up"}}` provides `auth.title`.

use artis_domain::constants::{MSG_COUNTRIES_UNAVAILABLE, MSG_VERIFY_EMAIL_SENT};
use fxhash::FxHashMap;
use serde_json::Value;
use std::borrow::Cow;
use std::path::Path;
use tracing::debug;

#[artis_derive::artis_error]
pub enum I18nError {
    #[error("Catalog read error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Catalog parse error{}: {source}", format_context(.context))]
    Parse { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Invalid catalog{}: {message}", format_context(.context))]
    Invalid { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Synchronous key lookup.
pub trait Translator: Send + Sync {
    /// Display string for `key`; the key itself when it is unknown.
    fn instant(&self, key: &str) -> String;
}

const BUILTIN_EN: [(&str, &str); 2] = [
    (MSG_VERIFY_EMAIL_SENT, "We sent you a verification email. Please check your inbox."),
    (MSG_COUNTRIES_UNAVAILABLE, "The country list is not available yet. Please try again."),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    locale: String,
    entries: FxHashMap<String, String>,
}

impl Catalog {
    #[must_use]
    pub fn new(locale: impl Into<String>) -> Self {
        Self { locale: locale.into(), entries: FxHashMap::default() }
    }

    /// English strings shipped with the shell.
    #[must_use]
    pub fn builtin() -> Self {
        BUILTIN_EN.into_iter().fold(Self::new("en"), |catalog, (k, v)| catalog.with(k, v))
    }

    pub fn from_json(locale: impl Into<String>, json: &str) -> Result<Self, I18nError> {
        let value: Value = serde_json::from_str(json).context("Catalog JSON")?;
        let Value::Object(map) = value else {
            return Err(I18nError::Invalid { message: "top level must be an object".into(), context: None });
        };

        let mut catalog = Self::new(locale);
        flatten(&mut catalog.entries, None, map);
        debug!(locale = %catalog.locale, entries = catalog.entries.len(), "Catalog parsed");
        Ok(catalog)
    }

    pub fn load(locale: impl Into<String>, path: impl AsRef<Path>) -> Result<Self, I18nError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).context(path.display().to_string())?;
        Self::from_json(locale, &json)
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, message: impl Into<String>) -> Self {
        self.entries.insert(key.into(), message.into());
        self
    }

    /// Entries of `other` win over existing ones.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.entries.extend(other.entries);
        self.locale = other.locale;
        self
    }

    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl Translator for Catalog {
    fn instant(&self, key: &str) -> String {
        self.get(key).unwrap_or(key).to_owned()
    }
}

fn flatten(entries: &mut FxHashMap<String, String>, prefix: Option<&str>, map: serde_json::Map<String, Value>) {
    for (key, value) in map {
        let key = match prefix {
            Some(p) => format!("{p}.{key}"),
            None => key,
        };
        match value {
            Value::Object(nested) => flatten(entries, Some(&key), nested),
            Value::String(text) => {
                entries.insert(key, text);
            },
            Value::Null => {},
            other => {
                entries.insert(key, other.to_string());
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_falls_back_to_key() {
        let catalog = Catalog::builtin();
        assert_ne!(catalog.instant(MSG_VERIFY_EMAIL_SENT), MSG_VERIFY_EMAIL_SENT);
        assert_eq!(catalog.instant("no.such.key"), "no.such.key");
    }

    #[test]
    fn test_nested_json_flattens() {
        let catalog =
            Catalog::from_json("fr", r#"{"auth": {"title": "Inscription", "steps": 3}, "ok": "D'accord"}"#)
                .unwrap();
        assert_eq!(catalog.get("auth.title"), Some("Inscription"));
        assert_eq!(catalog.get("auth.steps"), Some("3"));
        assert_eq!(catalog.instant("ok"), "D'accord");
    }

    #[test]
    fn test_merge_overrides_builtin() {
        let custom = Catalog::new("en").with(MSG_VERIFY_EMAIL_SENT, "Check your inbox");
        let merged = Catalog::builtin().merge(custom);
        assert_eq!(merged.instant(MSG_VERIFY_EMAIL_SENT), "Check your inbox");
        assert!(merged.get(MSG_COUNTRIES_UNAVAILABLE).is_some());
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(matches!(Catalog::from_json("en", "[1, 2]"), Err(I18nError::Invalid { .. })));
        assert!(matches!(Catalog::from_json("en", "{"), Err(I18nError::Parse { .. })));
    }
}
