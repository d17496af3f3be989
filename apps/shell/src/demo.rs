//! Data served by the in-memory backend when no service is configured.

use anyhow::{Context, Result};
use artis::domain::account::{Country, CountryList};
use std::fs;
use std::path::Path;

/// A small country table. Canada shares `+1` with the United States and is
/// listed last, so it is the one `+1` resolves to.
#[must_use]
pub fn countries() -> CountryList {
    CountryList {
        data: vec![
            Country::new("US", "1"),
            Country::new("GB", "44"),
            Country::new("FR", "33"),
            Country::new("DE", "49"),
            Country::new("UA", "380"),
            Country::new("IN", "91"),
            Country::new("CA", "1"),
        ],
    }
}

/// Reads a country lookup response (`{ "data": [...] }`) from disk.
pub fn countries_from_file(path: impl AsRef<Path>) -> Result<CountryList> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Malformed country list {}", path.display()))
}
