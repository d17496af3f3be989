use crate::error::AuthError;
use artis_domain::account::{Country, CountryList};
use artis_domain::constants::MSG_COUNTRIES_UNAVAILABLE;

/// Country records fetched once per page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CountryTable {
    #[default]
    NotLoaded,
    Loaded(Vec<Country>),
}

impl From<CountryList> for CountryTable {
    fn from(list: CountryList) -> Self {
        Self::Loaded(list.data)
    }
}

impl CountryTable {
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    /// Country id for a dial code such as `"+44"`.
    ///
    /// Scans the whole table and keeps the last match; no match yields an
    /// empty id.
    pub fn country_id(&self, dial_code: &str) -> Result<String, AuthError> {
        let Self::Loaded(countries) = self else {
            return Err(AuthError::CountriesUnavailable {
                message: MSG_COUNTRIES_UNAVAILABLE.into(),
                context: Some(dial_code.to_owned().into()),
            });
        };

        let code = dial_code.trim();
        let code = code.strip_prefix('+').unwrap_or(code);
        let mut id = String::new();
        for country in countries.iter().filter(|c| c.phone_code.trim() == code) {
            id.clone_from(&country.id);
        }
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CountryTable {
        CountryTable::Loaded(vec![
            Country::new("X", "1"),
            Country::new("GB", "44"),
            Country::new("Y", "1"),
        ])
    }

    #[test]
    fn test_last_match_wins() {
        assert_eq!(table().country_id("+1").unwrap(), "Y");
        assert_eq!(table().country_id("44").unwrap(), "GB");
    }

    #[test]
    fn test_unknown_code_is_empty() {
        assert_eq!(table().country_id("+999").unwrap(), "");
    }

    #[test]
    fn test_not_loaded_is_rejected() {
        let err = CountryTable::NotLoaded.country_id("+1").unwrap_err();
        assert!(matches!(err, AuthError::CountriesUnavailable { .. }));
    }
}
