//! Registration payloads and country records.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A country as served by the lookup endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: String,
    /// International dialing code without the leading `+`.
    #[serde(deserialize_with = "string_or_number")]
    pub phone_code: String,
}

impl Country {
    pub fn new(id: impl Into<String>, phone_code: impl Into<String>) -> Self {
        Self { id: id.into(), phone_code: phone_code.into() }
    }
}

/// Envelope of the country lookup response (`{ "data": [...] }`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryList {
    #[serde(default)]
    pub data: Vec<Country>,
}

/// The identity half of a registration: exactly one of email or phone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identity {
    Email { email: String },
    Phone { phone_number: String, country_id: String },
}

/// Account creation payload sent to the store.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub first_name: String,
    pub last_name: String,
    #[serde(flatten)]
    pub identity: Identity,
    pub password: String,
    pub role: String,
}

impl RegistrationRequest {
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        match &self.identity {
            Identity::Email { email } => Some(email.as_str()),
            Identity::Phone { .. } => None,
        }
    }

    #[must_use]
    pub fn phone_number(&self) -> Option<&str> {
        match &self.identity {
            Identity::Phone { phone_number, .. } => Some(phone_number.as_str()),
            Identity::Email { .. } => None,
        }
    }
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("identity", &self.identity)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Account returned by a successful registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisteredUser {
    pub id: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}
