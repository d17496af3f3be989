use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A value a [`super::FormControl`] can hold.
pub trait ControlValue: Debug + Clone + Default + Send + Sync {
    /// Emptiness as seen by [`super::Rule::Required`].
    fn is_empty(&self) -> bool;

    /// Text form for length and pattern rules; `None` for non-text values.
    fn as_text(&self) -> Option<&str> {
        None
    }

    fn is_true(&self) -> bool {
        false
    }
}

impl ControlValue for String {
    fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }

    fn as_text(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl ControlValue for bool {
    fn is_empty(&self) -> bool {
        false
    }

    fn is_true(&self) -> bool {
        *self
    }
}

/// Structured phone input: national number plus international dial code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumber {
    pub number: String,
    /// As entered, e.g. `"+44"`.
    pub dial_code: String,
}

impl PhoneNumber {
    pub fn new(number: impl Into<String>, dial_code: impl Into<String>) -> Self {
        Self { number: number.into(), dial_code: dial_code.into() }
    }
}

impl ControlValue for Option<PhoneNumber> {
    fn is_empty(&self) -> bool {
        self.as_ref().is_none_or(|phone| phone.number.trim().is_empty())
    }
}
