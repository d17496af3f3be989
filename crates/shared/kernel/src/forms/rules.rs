use super::value::ControlValue;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Permissive email shape: local part, domain, 2 to 4 letter TLD.
pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,4}$";

static EMAIL: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(EMAIL_PATTERN).ok());

/// Name of a failed rule, as shown to the UI.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    IntoStaticStr,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ErrorKey {
    Required,
    RequiredTrue,
    Minlength,
    Maxlength,
    Pattern,
    LowerCase,
    UpperCase,
    Digit,
    SpecialChar,
}

/// Password composition criteria, each reported under its own key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Criterion {
    LowerCase,
    UpperCase,
    Digit,
    SpecialChar,
}

impl Criterion {
    #[must_use]
    pub fn is_met(self, text: &str) -> bool {
        match self {
            Self::LowerCase => text.chars().any(|c| c.is_ascii_lowercase()),
            Self::UpperCase => text.chars().any(|c| c.is_ascii_uppercase()),
            Self::Digit => text.chars().any(|c| c.is_ascii_digit()),
            Self::SpecialChar => text.chars().any(is_special_char),
        }
    }

    #[must_use]
    pub const fn key(self) -> ErrorKey {
        match self {
            Self::LowerCase => ErrorKey::LowerCase,
            Self::UpperCase => ErrorKey::UpperCase,
            Self::Digit => ErrorKey::Digit,
            Self::SpecialChar => ErrorKey::SpecialChar,
        }
    }
}

/// Space or ASCII punctuation (`` !"#$%&'()*+,-./:;<=>?@[\]^_`{|}~ ``).
#[must_use]
pub const fn is_special_char(c: char) -> bool {
    c == ' ' || c.is_ascii_punctuation()
}

/// A validation rule mapped to a pure predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Required,
    /// The value must be `true` (checkboxes).
    RequiredTrue,
    MinLength(usize),
    MaxLength(usize),
    /// [`EMAIL_PATTERN`] on the trimmed value, reported as [`ErrorKey::Pattern`].
    Email,
    Matches(Criterion),
}

impl Rule {
    /// The four password criteria.
    pub fn password_criteria() -> impl Iterator<Item = Self> {
        <Criterion as strum::IntoEnumIterator>::iter().map(Self::Matches)
    }

    /// Key of the failure, `None` when the value passes.
    ///
    /// Only [`Rule::Required`] and [`Rule::RequiredTrue`] fire on empty values.
    #[must_use]
    pub fn check<V: ControlValue>(&self, value: &V) -> Option<ErrorKey> {
        let failed = match self {
            Self::Required => value.is_empty(),
            Self::RequiredTrue => !value.is_true(),
            Self::MinLength(min) => text(value).is_some_and(|t| t.chars().count() < *min),
            Self::MaxLength(max) => text(value).is_some_and(|t| t.chars().count() > *max),
            Self::Email => text(value).is_some_and(|t| !is_email(t)),
            Self::Matches(criterion) => text(value).is_some_and(|t| !criterion.is_met(t)),
        };
        failed.then(|| self.key())
    }

    #[must_use]
    pub const fn key(&self) -> ErrorKey {
        match self {
            Self::Required => ErrorKey::Required,
            Self::RequiredTrue => ErrorKey::RequiredTrue,
            Self::MinLength(_) => ErrorKey::Minlength,
            Self::MaxLength(_) => ErrorKey::Maxlength,
            Self::Email => ErrorKey::Pattern,
            Self::Matches(criterion) => criterion.key(),
        }
    }
}

fn is_email(text: &str) -> bool {
    EMAIL.as_ref().is_some_and(|re| re.is_match(text.trim()))
}

fn text<V: ControlValue>(value: &V) -> Option<&str> {
    value.as_text().filter(|t| !t.is_empty())
}
