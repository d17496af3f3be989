//! Field-level validation.
//!
//! A [`FormControl`] holds a value and a list of [`Rule`]s. Validity is the
//! conjunction of all rules; the error set is the union of the keys of the
//! failed ones.

mod control;
mod rules;
mod value;

pub use control::{ErrorSet, FormControl};
pub use rules::{Criterion, EMAIL_PATTERN, ErrorKey, Rule, is_special_char};
pub use value::{ControlValue, PhoneNumber};
