//! Registration page: form state machine, country lookup and the page controller.

mod countries;
mod form;
mod page;

pub use countries::CountryTable;
pub use form::{PASSWORD_MAX_LEN, PASSWORD_MIN_LEN, RegistrationForm, RegistrationMode};
pub use page::{PageContext, RegisterPage};
