use super::countries::CountryTable;
use crate::error::AuthError;
use artis_domain::account::{Identity, RegistrationRequest};
use artis_kernel::forms::{ErrorSet, FormControl, PhoneNumber, Rule};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 30;

/// Which identity field the registration requires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationMode {
    #[default]
    Email,
    Phone,
}

/// Registration form state.
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub first_name: FormControl<String>,
    pub last_name: FormControl<String>,
    pub email: FormControl<String>,
    pub phone: FormControl<Option<PhoneNumber>>,
    pub password: FormControl<String>,
    pub terms: FormControl<bool>,
    mode: RegistrationMode,
    show_password: bool,
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationForm {
    /// An empty form in email mode.
    #[must_use]
    pub fn new() -> Self {
        Self {
            first_name: FormControl::new(String::new(), vec![Rule::Required]),
            last_name: FormControl::new(String::new(), vec![Rule::Required]),
            email: FormControl::new(String::new(), email_rules(RegistrationMode::Email)),
            phone: FormControl::new(None, phone_rules(RegistrationMode::Email)),
            password: FormControl::new(String::new(), password_rules()),
            terms: FormControl::new(false, vec![Rule::RequiredTrue]),
            mode: RegistrationMode::Email,
            show_password: false,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> RegistrationMode {
        self.mode
    }

    /// Switches the required identity field.
    ///
    /// Clears email and phone, swaps their rules and revalidates both.
    pub fn set_mode(&mut self, mode: RegistrationMode) {
        self.mode = mode;
        self.email.set_rules(email_rules(mode));
        self.phone.set_rules(phone_rules(mode));
        self.email.reset();
        self.phone.reset();
        debug!(?mode, "Registration mode changed");
    }

    #[must_use]
    pub const fn show_password(&self) -> bool {
        self.show_password
    }

    pub const fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    /// Failing fields with their error keys, in form order.
    #[must_use]
    pub fn invalid_fields(&self) -> Vec<(&'static str, &ErrorSet)> {
        [
            ("firstName", self.first_name.errors()),
            ("lastName", self.last_name.errors()),
            ("email", self.email.errors()),
            ("phone", self.phone.errors()),
            ("password", self.password.errors()),
            ("terms", self.terms.errors()),
        ]
        .into_iter()
        .filter(|(_, errors)| !errors.is_empty())
        .collect()
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.invalid_fields().is_empty()
    }

    /// Builds the request sent to the store.
    ///
    /// Trims the email in place. In phone mode the national number loses all
    /// whitespace and the dial code is resolved through `countries`.
    pub fn submit(&mut self, countries: &CountryTable, role: &str) -> Result<RegistrationRequest, AuthError> {
        let trimmed = self.email.value().trim().to_owned();
        if trimmed.len() != self.email.value().len() {
            self.email.set_value(trimmed);
        }

        let invalid = self.invalid_fields();
        if !invalid.is_empty() {
            let fields = invalid.iter().map(|(name, _)| *name).collect::<Vec<_>>().join(", ");
            return Err(AuthError::InvalidForm { message: fields.into(), context: None });
        }

        let identity = match self.mode {
            RegistrationMode::Email => Identity::Email { email: self.email.value().clone() },
            RegistrationMode::Phone => {
                let phone = self.phone.value().clone().unwrap_or_default();
                Identity::Phone {
                    phone_number: phone.number.chars().filter(|c| !c.is_whitespace()).collect(),
                    country_id: countries.country_id(&phone.dial_code)?,
                }
            },
        };

        Ok(RegistrationRequest {
            first_name: self.first_name.value().clone(),
            last_name: self.last_name.value().clone(),
            identity,
            password: self.password.value().clone(),
            role: role.to_owned(),
        })
    }
}

fn email_rules(mode: RegistrationMode) -> Vec<Rule> {
    match mode {
        RegistrationMode::Email => vec![Rule::Required, Rule::Email],
        RegistrationMode::Phone => Vec::new(),
    }
}

fn phone_rules(mode: RegistrationMode) -> Vec<Rule> {
    match mode {
        RegistrationMode::Email => Vec::new(),
        RegistrationMode::Phone => vec![Rule::Required],
    }
}

fn password_rules() -> Vec<Rule> {
    [Rule::Required, Rule::MinLength(PASSWORD_MIN_LEN), Rule::MaxLength(PASSWORD_MAX_LEN)]
        .into_iter()
        .chain(Rule::password_criteria())
        .collect()
}
