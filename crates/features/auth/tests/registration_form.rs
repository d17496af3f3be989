use artis_auth::AuthError;
use artis_auth::register::{CountryTable, RegistrationForm, RegistrationMode};
use artis_domain::account::Country;
use artis_domain::config::AppConfig;
use artis_kernel::forms::{ErrorKey, PhoneNumber, Rule};
use proptest::prelude::*;
use serde_json::json;

const CRITERIA: [ErrorKey; 4] = [ErrorKey::LowerCase, ErrorKey::UpperCase, ErrorKey::Digit, ErrorKey::SpecialChar];

fn password_errors(password: &str) -> Vec<ErrorKey> {
    let mut form = RegistrationForm::new();
    form.password.set_value(password.to_owned());
    form.password.errors().iter().copied().collect()
}

fn filled_form() -> RegistrationForm {
    let mut form = RegistrationForm::new();
    form.first_name.set_value("Jo".to_owned());
    form.last_name.set_value("Doe".to_owned());
    form.email.set_value("jo@doe.com".to_owned());
    form.password.set_value("Abcdef1!".to_owned());
    form.terms.set_value(true);
    form
}

fn countries() -> CountryTable {
    CountryTable::Loaded(vec![Country::new("X", "1"), Country::new("FR", "33"), Country::new("Y", "1")])
}

proptest! {
    #[test]
    fn short_passwords_are_invalid(password in "[a-zA-Z0-9!#]{0,7}") {
        let mut form = RegistrationForm::new();
        form.password.set_value(password);
        prop_assert!(!form.password.is_valid());
        prop_assert!(form.password.has_error(ErrorKey::Minlength) || form.password.has_error(ErrorKey::Required));
    }

    #[test]
    fn long_passwords_are_invalid(tail in "[a-z]{28,60}") {
        let errors = password_errors(&format!("A1!{tail}"));
        prop_assert_eq!(errors, vec![ErrorKey::Maxlength]);
    }

    #[test]
    fn missing_lowercase_sets_only_its_key(tail in "[A-Z0-9 !#%]{5,27}") {
        prop_assert_eq!(password_errors(&format!("A1!{tail}")), vec![ErrorKey::LowerCase]);
    }

    #[test]
    fn missing_uppercase_sets_only_its_key(tail in "[a-z0-9 !#%]{5,27}") {
        prop_assert_eq!(password_errors(&format!("a1!{tail}")), vec![ErrorKey::UpperCase]);
    }

    #[test]
    fn missing_digit_sets_only_its_key(tail in "[a-zA-Z !#%]{5,27}") {
        prop_assert_eq!(password_errors(&format!("aA!{tail}")), vec![ErrorKey::Digit]);
    }

    #[test]
    fn missing_special_sets_only_its_key(tail in "[a-zA-Z0-9]{5,27}") {
        prop_assert_eq!(password_errors(&format!("aA1{tail}")), vec![ErrorKey::SpecialChar]);
    }

    #[test]
    fn satisfying_all_criteria_clears_them(tail in "[a-zA-Z0-9 !#%]{4,26}") {
        let errors = password_errors(&format!("aA1!{tail}"));
        prop_assert!(errors.iter().all(|key| !CRITERIA.contains(key)), "{:?}", errors);
        prop_assert!(errors.is_empty());
    }
}

#[test]
fn toggling_mode_clears_values_and_swaps_rules() {
    let mut form = RegistrationForm::new();
    let email_rules = form.email.rules().to_vec();
    form.email.set_value("jo@doe.com".to_owned());

    form.set_mode(RegistrationMode::Phone);
    assert_eq!(form.mode(), RegistrationMode::Phone);
    assert!(form.email.value().is_empty());
    assert!(form.phone.value().is_none());
    assert!(form.email.rules().is_empty());
    assert_eq!(form.phone.rules(), [Rule::Required]);
    assert!(form.email.is_valid(), "email errors must not go stale");
    assert!(form.phone.has_error(ErrorKey::Required));

    form.phone.set_value(Some(PhoneNumber::new("600 000", "+33")));
    form.set_mode(RegistrationMode::Email);
    assert!(form.phone.value().is_none());
    assert!(form.phone.is_valid());
    assert_eq!(form.email.rules(), email_rules.as_slice());
    assert!(form.email.has_error(ErrorKey::Required));
}

#[test]
fn email_is_trimmed_on_submit() {
    let mut form = filled_form();
    form.email.set_value("  a@b.com  ".to_owned());

    let request = form.submit(&CountryTable::NotLoaded, "artist").unwrap();
    assert_eq!(request.email(), Some("a@b.com"));
    assert_eq!(form.email.value(), "a@b.com");

    let again = form.submit(&CountryTable::NotLoaded, "artist").unwrap();
    assert_eq!(again.email(), Some("a@b.com"));
}

#[test]
fn phone_submission_resolves_last_matching_country() {
    let mut form = filled_form();
    form.set_mode(RegistrationMode::Phone);
    form.phone.set_value(Some(PhoneNumber::new(" 555 01 23 ", "+1")));

    let request = form.submit(&countries(), "artist").unwrap();
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({
            "first_name": "Jo",
            "last_name": "Doe",
            "phone_number": "5550123",
            "country_id": "Y",
            "password": "Abcdef1!",
            "role": "artist"
        })
    );
}

#[test]
fn phone_submission_needs_the_country_table() {
    let mut form = filled_form();
    form.set_mode(RegistrationMode::Phone);
    form.phone.set_value(Some(PhoneNumber::new("5550123", "+1")));

    let err = form.submit(&CountryTable::NotLoaded, "artist").unwrap_err();
    assert!(matches!(err, AuthError::CountriesUnavailable { .. }));
}

#[test]
fn unknown_dial_code_gives_empty_country() {
    let mut form = filled_form();
    form.set_mode(RegistrationMode::Phone);
    form.phone.set_value(Some(PhoneNumber::new("5550123", "+999")));

    let request = form.submit(&countries(), "artist").unwrap();
    assert_eq!(serde_json::to_value(&request).unwrap()["country_id"], "");
}

#[test]
fn default_role_is_artist() {
    let mut form = filled_form();
    let request = form.submit(&CountryTable::NotLoaded, AppConfig::default().registration_role()).unwrap();
    assert_eq!(request.role, "artist");
}

#[test]
fn end_to_end_email_request() {
    let mut form = filled_form();
    assert!(form.is_valid());

    let request = form.submit(&countries(), "artist").unwrap();
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({
            "first_name": "Jo",
            "last_name": "Doe",
            "email": "jo@doe.com",
            "password": "Abcdef1!",
            "role": "artist"
        })
    );
}

#[test]
fn invalid_form_is_not_submitted() {
    let mut form = filled_form();
    form.terms.set_value(false);
    form.email.set_value("jo@doe".to_owned());

    assert!(form.terms.has_error(ErrorKey::RequiredTrue));
    assert!(form.email.has_error(ErrorKey::Pattern));

    let err = form.submit(&countries(), "artist").unwrap_err();
    assert!(matches!(&err, AuthError::InvalidForm { message, .. } if message == "email, terms"));
}

#[test]
fn password_visibility_toggles() {
    let mut form = RegistrationForm::new();
    assert!(!form.show_password());
    form.toggle_password_visibility();
    assert!(form.show_password());
}
