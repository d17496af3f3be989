use artis_domain::account::{Country, CountryList, Identity, RegisteredUser, RegistrationRequest};
use artis_domain::session::{Session, Verification};
use artis_domain::roles::RoleSet;
use serde_json::json;

#[test]
fn email_request_serializes_flat_without_phone_fields() {
    let request = RegistrationRequest {
        first_name: "Jo".to_owned(),
        last_name: "Doe".to_owned(),
        identity: Identity::Email { email: "jo@doe.com".to_owned() },
        password: "Abcdef1!".to_owned(),
        role: "artist".to_owned(),
    };

    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(
        value,
        json!({
            "first_name": "Jo",
            "last_name": "Doe",
            "email": "jo@doe.com",
            "password": "Abcdef1!",
            "role": "artist"
        })
    );
    assert_eq!(request.email(), Some("jo@doe.com"));
    assert!(request.phone_number().is_none());
}

#[test]
fn phone_request_carries_country_id() {
    let request = RegistrationRequest {
        first_name: "Jo".to_owned(),
        last_name: "Doe".to_owned(),
        identity: Identity::Phone { phone_number: "5551234".to_owned(), country_id: "Y".to_owned() },
        password: "Abcdef1!".to_owned(),
        role: "artist".to_owned(),
    };

    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["phone_number"], "5551234");
    assert_eq!(value["country_id"], "Y");
    assert!(value.get("email").is_none());
}

#[test]
fn debug_output_hides_the_password() {
    let request = RegistrationRequest {
        first_name: "Jo".to_owned(),
        last_name: "Doe".to_owned(),
        identity: Identity::Email { email: "jo@doe.com".to_owned() },
        password: "Abcdef1!".to_owned(),
        role: "artist".to_owned(),
    };
    assert!(!format!("{request:?}").contains("Abcdef1!"));
}

#[test]
fn country_phone_codes_accept_numbers_and_strings() {
    let list: CountryList = serde_json::from_value(json!({
        "data": [ { "id": "US", "phone_code": 1 }, { "id": "GB", "phone_code": "44" } ]
    }))
    .unwrap();
    assert_eq!(list.data, vec![Country::new("US", "1"), Country::new("GB", "44")]);
}

#[test]
fn registered_user_tolerates_missing_fields() {
    let user: RegisteredUser = serde_json::from_value(json!({ "email": "jo@doe.com" })).unwrap();
    assert_eq!(user.email.as_deref(), Some("jo@doe.com"));
    assert!(user.phone_number.is_none());
}

#[test]
fn session_deserializes_role_names() {
    let session: Session = serde_json::from_value(json!({
        "authenticated": true,
        "verification": "confirmed",
        "roles": ["comedians"]
    }))
    .unwrap();
    assert!(session.is_verified());
    assert_eq!(session.verification, Verification::Confirmed);
    assert_eq!(session.roles, RoleSet::COMEDIANS);
}
