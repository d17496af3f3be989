use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;
use tempfile::TempDir;

/// The binary, run from an empty directory so no stray `artis.*` file is picked up.
fn artis(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_artis"));
    cmd.current_dir(dir.path()).env_remove("ARTIS__APPLICATION_TYPE").env("ARTIS__LOGGING__CONSOLE", "false");
    cmd
}

fn register_args() -> [&'static str; 7] {
    ["register", "--first-name", "Jo", "--last-name", "Doe", "--password", "Abcdef1!"]
}

#[test]
fn routes_lists_guards_and_roles() {
    let dir = TempDir::new().unwrap();

    artis(&dir)
        .arg("routes")
        .assert()
        .success()
        .stdout(contains("module:auth"))
        .stdout(contains("guards=[authenticated,verified,role] roles=[musicians]"))
        .stdout(contains("component:blocked"));
}

#[test]
fn visitor_at_root_lands_on_login() {
    let dir = TempDir::new().unwrap();

    artis(&dir)
        .args(["navigate", "/"])
        .assert()
        .success()
        .stdout(contains("redirect / -> /dashboard (route)"))
        .stdout(contains("redirect /dashboard -> /login (guard authenticated)"))
        .stdout(contains("activated /login module=auth"));
}

#[test]
fn comedian_is_blocked_from_music() {
    let dir = TempDir::new().unwrap();

    artis(&dir)
        .args(["navigate", "/music", "--signed-in", "--verified", "--role", "comedians"])
        .assert()
        .success()
        .stdout(contains("redirect /music -> /blocked (guard role)"))
        .stdout(contains("activated /blocked component=blocked"));
}

#[test]
fn unknown_path_is_not_found() {
    let dir = TempDir::new().unwrap();

    artis(&dir).args(["navigate", "/nowhere"]).assert().success().stdout(contains("not found /nowhere"));
}

#[test]
fn verified_member_opens_the_dashboard() {
    let dir = TempDir::new().unwrap();

    artis(&dir)
        .args(["navigate", "/dashboard", "--signed-in", "--verified"])
        .assert()
        .success()
        .stdout(contains("activated /dashboard module=dashboard"));
}

#[test]
fn musician_opens_music() {
    let dir = TempDir::new().unwrap();

    artis(&dir)
        .args(["navigate", "/music", "--signed-in", "--verified", "--role", "musicians"])
        .assert()
        .success()
        .stdout(contains("activated /music module=music"))
        .stdout(contains("redirect").not());
}

#[test]
fn wildcard_role_is_blocked_from_music() {
    let dir = TempDir::new().unwrap();

    artis(&dir)
        .args(["navigate", "/music", "--signed-in", "--verified", "--role", "*", "--role", "all"])
        .assert()
        .success()
        .stdout(contains("redirect /music -> /blocked (guard role)"));
}

#[test]
fn email_registration_reports_verification_toast() {
    let dir = TempDir::new().unwrap();

    artis(&dir)
        .args(register_args())
        .args(["--email", "  jo@doe.com ", "--accept-terms"])
        .assert()
        .success()
        .stdout(contains("role artist"))
        .stdout(contains("toast success: We sent you a verification email."));
}

#[test]
fn phone_registration_moves_to_mobile_validation() {
    let dir = TempDir::new().unwrap();

    artis(&dir)
        .args(register_args())
        .args(["--phone", "7700 900 123", "--dial-code", "+44", "--accept-terms"])
        .assert()
        .success()
        .stdout(contains("navigated /validate-mobile"));
}

#[test]
fn phone_registration_without_countries_is_refused() {
    let dir = TempDir::new().unwrap();

    artis(&dir)
        .args(register_args())
        .args(["--phone", "7700900123", "--dial-code", "+44", "--accept-terms", "--offline"])
        .assert()
        .success()
        .stdout(contains("toast error: The country list is not available yet."));
}

#[test]
fn unaccepted_terms_are_reported() {
    let dir = TempDir::new().unwrap();

    artis(&dir)
        .args(register_args())
        .args(["--email", "jo@doe.com"])
        .assert()
        .success()
        .stdout(contains("invalid terms: requiredTrue"))
        .stdout(contains("toast").not());
}

#[test]
fn country_file_replaces_the_demo_table() {
    let dir = TempDir::new().unwrap();
    let countries = dir.path().join("countries.json");
    fs::write(&countries, r#"{ "data": [ { "id": "NZ", "phone_code": 64 } ] }"#).unwrap();

    artis(&dir)
        .args(register_args())
        .args(["--phone", "21 555 0100", "--dial-code", "+64", "--accept-terms"])
        .arg("--countries")
        .arg(&countries)
        .assert()
        .success()
        .stdout(contains("navigated /validate-mobile"));
}

#[test]
fn config_file_sets_the_registration_role() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("shell.toml");
    fs::write(&config, "application_type = \"podcasters\"\n").unwrap();

    artis(&dir)
        .arg("--config")
        .arg(&config)
        .args(register_args())
        .args(["--email", "jo@doe.com", "--accept-terms"])
        .assert()
        .success()
        .stdout(contains("role podcasters"));
}

#[test]
fn environment_overrides_the_registration_role() {
    let dir = TempDir::new().unwrap();

    artis(&dir)
        .env("ARTIS__APPLICATION_TYPE", "musicians")
        .args(register_args())
        .args(["--email", "jo@doe.com", "--accept-terms"])
        .assert()
        .success()
        .stdout(contains("role musicians"));
}

#[test]
fn missing_config_file_is_fatal() {
    let dir = TempDir::new().unwrap();

    artis(&dir)
        .args(["--config", "absent.toml", "routes"])
        .assert()
        .failure()
        .stderr(contains("Configuration is malformed"));
}

#[test]
fn email_and_phone_are_exclusive() {
    let dir = TempDir::new().unwrap();

    artis(&dir)
        .args(register_args())
        .args(["--email", "jo@doe.com", "--phone", "123", "--dial-code", "+1"])
        .assert()
        .failure();
}
