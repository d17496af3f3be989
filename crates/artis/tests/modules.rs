#![cfg(feature = "auth")]

use artis::domain::account::CountryList;
use artis::domain::config::AppConfig;
use artis::events::EventBus;
use artis::features::auth::Auth;
use artis::features::auth::service::InMemoryAuthService;
use artis::placeholder::Placeholder;
use std::sync::Arc;

#[test]
fn auth_is_enabled() {
    assert!(artis::features::is_enabled("auth"));
    assert!(!artis::features::is_enabled("podcast"));
}

#[tokio::test]
async fn auth_module_loads_once() {
    let bus = EventBus::new();
    let registry = artis::modules(
        &AppConfig::default(),
        &bus,
        Arc::new(InMemoryAuthService::new(CountryList::default())),
    );

    assert!(!registry.is_loaded("auth"));
    let first = registry.activate("auth").unwrap();
    let second = registry.activate("auth").unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.downcast_ref::<Auth>().map(|a| a.registration_role.as_str()), Some("artist"));
}

#[test]
fn every_routed_module_is_registered() {
    let registry = artis::modules(
        &AppConfig::default(),
        &EventBus::new(),
        Arc::new(InMemoryAuthService::new(CountryList::default())),
    );

    for name in artis::kernel::routing::app_routes().iter().filter_map(|route| match &route.target {
        artis::kernel::routing::RouteTarget::Module(name) => Some(name.to_string()),
        _ => None,
    }) {
        assert!(registry.names().any(|n| n == name), "{name} has no loader");
    }
}

#[test]
fn music_loads_a_placeholder() {
    let registry = artis::modules(
        &AppConfig::default(),
        &EventBus::new(),
        Arc::new(InMemoryAuthService::new(CountryList::default())),
    );

    let slice = registry.activate("music").unwrap();
    assert_eq!(slice.downcast_ref::<Placeholder>().map(|p| p.module), Some("music"));
    assert!(slice.downcast_ref::<Auth>().is_none());
}
