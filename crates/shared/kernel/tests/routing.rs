use artis_domain::registry::{FeatureSlice, InitializedSlice};
use artis_domain::roles::RoleSet;
use artis_domain::session::Session;
use artis_event_bus::{EventBus, EventReceiverExt, Unsubscriber};
use artis_kernel::routing::{
    BusNavigator, CurrentNavigation, ModuleLoadError, ModuleRegistry, NavigationFailed, NavigationOutcome,
    Navigator, RedirectCause, RouteDescriptor, RouteTable, RouteTarget, Router, RoutingError, app_routes,
};
use artis_kernel::security::Guard;
use std::any::Any;
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug)]
struct Stub(&'static str);

impl FeatureSlice for Stub {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn modules() -> Arc<ModuleRegistry> {
    let registry = ["auth", "setup", "dashboard", "podcast", "skits", "profile", "finance", "music"]
        .into_iter()
        .fold(ModuleRegistry::new(), |registry, name| {
            registry.register(name, move || -> Result<InitializedSlice, ModuleLoadError> {
                Ok(InitializedSlice::new(Stub(name)))
            })
        });
    Arc::new(registry)
}

fn router(session: Session) -> Router<Session> {
    Router::new(app_routes(), session, modules())
}

fn module_of(outcome: &NavigationOutcome) -> Option<&'static str> {
    match outcome {
        NavigationOutcome::Activated { module: Some(slice), .. } => slice.downcast_ref::<Stub>().map(|s| s.0),
        _ => None,
    }
}

#[tokio::test]
async fn visitor_is_sent_to_login() {
    let outcome = router(Session::anonymous()).navigate("/dashboard").await.unwrap();

    assert_eq!(outcome.path(), "login");
    assert_eq!(module_of(&outcome), Some("auth"));
    assert_eq!(outcome.redirects().len(), 1);
    assert_eq!(outcome.redirects()[0].cause, RedirectCause::Guard(Guard::Authenticated));
}

#[tokio::test]
async fn root_redirects_then_guards_apply() {
    let member = Session::signed_in(RoleSet::ARTIST).verified();
    let outcome = router(member).navigate("/").await.unwrap();

    assert_eq!(outcome.path(), "dashboard");
    assert_eq!(outcome.redirects()[0].cause, RedirectCause::Route);
    assert_eq!(module_of(&outcome), Some("dashboard"));
}

#[tokio::test]
async fn signed_in_user_cannot_reach_registration() {
    let unverified = Session::signed_in(RoleSet::ARTIST);
    let outcome = router(unverified).navigate("/register").await.unwrap();

    let causes: Vec<_> = outcome.redirects().iter().map(|r| r.cause).collect();
    assert_eq!(
        causes,
        [RedirectCause::Guard(Guard::NotAuthenticated), RedirectCause::Guard(Guard::Verified)]
    );
    assert_eq!(outcome.path(), "verify-profile");
    assert!(outcome.is_activated());
}

#[tokio::test]
async fn comedian_is_blocked_from_music() {
    let comedian = Session::signed_in(RoleSet::COMEDIANS).verified();
    let nav = router(comedian);

    let blocked = nav.navigate("/music").await.unwrap();
    assert_eq!(blocked.path(), "blocked");
    assert_eq!(module_of(&nav.navigate("/skits/latest").await.unwrap()), Some("skits"));
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let outcome = router(Session::anonymous()).navigate("/nowhere").await.unwrap();
    assert!(matches!(outcome, NavigationOutcome::NotFound { .. }));
}

#[tokio::test]
async fn redirect_cycles_are_cut() {
    let table = RouteTable::new(vec![
        RouteDescriptor::builder().path("a").target(RouteTarget::Redirect("/b".into())).build(),
        RouteDescriptor::builder().path("b").target(RouteTarget::Redirect("/a".into())).build(),
    ]);
    let nav = Router::new(table, Session::anonymous(), modules());

    assert!(matches!(nav.navigate("/a").await, Err(RoutingError::RedirectLoop { .. })));
}

#[tokio::test]
async fn unregistered_module_is_an_error() {
    let member = Session::signed_in(RoleSet::ARTIST).verified();
    let nav = Router::new(app_routes(), member, Arc::new(ModuleRegistry::new()));

    assert!(matches!(nav.navigate("/profile").await, Err(RoutingError::ModuleNotRegistered { .. })));
}

#[tokio::test]
async fn run_serves_bus_requests_until_unsubscribed() {
    let bus = EventBus::new();
    let (session_tx, sessions) = watch::channel(Arc::new(Session::anonymous()));
    let router = Arc::new(Router::new(app_routes(), sessions, Arc::new(ModuleRegistry::new())));
    let owner = Unsubscriber::new();

    let mut current = bus.subscribe_watch(CurrentNavigation::default()).unwrap();
    let mut failures = bus.subscribe::<NavigationFailed>().unwrap();
    let task = tokio::spawn({
        let (router, bus, lifetime) = (router.clone(), bus.clone(), owner.lifetime());
        async move { router.run(&bus, lifetime).await }
    });
    tokio::task::yield_now().await;

    let navigator = BusNavigator::new(bus.clone());
    navigator.navigate("/help").unwrap();
    let seen = current.recv().await.unwrap();
    assert_eq!(seen.0.as_ref().map(NavigationOutcome::path), Some("help"));

    session_tx.send_replace(Arc::new(Session::signed_in(RoleSet::MUSICIANS).verified()));
    navigator.navigate("/music").unwrap();
    let failed = failures.recv().await.unwrap();
    assert_eq!(failed.path, "/music");

    owner.unsubscribe();
    task.await.unwrap().unwrap();
}
