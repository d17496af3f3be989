use super::route::{PathMatch, RouteDescriptor, RouteTarget, normalize_path};
use crate::security::Guard;
use artis_domain::constants::ROUTE_DASHBOARD;
use artis_domain::roles::RoleSet;
use std::borrow::Cow;

/// Ordered routes; the first match wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl RouteTable {
    #[must_use]
    pub const fn new(routes: Vec<RouteDescriptor>) -> Self {
        Self { routes }
    }

    /// First route matching `path` in declaration order.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&RouteDescriptor> {
        let path = normalize_path(path);
        self.routes.iter().find(|route| route.matches(&path))
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.routes.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }
}

impl From<Vec<RouteDescriptor>> for RouteTable {
    fn from(routes: Vec<RouteDescriptor>) -> Self {
        Self::new(routes)
    }
}

const AUTH_PAGES: [&str; 4] = ["login", "register", "validate-mobile", "forgot-password"];

const PAGES: [&str; 9] = [
    "verify-profile",
    "live-show",
    "live-skit",
    "checkbox-episode",
    "help",
    "live",
    "live-show-chat",
    "live-show-expended",
    "blocked",
];

/// The application's route table.
#[must_use]
pub fn app_routes() -> RouteTable {
    let member = || vec![Guard::Authenticated, Guard::Verified];
    let restricted = || vec![Guard::Authenticated, Guard::Verified, Guard::Role];

    let mut routes = vec![
        RouteDescriptor::builder()
            .path("")
            .target(RouteTarget::Redirect(ROUTE_DASHBOARD.into()))
            .path_match(PathMatch::Full)
            .build(),
        RouteDescriptor::builder()
            .path("")
            .target(module("auth"))
            .guards(vec![Guard::NotAuthenticated])
            .children(AUTH_PAGES.into_iter().map(Cow::Borrowed).collect())
            .build(),
        RouteDescriptor::builder().path("setup").target(module("setup")).guards(vec![Guard::Authenticated]).build(),
        RouteDescriptor::builder().path("dashboard").target(module("dashboard")).guards(member()).build(),
        RouteDescriptor::builder()
            .path("podcast")
            .target(module("podcast"))
            .guards(restricted())
            .roles(Some(RoleSet::PODCASTERS))
            .build(),
        RouteDescriptor::builder()
            .path("skits")
            .target(module("skits"))
            .guards(restricted())
            .roles(Some(RoleSet::COMEDIANS))
            .build(),
        RouteDescriptor::builder().path("profile").target(module("profile")).guards(member()).build(),
        RouteDescriptor::builder().path("finance").target(module("finance")).guards(member()).build(),
        RouteDescriptor::builder()
            .path("music")
            .target(module("music"))
            .guards(restricted())
            .roles(Some(RoleSet::MUSICIANS))
            .build(),
    ];

    routes.extend(PAGES.into_iter().map(|page| {
        RouteDescriptor::builder()
            .path(page)
            .target(RouteTarget::Component(page.into()))
            .path_match(PathMatch::Full)
            .build()
    }));

    RouteTable::new(routes)
}

const fn module(name: &'static str) -> RouteTarget {
    RouteTarget::Module(Cow::Borrowed(name))
}
