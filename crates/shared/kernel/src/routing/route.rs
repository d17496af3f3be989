use crate::security::Guard;
use artis_domain::roles::RoleSet;
use std::borrow::Cow;
use typed_builder::TypedBuilder;

/// What a matched route activates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget {
    /// A lazily loaded feature module, by registry name.
    Module(Cow<'static, str>),
    /// A page rendered by the shell itself.
    Component(Cow<'static, str>),
    /// Immediate redirect to another path.
    Redirect(Cow<'static, str>),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PathMatch {
    /// The route path and anything below it.
    #[default]
    Prefix,
    /// The route path only.
    Full,
}

/// Static description of a route. Immutable once the table is built.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct RouteDescriptor {
    /// Path without leading or trailing slashes; empty for the root.
    #[builder(setter(into))]
    pub path: Cow<'static, str>,
    pub target: RouteTarget,
    /// Guards in declaration order.
    #[builder(default)]
    pub guards: Vec<Guard>,
    /// Roles permitted by [`Guard::Role`].
    #[builder(default)]
    pub roles: Option<RoleSet>,
    #[builder(default)]
    pub path_match: PathMatch,
    /// Child segments served by the target module. When present, a prefix route
    /// only matches paths continuing with one of them.
    #[builder(default)]
    pub children: Vec<Cow<'static, str>>,
}

impl RouteDescriptor {
    /// Whether the normalized `path` resolves to this route.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        let own = segments(&self.path);
        let requested = segments(path);

        match self.path_match {
            PathMatch::Full => own == requested,
            PathMatch::Prefix => {
                let Some(rest) = requested.strip_prefix(own.as_slice()) else {
                    return false;
                };
                if self.children.is_empty() {
                    return true;
                }
                rest.first().is_some_and(|child| self.children.iter().any(|c| c == child))
            },
        }
    }
}

/// Strips slashes, query string and fragment: `"/login/?next=x"` becomes `"login"`.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    segments(&path[..end]).join("/")
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}
