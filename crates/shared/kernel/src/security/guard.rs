use crate::routing::RouteDescriptor;
use artis_domain::constants::{ROUTE_BLOCKED, ROUTE_DASHBOARD, ROUTE_LOGIN, ROUTE_VERIFY_PROFILE};
use artis_domain::roles::RoleSet;
use artis_domain::session::Session;
use serde::{Deserialize, Serialize};
use std::future::{Future, ready};
use std::sync::Arc;
use strum_macros::{AsRefStr, Display};
use tokio::sync::watch;
use tracing::debug;

/// A predicate gating route activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Guard {
    /// Signed-in sessions only.
    Authenticated,
    /// Visitors only; keeps signed-in users away from login and registration.
    NotAuthenticated,
    /// Accounts whose email or phone number is confirmed.
    Verified,
    /// Sessions holding at least one of the route's permitted roles.
    Role,
}

/// Outcome of a single guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    Deny,
}

impl Verdict {
    #[must_use]
    pub const fn from_bool(allowed: bool) -> Self {
        if allowed { Self::Allow } else { Self::Deny }
    }

    #[must_use]
    pub const fn is_allow(self) -> bool {
        matches!(self, Self::Allow)
    }
}

impl Guard {
    /// Evaluates the guard against a session snapshot.
    ///
    /// `permitted` is only consulted by [`Guard::Role`]; a role guard without a
    /// permitted set denies.
    #[must_use]
    pub fn check(self, session: &Session, permitted: Option<RoleSet>) -> Verdict {
        Verdict::from_bool(match self {
            Self::Authenticated => session.authenticated,
            Self::NotAuthenticated => !session.authenticated,
            Self::Verified => session.is_verified(),
            Self::Role => permitted.is_some_and(|roles| roles.intersects(session.roles)),
        })
    }

    /// Route a denied navigation is sent to.
    #[must_use]
    pub const fn fallback(self) -> &'static str {
        match self {
            Self::Authenticated => ROUTE_LOGIN,
            Self::NotAuthenticated => ROUTE_DASHBOARD,
            Self::Verified => ROUTE_VERIFY_PROFILE,
            Self::Role => ROUTE_BLOCKED,
        }
    }
}

/// The first failing guard of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Denial {
    pub guard: Guard,
    pub redirect: &'static str,
}

/// Result of evaluating every guard of a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessDecision {
    /// Verdict of each guard, in declaration order.
    pub verdicts: Vec<(Guard, Verdict)>,
}

impl AccessDecision {
    /// Conjunction of all verdicts. A route without guards is allowed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        self.verdicts.iter().all(|(_, verdict)| verdict.is_allow())
    }

    #[must_use]
    pub fn denial(&self) -> Option<Denial> {
        self.verdicts
            .iter()
            .find(|(_, verdict)| !verdict.is_allow())
            .map(|(guard, _)| Denial { guard: *guard, redirect: guard.fallback() })
    }
}

/// Provider of the session state read by the guards.
pub trait SessionSource: Send + Sync {
    /// Current session snapshot.
    fn session(&self) -> impl Future<Output = Session> + Send;
}

impl SessionSource for Session {
    fn session(&self) -> impl Future<Output = Session> + Send {
        ready(self.clone())
    }
}

impl SessionSource for watch::Receiver<Arc<Session>> {
    fn session(&self) -> impl Future<Output = Session> + Send {
        ready(Session::clone(&self.borrow()))
    }
}

impl<S: SessionSource> SessionSource for Arc<S> {
    fn session(&self) -> impl Future<Output = Session> + Send {
        S::session(self)
    }
}

/// Evaluates route guards against a [`SessionSource`].
#[derive(Debug, Clone)]
pub struct AccessController<S> {
    sessions: S,
}

impl<S: SessionSource> AccessController<S> {
    pub const fn new(sessions: S) -> Self {
        Self { sessions }
    }

    /// Reads the session once and runs every guard of `route`, even after a deny.
    pub async fn evaluate(&self, route: &RouteDescriptor) -> AccessDecision {
        if route.guards.is_empty() {
            return AccessDecision { verdicts: Vec::new() };
        }

        let session = self.sessions.session().await;
        let verdicts = route
            .guards
            .iter()
            .map(|guard| (*guard, guard.check(&session, route.roles)))
            .collect::<Vec<_>>();

        debug!(path = %route.path, ?verdicts, "Guards evaluated");
        AccessDecision { verdicts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{RouteDescriptor, RouteTarget};

    fn music_route() -> RouteDescriptor {
        RouteDescriptor::builder()
            .path("music")
            .target(RouteTarget::Module("music".into()))
            .guards(vec![Guard::Authenticated, Guard::Verified, Guard::Role])
            .roles(Some(RoleSet::MUSICIANS))
            .build()
    }

    #[test]
    fn test_each_guard_in_isolation() {
        let visitor = Session::anonymous();
        let member = Session::signed_in(RoleSet::PODCASTERS);
        let verified = member.clone().verified();

        assert_eq!(Guard::Authenticated.check(&visitor, None), Verdict::Deny);
        assert_eq!(Guard::Authenticated.check(&member, None), Verdict::Allow);
        assert_eq!(Guard::NotAuthenticated.check(&visitor, None), Verdict::Allow);
        assert_eq!(Guard::NotAuthenticated.check(&member, None), Verdict::Deny);
        assert_eq!(Guard::Verified.check(&member, None), Verdict::Deny);
        assert_eq!(Guard::Verified.check(&verified, None), Verdict::Allow);
        assert_eq!(Guard::Role.check(&verified, Some(RoleSet::PODCASTERS)), Verdict::Allow);
        assert_eq!(Guard::Role.check(&verified, None), Verdict::Deny);
    }

    #[tokio::test]
    async fn test_wrong_role_is_denied_and_blocked() {
        let comedian = Session::signed_in(RoleSet::COMEDIANS).verified();
        let decision = AccessController::new(comedian).evaluate(&music_route()).await;

        assert!(!decision.is_allowed());
        assert_eq!(
            decision.denial(),
            Some(Denial { guard: Guard::Role, redirect: ROUTE_BLOCKED })
        );
    }

    #[tokio::test]
    async fn test_wildcard_role_names_grant_nothing() {
        let roles: RoleSet = ["*", "all"].into_iter().collect();
        let session = Session::signed_in(roles).verified();
        let decision = AccessController::new(session).evaluate(&music_route()).await;

        assert!(!decision.is_allowed());
        assert_eq!(decision.denial().map(|d| d.guard), Some(Guard::Role));
    }

    #[tokio::test]
    async fn test_every_guard_runs_after_a_deny() {
        let decision = AccessController::new(Session::anonymous()).evaluate(&music_route()).await;

        assert_eq!(decision.verdicts.len(), 3);
        assert!(decision.verdicts.iter().all(|(_, v)| *v == Verdict::Deny));
        assert_eq!(decision.denial().map(|d| d.redirect), Some(ROUTE_LOGIN));
    }

    #[tokio::test]
    async fn test_watch_source_reads_latest_session() {
        let (tx, rx) = watch::channel(Arc::new(Session::anonymous()));
        let controller = AccessController::new(rx);
        assert!(!controller.evaluate(&music_route()).await.is_allowed());

        tx.send_replace(Arc::new(Session::signed_in(RoleSet::MUSICIANS).verified()));
        assert!(controller.evaluate(&music_route()).await.is_allowed());
    }
}
