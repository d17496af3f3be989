use crate::roles::RoleSet;
use serde::{Deserialize, Serialize};

/// Verification status of the signed-in account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verification {
    /// Email or phone number not confirmed yet.
    #[default]
    Pending,
    Confirmed,
}

/// Identity state read by the route guards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    pub authenticated: bool,
    pub verification: Verification,
    pub roles: RoleSet,
}

impl Session {
    /// A visitor without an account.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A signed-in, not yet verified account holding `roles`.
    #[must_use]
    pub const fn signed_in(roles: RoleSet) -> Self {
        Self { authenticated: true, verification: Verification::Pending, roles }
    }

    #[must_use]
    pub const fn verified(mut self) -> Self {
        self.verification = Verification::Confirmed;
        self
    }

    #[must_use]
    pub fn is_verified(&self) -> bool {
        self.verification == Verification::Confirmed
    }
}
