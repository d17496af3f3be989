//! Route access control.

pub mod guard;

pub use guard::{AccessController, AccessDecision, Denial, Guard, SessionSource, Verdict};
