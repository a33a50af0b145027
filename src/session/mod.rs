//! Session state, derived flags and the store that mutates them.
//!
//! DESIGN
//! ======
//! [`Session`] is a plain value; the derived flags are pure functions of it
//! and the app's [`AuthPolicy`]. [`SessionStore`] is the only writer.


pub mod profile;
pub mod store;

pub use profile::{ADMIN_CONSOLE, AppProfile, AuthPolicy, Bootstrap, CHAT_CLIENT};
pub use store::SessionStore;

use crate::api::User;

/// Authentication state for one app instance.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    /// Identity confirmed by the backend; `None` until login or `/auth/me`.
    pub user: Option<User>,
    /// Bearer credential; `None` means logged out.
    pub token: Option<String>,
    /// Set once the one-time bootstrap has finished, whatever its result.
    pub initialized: bool,
}

impl Session {
    #[must_use]
    pub fn is_authenticated(&self, policy: AuthPolicy) -> bool {
        match policy {
            AuthPolicy::TokenOnly => self.token.is_some(),
            AuthPolicy::TokenAndUser => self.token.is_some() && self.user.is_some(),
        }
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_admin)
    }

    fn clear(&mut self) {
        self.user = None;
        self.token = None;
    }
}

/// Result of a login or registration attempt.
///
/// Failures are values, never errors: callers render `error` directly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    Success,
    Failure { error: String },
}

impl AuthOutcome {
    pub(crate) fn failure(error: impl Into<String>) -> Self {
        Self::Failure { error: error.into() }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success => None,
            Self::Failure { error } => Some(error),
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
