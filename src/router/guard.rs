//! Pre-navigation guard.
//!
//! The guard never mutates the session. It waits for the bootstrap, reads the
//! derived flags, and answers proceed-or-redirect.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use super::{Navigation, RouteRecord};
use crate::session::SessionStore;

/// Read-only view of a session as consulted by the guard.
#[async_trait::async_trait]
pub trait SessionView: Send + Sync {
    /// Wait until the one-time bootstrap has finished.
    async fn ensure_initialized(&self);

    fn is_authenticated(&self) -> bool;

    fn is_admin(&self) -> bool;
}

#[async_trait::async_trait]
impl SessionView for SessionStore {
    async fn ensure_initialized(&self) {
        self.init().await;
    }

    fn is_authenticated(&self) -> bool {
        SessionStore::is_authenticated(self)
    }

    fn is_admin(&self) -> bool {
        SessionStore::is_admin(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardMode {
    Enforced,
    /// Every navigation proceeds; route metadata is ignored.
    Disabled,
}

/// Where the guard sends rejected navigations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardPolicy {
    pub login_path: &'static str,
    pub home_path: &'static str,
    /// Redirect for authenticated users lacking admin privilege.
    pub forbidden_path: &'static str,
    /// Routes an authenticated user is bounced away from.
    pub guest_only: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteGuard {
    pub mode: GuardMode,
    pub policy: GuardPolicy,
}

impl RouteGuard {
    #[must_use]
    pub fn new(mode: GuardMode, policy: GuardPolicy) -> Self {
        Self { mode, policy }
    }

    /// Decide a single transition to `to`.
    ///
    /// Checks run in order: bootstrap, auth, admin, guest-only, proceed.
    pub async fn check(&self, to: &RouteRecord, session: &dyn SessionView) -> Navigation {
        if self.mode == GuardMode::Disabled {
            return Navigation::Proceed;
        }

        session.ensure_initialized().await;

        if to.meta.requires_auth && !session.is_authenticated() {
            tracing::debug!(to = to.path, "guard: authentication required");
            Navigation::redirect(self.policy.login_path)
        } else if to.meta.requires_admin && !session.is_admin() {
            tracing::debug!(to = to.path, "guard: admin required");
            Navigation::redirect(self.policy.forbidden_path)
        } else if self.policy.guest_only.contains(&to.path) && session.is_authenticated() {
            Navigation::redirect(self.policy.home_path)
        } else {
            Navigation::Proceed
        }
    }
}
