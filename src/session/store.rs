//! The session store: one per app instance, shared by reference.
//!
//! DESIGN
//! ======
//! State lives in a `watch` channel. Mutations are synchronous
//! `send_modify` calls made after the network await completes, so no lock is
//! ever held across a request and observers see each change exactly once.
//! The bootstrap is a `OnceCell`; concurrent first callers share one run.
//!
//! ERROR HANDLING
//! ==============
//! Backend and storage failures stop here. `login`/`register` return
//! [`AuthOutcome`], `check_auth` returns `bool`, `logout` cannot fail.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::Arc;

use tokio::sync::{OnceCell, watch};

use super::profile::{self, AppProfile};
use super::{AuthOutcome, Session};
use crate::api::{AuthBackend, AuthPayload, User};
use crate::storage::TokenStorage;

pub struct SessionStore {
    profile: AppProfile,
    backend: Arc<dyn AuthBackend>,
    storage: Arc<dyn TokenStorage>,
    state: watch::Sender<Session>,
    bootstrap: OnceCell<()>,
}

impl SessionStore {
    /// Create a store and rehydrate the token saved under the profile's key.
    ///
    /// The token is not trusted yet: nothing is sent to the backend until
    /// [`SessionStore::init`] runs.
    pub fn new(profile: AppProfile, backend: Arc<dyn AuthBackend>, storage: Arc<dyn TokenStorage>) -> Self {
        let token = storage.get_item(profile.storage_key);
        tracing::debug!(app = profile.name, restored = token.is_some(), "session store created");
        let (state, _) = watch::channel(Session { user: None, token, initialized: false });
        Self { profile, backend, storage, state, bootstrap: OnceCell::new() }
    }

    #[must_use]
    pub fn profile(&self) -> &AppProfile {
        &self.profile
    }

    // =========================================================================
    // READ SIDE
    // =========================================================================

    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.state.borrow().token.clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated(self.profile.auth_policy)
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.state.borrow().is_admin()
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.state.borrow().initialized
    }

    /// Receiver notified on every session change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    // =========================================================================
    // OPERATIONS
    // =========================================================================

    /// One-time bootstrap: verify a restored token, then mark initialized.
    ///
    /// A session already confirmed by `login`/`register` is not re-checked.
    /// Later calls (and concurrent callers) wait for the first run and do
    /// nothing else.
    pub async fn init(&self) {
        self.bootstrap
            .get_or_init(|| async {
                let unverified = {
                    let session = self.state.borrow();
                    session.token.clone().filter(|_| session.user.is_none())
                };
                if let Some(token) = unverified {
                    tracing::debug!(app = self.profile.name, "verifying restored token");
                    self.backend.set_bearer(&token);
                    self.check_auth().await;
                }
                self.state.send_modify(|s| s.initialized = true);
            })
            .await;
    }

    pub async fn login(&self, username: &str, password: &str) -> AuthOutcome {
        match self.backend.login(username, password).await {
            Ok(payload) => self.establish(payload),
            Err(e) => {
                tracing::warn!(app = self.profile.name, %username, error = %e, "login rejected");
                AuthOutcome::failure(e.detail().unwrap_or(profile::LOGIN_FAILED))
            }
        }
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> AuthOutcome {
        if !self.profile.allow_registration {
            return AuthOutcome::failure(profile::REGISTRATION_UNAVAILABLE);
        }
        match self.backend.register(username, email, password).await {
            Ok(payload) => self.establish(payload),
            Err(e) => {
                tracing::warn!(app = self.profile.name, %username, error = %e, "registration rejected");
                AuthOutcome::failure(e.detail().unwrap_or(profile::REGISTER_FAILED))
            }
        }
    }

    /// Drop the session locally. No backend call.
    pub fn logout(&self) {
        self.state.send_modify(Session::clear);
        if let Err(e) = self.storage.remove_item(self.profile.storage_key) {
            tracing::warn!(app = self.profile.name, error = %e, "failed to remove persisted token");
        }
        self.backend.clear_bearer();
        tracing::info!(app = self.profile.name, "logged out");
    }

    /// Refresh the identity with the attached credential.
    ///
    /// Any failure, including a non-admin identity in an admin-only app,
    /// ends the session.
    pub async fn check_auth(&self) -> bool {
        match self.backend.me().await {
            Ok(user) if self.profile.admin_only && !user.is_admin => {
                tracing::warn!(app = self.profile.name, username = %user.username, "identity lacks admin privilege");
                self.logout();
                false
            }
            Ok(user) => {
                self.state.send_modify(|s| s.user = Some(user));
                true
            }
            Err(e) => {
                tracing::warn!(app = self.profile.name, error = %e, "identity check failed");
                self.logout();
                false
            }
        }
    }

    fn establish(&self, payload: AuthPayload) -> AuthOutcome {
        let AuthPayload { user, token } = payload;
        if self.profile.admin_only && !user.is_admin {
            tracing::warn!(app = self.profile.name, username = %user.username, "non-admin login refused");
            return AuthOutcome::failure(profile::ADMIN_REQUIRED);
        }
        if let Err(e) = self.storage.set_item(self.profile.storage_key, &token) {
            tracing::warn!(app = self.profile.name, error = %e, "failed to persist token");
            return AuthOutcome::failure(profile::PERSIST_FAILED);
        }
        self.backend.set_bearer(&token);
        tracing::info!(app = self.profile.name, username = %user.username, "session established");
        self.state.send_modify(|s| {
            s.user = Some(user);
            s.token = Some(token);
        });
        AuthOutcome::Success
    }
}
