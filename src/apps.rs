//! The two shipped apps: admin console and chat client.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both apps pair a [`SessionStore`] with a [`Router`]. They differ in
//! profile, route surface, guard mode and bootstrap timing:
//!
//! - admin console: every page needs an administrator, the guard is enforced
//!   and awaits the bootstrap on the first navigation;
//! - chat client: the guard ships disabled (open door) and the bootstrap runs
//!   while the app is being constructed.

#[cfg(test)]
#[path = "apps_test.rs"]
mod apps_test;

use std::sync::Arc;

use crate::api::AuthBackend;
use crate::config::AppKind;
use crate::router::{
    GuardMode, GuardPolicy, NavigationError, Resolved, RouteGuard, RouteMeta, RouteRecord, RouteTable, Router,
};
use crate::session::{ADMIN_CONSOLE, Bootstrap, CHAT_CLIENT, SessionStore};
use crate::storage::TokenStorage;

pub const ADMIN_GUARD_POLICY: GuardPolicy = GuardPolicy {
    login_path: "/login",
    home_path: "/",
    forbidden_path: "/login",
    guest_only: &["/login"],
};

pub const CHAT_GUARD_POLICY: GuardPolicy = GuardPolicy {
    login_path: "/login",
    home_path: "/chat",
    forbidden_path: "/chat",
    guest_only: &["/login", "/register"],
};

/// Admin console routes, mounted under `/admin/`.
#[must_use]
pub fn admin_routes() -> RouteTable {
    RouteTable::new(
        "/admin/",
        vec![
            RouteRecord::page("/login", "Login", RouteMeta::PUBLIC),
            RouteRecord::page("/", "Dashboard", RouteMeta::ADMIN),
            RouteRecord::page("/users", "Users", RouteMeta::ADMIN),
            RouteRecord::page("/api-keys", "ApiKeys", RouteMeta::ADMIN),
            RouteRecord::page("/usage", "Usage", RouteMeta::ADMIN),
        ],
    )
}

/// Chat client routes, mounted at the site root.
#[must_use]
pub fn chat_routes() -> RouteTable {
    RouteTable::new(
        "/",
        vec![
            RouteRecord::page("/login", "Login", RouteMeta::PUBLIC),
            RouteRecord::page("/register", "Register", RouteMeta::PUBLIC),
            RouteRecord::page("/chat", "Chat", RouteMeta::AUTH),
            RouteRecord::redirect("/", "/chat"),
        ],
    )
}

pub struct App {
    store: Arc<SessionStore>,
    router: Router,
}

impl App {
    /// Admin console. The bootstrap waits for the first navigation.
    pub fn admin_console(backend: Arc<dyn AuthBackend>, storage: Arc<dyn TokenStorage>) -> Self {
        let store = Arc::new(SessionStore::new(ADMIN_CONSOLE, backend, storage));
        let router = Router::new(admin_routes(), RouteGuard::new(GuardMode::Enforced, ADMIN_GUARD_POLICY));
        Self { store, router }
    }

    /// Chat client. The restored token is verified before this returns.
    pub async fn chat_client(backend: Arc<dyn AuthBackend>, storage: Arc<dyn TokenStorage>) -> Self {
        let store = Arc::new(SessionStore::new(CHAT_CLIENT, backend, storage));
        if store.profile().bootstrap == Bootstrap::AtConstruction {
            store.init().await;
        }
        // Route metadata is declared but not enforced.
        let router = Router::new(chat_routes(), RouteGuard::new(GuardMode::Disabled, CHAT_GUARD_POLICY));
        Self { store, router }
    }

    /// Build the app selected by configuration.
    pub async fn for_kind(kind: AppKind, backend: Arc<dyn AuthBackend>, storage: Arc<dyn TokenStorage>) -> Self {
        match kind {
            AppKind::Admin => Self::admin_console(backend, storage),
            AppKind::Chat => Self::chat_client(backend, storage).await,
        }
    }

    /// Override the guard mode, e.g. to enforce the chat client's policy.
    #[must_use]
    pub fn with_guard_mode(mut self, mode: GuardMode) -> Self {
        self.router.set_guard_mode(mode);
        self
    }

    #[must_use]
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.store
    }

    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Navigate to `location` against this app's session.
    ///
    /// # Errors
    ///
    /// See [`Router::navigate`].
    pub async fn navigate(&self, location: &str) -> Result<Resolved, NavigationError> {
        self.router.navigate(location, self.store.as_ref()).await
    }
}
