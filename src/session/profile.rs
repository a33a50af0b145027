//! Per-app session policies.
//!
//! The admin console and the chat client run the same store with different
//! knobs; none of the differences are accidental and they stay separate.

/// What "authenticated" means for an app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPolicy {
    /// A token alone counts, even before the identity check confirms it.
    TokenOnly,
    /// Both a token and a confirmed user are required.
    TokenAndUser,
}

/// When the one-time identity bootstrap runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bootstrap {
    /// Deferred until the guard evaluates the first navigation.
    OnFirstNavigation,
    /// Run by the app constructor before any navigation.
    AtConstruction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppProfile {
    pub name: &'static str,
    /// Token storage key, distinct per app.
    pub storage_key: &'static str,
    pub auth_policy: AuthPolicy,
    /// Reject identities without `is_admin`.
    pub admin_only: bool,
    pub allow_registration: bool,
    pub bootstrap: Bootstrap,
}

pub const ADMIN_CONSOLE: AppProfile = AppProfile {
    name: "admin-console",
    storage_key: "admin-token",
    auth_policy: AuthPolicy::TokenAndUser,
    admin_only: true,
    allow_registration: false,
    bootstrap: Bootstrap::OnFirstNavigation,
};

pub const CHAT_CLIENT: AppProfile = AppProfile {
    name: "chat-client",
    storage_key: "token",
    auth_policy: AuthPolicy::TokenOnly,
    admin_only: false,
    allow_registration: true,
    bootstrap: Bootstrap::AtConstruction,
};

pub const LOGIN_FAILED: &str = "login failed";
pub const REGISTER_FAILED: &str = "registration failed";
pub const ADMIN_REQUIRED: &str = "administrator privileges are required to access the admin console";
pub const REGISTRATION_UNAVAILABLE: &str = "registration is not available for this app";
pub const PERSIST_FAILED: &str = "failed to persist session token";
