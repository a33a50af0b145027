//! REST client for the gateway backend.
//!
//! DESIGN
//! ======
//! `ApiClient` owns one `reqwest::Client` plus a mutable bearer credential
//! that is attached to every session-scoped request. The session store only
//! sees the [`AuthBackend`] trait, so its policies are testable without a
//! network.
//!
//! ERROR HANDLING
//! ==============
//! All calls return [`ApiError`]. Non-2xx responses keep the status and the
//! backend's `detail` message when it is a plain string.

pub mod chat;
pub mod client;
pub mod error;
pub mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use types::{AuthPayload, User};

/// Backend operations the session store depends on.
#[async_trait::async_trait]
pub trait AuthBackend: Send + Sync {
    /// Attach `token` as `Authorization: Bearer <token>` for later calls.
    fn set_bearer(&self, token: &str);

    /// Stop sending an `Authorization` header.
    fn clear_bearer(&self);

    /// `POST /auth/login`.
    async fn login(&self, username: &str, password: &str) -> Result<AuthPayload, ApiError>;

    /// `POST /auth/register`.
    async fn register(&self, username: &str, email: &str, password: &str) -> Result<AuthPayload, ApiError>;

    /// `GET /auth/me` using the attached bearer.
    async fn me(&self) -> Result<User, ApiError>;
}
