//! Wire DTOs for the `/auth/*` endpoints.
//!
//! DESIGN
//! ======
//! Field names mirror the backend's JSON so serde needs no renames. Optional
//! profile fields default when absent; `is_admin` in particular defaults to
//! `false` so a missing flag never grants privileges.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Identity record returned by login, registration and `/auth/me`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub monthly_quota_tokens: i64,
    #[serde(default)]
    pub monthly_quota_amount: f64,
}

fn default_true() -> bool {
    true
}

/// Successful login/registration body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthPayload {
    pub user: User,
    pub token: String,
}

#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Error body. FastAPI validation errors carry a list here instead of a string.
#[derive(Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: serde_json::Value,
}

/// Extract a user-facing `detail` string from an error response body.
pub(crate) fn error_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .detail
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
}
