//! Client configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_STATE_FILE: &str = ".gateway-session.json";

/// Errors produced while building a [`ClientConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid API base URL '{0}' (expected http:// or https://)")]
    InvalidApiBase(String),

    #[error("unknown GATEWAY_APP: {0} (expected 'admin' or 'chat')")]
    UnknownApp(String),
}

/// Which frontend the client acts as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppKind {
    Admin,
    Chat,
}

impl AppKind {
    /// Parse an app name as accepted by `GATEWAY_APP` and the CLI.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownApp`] for anything but `admin` or `chat`.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "chat" => Ok(Self::Chat),
            other => Err(ConfigError::UnknownApp(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: String,
    pub timeouts: Timeouts,
    pub state_file: PathBuf,
    pub app: AppKind,
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `GATEWAY_API_BASE`: backend root URL, default `http://127.0.0.1:8000`
    /// - `GATEWAY_REQUEST_TIMEOUT_SECS`: default 30
    /// - `GATEWAY_CONNECT_TIMEOUT_SECS`: default 10
    /// - `GATEWAY_STATE_FILE`: token storage file, default `.gateway-session.json`
    /// - `GATEWAY_APP`: `admin` (default) or `chat`
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or app name is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base = normalize_api_base(
            &std::env::var("GATEWAY_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_owned()),
        )?;
        let timeouts = Timeouts {
            request_secs: env_parse_u64("GATEWAY_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("GATEWAY_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        let state_file = std::env::var("GATEWAY_STATE_FILE")
            .map_or_else(|_| PathBuf::from(DEFAULT_STATE_FILE), PathBuf::from);
        let app = match std::env::var("GATEWAY_APP") {
            Ok(raw) => AppKind::parse(&raw)?,
            Err(_) => AppKind::Admin,
        };

        Ok(Self { api_base, timeouts, state_file, app })
    }
}

/// Validate the scheme and drop trailing slashes so paths can be appended.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidApiBase`] when the URL is not http(s).
pub fn normalize_api_base(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidApiBase(raw.to_owned()));
    }
    Ok(trimmed.to_owned())
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}
