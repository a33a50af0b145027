//! # gateway-session
//!
//! Client-side session and route-guard core for the LLM gateway frontends.
//!
//! Two apps share the same machinery: the admin console (every page needs an
//! administrator) and the end-user chat client (guard shipped disabled). Each
//! app is an explicitly constructed [`apps::App`] wrapping a
//! [`session::SessionStore`] and a [`router::Router`].
//!
//! DESIGN
//! ======
//! - `api`: typed HTTP client for the gateway REST surface.
//! - `storage`: local-storage style persistence for the bearer token.
//! - `session`: the session store and its per-app profiles.
//! - `router`: route tables, the navigation guard and redirect resolution.
//! - `apps`: wiring of the two shipped apps.
//! - `config`: environment-driven client configuration.

pub mod api;
pub mod apps;
pub mod config;
pub mod router;
pub mod session;
pub mod storage;
