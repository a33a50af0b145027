//! Client-side routing: route tables, guard evaluation, redirect chains.
//!
//! DESIGN
//! ======
//! A navigation is resolved the way an SPA history router does it:
//! record-level redirects are followed first, then the guard runs on the
//! concrete route, and a guard redirect starts the resolution over. Chains
//! are capped so two policies that bounce between each other fail loudly
//! instead of spinning.

#[cfg(test)]
#[path = "router_test.rs"]
mod router_test;

pub mod guard;

pub use guard::{GuardMode, GuardPolicy, RouteGuard, SessionView};

pub const MAX_REDIRECTS: usize = 8;

// =============================================================================
// ROUTES
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub requires_admin: bool,
}

impl RouteMeta {
    pub const PUBLIC: Self = Self { requires_auth: false, requires_admin: false };
    pub const AUTH: Self = Self { requires_auth: true, requires_admin: false };
    pub const ADMIN: Self = Self { requires_auth: true, requires_admin: true };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRecord {
    pub path: &'static str,
    pub name: Option<&'static str>,
    pub meta: RouteMeta,
    /// Unconditional redirect applied before the guard runs.
    pub redirect: Option<&'static str>,
}

impl RouteRecord {
    #[must_use]
    pub fn page(path: &'static str, name: &'static str, meta: RouteMeta) -> Self {
        Self { path, name: Some(name), meta, redirect: None }
    }

    #[must_use]
    pub fn redirect(path: &'static str, to: &'static str) -> Self {
        Self { path, name: None, meta: RouteMeta::PUBLIC, redirect: Some(to) }
    }
}

/// Route records mounted under a history base (`/admin/`, `/`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    base: &'static str,
    routes: Vec<RouteRecord>,
}

impl RouteTable {
    #[must_use]
    pub fn new(base: &'static str, routes: Vec<RouteRecord>) -> Self {
        Self { base: base.trim_end_matches('/'), routes }
    }

    #[must_use]
    pub fn routes(&self) -> &[RouteRecord] {
        &self.routes
    }

    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&RouteRecord> {
        self.routes.iter().find(|r| r.path == path)
    }

    /// Reduce a location to a route path: drop query and fragment, strip the
    /// history base, and remove trailing slashes except on the root.
    #[must_use]
    pub fn normalize(&self, location: &str) -> String {
        let path = location
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim();

        let path = if self.base.is_empty() {
            path
        } else {
            match path.strip_prefix(self.base) {
                Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
                _ => path,
            }
        };

        let trimmed = path.trim_end_matches('/');
        if trimmed.starts_with('/') {
            trimmed.to_owned()
        } else {
            format!("/{trimmed}")
        }
    }
}

// =============================================================================
// NAVIGATION
// =============================================================================

/// A guard decision for one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Proceed,
    Redirect(String),
}

impl Navigation {
    #[must_use]
    pub fn redirect(to: &str) -> Self {
        Self::Redirect(to.to_owned())
    }
}

/// Final route a navigation landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub path: &'static str,
    pub name: Option<&'static str>,
    /// Originally requested path when a redirect changed the destination.
    pub redirected_from: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("no route matches '{0}'")]
    NotFound(String),

    #[error("too many redirects navigating to '{0}'")]
    RedirectLoop(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    table: RouteTable,
    guard: RouteGuard,
}

impl Router {
    #[must_use]
    pub fn new(table: RouteTable, guard: RouteGuard) -> Self {
        Self { table, guard }
    }

    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    #[must_use]
    pub fn guard(&self) -> &RouteGuard {
        &self.guard
    }

    pub fn set_guard_mode(&mut self, mode: GuardMode) {
        self.guard.mode = mode;
    }

    /// Resolve `location` to a route, applying redirects and the guard.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::NotFound`] when some hop matches no route
    /// and [`NavigationError::RedirectLoop`] after [`MAX_REDIRECTS`] hops.
    pub async fn navigate(&self, location: &str, session: &dyn SessionView) -> Result<Resolved, NavigationError> {
        let requested = self.table.normalize(location);
        let mut target = requested.clone();

        for _ in 0..=MAX_REDIRECTS {
            let record = self
                .table
                .resolve(&target)
                .ok_or_else(|| NavigationError::NotFound(target.clone()))?;

            if let Some(to) = record.redirect {
                target = self.table.normalize(to);
                continue;
            }

            match self.guard.check(record, session).await {
                Navigation::Proceed => {
                    let redirected_from = (requested != record.path).then_some(requested);
                    return Ok(Resolved { path: record.path, name: record.name, redirected_from });
                }
                Navigation::Redirect(to) => {
                    tracing::debug!(from = %target, %to, "navigation redirected");
                    target = self.table.normalize(&to);
                }
            }
        }

        tracing::warn!(location = %requested, "redirect loop");
        Err(NavigationError::RedirectLoop(requested))
    }
}
