//! Route gating.

use smp_client::AppPaths;
use smp_core::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    RedirectToLogin,
    RedirectToDashboard,
}

impl RouteDecision {
    /// Where to go instead, if anywhere.
    pub fn target<'a>(&self, paths: &'a AppPaths) -> Option<&'a str> {
        match self {
            RouteDecision::Allow => None,
            RouteDecision::RedirectToLogin => Some(&paths.login),
            RouteDecision::RedirectToDashboard => Some(&paths.dashboard),
        }
    }
}

/// Strip the query string and any trailing slash.
fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    match path.trim_end_matches('/') {
        "" => "/",
        p => p,
    }
}

/// `prefix` itself or anything below it (`/error` matches `/error/404`, not `/errors`).
fn under(path: &str, prefix: &str) -> bool {
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

pub fn is_public(paths: &AppPaths, path: &str) -> bool {
    let path = normalize(path);
    paths.public.iter().any(|p| under(path, p))
}

/// Unauthenticated users only reach public paths; authenticated users never
/// see the login screen.
pub fn gate(paths: &AppPaths, path: &str, authenticated: bool) -> RouteDecision {
    let path = normalize(path);
    if authenticated {
        if under(path, &paths.login) {
            return RouteDecision::RedirectToDashboard;
        }
        return RouteDecision::Allow;
    }
    if is_public(paths, path) {
        RouteDecision::Allow
    } else {
        RouteDecision::RedirectToLogin
    }
}

/// UI-level role check for a screen. The backend enforces its own rules.
pub fn role_allows(path: &str, role: Role) -> bool {
    let path = normalize(path);
    if under(path, "/users") {
        return role.can_manage_users();
    }
    let editing = path.ends_with("/new") || path.ends_with("/edit");
    if editing && (under(path, "/products") || under(path, "/clients")) {
        return role.can_manage_catalog();
    }
    if editing && under(path, "/orders") {
        return role.can_manage_orders();
    }
    if under(path, "/map") {
        return role.can_bind_devices();
    }
    true
}
