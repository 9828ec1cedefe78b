//! Route table
//!
//! Static description of the application's navigable paths and the guard
//! protecting each of them. Paths use `:name` for parameter segments.

use shared::models::Role;

use crate::guard::{GuardDecision, RouteGuard};
use crate::session::SessionState;

/// How a route is gated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Protected(RouteGuard),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDef {
    pub path: &'static str,
    pub access: Access,
}

const fn public(path: &'static str) -> RouteDef {
    RouteDef {
        path,
        access: Access::Public,
    }
}

const fn protected(path: &'static str, guard: RouteGuard) -> RouteDef {
    RouteDef {
        path,
        access: Access::Protected(guard),
    }
}

pub static ROUTES: &[RouteDef] = &[
    // Public
    public("/"),
    public("/login"),
    public("/signup"),
    public("/verify-otp"),
    public("/verify-phone-otp"),
    public("/forgot-password"),
    public("/verify-reset-otp"),
    public("/new-password"),
    public("/contact"),
    // Admin
    public("/admin/login"),
    protected("/admin", RouteGuard::admin()),
    protected("/admin/stylists", RouteGuard::admin()),
    protected("/admin/users", RouteGuard::admin()),
    protected("/admin/bookings", RouteGuard::admin()),
    protected("/admin/settings", RouteGuard::admin()),
    protected("/admin/categories", RouteGuard::admin()),
    protected("/admin/services", RouteGuard::admin()),
    protected("/admin/branches", RouteGuard::admin()),
    // Stylist
    public("/stylist/login"),
    public("/stylist/invite/:token"),
    protected("/stylist", RouteGuard::stylist()),
    protected("/stylist/profile", RouteGuard::stylist()),
    // User
    protected("/user", RouteGuard::user()),
    protected("/user/profile", RouteGuard::user()),
];

/// Dashboard path for `role`
pub fn landing_route(role: Role) -> &'static str {
    crate::guard::landing_path(role)
}

fn matches(pattern: &str, path: &str) -> bool {
    let mut pattern_segments = pattern.split('/').filter(|s| !s.is_empty());
    let mut path_segments = path.split('/').filter(|s| !s.is_empty());
    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return true,
            (Some(p), Some(s)) if p.starts_with(':') || p == s => {}
            _ => return false,
        }
    }
}

/// Find the route for a concrete path. Query string, fragment and trailing
/// slashes are ignored.
pub fn resolve(path: &str) -> Option<&'static RouteDef> {
    let path = path
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    ROUTES.iter().find(|route| matches(route.path, path))
}

/// Guard decision for `path`; `None` when no route matches
pub fn evaluate(path: &str, session: &SessionState) -> Option<GuardDecision> {
    resolve(path).map(|route| match route.access {
        Access::Public => GuardDecision::Render,
        Access::Protected(guard) => guard.evaluate(session),
    })
}
