//! Route guard
//!
//! Pure decision function over the session state and a route's required
//! roles. No I/O; evaluating a guard never fails.

use shared::models::Role;

use crate::session::SessionState;

/// Who a protected route is meant for; picks the login entry point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    Public,
    Admin,
    Stylist,
}

impl Audience {
    pub const fn login_path(&self) -> &'static str {
        match self {
            Self::Public => "/login",
            Self::Admin => "/admin/login",
            Self::Stylist => "/stylist/login",
        }
    }
}

/// Dashboard a signed-in role lands on
pub const fn landing_path(role: Role) -> &'static str {
    match role {
        Role::Admin => "/admin",
        Role::Stylist => "/stylist",
        Role::User => "/",
    }
}

/// Outcome of a guard evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Startup check pending; show a placeholder, decide nothing yet
    Loading,
    /// Leave the view. `replace` drops the guarded entry from history.
    Redirect { to: &'static str, replace: bool },
    /// Show the protected view
    Render,
}

/// Required audience and (optionally) roles of a protected route.
///
/// `roles: None` admits any authenticated identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteGuard {
    pub audience: Audience,
    pub roles: Option<&'static [Role]>,
}

impl RouteGuard {
    /// Any signed-in identity
    pub const fn authenticated(audience: Audience) -> Self {
        Self {
            audience,
            roles: None,
        }
    }

    /// Only the listed roles
    pub const fn roles(audience: Audience, roles: &'static [Role]) -> Self {
        Self {
            audience,
            roles: Some(roles),
        }
    }

    pub const fn admin() -> Self {
        Self::roles(Audience::Admin, &[Role::Admin])
    }

    pub const fn stylist() -> Self {
        Self::roles(Audience::Stylist, &[Role::Stylist])
    }

    pub const fn user() -> Self {
        Self::roles(Audience::Public, &[Role::User])
    }

    pub fn allows(&self, role: Role) -> bool {
        self.roles.is_none_or(|roles| roles.contains(&role))
    }

    pub fn evaluate(&self, session: &SessionState) -> GuardDecision {
        match session {
            SessionState::Unchecked => GuardDecision::Loading,
            SessionState::Anonymous => GuardDecision::Redirect {
                to: self.audience.login_path(),
                replace: true,
            },
            SessionState::Authenticated(user) if self.allows(user.role) => GuardDecision::Render,
            SessionState::Authenticated(user) => GuardDecision::Redirect {
                to: landing_path(user.role),
                replace: true,
            },
        }
    }
}
