//! Route guarding: map (required access, resolved role) to render/redirect.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::config::RoutePaths;
use crate::session::role::UserType;

/// Role requirement attached to a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteAccess {
    /// Any authenticated session may render.
    AnyAuthenticated,
    /// Admin sessions only.
    AdminOnly,
    /// Non-admin authenticated sessions only.
    UserOnly,
}

/// Outcome of a guard evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(String),
}

/// Decide whether a route renders or where it redirects.
///
/// An unauthenticated visitor always goes to the login path. An
/// authenticated session hitting a route for the other role is bounced to
/// its own home, not to login, which distinguishes "not logged in" from
/// "logged in without privilege".
pub fn decide(access: RouteAccess, user_type: UserType, paths: &RoutePaths) -> GuardDecision {
    match (access, user_type) {
        (_, UserType::Anonymous) => GuardDecision::Redirect(paths.login.clone()),
        (RouteAccess::AnyAuthenticated, _)
        | (RouteAccess::AdminOnly, UserType::Admin)
        | (RouteAccess::UserOnly, UserType::User) => GuardDecision::Render,
        (RouteAccess::AdminOnly, UserType::User) => GuardDecision::Redirect(paths.user_home.clone()),
        (RouteAccess::UserOnly, UserType::Admin) => GuardDecision::Redirect(paths.admin_home.clone()),
    }
}
