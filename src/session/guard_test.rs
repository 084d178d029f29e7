use super::*;
use crate::config::RoutePaths;

fn paths() -> RoutePaths {
    RoutePaths::default()
}

fn redirect(path: &str) -> GuardDecision {
    GuardDecision::Redirect(path.to_owned())
}

// =============================================================
// Full 3x3 decision matrix
// =============================================================

#[test]
fn admin_only_renders_for_admin() {
    assert_eq!(decide(RouteAccess::AdminOnly, UserType::Admin, &paths()), GuardDecision::Render);
}

#[test]
fn admin_only_bounces_user_to_user_home() {
    // Logged in without privilege goes to its own home, not to login.
    assert_eq!(decide(RouteAccess::AdminOnly, UserType::User, &paths()), redirect("/user-dashboard"));
}

#[test]
fn admin_only_sends_anonymous_to_login() {
    assert_eq!(decide(RouteAccess::AdminOnly, UserType::Anonymous, &paths()), redirect("/login"));
}

#[test]
fn user_only_renders_for_user() {
    assert_eq!(decide(RouteAccess::UserOnly, UserType::User, &paths()), GuardDecision::Render);
}

#[test]
fn user_only_bounces_admin_to_admin_home() {
    assert_eq!(decide(RouteAccess::UserOnly, UserType::Admin, &paths()), redirect("/admin-dashboard"));
}

#[test]
fn user_only_sends_anonymous_to_login() {
    assert_eq!(decide(RouteAccess::UserOnly, UserType::Anonymous, &paths()), redirect("/login"));
}

#[test]
fn any_authenticated_renders_for_both_roles() {
    assert_eq!(decide(RouteAccess::AnyAuthenticated, UserType::Admin, &paths()), GuardDecision::Render);
    assert_eq!(decide(RouteAccess::AnyAuthenticated, UserType::User, &paths()), GuardDecision::Render);
}

#[test]
fn any_authenticated_sends_anonymous_to_login() {
    assert_eq!(decide(RouteAccess::AnyAuthenticated, UserType::Anonymous, &paths()), redirect("/login"));
}

// =============================================================
// Redirect targets
// =============================================================

#[test]
fn the_three_redirect_targets_are_distinct() {
    let login = decide(RouteAccess::AdminOnly, UserType::Anonymous, &paths());
    let user_home = decide(RouteAccess::AdminOnly, UserType::User, &paths());
    let admin_home = decide(RouteAccess::UserOnly, UserType::Admin, &paths());
    assert_ne!(login, user_home);
    assert_ne!(login, admin_home);
    assert_ne!(user_home, admin_home);
}

#[test]
fn custom_paths_flow_through() {
    let paths = RoutePaths {
        login: "/signin".to_owned(),
        user_home: "/portal".to_owned(),
        admin_home: "/back-office".to_owned(),
    };
    assert_eq!(decide(RouteAccess::UserOnly, UserType::Anonymous, &paths), redirect("/signin"));
    assert_eq!(decide(RouteAccess::AdminOnly, UserType::User, &paths), redirect("/portal"));
    assert_eq!(decide(RouteAccess::UserOnly, UserType::Admin, &paths), redirect("/back-office"));
}
