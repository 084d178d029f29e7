//! Application configuration: redirect targets, admin allow-list, API
//! endpoints, and network limits.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route paths and the administrator allow-list are configuration, not
//! logic: the guard and resolver take them as inputs so tests and future
//! deployments can swap them without touching the subsystem.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// The three redirect targets the route guard needs. All three must be
/// distinct paths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoutePaths {
    pub login: String,
    pub user_home: String,
    pub admin_home: String,
}

impl Default for RoutePaths {
    fn default() -> Self {
        Self {
            login: "/login".to_owned(),
            user_home: "/user-dashboard".to_owned(),
            admin_home: "/admin-dashboard".to_owned(),
        }
    }
}

/// Email addresses treated as administrators regardless of the stored role
/// flag. Relied on as a recovery path for sessions written before the role
/// flag existed, so it must never collapse to a single hardcoded value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminAllowlist {
    emails: Vec<String>,
}

impl AdminAllowlist {
    pub fn new(emails: Vec<String>) -> Self {
        Self { emails }
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, email: &str) -> bool {
        let email = email.trim();
        self.emails.iter().any(|entry| entry.eq_ignore_ascii_case(email))
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}

impl Default for AdminAllowlist {
    fn default() -> Self {
        Self::new(vec![
            "adm.railmadad@gmail.com".to_owned(),
            "admin@railmadad.in".to_owned(),
        ])
    }
}

/// Top-level client configuration.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub paths: RoutePaths,
    pub admin_emails: AdminAllowlist,
    /// Base URL prefix for backend REST calls.
    pub api_base: String,
    /// Bound on every backend request; a timed-out request surfaces as a
    /// retryable failure and never mutates the session.
    pub request_timeout_ms: u32,
    /// Identity-provider project key for the REST auth endpoints.
    pub firebase_api_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            paths: RoutePaths::default(),
            admin_emails: AdminAllowlist::default(),
            api_base: "/api".to_owned(),
            request_timeout_ms: 30_000,
            firebase_api_key: String::new(),
        }
    }
}
