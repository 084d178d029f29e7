//! Role resolution: classify a session snapshot for routing.
//!
//! DESIGN
//! ======
//! This is the single place that derives a role from session state. Pages
//! and components must call `resolve_role` instead of re-reading keys, so
//! the precedence rules stay auditable in one function.

#[cfg(test)]
#[path = "role_test.rs"]
mod role_test;

use crate::config::AdminAllowlist;
use crate::session::record::{SessionRecord, StoredRole};

/// Resolved classification driving route guards and navigation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UserType {
    Admin,
    User,
    #[default]
    Anonymous,
}

/// Classify a session snapshot. Pure and total: malformed or missing fields
/// degrade toward the least-privileged answer, never a panic.
///
/// Precedence, first match wins:
/// 1. not authenticated -> `Anonymous`, regardless of any other field;
/// 2. admin token present and role `admin` -> `Admin`;
/// 3. email on the administrator allow-list -> `Admin` (recovery path for
///    sessions written before the role flag was set);
/// 4. role `admin` alone -> `Admin`;
/// 5. any other authenticated session -> `User`.
pub fn resolve_role(record: &SessionRecord, allowlist: &AdminAllowlist) -> UserType {
    if !record.is_authenticated {
        return UserType::Anonymous;
    }
    if record.admin_token.is_some() && record.role == StoredRole::Admin {
        return UserType::Admin;
    }
    if record.email.as_deref().is_some_and(|email| allowlist.contains(email)) {
        return UserType::Admin;
    }
    if record.role == StoredRole::Admin {
        return UserType::Admin;
    }
    UserType::User
}
