//! Session record snapshot and stable storage key names.
//!
//! SYSTEM CONTEXT
//! ==============
//! The record is client-local, advisory state: it decides what UI to show.
//! The backend re-validates every bearer token, so nothing here is a
//! security boundary.

#[cfg(test)]
#[path = "record_test.rs"]
mod record_test;

use crate::session::role::UserType;

/// Storage key names. These must stay byte-identical to the keys written by
/// previously deployed builds so existing persisted sessions keep resolving.
pub mod keys {
    pub const IS_AUTHENTICATED: &str = "isAuthenticated";
    pub const USER_ROLE: &str = "userRole";
    pub const AUTH_TOKEN: &str = "authToken";
    pub const ADMIN_TOKEN: &str = "adminToken";
    pub const USER_EMAIL: &str = "userEmail";

    /// Name prefixes swept by `clear` in addition to the known keys, so a
    /// stray legacy key cannot leak a stale role into a later anonymous
    /// session.
    pub const CLEAR_PREFIXES: [&str; 3] = ["user", "auth", "admin"];
}

/// Role as asserted by the last login flow, before resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StoredRole {
    Admin,
    Passenger,
    User,
    #[default]
    Unset,
}

impl StoredRole {
    /// Persisted wire form, or `None` for `Unset` (the key is absent).
    pub fn as_str(self) -> Option<&'static str> {
        match self {
            StoredRole::Admin => Some("admin"),
            StoredRole::Passenger => Some("passenger"),
            StoredRole::User => Some("user"),
            StoredRole::Unset => None,
        }
    }

    /// Parse a persisted value; anything unrecognized degrades to `Unset`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "admin" => StoredRole::Admin,
            "passenger" => StoredRole::Passenger,
            "user" => StoredRole::User,
            _ => StoredRole::Unset,
        }
    }
}

/// Client-local snapshot of authentication state, read fresh from the
/// session store on every resolution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionRecord {
    pub is_authenticated: bool,
    pub role: StoredRole,
    pub auth_token: Option<String>,
    pub admin_token: Option<String>,
    pub email: Option<String>,
}

impl SessionRecord {
    /// The bearer credential for a resolved session. Admin-resolved sessions
    /// prefer the admin token and fall back to the user token; user sessions
    /// the reverse. Anonymous sessions carry no credential.
    pub fn active_token(&self, user_type: UserType) -> Option<&str> {
        match user_type {
            UserType::Admin => self.admin_token.as_deref().or(self.auth_token.as_deref()),
            UserType::User => self.auth_token.as_deref().or(self.admin_token.as_deref()),
            UserType::Anonymous => None,
        }
    }
}
