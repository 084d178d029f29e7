//! Session store abstraction over persisted key/value state.
//!
//! DESIGN
//! ======
//! All reads and writes of session state go through `SessionStore`; no page
//! or component touches raw persistence directly. `get` reads every field
//! fresh, since another tab may have written the backing store since the
//! last call. Only the session mutators write.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use crate::session::record::{SessionRecord, StoredRole, keys};

/// Partial write: `None` fields are left untouched in the backing store.
#[derive(Clone, Debug, Default)]
pub struct SessionPatch {
    pub is_authenticated: Option<bool>,
    pub role: Option<StoredRole>,
    pub auth_token: Option<String>,
    pub admin_token: Option<String>,
    pub email: Option<String>,
}

impl SessionPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn authenticated(mut self, value: bool) -> Self {
        self.is_authenticated = Some(value);
        self
    }

    pub fn role(mut self, role: StoredRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn admin_token(mut self, token: impl Into<String>) -> Self {
        self.admin_token = Some(token.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Persisted session state. Implementations must make `clear` idempotent:
/// removing an absent key is a no-op, never an error.
pub trait SessionStore: Send + Sync {
    /// Fresh snapshot of every field. Unreadable backing stores degrade to
    /// the default (unauthenticated) record rather than failing.
    fn get(&self) -> SessionRecord;

    /// Write only the fields present in `patch`.
    fn set(&self, patch: &SessionPatch);

    /// Remove every key belonging to the session, including legacy keys
    /// matching the session name prefixes.
    fn clear(&self);
}

/// Decode a record from a raw key lookup. Shared by every backing store so
/// browser and in-memory semantics cannot drift.
pub(crate) fn decode_record(read: impl Fn(&str) -> Option<String>) -> SessionRecord {
    SessionRecord {
        is_authenticated: read(keys::IS_AUTHENTICATED).as_deref() == Some("true"),
        role: read(keys::USER_ROLE).as_deref().map(StoredRole::parse).unwrap_or_default(),
        auth_token: read(keys::AUTH_TOKEN).filter(|t| !t.is_empty()),
        admin_token: read(keys::ADMIN_TOKEN).filter(|t| !t.is_empty()),
        email: read(keys::USER_EMAIL).filter(|e| !e.is_empty()),
    }
}

/// Flatten a patch into raw key writes. A `StoredRole::Unset` role write
/// removes the key, encoded here as a `None` value.
pub(crate) fn patch_entries(patch: &SessionPatch) -> Vec<(&'static str, Option<String>)> {
    let mut entries = Vec::new();
    if let Some(flag) = patch.is_authenticated {
        entries.push((keys::IS_AUTHENTICATED, Some(if flag { "true" } else { "false" }.to_owned())));
    }
    if let Some(role) = patch.role {
        entries.push((keys::USER_ROLE, role.as_str().map(str::to_owned)));
    }
    if let Some(token) = &patch.auth_token {
        entries.push((keys::AUTH_TOKEN, Some(token.clone())));
    }
    if let Some(token) = &patch.admin_token {
        entries.push((keys::ADMIN_TOKEN, Some(token.clone())));
    }
    if let Some(email) = &patch.email {
        entries.push((keys::USER_EMAIL, Some(email.clone())));
    }
    entries
}

/// Whether `clear` must remove this key: either a known session key or a
/// legacy key under one of the session prefixes.
pub(crate) fn should_sweep(key: &str) -> bool {
    keys::CLEAR_PREFIXES.iter().any(|prefix| key.starts_with(prefix))
        || key == keys::IS_AUTHENTICATED
        || key == "token"
}

/// In-memory store for native builds and tests, backed by a raw key/value
/// map so prefix-sweep semantics match the browser store exactly.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seed a raw key, bypassing the record schema. Used to model legacy
    /// keys left behind by earlier builds.
    pub fn insert_raw(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries().insert(key.into(), value.into());
    }

    /// Raw key names currently present, in sorted order.
    pub fn raw_keys(&self) -> Vec<String> {
        self.entries().keys().cloned().collect()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self) -> SessionRecord {
        let entries = self.entries();
        decode_record(|key| entries.get(key).cloned())
    }

    fn set(&self, patch: &SessionPatch) {
        let mut entries = self.entries();
        for (key, value) in patch_entries(patch) {
            match value {
                Some(value) => {
                    entries.insert(key.to_owned(), value);
                }
                None => {
                    entries.remove(key);
                }
            }
        }
    }

    fn clear(&self) {
        self.entries().retain(|key, _| !should_sweep(key));
    }
}
