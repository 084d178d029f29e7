//! Client-side session and authorization model.
//!
//! ARCHITECTURE
//! ============
//! `store` holds the persisted record, `role` classifies a snapshot of it,
//! `guard` turns a classification into a render/redirect decision, and
//! `notifier` tells consumers when to re-resolve. `mutators` are the only
//! writers. None of this is a security boundary: the backend re-validates
//! every token, and this model only drives UI routing.

pub mod guard;
pub mod mutators;
pub mod notifier;
pub mod record;
pub mod role;
pub mod store;
pub mod web;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::session::notifier::ChangeNotifier;
use crate::session::record::SessionRecord;
use crate::session::role::{UserType, resolve_role};
use crate::session::store::SessionStore;

/// Shared handle provided through Leptos context: the store, the notifier,
/// and the configuration every consumer resolves against.
#[derive(Clone)]
pub struct SessionContext {
    pub store: Arc<dyn SessionStore>,
    pub notifier: ChangeNotifier,
    pub config: Arc<AppConfig>,
}

impl SessionContext {
    pub fn new(store: Arc<dyn SessionStore>, config: AppConfig) -> Self {
        Self {
            store,
            notifier: ChangeNotifier::new(),
            config: Arc::new(config),
        }
    }

    /// Fresh read + resolution in one step.
    pub fn snapshot(&self) -> (SessionRecord, UserType) {
        let record = self.store.get();
        let user_type = resolve_role(&record, &self.config.admin_emails);
        (record, user_type)
    }

    /// Resolve the current classification without keeping the record.
    pub fn user_type(&self) -> UserType {
        self.snapshot().1
    }
}
