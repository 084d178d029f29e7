//! Browser `localStorage` backing store.
//!
//! SYSTEM CONTEXT
//! ==============
//! `localStorage` is shared across every tab of the origin, so each `get`
//! re-reads the live store instead of caching. A disabled or unreadable
//! store degrades to the default unauthenticated record.

use crate::session::record::SessionRecord;
use crate::session::store::{SessionPatch, SessionStore};

/// `SessionStore` over `window.localStorage`. Requires a browser
/// environment; on the server every operation is an inert no-op.
#[derive(Clone, Copy, Debug, Default)]
pub struct WebStore;

impl WebStore {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl SessionStore for WebStore {
    fn get(&self) -> SessionRecord {
        #[cfg(feature = "hydrate")]
        {
            let Some(storage) = local_storage() else {
                return SessionRecord::default();
            };
            crate::session::store::decode_record(|key| storage.get_item(key).ok().flatten())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            SessionRecord::default()
        }
    }

    fn set(&self, patch: &SessionPatch) {
        #[cfg(feature = "hydrate")]
        {
            let Some(storage) = local_storage() else {
                return;
            };
            for (key, value) in crate::session::store::patch_entries(patch) {
                match value {
                    Some(value) => {
                        let _ = storage.set_item(key, &value);
                    }
                    None => {
                        let _ = storage.remove_item(key);
                    }
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = patch;
        }
    }

    fn clear(&self) {
        #[cfg(feature = "hydrate")]
        {
            let Some(storage) = local_storage() else {
                return;
            };
            // Collect first: removing while indexing shifts positions.
            let mut doomed = Vec::new();
            let len = storage.length().unwrap_or(0);
            for i in 0..len {
                if let Ok(Some(key)) = storage.key(i) {
                    if crate::session::store::should_sweep(&key) {
                        doomed.push(key);
                    }
                }
            }
            for key in doomed {
                let _ = storage.remove_item(&key);
            }
        }
    }
}
