//! Change notification for session mutations.
//!
//! ARCHITECTURE
//! ============
//! Two triggers feed the same subscriber list: the browser's native
//! `storage` event (fired when another tab writes `localStorage`) and the
//! application-dispatched `userTypeChanged` event (fired by this tab after
//! a local mutation, because the browser never delivers `storage` to the
//! writer's own context). Subscribers get no payload; they re-read the
//! store and re-resolve, so racing mutations can never deliver stale state.

#[cfg(test)]
#[path = "notifier_test.rs"]
mod notifier_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Name of the same-tab custom event dispatched after every local mutation.
/// Stable across builds; external scripts listen for it.
pub const SESSION_CHANGED_EVENT: &str = "userTypeChanged";

type Callback = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    subscribers: Vec<(u64, Callback)>,
}

/// In-process pub/sub signaling "the session may have changed".
#[derive(Clone, Default)]
pub struct ChangeNotifier {
    registry: Arc<Mutex<Registry>>,
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback; the returned handle revokes it.
    pub fn subscribe(&self, callback: impl Fn() + Send + Sync + 'static) -> Subscription {
        let mut registry = lock(&self.registry);
        let id = registry.next_id;
        registry.next_id += 1;
        registry.subscribers.push((id, Arc::new(callback)));
        Subscription {
            registry: Arc::clone(&self.registry),
            id,
        }
    }

    /// Invoke every current subscriber exactly once, synchronously. The
    /// list is snapshotted first, so a callback that subscribes or
    /// publishes reentrantly cannot deadlock or corrupt delivery.
    pub fn publish(&self) {
        let callbacks: Vec<Callback> = lock(&self.registry)
            .subscribers
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();
        for callback in callbacks {
            callback();
        }
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.registry).subscribers.len()
    }
}

/// Revocable subscription handle. `cancel` is idempotent.
pub struct Subscription {
    registry: Arc<Mutex<Registry>>,
    id: u64,
}

impl Subscription {
    pub fn cancel(&self) {
        lock(&self.registry).subscribers.retain(|(id, _)| *id != self.id);
    }
}

/// Announce a local session mutation. In the browser this dispatches the
/// `userTypeChanged` event, which the installed window listener routes back
/// into `publish`; outside it, publish directly.
pub fn announce(notifier: &ChangeNotifier) {
    #[cfg(feature = "hydrate")]
    {
        let _ = notifier;
        dispatch_session_changed();
    }
    #[cfg(not(feature = "hydrate"))]
    {
        notifier.publish();
    }
}

/// Dispatch the same-tab `userTypeChanged` event on `window`.
#[cfg(feature = "hydrate")]
pub fn dispatch_session_changed() {
    if let Some(window) = web_sys::window() {
        if let Ok(event) = web_sys::CustomEvent::new(SESSION_CHANGED_EVENT) {
            let _ = window.dispatch_event(&event);
        }
    }
}

/// Wire both browser triggers into `notifier`. Call once at mount; the
/// listeners live for the page lifetime, so the closures are leaked
/// deliberately.
#[cfg(feature = "hydrate")]
pub fn install_dom_listeners(notifier: &ChangeNotifier) {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    let Some(window) = web_sys::window() else {
        return;
    };
    for event_name in ["storage", SESSION_CHANGED_EVENT] {
        let notifier = notifier.clone();
        let closure: Closure<dyn FnMut()> = Closure::new(move || notifier.publish());
        let _ = window.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
