#![cfg(not(feature = "hydrate"))]

use std::cell::{Cell, RefCell};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::executor::block_on;

use super::*;
use crate::net::identity::ProviderSession;
use crate::session::record::SessionRecord;
use crate::session::store::{MemoryStore, SessionPatch};

struct MockProvider {
    sign_in_result: Result<ProviderSession, AuthError>,
    sign_out_fails: bool,
    reauth_fails: bool,
    delete_fails: bool,
    reauth_calls: Cell<u32>,
    reauth_email: RefCell<Option<String>>,
    delete_calls: Cell<u32>,
}

impl MockProvider {
    fn with_session(session: ProviderSession) -> Self {
        Self {
            sign_in_result: Ok(session),
            sign_out_fails: false,
            reauth_fails: false,
            delete_fails: false,
            reauth_calls: Cell::new(0),
            reauth_email: RefCell::new(None),
            delete_calls: Cell::new(0),
        }
    }

    fn failing_sign_in() -> Self {
        Self {
            sign_in_result: Err(AuthError::InvalidCredentials),
            sign_out_fails: false,
            reauth_fails: false,
            delete_fails: false,
            reauth_calls: Cell::new(0),
            reauth_email: RefCell::new(None),
            delete_calls: Cell::new(0),
        }
    }
}

impl IdentityProvider for MockProvider {
    async fn sign_in(&self, _email: &str, _password: &str) -> Result<ProviderSession, AuthError> {
        self.sign_in_result.clone()
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        if self.sign_out_fails {
            Err(AuthError::Network("offline".to_owned()))
        } else {
            Ok(())
        }
    }

    async fn reauthenticate(&self, email: &str, _password: &str) -> Result<(), AuthError> {
        self.reauth_calls.set(self.reauth_calls.get() + 1);
        *self.reauth_email.borrow_mut() = Some(email.to_owned());
        if self.reauth_fails {
            Err(AuthError::ReauthenticationRequired("bad password".to_owned()))
        } else {
            Ok(())
        }
    }

    async fn delete_account(&self) -> Result<(), AuthError> {
        self.delete_calls.set(self.delete_calls.get() + 1);
        if self.delete_fails {
            Err(AuthError::Provider("delete rejected".to_owned()))
        } else {
            Ok(())
        }
    }

    async fn request_password_reset(&self, _email: &str) -> Result<(), AuthError> {
        Ok(())
    }
}

fn verified_session(email: &str) -> ProviderSession {
    ProviderSession {
        id_token: "tok-1".to_owned(),
        local_id: "uid-1".to_owned(),
        email: email.to_owned(),
        email_verified: true,
    }
}

fn publish_counter(notifier: &crate::session::notifier::ChangeNotifier) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let count_cb = Arc::clone(&count);
    // Leaked on purpose: the subscription must outlive the test body.
    std::mem::forget(notifier.subscribe(move || {
        count_cb.fetch_add(1, Ordering::SeqCst);
    }));
    count
}

fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    store.set(
        &SessionPatch::new()
            .authenticated(true)
            .role(crate::session::record::StoredRole::Passenger)
            .auth_token("u1")
            .email("passenger@example.com"),
    );
    store
}

// =============================================================
// Login
// =============================================================

#[test]
fn user_login_writes_the_passenger_record() {
    let provider = MockProvider::with_session(verified_session("passenger@example.com"));
    let store = MemoryStore::new();
    let notifier = ChangeNotifier::new();
    let config = AppConfig::default();
    let published = publish_counter(&notifier);

    let outcome = block_on(login(&provider, &store, &notifier, &config, "passenger@example.com", "pw")).unwrap();

    assert_eq!(outcome.user_type, UserType::User);
    assert_eq!(outcome.redirect, config.paths.user_home);

    let record = store.get();
    assert!(record.is_authenticated);
    assert_eq!(record.role, StoredRole::Passenger);
    assert_eq!(record.auth_token.as_deref(), Some("tok-1"));
    assert_eq!(record.admin_token, None);
    assert_eq!(record.email.as_deref(), Some("passenger@example.com"));
    assert_eq!(published.load(Ordering::SeqCst), 1);
}

#[test]
fn admin_login_writes_the_admin_record() {
    let provider = MockProvider::with_session(ProviderSession {
        email_verified: false,
        ..verified_session("adm.railmadad@gmail.com")
    });
    let store = MemoryStore::new();
    let notifier = ChangeNotifier::new();
    let config = AppConfig::default();
    let published = publish_counter(&notifier);

    let outcome = block_on(login(&provider, &store, &notifier, &config, "adm.railmadad@gmail.com", "pw")).unwrap();

    assert_eq!(outcome.user_type, UserType::Admin);
    assert_eq!(outcome.redirect, config.paths.admin_home);

    let record = store.get();
    assert_eq!(record.role, StoredRole::Admin);
    assert_eq!(record.admin_token.as_deref(), Some("tok-1"));
    assert_eq!(record.auth_token, None);
    assert_eq!(published.load(Ordering::SeqCst), 1);
}

#[test]
fn unverified_email_is_rejected_without_writing() {
    let provider = MockProvider::with_session(ProviderSession {
        email_verified: false,
        ..verified_session("passenger@example.com")
    });
    let store = MemoryStore::new();
    let notifier = ChangeNotifier::new();
    let config = AppConfig::default();
    let published = publish_counter(&notifier);

    let result = block_on(login(&provider, &store, &notifier, &config, "passenger@example.com", "pw"));

    assert_eq!(result.unwrap_err(), AuthError::EmailNotVerified);
    assert_eq!(store.get(), SessionRecord::default());
    assert_eq!(published.load(Ordering::SeqCst), 0);
}

#[test]
fn failed_sign_in_leaves_the_store_untouched() {
    let provider = MockProvider::failing_sign_in();
    let store = MemoryStore::new();
    let notifier = ChangeNotifier::new();
    let config = AppConfig::default();

    let result = block_on(login(&provider, &store, &notifier, &config, "passenger@example.com", "nope"));

    assert_eq!(result.unwrap_err(), AuthError::InvalidCredentials);
    assert_eq!(store.get(), SessionRecord::default());
}

// =============================================================
// Logout
// =============================================================

#[test]
fn logout_clears_and_publishes() {
    let provider = MockProvider::with_session(verified_session("passenger@example.com"));
    let store = seeded_store();
    let notifier = ChangeNotifier::new();
    let published = publish_counter(&notifier);

    block_on(logout(&provider, &store, &notifier));

    assert_eq!(store.get(), SessionRecord::default());
    assert_eq!(published.load(Ordering::SeqCst), 1);
}

#[test]
fn logout_clears_even_when_provider_sign_out_fails() {
    let mut provider = MockProvider::with_session(verified_session("passenger@example.com"));
    provider.sign_out_fails = true;
    let store = seeded_store();
    let notifier = ChangeNotifier::new();
    let published = publish_counter(&notifier);

    block_on(logout(&provider, &store, &notifier));

    assert_eq!(store.get(), SessionRecord::default());
    assert_eq!(published.load(Ordering::SeqCst), 1);
}

// =============================================================
// Account deletion
// =============================================================

#[test]
fn reauthentication_failure_aborts_before_any_deletion() {
    let mut provider = MockProvider::with_session(verified_session("passenger@example.com"));
    provider.reauth_fails = true;
    let store = seeded_store();
    let notifier = ChangeNotifier::new();
    let config = AppConfig::default();
    let published = publish_counter(&notifier);

    let result = block_on(delete_account(&provider, &store, &notifier, &config, "bad-pw"));

    assert!(matches!(result.unwrap_err(), AuthError::ReauthenticationRequired(_)));
    assert_eq!(provider.delete_calls.get(), 0);
    assert_ne!(store.get(), SessionRecord::default());
    assert_eq!(published.load(Ordering::SeqCst), 0);
}

#[test]
fn successful_deletion_clears_and_publishes_once() {
    let provider = MockProvider::with_session(verified_session("passenger@example.com"));
    let store = seeded_store();
    let notifier = ChangeNotifier::new();
    let config = AppConfig::default();
    let published = publish_counter(&notifier);

    // The backend profile call is unavailable natively; its failure must be
    // tolerated without stopping the deletion.
    let result = block_on(delete_account(&provider, &store, &notifier, &config, "pw"));

    assert_eq!(result, Ok(()));
    assert_eq!(provider.reauth_calls.get(), 1);
    assert_eq!(provider.delete_calls.get(), 1);
    assert_eq!(store.get(), SessionRecord::default());
    assert_eq!(published.load(Ordering::SeqCst), 1);
}

#[test]
fn reauthentication_uses_the_stored_email() {
    // The provider that performed the login is long gone by deletion time;
    // the stored email is the only identity the flow can present.
    let provider = MockProvider::with_session(verified_session("passenger@example.com"));
    let store = seeded_store();
    let notifier = ChangeNotifier::new();
    let config = AppConfig::default();

    block_on(delete_account(&provider, &store, &notifier, &config, "pw")).unwrap();

    assert_eq!(provider.reauth_email.borrow().as_deref(), Some("passenger@example.com"));
}

#[test]
fn deletion_without_a_stored_email_aborts() {
    let provider = MockProvider::with_session(verified_session("passenger@example.com"));
    let store = MemoryStore::new();
    store.set(&SessionPatch::new().authenticated(true).role(StoredRole::Passenger).auth_token("u1"));
    let notifier = ChangeNotifier::new();
    let config = AppConfig::default();
    let published = publish_counter(&notifier);

    let result = block_on(delete_account(&provider, &store, &notifier, &config, "pw"));

    assert!(matches!(result.unwrap_err(), AuthError::ReauthenticationRequired(_)));
    assert_eq!(provider.reauth_calls.get(), 0);
    assert_eq!(provider.delete_calls.get(), 0);
    assert!(store.get().is_authenticated);
    assert_eq!(published.load(Ordering::SeqCst), 0);
}

#[test]
fn provider_deletion_failure_still_clears_locally() {
    let mut provider = MockProvider::with_session(verified_session("passenger@example.com"));
    provider.delete_fails = true;
    let store = seeded_store();
    let notifier = ChangeNotifier::new();
    let config = AppConfig::default();
    let published = publish_counter(&notifier);

    let result = block_on(delete_account(&provider, &store, &notifier, &config, "pw"));

    assert!(matches!(result.unwrap_err(), AuthError::Provider(_)));
    assert_eq!(store.get(), SessionRecord::default());
    assert_eq!(published.load(Ordering::SeqCst), 1);
}

// =============================================================
// Password reset
// =============================================================

#[test]
fn password_reset_delegates_to_the_provider() {
    let provider = MockProvider::with_session(verified_session("passenger@example.com"));
    assert_eq!(block_on(request_password_reset(&provider, "passenger@example.com")), Ok(()));
}
