#![cfg(not(feature = "hydrate"))]

use futures::executor::block_on;

use super::*;

// =============================================================
// Error display
// =============================================================

#[test]
fn errors_render_actionable_messages() {
    assert_eq!(AuthError::InvalidCredentials.to_string(), "invalid email or password");
    assert_eq!(AuthError::EmailNotVerified.to_string(), "email address not verified");
    assert_eq!(
        AuthError::ReauthenticationRequired("stale".to_owned()).to_string(),
        "re-authentication required: stale"
    );
}

// =============================================================
// Native behavior
// =============================================================

#[test]
fn sign_in_is_unavailable_outside_the_browser() {
    let provider = FirebaseAuth::new("key");
    assert_eq!(block_on(provider.sign_in("a@b.c", "pw")), Err(AuthError::Unavailable));
    assert_eq!(block_on(provider.reauthenticate("a@b.c", "pw")), Err(AuthError::Unavailable));
    assert_eq!(block_on(provider.delete_account()), Err(AuthError::Unavailable));
    assert_eq!(block_on(provider.request_password_reset("a@b.c")), Err(AuthError::Unavailable));
}

#[test]
fn sign_out_always_succeeds() {
    let provider = FirebaseAuth::new("key");
    assert_eq!(block_on(provider.sign_out()), Ok(()));
    // A second sign-out with nothing to forget is still fine.
    assert_eq!(block_on(provider.sign_out()), Ok(()));
}
