//! Session mutators: login, logout, and account deletion.
//!
//! ARCHITECTURE
//! ============
//! These are the only code paths allowed to write the session store. Every
//! successful mutation is followed by an announce so same-tab subscribers
//! re-resolve; cross-tab observers see the native storage event instead.
//!
//! TRADE-OFFS
//! ==========
//! Logout clears local state even when the provider sign-out fails: a user
//! who loses network mid-logout must not stay visually logged in. Account
//! deletion is the opposite: re-authentication failure aborts before any
//! deletion happens.

#[cfg(test)]
#[path = "mutators_test.rs"]
mod mutators_test;

use crate::config::AppConfig;
use crate::net::identity::{AuthError, IdentityProvider};
use crate::session::notifier::{ChangeNotifier, announce};
use crate::session::record::StoredRole;
use crate::session::role::UserType;
use crate::session::store::{SessionPatch, SessionStore};

/// Result of a successful login: the resolved classification and the home
/// path to navigate to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginOutcome {
    pub user_type: UserType,
    pub redirect: String,
}

/// Sign in with email and password.
///
/// Allow-listed administrator addresses get the admin write-set (role
/// `admin`, `adminToken`) and skip the verification gate, matching the
/// recovery path the resolver honors. Everyone else must have a verified
/// email and gets the passenger write-set (role `passenger`, `authToken`).
///
/// # Errors
///
/// Provider failures and the unverified-email gate surface as `AuthError`
/// without writing anything to the store.
pub async fn login<P: IdentityProvider>(
    provider: &P,
    store: &dyn SessionStore,
    notifier: &ChangeNotifier,
    config: &AppConfig,
    email: &str,
    password: &str,
) -> Result<LoginOutcome, AuthError> {
    let session = provider.sign_in(email, password).await?;

    if config.admin_emails.contains(&session.email) {
        store.set(
            &SessionPatch::new()
                .authenticated(true)
                .role(StoredRole::Admin)
                .admin_token(session.id_token)
                .email(session.email),
        );
        announce(notifier);
        log::info!("admin login");
        return Ok(LoginOutcome {
            user_type: UserType::Admin,
            redirect: config.paths.admin_home.clone(),
        });
    }

    if !session.email_verified {
        return Err(AuthError::EmailNotVerified);
    }

    store.set(
        &SessionPatch::new()
            .authenticated(true)
            .role(StoredRole::Passenger)
            .auth_token(session.id_token)
            .email(session.email),
    );
    announce(notifier);
    log::info!("user login");
    Ok(LoginOutcome {
        user_type: UserType::User,
        redirect: config.paths.user_home.clone(),
    })
}

/// Sign out. The provider call is best-effort: local session state is
/// cleared and announced no matter what it returns.
pub async fn logout<P: IdentityProvider>(provider: &P, store: &dyn SessionStore, notifier: &ChangeNotifier) {
    if let Err(err) = provider.sign_out().await {
        log::warn!("provider sign-out failed, clearing local session anyway: {err}");
    }
    store.clear();
    announce(notifier);
}

/// Delete the authenticated account.
///
/// Order matters: re-authentication first (abort on failure, before
/// anything is deleted), then the backend profile row (failure tolerated),
/// then the provider account. Local state is cleared and announced once
/// deletion has been attempted, even if the provider step failed, so the
/// steps that did succeed are not left paired with a live-looking session.
///
/// Re-authentication uses the email persisted in the session store, since
/// the provider instance that performed the login no longer exists by the
/// time the user reaches deletion.
///
/// # Errors
///
/// `ReauthenticationRequired` when no signed-in email is stored or the
/// fresh-credential check fails; provider errors from the deletion itself
/// are propagated after the local clear.
pub async fn delete_account<P: IdentityProvider>(
    provider: &P,
    store: &dyn SessionStore,
    notifier: &ChangeNotifier,
    config: &AppConfig,
    password: &str,
) -> Result<(), AuthError> {
    let email = store
        .get()
        .email
        .ok_or_else(|| AuthError::ReauthenticationRequired("no signed-in email".to_owned()))?;
    provider.reauthenticate(&email, password).await?;

    if let Err(err) = crate::net::api::delete_profile(config, store, notifier).await {
        log::warn!("backend profile deletion failed, continuing: {err}");
    }

    let deleted = provider.delete_account().await;
    store.clear();
    announce(notifier);
    deleted
}

/// Ask the provider to send a password-reset email. Fire-and-forget from
/// the login page; never touches the session.
///
/// # Errors
///
/// Propagates the provider's typed failure.
pub async fn request_password_reset<P: IdentityProvider>(provider: &P, email: &str) -> Result<(), AuthError> {
    provider.request_password_reset(email).await
}
