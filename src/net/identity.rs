//! Identity-provider boundary (Firebase Authentication in production).
//!
//! The provider is an opaque async collaborator: it returns a token and a
//! user identifier on success or a typed error on failure. Session mutators
//! are generic over `IdentityProvider` so tests can script outcomes.
//!
//! Client-side (hydrate): real calls against the Firebase Auth REST API.
//! Server-side: stubs returning `Unavailable`, since sign-in is only
//! meaningful in the browser.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use std::cell::RefCell;

use thiserror::Error;

/// Typed identity-provider failures.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("email address not verified")]
    EmailNotVerified,
    #[error("re-authentication required: {0}")]
    ReauthenticationRequired(String),
    #[error("identity provider error: {0}")]
    Provider(String),
    #[error("network failure: {0}")]
    Network(String),
    #[error("not available outside the browser")]
    Unavailable,
}

/// Successful sign-in result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderSession {
    pub id_token: String,
    pub local_id: String,
    pub email: String,
    pub email_verified: bool,
}

/// Opaque async identity provider.
pub trait IdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderSession, AuthError>;

    /// Provider-side sign-out. Callers must clear local session state even
    /// when this fails.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Fresh-credential check required before destructive operations. Takes
    /// the email explicitly so it works on a provider constructed after the
    /// signing-in instance is gone; a success leaves the provider holding a
    /// live session for the destructive call that follows.
    async fn reauthenticate(&self, email: &str, password: &str) -> Result<(), AuthError>;

    /// Delete the authenticated account at the provider.
    async fn delete_account(&self) -> Result<(), AuthError>;

    async fn request_password_reset(&self, email: &str) -> Result<(), AuthError>;
}

/// Firebase Auth over its REST endpoints. Holds the most recent provider
/// session in memory; a freshly constructed instance has none until a
/// sign-in or re-authentication populates it, so deletion must always be
/// preceded by one of the two.
pub struct FirebaseAuth {
    api_key: String,
    current: RefCell<Option<ProviderSession>>,
}

impl FirebaseAuth {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            current: RefCell::new(None),
        }
    }

    #[cfg(feature = "hydrate")]
    fn endpoint(&self, method: &str) -> String {
        format!("https://identitytoolkit.googleapis.com/v1/accounts:{method}?key={}", self.api_key)
    }

    #[cfg(feature = "hydrate")]
    async fn password_sign_in(&self, email: &str, password: &str) -> Result<ProviderSession, AuthError> {
        #[derive(serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct SignInResponse {
            id_token: String,
            local_id: String,
            email: String,
        }
        #[derive(serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct LookupUser {
            #[serde(default)]
            email_verified: bool,
        }
        #[derive(serde::Deserialize)]
        struct LookupResponse {
            #[serde(default)]
            users: Vec<LookupUser>,
        }

        let payload = serde_json::json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });
        let resp = gloo_net::http::Request::post(&self.endpoint("signInWithPassword"))
            .json(&payload)
            .map_err(|e| AuthError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;
        if !resp.ok() {
            return Err(map_firebase_error(resp).await);
        }
        let body: SignInResponse = resp.json().await.map_err(|e| AuthError::Provider(e.to_string()))?;

        let lookup = gloo_net::http::Request::post(&self.endpoint("lookup"))
            .json(&serde_json::json!({ "idToken": body.id_token }))
            .map_err(|e| AuthError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;
        let email_verified = if lookup.ok() {
            lookup
                .json::<LookupResponse>()
                .await
                .ok()
                .and_then(|l| l.users.first().map(|u| u.email_verified))
                .unwrap_or(false)
        } else {
            false
        };

        Ok(ProviderSession {
            id_token: body.id_token,
            local_id: body.local_id,
            email: body.email,
            email_verified,
        })
    }
}

/// Map a non-OK Firebase response to a typed error. Credential-shaped
/// rejections collapse into `InvalidCredentials`; the rest surface the
/// provider's message.
#[cfg(feature = "hydrate")]
async fn map_firebase_error(resp: gloo_net::http::Response) -> AuthError {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        error: ErrorDetail,
    }
    #[derive(serde::Deserialize)]
    struct ErrorDetail {
        message: String,
    }

    let message = resp
        .json::<ErrorBody>()
        .await
        .map(|b| b.error.message)
        .unwrap_or_else(|_| format!("status {}", resp.status()));
    match message.as_str() {
        m if m.starts_with("EMAIL_NOT_FOUND")
            || m.starts_with("INVALID_PASSWORD")
            || m.starts_with("INVALID_LOGIN_CREDENTIALS")
            || m.starts_with("USER_DISABLED") =>
        {
            AuthError::InvalidCredentials
        }
        m if m.starts_with("CREDENTIAL_TOO_OLD") || m.starts_with("TOKEN_EXPIRED") => {
            AuthError::ReauthenticationRequired(message)
        }
        _ => AuthError::Provider(message),
    }
}

impl IdentityProvider for FirebaseAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderSession, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let session = self.password_sign_in(email, password).await?;
            *self.current.borrow_mut() = Some(session.clone());
            Ok(session)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password);
            Err(AuthError::Unavailable)
        }
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        // The REST API has no server-side sign-out; forgetting the token is
        // the whole operation.
        self.current.borrow_mut().take();
        Ok(())
    }

    async fn reauthenticate(&self, email: &str, password: &str) -> Result<(), AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let session = self
                .password_sign_in(email, password)
                .await
                .map_err(|e| AuthError::ReauthenticationRequired(e.to_string()))?;
            *self.current.borrow_mut() = Some(session);
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password);
            Err(AuthError::Unavailable)
        }
    }

    async fn delete_account(&self) -> Result<(), AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let id_token = self
                .current
                .borrow()
                .as_ref()
                .map(|s| s.id_token.clone())
                .ok_or_else(|| AuthError::ReauthenticationRequired("no active provider session".to_owned()))?;
            let resp = gloo_net::http::Request::post(&self.endpoint("delete"))
                .json(&serde_json::json!({ "idToken": id_token }))
                .map_err(|e| AuthError::Network(e.to_string()))?
                .send()
                .await
                .map_err(|e| AuthError::Network(e.to_string()))?;
            if !resp.ok() {
                return Err(map_firebase_error(resp).await);
            }
            self.current.borrow_mut().take();
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(AuthError::Unavailable)
        }
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::json!({
                "requestType": "PASSWORD_RESET",
                "email": email,
            });
            let resp = gloo_net::http::Request::post(&self.endpoint("sendOobCode"))
                .json(&payload)
                .map_err(|e| AuthError::Network(e.to_string()))?
                .send()
                .await
                .map_err(|e| AuthError::Network(e.to_string()))?;
            if !resp.ok() {
                return Err(map_firebase_error(resp).await);
            }
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = email;
            Err(AuthError::Unavailable)
        }
    }
}
