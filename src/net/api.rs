//! Bearer-token REST helpers for the backend API.
//!
//! ERROR HANDLING
//! ==============
//! Every request carries a bounded timeout; a timed-out or unreachable
//! request surfaces as a retryable error and never touches the session.
//! A 401 response is the single signal that force-clears the session
//! (the previously trusted token is no longer valid); 403 means
//! authenticated-but-forbidden and leaves the session intact.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`. Server-side:
//! stubs returning `Unavailable`.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use thiserror::Error;

use crate::config::AppConfig;
use crate::net::types::{Complaint, DashboardStats, NewComplaint, UserProfile};
use crate::session::notifier::{ChangeNotifier, announce};
use crate::session::record::SessionRecord;
use crate::session::role::UserType;
use crate::session::store::SessionStore;

/// Typed backend-request failures.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// 401: the bearer token is no longer valid. The session has already
    /// been cleared by the time callers see this.
    #[error("unauthorized")]
    Unauthorized,
    /// 403: this action is denied, but the session stays logged in.
    #[error("forbidden")]
    Forbidden,
    /// The bounded request timeout elapsed. Retryable; session untouched.
    #[error("request timed out")]
    Timeout,
    #[error("request failed with status {0}")]
    Http(u16),
    #[error("network failure: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("not available outside the browser")]
    Unavailable,
}

/// Authorization headers for the current session: `Bearer` from the active
/// token, plus the admin marker header for admin-resolved sessions.
pub fn auth_headers(record: &SessionRecord, user_type: UserType) -> Vec<(&'static str, String)> {
    let mut headers = Vec::new();
    if let Some(token) = record.active_token(user_type) {
        headers.push(("Authorization", format!("Bearer {token}")));
    }
    if user_type == UserType::Admin {
        headers.push(("X-Admin-Access", "true".to_owned()));
    }
    headers
}

/// Classify a response status, force-clearing the session on 401 only.
pub fn handle_auth_status(status: u16, store: &dyn SessionStore, notifier: &ChangeNotifier) -> Result<(), ApiError> {
    match status {
        200..=299 => Ok(()),
        401 => {
            log::warn!("401 from backend; clearing session");
            store.clear();
            announce(notifier);
            Err(ApiError::Unauthorized)
        }
        403 => Err(ApiError::Forbidden),
        status => Err(ApiError::Http(status)),
    }
}

#[cfg(feature = "hydrate")]
async fn send_bounded(
    request: gloo_net::http::Request,
    timeout_ms: u32,
) -> Result<gloo_net::http::Response, ApiError> {
    use futures::FutureExt;

    futures::select! {
        resp = request.send().fuse() => resp.map_err(|e| ApiError::Network(e.to_string())),
        () = gloo_timers::future::TimeoutFuture::new(timeout_ms).fuse() => Err(ApiError::Timeout),
    }
}

#[cfg(feature = "hydrate")]
async fn request_json<T: serde::de::DeserializeOwned>(
    config: &AppConfig,
    store: &dyn SessionStore,
    notifier: &ChangeNotifier,
    method: gloo_net::http::Method,
    path: &str,
    body: Option<&serde_json::Value>,
) -> Result<T, ApiError> {
    let record = store.get();
    let user_type = crate::session::role::resolve_role(&record, &config.admin_emails);
    let url = format!("{}{path}", config.api_base);

    let mut builder = gloo_net::http::RequestBuilder::new(&url).method(method);
    for (name, value) in auth_headers(&record, user_type) {
        builder = builder.header(name, &value);
    }
    let request = match body {
        Some(body) => builder.json(body).map_err(|e| ApiError::Network(e.to_string()))?,
        None => builder.build().map_err(|e| ApiError::Network(e.to_string()))?,
    };

    let resp = send_bounded(request, config.request_timeout_ms).await?;
    handle_auth_status(resp.status(), store, notifier)?;
    resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
}

/// Fetch the passenger's own complaints.
pub async fn fetch_complaints(
    config: &AppConfig,
    store: &dyn SessionStore,
    notifier: &ChangeNotifier,
) -> Result<Vec<Complaint>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        request_json(config, store, notifier, gloo_net::http::Method::GET, "/complaints", None).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, store, notifier);
        Err(ApiError::Unavailable)
    }
}

/// File a new complaint.
pub async fn submit_complaint(
    config: &AppConfig,
    store: &dyn SessionStore,
    notifier: &ChangeNotifier,
    complaint: &NewComplaint,
) -> Result<Complaint, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let body = serde_json::to_value(complaint).map_err(|e| ApiError::Decode(e.to_string()))?;
        request_json(config, store, notifier, gloo_net::http::Method::POST, "/complaints", Some(&body)).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, store, notifier, complaint);
        Err(ApiError::Unavailable)
    }
}

/// Fetch aggregated complaint counters for the admin dashboard.
pub async fn fetch_dashboard_stats(
    config: &AppConfig,
    store: &dyn SessionStore,
    notifier: &ChangeNotifier,
) -> Result<DashboardStats, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        request_json(config, store, notifier, gloo_net::http::Method::GET, "/complaints/stats", None).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, store, notifier);
        Err(ApiError::Unavailable)
    }
}

/// Fetch the authenticated user's backend profile.
pub async fn fetch_profile(
    config: &AppConfig,
    store: &dyn SessionStore,
    notifier: &ChangeNotifier,
) -> Result<UserProfile, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        request_json(config, store, notifier, gloo_net::http::Method::GET, "/accounts/profile", None).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, store, notifier);
        Err(ApiError::Unavailable)
    }
}

/// Delete the authenticated user's backend profile row. Part of account
/// deletion; the caller tolerates failure here and continues.
pub async fn delete_profile(
    config: &AppConfig,
    store: &dyn SessionStore,
    notifier: &ChangeNotifier,
) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let record = store.get();
        let user_type = crate::session::role::resolve_role(&record, &config.admin_emails);
        let url = format!("{}/accounts/profile", config.api_base);
        let mut builder = gloo_net::http::RequestBuilder::new(&url).method(gloo_net::http::Method::DELETE);
        for (name, value) in auth_headers(&record, user_type) {
            builder = builder.header(name, &value);
        }
        let request = builder.build().map_err(|e| ApiError::Network(e.to_string()))?;
        let resp = send_bounded(request, config.request_timeout_ms).await?;
        handle_auth_status(resp.status(), store, notifier)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, store, notifier);
        Err(ApiError::Unavailable)
    }
}
