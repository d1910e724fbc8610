//! Error taxonomy for the auth and proxy layers.
//!
//! Three families cover everything the backend can fail with:
//!
//! - [`AuthError`] - failures of the OAuth authorization-code round trip
//! - [`ProxyError`] - failures of proxied Spotify/Audius calls
//! - [`ValidationError`] - bad client input, rejected before any upstream call
//!
//! Upstream transport failures are converted at the proxy boundary into
//! structured variants; nothing is swallowed into a bare string. Each proxy
//! and validation error renders as a JSON body `{"error": ...}` with a status
//! code mirroring intent (401 auth, 403 entitlement, 404 not-found, 400
//! validation, 500 generic/network).

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Failures of the OAuth authorization-code exchange cycle.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The provider redirected back with an `error` parameter.
    #[error("provider denied authorization: {0}")]
    ProviderDenied(String),

    /// The provider redirected back without a `code` parameter.
    #[error("no authorization code received")]
    MissingCode,

    /// The code-for-token POST returned a non-2xx status.
    #[error("token exchange failed: {status} - {body}")]
    TokenExchangeFailed { status: u16, body: String },

    /// The profile fetch with the fresh access token returned a non-2xx
    /// status.
    #[error("profile fetch failed with status {0}")]
    ProfileFetchFailed(u16),

    /// The stored access token was rejected upstream.
    #[error("external session expired")]
    SessionExpired,

    /// Transport-level failure talking to the provider.
    #[error("network error during authentication: {0}")]
    Network(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::Network(err.to_string())
    }
}

/// Failures of proxied catalog and playback calls.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProxyError {
    /// No access token is present in the session.
    #[error("Not authenticated with Spotify")]
    Unauthenticated,

    /// Upstream rejected the stored token with a 401. The caller clears the
    /// token before surfacing this, so the next call deterministically takes
    /// the unauthenticated path.
    #[error("Spotify authentication expired")]
    SessionExpired,

    /// Playback operation attempted without the premium entitlement.
    #[error("Spotify Premium is required for playback control")]
    PremiumRequired,

    /// Upstream reported 404 for the requested resource.
    #[error("Not found")]
    NotFound,

    /// Any other non-2xx upstream status.
    #[error("Upstream API error: {0}")]
    Upstream(u16),

    /// Transport-level failure; no retry is attempted.
    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        ProxyError::Network(err.to_string())
    }
}

impl ProxyError {
    fn status(&self) -> StatusCode {
        match self {
            ProxyError::Unauthenticated | ProxyError::SessionExpired => StatusCode::UNAUTHORIZED,
            ProxyError::PremiumRequired => StatusCode::FORBIDDEN,
            ProxyError::NotFound => StatusCode::NOT_FOUND,
            ProxyError::Upstream(_) | ProxyError::Network(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ProxyError::PremiumRequired => json!({
                "error": self.to_string(),
                "premiumRequired": true,
            }),
            _ => json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

/// Client input rejected before any upstream call is made.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A search query that is empty after trimming.
    #[error("Search query must not be empty")]
    EmptyQuery,

    /// A playback action outside play/pause/next/previous.
    #[error("Invalid playback action: {0}")]
    InvalidAction(String),

    /// A required request field is absent or blank.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
