//! Session token guard for protected proxy calls.
//!
//! The guard decides whether a request may reach an upstream proxy call. It
//! only checks that a token is present; liveness is established lazily by
//! whichever proxy call uses the token. When upstream rejects a token with a
//! 401, [`handle_upstream_unauthorized`] clears it from the session so the
//! next call deterministically re-enters the unauthenticated path.

use std::sync::Arc;

use serde::Serialize;

use crate::{
    error::{AuthError, ProxyError},
    oauth::ProviderAuth,
    session::{SessionData, SessionStore},
    spotify::STATUS_TIMEOUT,
};

/// Result of the lightweight auth-status probe.
#[derive(Debug, Clone, Serialize)]
pub struct AuthStatus {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub premium: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<StatusProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusProfile {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

impl AuthStatus {
    fn unauthenticated() -> Self {
        AuthStatus {
            authenticated: false,
            premium: None,
            user: None,
            error: None,
        }
    }
}

/// Returns the stored access token, or `Unauthenticated` when absent.
///
/// An absent token means the user is not connected to the provider,
/// regardless of local login state. No upstream verification happens here.
pub fn require_valid_token(session: &SessionData) -> Result<String, ProxyError> {
    session
        .tokens
        .as_ref()
        .map(|t| t.access_token.clone())
        .ok_or(ProxyError::Unauthenticated)
}

/// Clears the token state of a session after an upstream 401.
///
/// Callers surface `SessionExpired` to the client after invoking this.
pub fn handle_upstream_unauthorized(store: &Arc<dyn SessionStore>, session_id: &str) {
    if let Some(mut data) = store.get(session_id) {
        data.tokens = None;
        store.set(session_id, data);
    }
}

/// Validates token liveness with a short "who am I" probe.
///
/// On success the profile and entitlement flag are reported. A non-2xx
/// response clears the stored token and reports unauthenticated; a
/// transport failure reports unauthenticated with the error message
/// attached but leaves the token in place.
pub async fn check_auth_status<P: ProviderAuth>(
    provider: &P,
    store: &Arc<dyn SessionStore>,
    session_id: &str,
    session: &SessionData,
) -> AuthStatus {
    let Some(tokens) = &session.tokens else {
        return AuthStatus::unauthenticated();
    };

    match provider
        .fetch_profile(&tokens.access_token, STATUS_TIMEOUT)
        .await
    {
        Ok(profile) => AuthStatus {
            authenticated: true,
            premium: Some(profile.premium),
            user: Some(StatusProfile {
                id: profile.id,
                display_name: profile.display_name,
                email: profile.email,
            }),
            error: None,
        },
        Err(AuthError::Network(message)) => AuthStatus {
            error: Some(message),
            ..AuthStatus::unauthenticated()
        },
        Err(_) => {
            handle_upstream_unauthorized(store, session_id);
            AuthStatus::unauthenticated()
        }
    }
}
