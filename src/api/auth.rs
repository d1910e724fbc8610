use axum::{
    Extension,
    extract::Query,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_cookies::Cookies;

use crate::{
    error::ProxyError,
    guard, info, oauth,
    server::AppState,
    session,
    spotify::SpotifyProvider,
    warning,
};

use super::pages;

#[derive(Debug, Deserialize)]
pub struct AuthQuery {
    /// Where to send the user after the OAuth round trip completes.
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub error: Option<String>,
}

/// `GET /spotify/auth` - redirects the browser to the Spotify consent
/// screen, recording the post-login target in the session first.
pub async fn spotify_auth(
    Query(params): Query<AuthQuery>,
    Extension(state): Extension<AppState>,
    cookies: Cookies,
) -> Redirect {
    let (session_id, mut session) = session::establish(&cookies, &state.sessions);
    let url = oauth::begin_authorization(&SpotifyProvider, &mut session, params.next);
    state.sessions.set(&session_id, session);
    Redirect::temporary(&url)
}

/// `GET /auth/callback` (alias `/api/spotify/callback`) - completes the
/// code exchange, provisions the local user, writes the session token
/// state, and redirects to the recorded target. Failures render the error
/// page instead of mutating any state.
pub async fn spotify_callback(
    Query(params): Query<CallbackQuery>,
    Extension(state): Extension<AppState>,
    cookies: Cookies,
) -> Response {
    let (session_id, mut session) = session::establish(&cookies, &state.sessions);

    match oauth::complete_authorization(
        &SpotifyProvider,
        state.users.as_ref(),
        &mut session,
        params.code,
        params.error,
    )
    .await
    {
        Ok(outcome) => {
            state.sessions.set(&session_id, session);
            if outcome.created {
                info!(
                    "Created new user: {} ({})",
                    outcome.user.username, outcome.user.display_name
                );
            } else {
                info!(
                    "Updated user info for {}: {}",
                    outcome.user.username, outcome.user.display_name
                );
            }
            Redirect::to(&outcome.redirect_to).into_response()
        }
        Err(e) => {
            warning!("Spotify authorization failed: {}", e);
            pages::render_error(&e.to_string()).into_response()
        }
    }
}

/// `GET /api/spotify/check-auth` - lightweight liveness probe for the
/// stored token. Requires a local login.
pub async fn check_auth(Extension(state): Extension<AppState>, cookies: Cookies) -> Response {
    let Some((session_id, session)) = session::current(&cookies, &state.sessions) else {
        return ProxyError::Unauthenticated.into_response();
    };
    if session.user.is_none() {
        return ProxyError::Unauthenticated.into_response();
    }

    let status =
        guard::check_auth_status(&SpotifyProvider, &state.sessions, &session_id, &session).await;
    axum::Json(status).into_response()
}
