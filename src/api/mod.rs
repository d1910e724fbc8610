//! # API Module
//!
//! HTTP handlers for the HandMixed web server. The module covers four
//! surfaces:
//!
//! - **OAuth flow**: redirect to the Spotify consent screen and the
//!   callback that completes the code exchange and logs the user in
//! - **Catalog proxy**: playlist and track listings reshaped for the studio
//!   page, plus the open Audius trending/search endpoints
//! - **Playback proxy**: the premium-gated token handoff and the stateless
//!   player commands, plus the deck-assignment session state
//! - **Pages and monitoring**: minimal page renders and a health endpoint
//!
//! Handlers are thin: they establish the session from the cookie, run the
//! token guard, delegate to the provider clients, and convert errors into
//! structured JSON through the [`crate::error`] `IntoResponse` impls. A 401
//! from upstream clears the stored token before the response leaves the
//! handler.

mod audius;
mod auth;
mod catalog;
mod health;
mod pages;
mod playback;

pub use audius::{audius_search, audius_trending};
pub use auth::{check_auth, spotify_auth, spotify_callback};
pub use catalog::{playlist_tracks, playlists};
pub use health::health;
pub use pages::{error_page, home, login_page, logout};
pub use playback::{assign_deck, control, deck_assignments, play, playback_token, transfer_playback};

use axum::response::{IntoResponse, Response};

use crate::{error::ProxyError, guard, server::AppState, warning};

/// Converts a proxy failure into a response, clearing the stored token
/// first when upstream rejected it.
pub(crate) fn proxy_failure(state: &AppState, session_id: &str, err: ProxyError) -> Response {
    if err == ProxyError::SessionExpired {
        guard::handle_upstream_unauthorized(&state.sessions, session_id);
    }
    if let ProxyError::Network(ref message) = err {
        warning!("Upstream call failed: {}", message);
    }
    err.into_response()
}
