use axum::{
    Extension, Json,
    extract::Path,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tower_cookies::Cookies;

use crate::{error::ProxyError, guard, info, server::AppState, session, spotify};

use super::proxy_failure;

/// `GET /api/spotify/playlists` - every playlist of the logged-in user
/// that has at least one track.
pub async fn playlists(Extension(state): Extension<AppState>, cookies: Cookies) -> Response {
    let Some((session_id, session)) = session::current(&cookies, &state.sessions) else {
        return ProxyError::Unauthenticated.into_response();
    };
    let token = match guard::require_valid_token(&session) {
        Ok(token) => token,
        Err(e) => return e.into_response(),
    };

    match spotify::playlists::get_user_playlists(&token).await {
        Ok(playlists) => {
            info!("Retrieved {} playlists", playlists.len());
            Json(json!({ "playlists": playlists })).into_response()
        }
        Err(e) => proxy_failure(&state, &session_id, e),
    }
}

/// `GET /api/spotify/playlists/{id}/tracks` - all tracks of one playlist
/// plus preview/uri statistics.
pub async fn playlist_tracks(
    Path(playlist_id): Path<String>,
    Extension(state): Extension<AppState>,
    cookies: Cookies,
) -> Response {
    let Some((session_id, session)) = session::current(&cookies, &state.sessions) else {
        return ProxyError::Unauthenticated.into_response();
    };
    let token = match guard::require_valid_token(&session) {
        Ok(token) => token,
        Err(e) => return e.into_response(),
    };

    match spotify::playlists::get_playlist_tracks(&token, &playlist_id).await {
        Ok((tracks, stats)) => {
            info!(
                "Retrieved {} tracks, {} with previews",
                stats.total_tracks, stats.with_preview
            );
            Json(json!({ "tracks": tracks, "stats": stats })).into_response()
        }
        Err(e) => proxy_failure(&state, &session_id, e),
    }
}
