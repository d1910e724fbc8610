use axum::{
    Extension, Json,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tower_cookies::Cookies;

use crate::{
    error::{ProxyError, ValidationError},
    guard,
    server::AppState,
    session,
    spotify::player::{self, PlayerAction},
    types::{ControlRequest, DeckAssignRequest, PlayRequest, TransferRequest},
};

use super::proxy_failure;

/// `GET /api/spotify/token` - hands the access token to the Web Playback
/// SDK. Playback is premium-gated, so the entitlement flag is enforced
/// here rather than on each command.
pub async fn playback_token(Extension(state): Extension<AppState>, cookies: Cookies) -> Response {
    let Some((_, session)) = session::current(&cookies, &state.sessions) else {
        return ProxyError::Unauthenticated.into_response();
    };
    let Some(tokens) = session.tokens else {
        return ProxyError::Unauthenticated.into_response();
    };
    if !tokens.premium {
        return ProxyError::PremiumRequired.into_response();
    }

    Json(json!({
        "accessToken": tokens.access_token,
        "premium": tokens.premium,
    }))
    .into_response()
}

/// `POST /api/spotify/transfer-playback` - moves playback to the SDK
/// device without starting it.
pub async fn transfer_playback(
    Extension(state): Extension<AppState>,
    cookies: Cookies,
    Json(body): Json<TransferRequest>,
) -> Response {
    if body.device_id.trim().is_empty() {
        return ValidationError::MissingField("deviceId").into_response();
    }
    let Some((session_id, session)) = session::current(&cookies, &state.sessions) else {
        return ProxyError::Unauthenticated.into_response();
    };
    let token = match guard::require_valid_token(&session) {
        Ok(token) => token,
        Err(e) => return e.into_response(),
    };

    match player::transfer_playback(&token, &body.device_id).await {
        Ok(()) => Json(json!({ "success": true })).into_response(),
        Err(e) => proxy_failure(&state, &session_id, e),
    }
}

/// `POST /api/spotify/play` - starts playback of one track, scoped to a
/// device when one is given.
pub async fn play(
    Extension(state): Extension<AppState>,
    cookies: Cookies,
    Json(body): Json<PlayRequest>,
) -> Response {
    if body.track_uri.trim().is_empty() {
        return ValidationError::MissingField("trackUri").into_response();
    }
    let Some((session_id, session)) = session::current(&cookies, &state.sessions) else {
        return ProxyError::Unauthenticated.into_response();
    };
    let token = match guard::require_valid_token(&session) {
        Ok(token) => token,
        Err(e) => return e.into_response(),
    };

    match player::play_track(&token, &body.track_uri, body.device_id.as_deref()).await {
        Ok(()) => Json(json!({ "success": true })).into_response(),
        Err(e) => proxy_failure(&state, &session_id, e),
    }
}

/// `POST /api/spotify/control` - play/pause/next/previous. Unknown actions
/// are rejected before any upstream call.
pub async fn control(
    Extension(state): Extension<AppState>,
    cookies: Cookies,
    Json(body): Json<ControlRequest>,
) -> Response {
    let action: PlayerAction = match body.action.parse() {
        Ok(action) => action,
        Err(e) => return e.into_response(),
    };
    let Some((session_id, session)) = session::current(&cookies, &state.sessions) else {
        return ProxyError::Unauthenticated.into_response();
    };
    let token = match guard::require_valid_token(&session) {
        Ok(token) => token,
        Err(e) => return e.into_response(),
    };

    match player::control(&token, action, body.device_id.as_deref()).await {
        Ok(()) => Json(json!({ "success": true })).into_response(),
        Err(e) => proxy_failure(&state, &session_id, e),
    }
}

/// `POST /api/decks` - assigns a track to a deck slot. Pure session state;
/// deck name and track id are accepted as-is, with no validation against
/// catalog existence.
pub async fn assign_deck(
    Extension(state): Extension<AppState>,
    cookies: Cookies,
    Json(body): Json<DeckAssignRequest>,
) -> Response {
    let (session_id, mut session) = session::establish(&cookies, &state.sessions);
    session.deck_assignments.insert(body.deck, body.track_id);
    let decks = session.deck_assignments.clone();
    state.sessions.set(&session_id, session);

    Json(json!({ "success": true, "decks": decks })).into_response()
}

/// `GET /api/decks` - the current deck-to-track mapping.
pub async fn deck_assignments(Extension(state): Extension<AppState>, cookies: Cookies) -> Response {
    let decks = session::current(&cookies, &state.sessions)
        .map(|(_, session)| session.deck_assignments)
        .unwrap_or_default();

    Json(json!({ "decks": decks })).into_response()
}
