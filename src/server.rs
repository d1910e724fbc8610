use axum::{
    Extension, Router,
    routing::{get, post},
};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tower_cookies::CookieManagerLayer;

use crate::{
    api, config, error, info,
    session::{MemorySessionStore, SessionStore},
    users::{MemoryUserStore, UserStore},
};

/// Shared handler state: the injected session and user store collaborators.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<dyn SessionStore>,
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    /// State backed by the bundled in-memory stores, with the session TTL
    /// taken from configuration.
    pub fn new() -> Self {
        AppState {
            sessions: Arc::new(MemorySessionStore::new(config::session_ttl_hours())),
            users: Arc::new(MemoryUserStore::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        AppState::new()
    }
}

pub async fn start_server(state: AppState) {
    let app = Router::new()
        .route("/", get(api::home))
        .route("/login", get(api::login_page))
        .route("/logout", get(api::logout))
        .route("/error", get(api::error_page))
        .route("/health", get(api::health))
        .route("/spotify/auth", get(api::spotify_auth))
        .route("/auth/callback", get(api::spotify_callback))
        .route("/api/spotify/callback", get(api::spotify_callback))
        .route("/api/spotify/check-auth", get(api::check_auth))
        .route("/api/spotify/playlists", get(api::playlists))
        .route("/api/spotify/playlists/{id}/tracks", get(api::playlist_tracks))
        .route("/api/spotify/token", get(api::playback_token))
        .route("/api/spotify/transfer-playback", post(api::transfer_playback))
        .route("/api/spotify/play", post(api::play))
        .route("/api/spotify/control", post(api::control))
        .route("/api/decks", get(api::deck_assignments).post(api::assign_deck))
        .route("/api/audius/trending", get(api::audius_trending))
        .route("/api/audius/search", get(api::audius_search))
        .layer(CookieManagerLayer::new())
        .layer(Extension(state));

    let addr = match SocketAddr::from_str(&config::server_addr()) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse server address: {}", e),
    };

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => error!("Failed to bind {}: {}", addr, e),
    };

    info!("Listening on {}", addr);
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
    }
}
