//! Configuration management for the HandMixed backend.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and `.env` files. It provides a centralized way to
//! manage application configuration including Spotify API credentials, the
//! Audius catalog host, server settings, and session parameters.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)
//!
//! Everything is read once per access at process start; there is no
//! hot-reload.

use dotenv;
use std::{env, path::PathBuf};

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `handmixed/.env`. This allows operators to
/// store credentials securely without hardcoding sensitive values.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/handmixed/.env`
/// - macOS: `~/Library/Application Support/handmixed/.env`
/// - Windows: `%LOCALAPPDATA%/handmixed/.env`
///
/// A missing file is not an error; in that case configuration is taken from
/// the process environment alone.
///
/// # Returns
///
/// Returns `Ok(())` if the environment is ready, or an error string if
/// directory creation or file loading fails.
///
/// # Example
///
/// ```
/// use handmixed::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("handmixed/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Returns the address the web server binds to.
///
/// Retrieves the `SERVER_ADDRESS` environment variable, e.g.
/// `127.0.0.1:8000`.
///
/// # Panics
///
/// Panics if the `SERVER_ADDRESS` environment variable is not set.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").expect("SERVER_ADDRESS must be set")
}

/// Returns the Spotify application client ID.
///
/// # Panics
///
/// Panics if the `SPOTIFY_CLIENT_ID` environment variable is not set.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_CLIENT_ID").expect("SPOTIFY_CLIENT_ID must be set")
}

/// Returns the Spotify application client secret.
///
/// Used together with the client ID to build the HTTP Basic credentials for
/// the token exchange. Keep it out of logs and version control.
///
/// # Panics
///
/// Panics if the `SPOTIFY_CLIENT_SECRET` environment variable is not set.
pub fn spotify_client_secret() -> String {
    env::var("SPOTIFY_CLIENT_SECRET").expect("SPOTIFY_CLIENT_SECRET must be set")
}

/// Returns the Spotify OAuth redirect URI.
///
/// The exact same literal is used when building the authorization URL and
/// when exchanging the code; Spotify rejects the exchange when the two
/// differ. It must also match the redirect URI registered in the Spotify
/// application settings.
///
/// # Panics
///
/// Panics if the `SPOTIFY_REDIRECT_URI` environment variable is not set.
pub fn spotify_redirect_uri() -> String {
    env::var("SPOTIFY_REDIRECT_URI").expect("SPOTIFY_REDIRECT_URI must be set")
}

/// Returns the Spotify OAuth scope set as a space-separated string.
///
/// Defaults to the scopes the studio page needs: private profile and email,
/// playlist reads, library read, and playback state control for the Web
/// Playback SDK.
pub fn spotify_scope() -> String {
    env::var("SPOTIFY_AUTH_SCOPE").unwrap_or_else(|_| {
        [
            "user-read-private",
            "user-read-email",
            "playlist-read-private",
            "playlist-read-collaborative",
            "user-library-read",
            "streaming",
            "user-modify-playback-state",
            "user-read-playback-state",
        ]
        .join(" ")
    })
}

/// Returns the Spotify OAuth authorization endpoint.
pub fn spotify_auth_url() -> String {
    env::var("SPOTIFY_AUTH_URL")
        .unwrap_or_else(|_| "https://accounts.spotify.com/authorize".to_string())
}

/// Returns the Spotify OAuth token exchange endpoint.
pub fn spotify_token_url() -> String {
    env::var("SPOTIFY_TOKEN_URL")
        .unwrap_or_else(|_| "https://accounts.spotify.com/api/token".to_string())
}

/// Returns the Spotify Web API base URL.
pub fn spotify_api_url() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| "https://api.spotify.com/v1".to_string())
}

/// Returns the Audius discovery API base URL.
///
/// The Audius catalog is open; no credentials are involved.
pub fn audius_api_url() -> String {
    env::var("AUDIUS_API_URL").unwrap_or_else(|_| "https://discoveryprovider.audius.co/v1".to_string())
}

/// Returns the application name sent to Audius with every request.
pub fn audius_app_name() -> String {
    env::var("AUDIUS_APP_NAME").unwrap_or_else(|_| "handmixed".to_string())
}

/// Returns the browser-session time-to-live in hours.
///
/// Defaults to 24 hours. Session records older than this are treated as
/// absent by the session store.
pub fn session_ttl_hours() -> i64 {
    env::var("SESSION_TTL_HOURS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(24)
}
