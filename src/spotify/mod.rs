//! # Spotify Integration Module
//!
//! Client for the Spotify Web API surface the studio needs: the
//! authorization-code flow with HTTP Basic client credentials, the playlist
//! catalog with cursor-based pagination, and the player endpoints used by
//! the Web Playback SDK deck.
//!
//! ## Submodules
//!
//! - [`auth`] - [`SpotifyProvider`] and its OAuth capability: the consent
//!   URL, the code-for-token exchange, and the profile fetch
//! - [`playlists`] - playlist and track listing with pagination and
//!   reshaping into the studio's stable DTOs
//! - [`player`] - stateless playback commands (transfer, play, pause, skip)
//!
//! ## Error Handling
//!
//! All upstream failures surface as structured [`crate::error`] variants at
//! this boundary. A 401 maps to `SessionExpired` so callers can clear the
//! stored token; 403 on player calls maps to `PremiumRequired`; transport
//! errors are never retried.
//!
//! ## Timeouts
//!
//! Calls are bounded by criticality: 5 seconds for the liveness probe,
//! 10 seconds for auth and player commands, 15 seconds for bulk catalog
//! pagination.

use std::time::Duration;

pub mod auth;
pub mod player;
pub mod playlists;

pub use auth::SpotifyProvider;

/// Timeout for the lightweight "who am I" liveness probe.
pub const STATUS_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout for player command calls.
pub const PLAYER_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for bulk catalog pagination calls.
pub const CATALOG_TIMEOUT: Duration = Duration::from_secs(15);
