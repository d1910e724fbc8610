use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Token material returned by a provider's code-for-token exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// The subset of an external profile the backend cares about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalProfile {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub premium: bool,
}

impl ExternalProfile {
    /// Display name with the stable external id as fallback.
    pub fn display_name_or_id(&self) -> String {
        self.display_name
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| self.id.clone())
    }

    /// Email with a synthesized per-provider placeholder as fallback.
    pub fn email_or_placeholder(&self, provider: &str) -> String {
        self.email
            .clone()
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| format!("{}@{}.local", self.id, provider))
    }
}

// --- Spotify upstream response shapes ---

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyPaging<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyImage {
    pub url: String,
    pub width: Option<u64>,
    pub height: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyPlaylist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tracks: TrackCount,
    #[serde(default)]
    pub images: Vec<SpotifyImage>,
    #[serde(default)]
    pub owner: Option<PlaylistOwner>,
    #[serde(default)]
    pub external_urls: HashMap<String, String>,
    #[serde(default)]
    pub public: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackCount {
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistOwner {
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistTrackItem {
    pub track: Option<SpotifyTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyTrack {
    pub id: Option<String>,
    pub name: String,
    pub uri: Option<String>,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
    pub album: Option<TrackAlbum>,
    pub preview_url: Option<String>,
    #[serde(default)]
    pub external_urls: HashMap<String, String>,
    pub duration_ms: Option<u64>,
    pub popularity: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackAlbum {
    pub name: Option<String>,
    #[serde(default)]
    pub images: Vec<SpotifyImage>,
}

// --- Local catalog DTOs served to the studio page ---

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub track_count: u64,
    pub images: Vec<SpotifyImage>,
    pub owner_display_name: String,
    pub external_url: Option<String>,
    pub is_public: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumSummary {
    pub name: String,
    pub images: Vec<SpotifyImage>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackSummary {
    pub id: String,
    pub name: String,
    pub uri: Option<String>,
    pub artists: Vec<String>,
    pub album: AlbumSummary,
    pub preview_url: Option<String>,
    pub external_url: Option<String>,
    pub duration_ms: u64,
    pub popularity: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TrackStats {
    pub total_tracks: usize,
    pub with_preview: usize,
    pub with_uri: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudiusTrackSummary {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub duration_seconds: u64,
    pub artwork_url: Option<String>,
    pub genre: String,
    pub play_count: Option<u64>,
    pub bpm: f64,
    pub stream_url: String,
}

/// One page of a cursor-paginated upstream collection.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
}

// --- Request bodies posted by the studio page ---

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    #[serde(default)]
    pub device_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayRequest {
    #[serde(default)]
    pub track_uri: String,
    pub device_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlRequest {
    #[serde(default)]
    pub action: String,
    pub device_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckAssignRequest {
    #[serde(default)]
    pub deck: String,
    #[serde(default)]
    pub track_id: String,
}
