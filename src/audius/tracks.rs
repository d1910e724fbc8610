use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::{
    config,
    error::{ProxyError, ValidationError},
    oauth::MusicProvider,
    types::AudiusTrackSummary,
};

const AUDIUS_TIMEOUT: Duration = Duration::from_secs(10);

/// Largest number of tracks a single trending/search call may request.
pub const MAX_LIMIT: u64 = 100;

/// BPM field names probed in order, at the top level and inside the nested
/// metadata and analysis objects.
const BPM_FIELDS: [&str; 3] = ["bpm", "tempo", "beats_per_minute"];

/// Plausible BPM window; values outside it are treated as absent.
const BPM_RANGE: (f64, f64) = (60.0, 200.0);

/// The Audius variant of the provider seam.
///
/// Audius is an open catalog: it carries neither the authorization nor the
/// playback capability, so only the base trait is implemented.
pub struct AudiusProvider;

impl MusicProvider for AudiusProvider {
    fn name(&self) -> &'static str {
        "audius"
    }
}

/// Validates a search query; blank-after-trim queries are rejected before
/// any upstream call.
pub fn validate_query(query: &str) -> Result<&str, ValidationError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyQuery);
    }
    Ok(trimmed)
}

/// Retrieves trending tracks for a time range (`week`, `month`, `year` or
/// `allTime`). Single-page call; no cursor walk.
pub async fn trending(
    limit: u64,
    offset: u64,
    time: &str,
) -> Result<Vec<AudiusTrackSummary>, ProxyError> {
    let api = config::audius_api_url();
    let url = format!(
        "{}/tracks/trending?time={}&limit={}&offset={}&app_name={}",
        api,
        urlencoding::encode(time),
        limit.min(MAX_LIMIT),
        offset,
        config::audius_app_name()
    );

    fetch_tracks(&url, &api).await
}

/// Searches the catalog by free-text query. Single-page call.
///
/// Callers validate the query with [`validate_query`] first.
pub async fn search(query: &str, limit: u64) -> Result<Vec<AudiusTrackSummary>, ProxyError> {
    let api = config::audius_api_url();
    let url = format!(
        "{}/tracks/search?query={}&limit={}&app_name={}",
        api,
        urlencoding::encode(query),
        limit.min(MAX_LIMIT),
        config::audius_app_name()
    );

    fetch_tracks(&url, &api).await
}

async fn fetch_tracks(url: &str, api: &str) -> Result<Vec<AudiusTrackSummary>, ProxyError> {
    let client = Client::new();
    let res = client.get(url).timeout(AUDIUS_TIMEOUT).send().await?;

    match res.status() {
        StatusCode::NOT_FOUND => return Err(ProxyError::NotFound),
        status if !status.is_success() => return Err(ProxyError::Upstream(status.as_u16())),
        _ => {}
    }

    let json: Value = res.json().await?;
    let items = json["data"].as_array().cloned().unwrap_or_default();

    Ok(items.iter().filter_map(|item| map_track(item, api)).collect())
}

/// Reshapes one raw Audius track; entries without an id map to `None`.
///
/// Artwork and BPM are best-effort: a missing artwork degrades to null and a
/// missing or implausible BPM falls back to a genre-keyword default. The
/// stream reference is the provider's per-track stream endpoint.
pub fn map_track(value: &Value, api: &str) -> Option<AudiusTrackSummary> {
    let id = value["id"].as_str()?.to_string();
    let genre = value["genre"].as_str().map(str::to_string);

    let bpm = extract_bpm(value).unwrap_or_else(|| genre_default_bpm(genre.as_deref()));

    Some(AudiusTrackSummary {
        stream_url: format!("{}/tracks/{}/stream", api, id),
        title: value["title"].as_str().unwrap_or("Untitled").to_string(),
        artist: value["user"]["name"]
            .as_str()
            .unwrap_or("Unknown Artist")
            .to_string(),
        duration_seconds: value["duration"].as_u64().unwrap_or(0),
        artwork_url: resolve_artwork(value),
        genre: genre.unwrap_or_else(|| "Unknown".to_string()),
        play_count: value["play_count"].as_u64(),
        bpm,
        id,
    })
}

/// Resolves the artwork URL, preferring the large rendition.
pub fn resolve_artwork(value: &Value) -> Option<String> {
    let artwork = &value["artwork"];
    artwork["1000x1000"]
        .as_str()
        .or_else(|| artwork["480x480"].as_str())
        .map(str::to_string)
}

/// Scans a track for a plausible BPM value.
///
/// Probes the candidate field names top-level first, then inside `metadata`,
/// then inside `analysis`/`audio_features`, and accepts the first numeric
/// value inside the plausible window.
pub fn extract_bpm(value: &Value) -> Option<f64> {
    let containers = [
        value,
        &value["metadata"],
        &value["analysis"],
        &value["audio_features"],
    ];

    for container in containers {
        for field in BPM_FIELDS {
            if let Some(bpm) = container[field].as_f64() {
                if bpm >= BPM_RANGE.0 && bpm <= BPM_RANGE.1 {
                    return Some(bpm);
                }
            }
        }
    }

    None
}

/// Genre-keyword BPM default for tracks without usable tempo data.
pub fn genre_default_bpm(genre: Option<&str>) -> f64 {
    let genre = match genre {
        Some(g) => g.to_lowercase(),
        None => return 120.0,
    };

    if genre.contains("drum & bass") || genre.contains("drum and bass") || genre.contains("dnb") {
        174.0
    } else if genre.contains("dubstep") {
        140.0
    } else if genre.contains("house") || genre.contains("techno") {
        128.0
    } else if genre.contains("hip-hop") || genre.contains("hip hop") || genre.contains("rap") {
        95.0
    } else {
        120.0
    }
}
