use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    config,
    error::ProxyError,
    types::{
        AlbumSummary, Page, PlaylistSummary, PlaylistTrackItem, SpotifyPaging, SpotifyPlaylist,
        TrackStats, TrackSummary,
    },
    utils::{self, MAX_PAGES},
};

use super::CATALOG_TIMEOUT;

const PLAYLIST_PAGE_SIZE: u64 = 50;
const TRACK_PAGE_SIZE: u64 = 100;

/// Field projection for track pages; keeps upstream payloads small.
const TRACK_FIELDS: &str =
    "items(track(id,name,uri,artists,album,preview_url,external_urls,duration_ms,popularity)),next";

/// Fetches one page of a paginated collection endpoint.
///
/// A 401 at any page aborts the whole walk with `SessionExpired`; results
/// from earlier pages are discarded by the walker, not returned.
async fn fetch_page<T: DeserializeOwned>(
    client: &Client,
    token: &str,
    url: &str,
) -> Result<Page<T>, ProxyError> {
    let res = client
        .get(url)
        .bearer_auth(token)
        .timeout(CATALOG_TIMEOUT)
        .send()
        .await?;

    match res.status() {
        StatusCode::UNAUTHORIZED => Err(ProxyError::SessionExpired),
        StatusCode::NOT_FOUND => Err(ProxyError::NotFound),
        status if !status.is_success() => Err(ProxyError::Upstream(status.as_u16())),
        _ => {
            let paging: SpotifyPaging<T> = res.json().await?;
            Ok(Page {
                items: paging.items,
                next: paging.next,
            })
        }
    }
}

/// Retrieves all playlists of the authenticated user.
///
/// Follows the `next` cursor to exhaustion (page size 50), drops playlists
/// without any tracks, and reshapes the survivors into the studio's
/// [`PlaylistSummary`] schema.
pub async fn get_user_playlists(token: &str) -> Result<Vec<PlaylistSummary>, ProxyError> {
    let first_url = format!(
        "{}/me/playlists?limit={}",
        config::spotify_api_url(),
        PLAYLIST_PAGE_SIZE
    );

    let client = Client::new();
    let token = token.to_string();
    let raw: Vec<SpotifyPlaylist> = utils::walk_pages(first_url, MAX_PAGES, move |url| {
        let client = client.clone();
        let token = token.clone();
        async move { fetch_page(&client, &token, &url).await }
    })
    .await?;

    Ok(raw.into_iter().filter_map(map_playlist).collect())
}

/// Retrieves every track of a playlist together with summary statistics.
///
/// Pages through the track listing (page size 100) with a fixed field
/// projection, skips null/placeholder entries, and computes the statistics
/// with one re-scan over the accumulated set after pagination completes.
/// A 404 maps to [`ProxyError::NotFound`].
pub async fn get_playlist_tracks(
    token: &str,
    playlist_id: &str,
) -> Result<(Vec<TrackSummary>, TrackStats), ProxyError> {
    let first_url = format!(
        "{}/playlists/{}/tracks?limit={}&fields={}",
        config::spotify_api_url(),
        playlist_id,
        TRACK_PAGE_SIZE,
        urlencoding::encode(TRACK_FIELDS)
    );

    let client = Client::new();
    let token = token.to_string();
    let raw: Vec<PlaylistTrackItem> = utils::walk_pages(first_url, MAX_PAGES, move |url| {
        let client = client.clone();
        let token = token.clone();
        async move { fetch_page(&client, &token, &url).await }
    })
    .await?;

    let tracks: Vec<TrackSummary> = raw.into_iter().filter_map(map_track).collect();
    let stats = track_stats(&tracks);
    Ok((tracks, stats))
}

/// Reshapes an upstream playlist; playlists with zero tracks map to `None`.
pub fn map_playlist(playlist: SpotifyPlaylist) -> Option<PlaylistSummary> {
    if playlist.tracks.total == 0 {
        return None;
    }

    Some(PlaylistSummary {
        id: playlist.id,
        name: playlist.name,
        description: playlist.description.unwrap_or_default(),
        track_count: playlist.tracks.total,
        images: playlist.images,
        owner_display_name: playlist
            .owner
            .and_then(|o| o.display_name)
            .unwrap_or_else(|| "Unknown".to_string()),
        external_url: playlist.external_urls.get("spotify").cloned(),
        is_public: playlist.public.unwrap_or(false),
    })
}

/// Reshapes one track entry; null or id-less placeholder entries (removed
/// and local tracks) map to `None`.
pub fn map_track(item: PlaylistTrackItem) -> Option<TrackSummary> {
    let track = item.track?;
    let id = track.id?;

    let album = match track.album {
        Some(album) => AlbumSummary {
            name: album.name.unwrap_or_else(|| "Unknown Album".to_string()),
            images: album.images,
        },
        None => AlbumSummary {
            name: "Unknown Album".to_string(),
            images: Vec::new(),
        },
    };

    Some(TrackSummary {
        id,
        name: track.name,
        uri: track.uri,
        artists: track.artists.into_iter().map(|a| a.name).collect(),
        album,
        preview_url: track.preview_url,
        external_url: track.external_urls.get("spotify").cloned(),
        duration_ms: track.duration_ms.unwrap_or(0),
        popularity: track.popularity.unwrap_or(0),
    })
}

/// Summary statistics over a reshaped track set.
pub fn track_stats(tracks: &[TrackSummary]) -> TrackStats {
    TrackStats {
        total_tracks: tracks.len(),
        with_preview: tracks.iter().filter(|t| t.preview_url.is_some()).count(),
        with_uri: tracks.iter().filter(|t| t.uri.is_some()).count(),
    }
}
