use std::str::FromStr;

use reqwest::{Client, Method, StatusCode};
use serde_json::json;

use crate::{config, error::ProxyError, error::ValidationError};

use super::PLAYER_TIMEOUT;

/// The playback commands the studio page can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Play,
    Pause,
    Next,
    Previous,
}

impl FromStr for PlayerAction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "play" => Ok(PlayerAction::Play),
            "pause" => Ok(PlayerAction::Pause),
            "next" => Ok(PlayerAction::Next),
            "previous" => Ok(PlayerAction::Previous),
            other => Err(ValidationError::InvalidAction(other.to_string())),
        }
    }
}

/// Builds the upstream request shape for a playback command.
///
/// The player API is asymmetric and the distinction is preserved here:
/// play/pause are `PUT` and accept an optional `device_id` qualifier, while
/// next/previous are `POST` and ignore any device id.
pub fn control_request(action: PlayerAction, device_id: Option<&str>) -> (Method, String) {
    let api = config::spotify_api_url();
    match action {
        PlayerAction::Play | PlayerAction::Pause => {
            let verb = if action == PlayerAction::Play {
                "play"
            } else {
                "pause"
            };
            let mut url = format!("{}/me/player/{}", api, verb);
            if let Some(device) = device_id.filter(|d| !d.is_empty()) {
                url.push_str(&format!("?device_id={}", urlencoding::encode(device)));
            }
            (Method::PUT, url)
        }
        PlayerAction::Next => (Method::POST, format!("{}/me/player/next", api)),
        PlayerAction::Previous => (Method::POST, format!("{}/me/player/previous", api)),
    }
}

/// Maps a player-command response status to the proxy taxonomy.
///
/// 2xx (including the usual 204 No Content) is success. 404 covers the
/// no-active-device case upstream reports for commands.
fn command_status(status: StatusCode) -> Result<(), ProxyError> {
    match status {
        s if s.is_success() => Ok(()),
        StatusCode::UNAUTHORIZED => Err(ProxyError::SessionExpired),
        StatusCode::FORBIDDEN => Err(ProxyError::PremiumRequired),
        StatusCode::NOT_FOUND => Err(ProxyError::NotFound),
        s => Err(ProxyError::Upstream(s.as_u16())),
    }
}

/// Transfers playback to the given device without starting playback.
pub async fn transfer_playback(token: &str, device_id: &str) -> Result<(), ProxyError> {
    let client = Client::new();
    let res = client
        .put(format!("{}/me/player", config::spotify_api_url()))
        .bearer_auth(token)
        .json(&json!({ "device_ids": [device_id], "play": false }))
        .timeout(PLAYER_TIMEOUT)
        .send()
        .await?;

    command_status(res.status())
}

/// Starts playback of a single track, scoped to a device when one is given.
pub async fn play_track(
    token: &str,
    track_uri: &str,
    device_id: Option<&str>,
) -> Result<(), ProxyError> {
    let mut url = format!("{}/me/player/play", config::spotify_api_url());
    if let Some(device) = device_id.filter(|d| !d.is_empty()) {
        url.push_str(&format!("?device_id={}", urlencoding::encode(device)));
    }

    let client = Client::new();
    let res = client
        .put(url)
        .bearer_auth(token)
        .json(&json!({ "uris": [track_uri] }))
        .timeout(PLAYER_TIMEOUT)
        .send()
        .await?;

    command_status(res.status())
}

/// Issues a stateless playback command.
pub async fn control(
    token: &str,
    action: PlayerAction,
    device_id: Option<&str>,
) -> Result<(), ProxyError> {
    let (method, url) = control_request(action, device_id);

    let client = Client::new();
    let res = client
        .request(method, url)
        .bearer_auth(token)
        .timeout(PLAYER_TIMEOUT)
        .send()
        .await?;

    command_status(res.status())
}
