use reqwest::Method;

use handmixed::error::ValidationError;
use handmixed::spotify::player::{PlayerAction, control_request};

#[test]
fn test_player_action_parsing() {
    assert_eq!("play".parse::<PlayerAction>(), Ok(PlayerAction::Play));
    assert_eq!("pause".parse::<PlayerAction>(), Ok(PlayerAction::Pause));
    assert_eq!("next".parse::<PlayerAction>(), Ok(PlayerAction::Next));
    assert_eq!(
        "previous".parse::<PlayerAction>(),
        Ok(PlayerAction::Previous)
    );

    // Unknown and case-mismatched actions are rejected
    assert_eq!(
        "stop".parse::<PlayerAction>(),
        Err(ValidationError::InvalidAction("stop".to_string()))
    );
    assert_eq!(
        "Play".parse::<PlayerAction>(),
        Err(ValidationError::InvalidAction("Play".to_string()))
    );
}

#[test]
fn test_control_request_play_pause_put_with_device() {
    let (method, url) = control_request(PlayerAction::Pause, Some("dev1"));
    assert_eq!(method, Method::PUT);
    assert!(url.ends_with("/me/player/pause?device_id=dev1"));

    let (method, url) = control_request(PlayerAction::Play, Some("dev1"));
    assert_eq!(method, Method::PUT);
    assert!(url.ends_with("/me/player/play?device_id=dev1"));
}

#[test]
fn test_control_request_without_device() {
    // Absent or blank device ids produce no qualifier
    let (_, url) = control_request(PlayerAction::Play, None);
    assert!(url.ends_with("/me/player/play"));

    let (_, url) = control_request(PlayerAction::Pause, Some(""));
    assert!(url.ends_with("/me/player/pause"));
}

#[test]
fn test_control_request_next_previous_post_ignores_device() {
    // Skip commands are POST and never carry a device qualifier
    let (method, url) = control_request(PlayerAction::Next, Some("dev1"));
    assert_eq!(method, Method::POST);
    assert!(url.ends_with("/me/player/next"));
    assert!(!url.contains("device_id"));

    let (method, url) = control_request(PlayerAction::Previous, None);
    assert_eq!(method, Method::POST);
    assert!(url.ends_with("/me/player/previous"));
}

#[test]
fn test_control_request_encodes_device_id() {
    let (_, url) = control_request(PlayerAction::Play, Some("a b/c"));
    assert!(url.ends_with("?device_id=a%20b%2Fc"));
}
