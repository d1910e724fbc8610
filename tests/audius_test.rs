use serde_json::json;

use handmixed::audius::{
    extract_bpm, genre_default_bpm, map_track, resolve_artwork, validate_query,
};
use handmixed::error::ValidationError;

const API: &str = "https://discoveryprovider.audius.co/v1";

#[test]
fn test_validate_query() {
    assert_eq!(validate_query("  four tet "), Ok("four tet"));
    assert_eq!(validate_query(""), Err(ValidationError::EmptyQuery));
    assert_eq!(validate_query("   "), Err(ValidationError::EmptyQuery));
}

#[test]
fn test_extract_bpm_top_level_fields() {
    assert_eq!(extract_bpm(&json!({ "bpm": 128.0 })), Some(128.0));
    assert_eq!(extract_bpm(&json!({ "tempo": 174 })), Some(174.0));
    assert_eq!(
        extract_bpm(&json!({ "beats_per_minute": 95.5 })),
        Some(95.5)
    );
}

#[test]
fn test_extract_bpm_nested_containers() {
    // Nested metadata and analysis objects are probed after the top level
    assert_eq!(
        extract_bpm(&json!({ "metadata": { "bpm": 140.0 } })),
        Some(140.0)
    );
    assert_eq!(
        extract_bpm(&json!({ "analysis": { "tempo": 172.0 } })),
        Some(172.0)
    );
    assert_eq!(
        extract_bpm(&json!({ "audio_features": { "tempo": 122.0 } })),
        Some(122.0)
    );

    // Top level wins over nested values
    assert_eq!(
        extract_bpm(&json!({ "bpm": 126.0, "metadata": { "bpm": 140.0 } })),
        Some(126.0)
    );
}

#[test]
fn test_extract_bpm_rejects_implausible_values() {
    // Below and above the plausible window
    assert_eq!(extract_bpm(&json!({ "bpm": 30.0 })), None);
    assert_eq!(extract_bpm(&json!({ "tempo": 300.0 })), None);

    // An implausible top-level value does not mask a plausible nested one
    assert_eq!(
        extract_bpm(&json!({ "bpm": 30.0, "metadata": { "tempo": 140.0 } })),
        Some(140.0)
    );

    // Non-numeric and absent fields
    assert_eq!(extract_bpm(&json!({ "bpm": "fast" })), None);
    assert_eq!(extract_bpm(&json!({})), None);
}

#[test]
fn test_genre_default_bpm() {
    assert_eq!(genre_default_bpm(Some("Drum & Bass")), 174.0);
    assert_eq!(genre_default_bpm(Some("Liquid DnB")), 174.0);
    assert_eq!(genre_default_bpm(Some("Dubstep")), 140.0);
    assert_eq!(genre_default_bpm(Some("Tech House")), 128.0);
    assert_eq!(genre_default_bpm(Some("Techno")), 128.0);
    assert_eq!(genre_default_bpm(Some("Hip-Hop/Rap")), 95.0);
    assert_eq!(genre_default_bpm(Some("Ambient")), 120.0);
    assert_eq!(genre_default_bpm(None), 120.0);
}

#[test]
fn test_resolve_artwork_prefers_large_rendition() {
    let both = json!({ "artwork": {
        "480x480": "https://img.example/small.jpg",
        "1000x1000": "https://img.example/large.jpg"
    }});
    assert_eq!(
        resolve_artwork(&both).as_deref(),
        Some("https://img.example/large.jpg")
    );

    let small_only = json!({ "artwork": { "480x480": "https://img.example/small.jpg" } });
    assert_eq!(
        resolve_artwork(&small_only).as_deref(),
        Some("https://img.example/small.jpg")
    );

    assert_eq!(resolve_artwork(&json!({})), None);
}

#[test]
fn test_map_track_reshapes_fields() {
    let raw = json!({
        "id": "a1",
        "title": "Midnight",
        "user": { "name": "RQ" },
        "duration": 245,
        "genre": "House",
        "play_count": 4210,
        "bpm": 126.0,
        "artwork": { "1000x1000": "https://img.example/a1.jpg" }
    });

    let track = map_track(&raw, API).unwrap();
    assert_eq!(track.id, "a1");
    assert_eq!(track.title, "Midnight");
    assert_eq!(track.artist, "RQ");
    assert_eq!(track.duration_seconds, 245);
    assert_eq!(track.genre, "House");
    assert_eq!(track.play_count, Some(4210));
    assert_eq!(track.bpm, 126.0);
    assert_eq!(
        track.artwork_url.as_deref(),
        Some("https://img.example/a1.jpg")
    );
    assert_eq!(track.stream_url, format!("{}/tracks/a1/stream", API));
}

#[test]
fn test_map_track_requires_id() {
    assert!(map_track(&json!({ "title": "No Id" }), API).is_none());
}

#[test]
fn test_map_track_fallbacks() {
    // Only an id: every other field degrades to its fallback
    let track = map_track(&json!({ "id": "a2" }), API).unwrap();
    assert_eq!(track.title, "Untitled");
    assert_eq!(track.artist, "Unknown Artist");
    assert_eq!(track.genre, "Unknown");
    assert_eq!(track.duration_seconds, 0);
    assert!(track.play_count.is_none());
    assert!(track.artwork_url.is_none());
    assert_eq!(track.bpm, 120.0);
}

#[test]
fn test_map_track_genre_fallback_bpm() {
    // No usable tempo data, so the genre keyword decides
    let track = map_track(&json!({ "id": "a3", "genre": "Drum & Bass" }), API).unwrap();
    assert_eq!(track.bpm, 174.0);

    // An implausible reported tempo also falls through to the genre default
    let track = map_track(
        &json!({ "id": "a4", "genre": "Dubstep", "bpm": 999.0 }),
        API,
    )
    .unwrap();
    assert_eq!(track.bpm, 140.0);
}
