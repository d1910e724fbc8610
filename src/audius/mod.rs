//! # Audius Integration Module
//!
//! Client for the open Audius discovery API. No credentials or tokens are
//! involved; the catalog is browsed anonymously with an `app_name`
//! identifier. The module provides trending and search lookups plus the
//! best-effort reshaping (artwork resolution, BPM extraction with genre
//! defaults) that turns raw Audius tracks into the studio's stable DTO.

pub mod tracks;

pub use tracks::{
    AudiusProvider, extract_bpm, genre_default_bpm, map_track, resolve_artwork, search, trending,
    validate_query,
};
