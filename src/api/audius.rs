use axum::{
    Json,
    extract::Query,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::{audius::tracks, utils};

const DEFAULT_LIMIT: u64 = 50;

#[derive(Debug, Deserialize)]
pub struct TrendingQuery {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub time: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub limit: Option<u64>,
}

/// `GET /api/audius/trending` - trending tracks for a time range. No auth.
pub async fn audius_trending(Query(params): Query<TrendingQuery>) -> Response {
    let limit = utils::clamp_limit(params.limit, DEFAULT_LIMIT, tracks::MAX_LIMIT);
    let offset = params.offset.unwrap_or(0);
    let time = params.time.as_deref().unwrap_or("week");

    match tracks::trending(limit, offset, time).await {
        Ok(found) => {
            let total = found.len();
            Json(json!({ "tracks": found, "total": total })).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// `GET /api/audius/search` - free-text track search. A blank query is a
/// 400 before any upstream call.
pub async fn audius_search(Query(params): Query<SearchQuery>) -> Response {
    let raw = params.q.unwrap_or_default();
    let query = match tracks::validate_query(&raw) {
        Ok(query) => query.to_string(),
        Err(e) => return e.into_response(),
    };
    let limit = utils::clamp_limit(params.limit, DEFAULT_LIMIT, tracks::MAX_LIMIT);

    match tracks::search(&query, limit).await {
        Ok(found) => {
            let total = found.len();
            Json(json!({ "tracks": found, "query": query, "total": total })).into_response()
        }
        Err(e) => e.into_response(),
    }
}
