//! Liveness endpoint for the studio backend.

use axum::response::Json;
use serde_json::{Value, json};

/// `GET /health` - reports the running backend version. No auth, no
/// session; safe for load-balancer probes.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
