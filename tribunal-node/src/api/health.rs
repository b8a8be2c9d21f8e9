//! Health endpoint

use axum::Json;
use serde_json::{json, Value};

/// Liveness check (no auth, no database access)
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "tribunal-node",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
