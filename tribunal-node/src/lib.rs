//! tribunal-node library - HTTP host for the arbitration core
//!
//! Exposes the core's public operation surface as a JSON API and wires the
//! live collaborator adapters (oracle client, web fetcher, quorum runner,
//! transfer outbox).

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tribunal_core::Tribunal;

pub mod adapters;
pub mod api;
pub mod config;
pub mod error;

pub use config::NodeConfig;
pub use error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub tribunal: Arc<Tribunal>,
}

impl AppState {
    pub fn new(tribunal: Arc<Tribunal>) -> Self {
        Self { tribunal }
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/disputes", post(api::file_dispute).get(api::get_all_disputes))
        .route("/api/disputes/:id", get(api::get_dispute))
        .route("/api/disputes/:id/evidence", post(api::submit_evidence).get(api::get_dispute_evidence))
        .route("/api/disputes/:id/resolve", post(api::resolve_dispute))
        .route("/api/disputes/:id/appeal", post(api::appeal_verdict))
        .route("/api/stats", get(api::get_stats))
        .route("/health", get(api::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
