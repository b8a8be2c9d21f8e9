//! Dispute operation handlers
//!
//! Thin translation layer: decode the request, call the corresponding
//! tribunal operation, encode the result. All domain rules live in the
//! core.

use crate::error::ApiResult;
use crate::AppState;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tribunal_core::types::{
    Address, Dispute, DisputeSummary, Evidence, PlatformStats, VerdictResult,
};

#[derive(Debug, Deserialize)]
pub struct FileDisputeRequest {
    pub plaintiff: Address,
    pub defendant: Address,
    pub case_description: String,
    #[serde(default)]
    pub evidence_urls: Vec<String>,
    pub stake_amount: u64,
}

/// POST /api/disputes
pub async fn file_dispute(
    State(state): State<AppState>,
    Json(request): Json<FileDisputeRequest>,
) -> ApiResult<Json<Dispute>> {
    let dispute = state
        .tribunal
        .file_dispute(
            request.plaintiff,
            request.defendant,
            request.case_description,
            request.evidence_urls,
            request.stake_amount,
        )
        .await?;
    Ok(Json(dispute))
}

#[derive(Debug, Deserialize)]
pub struct SubmitEvidenceRequest {
    pub submitted_by: Address,
    pub evidence_type: String,
    pub content: String,
}

/// POST /api/disputes/:id/evidence
pub async fn submit_evidence(
    State(state): State<AppState>,
    Path(dispute_id): Path<u64>,
    Json(request): Json<SubmitEvidenceRequest>,
) -> ApiResult<Json<Evidence>> {
    let evidence = state
        .tribunal
        .submit_evidence(
            request.submitted_by,
            dispute_id,
            request.evidence_type,
            request.content,
        )
        .await?;
    Ok(Json(evidence))
}

/// POST /api/disputes/:id/resolve
pub async fn resolve_dispute(
    State(state): State<AppState>,
    Path(dispute_id): Path<u64>,
) -> ApiResult<Json<VerdictResult>> {
    let verdict = state.tribunal.resolve_dispute(dispute_id).await?;
    Ok(Json(verdict))
}

#[derive(Debug, Deserialize)]
pub struct AppealRequest {
    pub reason: String,
}

/// POST /api/disputes/:id/appeal
pub async fn appeal_verdict(
    State(state): State<AppState>,
    Path(dispute_id): Path<u64>,
    Json(request): Json<AppealRequest>,
) -> ApiResult<Json<Value>> {
    state
        .tribunal
        .appeal_verdict(dispute_id, request.reason)
        .await?;
    Ok(Json(json!({ "dispute_id": dispute_id, "status": "appealed" })))
}

/// GET /api/disputes/:id
pub async fn get_dispute(
    State(state): State<AppState>,
    Path(dispute_id): Path<u64>,
) -> ApiResult<Json<Dispute>> {
    Ok(Json(state.tribunal.get_dispute(dispute_id).await?))
}

/// GET /api/disputes/:id/evidence
pub async fn get_dispute_evidence(
    State(state): State<AppState>,
    Path(dispute_id): Path<u64>,
) -> ApiResult<Json<Vec<Evidence>>> {
    Ok(Json(state.tribunal.get_dispute_evidence(dispute_id).await?))
}

/// GET /api/disputes
pub async fn get_all_disputes(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<DisputeSummary>>> {
    Ok(Json(state.tribunal.get_all_disputes().await?))
}

/// GET /api/stats
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<Json<PlatformStats>> {
    Ok(Json(state.tribunal.get_stats().await?))
}
