//! HTTP surface tests over in-memory collaborators

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use tribunal_core::fetch::StaticFetcher;
use tribunal_core::ledger::MemoryLedger;
use tribunal_core::oracle::{ScriptedConsensusRunner, ScriptedOracle};
use tribunal_core::store::MemoryStore;
use tribunal_core::{Tribunal, TribunalConfig};
use tribunal_node::{build_router, AppState};

fn reasoning_words(words: usize) -> String {
    vec!["the submitted records and fetched pages support this outcome"; words / 9 + 1]
        .join(" ")
        .split_whitespace()
        .take(words)
        .collect::<Vec<_>>()
        .join(" ")
}

fn verdict_payload() -> String {
    json!({
        "verdict": "split_ruling",
        "confidence": 60,
        "reasoning": reasoning_words(300),
        "key_factors": ["partial delivery", "ambiguous contract terms"],
        "evidence_weight": {
            "plaintiff_evidence_strength": 5,
            "defendant_evidence_strength": 5
        },
        "recommended_distribution": {
            "plaintiff_percent": 50,
            "defendant_percent": 50
        }
    })
    .to_string()
}

fn app(oracle_responses: Vec<&str>, consensus_candidates: Vec<String>) -> Router {
    let tribunal = Tribunal::new(
        TribunalConfig::default(),
        Arc::new(MemoryStore::new()),
        Arc::new(ScriptedOracle::new(
            oracle_responses.into_iter().map(str::to_string).collect(),
        )),
        Arc::new(ScriptedConsensusRunner::new(consensus_candidates)),
        Arc::new(StaticFetcher::default()),
        Arc::new(MemoryLedger::new()),
    );
    build_router(AppState::new(Arc::new(tribunal)))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(value) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn file_request_body() -> Value {
    json!({
        "plaintiff": "0xaaaa",
        "defendant": "0xbbbb",
        "case_description": "The defendant accepted payment for goods and never shipped them to the buyer.",
        "evidence_urls": [],
        "stake_amount": 1000
    })
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app(vec![], vec![]);
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn file_then_read_round_trip() {
    let app = app(vec![], vec![]);

    let (status, dispute) = send(&app, "POST", "/api/disputes", Some(file_request_body())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dispute["dispute_id"], 0);
    assert_eq!(dispute["status"], "evidence_gathering");

    let (status, fetched) = send(&app, "GET", "/api/disputes/0", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["plaintiff"], "0xaaaa");

    let (status, all) = send(&app, "GET", "/api/disputes", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 1);

    let (status, stats) = send(&app, "GET", "/api/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_disputes"], 1);
    assert_eq!(stats["min_stake"], 10);
}

#[tokio::test]
async fn invalid_input_maps_to_400() {
    let app = app(vec![], vec![]);
    let mut body = file_request_body();
    body["stake_amount"] = json!(1);
    let (status, error) = send(&app, "POST", "/api/disputes", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn unknown_dispute_maps_to_404() {
    let app = app(vec![], vec![]);
    let (status, error) = send(&app, "GET", "/api/disputes/7", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn consensus_failure_maps_to_502() {
    let app = app(vec![], vec!["nonsense".to_string()]);
    send(&app, "POST", "/api/disputes", Some(file_request_body())).await;

    let (status, error) = send(&app, "POST", "/api/disputes/0/resolve", None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(error["error"]["code"], "CONSENSUS_FAILURE");

    // Dispute remains resolvable state-wise
    let (_, dispute) = send(&app, "GET", "/api/disputes/0", None).await;
    assert_eq!(dispute["status"], "evidence_gathering");
}

#[tokio::test]
async fn resolve_evidence_and_appeal_flow() {
    let app = app(vec!["77"], vec![verdict_payload()]);
    send(&app, "POST", "/api/disputes", Some(file_request_body())).await;

    let (status, evidence) = send(
        &app,
        "POST",
        "/api/disputes/0/evidence",
        Some(json!({
            "submitted_by": "0xaaaa",
            "evidence_type": "document",
            "content": "signed purchase order"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(evidence["credibility_score"], 77);

    let (status, verdict) = send(&app, "POST", "/api/disputes/0/resolve", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(verdict["verdict"], "split_ruling");
    assert_eq!(verdict["confidence"], 60);

    // Second resolve is a state conflict
    let (status, error) = send(&app, "POST", "/api/disputes/0/resolve", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["error"]["code"], "INVALID_STATE");

    let (status, _) = send(
        &app,
        "POST",
        "/api/disputes/0/appeal",
        Some(json!({ "reason": "r".repeat(150) })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, dispute) = send(&app, "GET", "/api/disputes/0", None).await;
    assert_eq!(dispute["status"], "appealed");
    assert_eq!(dispute["verdict"], "");
    assert_eq!(dispute["confidence_score"], 0);
}
