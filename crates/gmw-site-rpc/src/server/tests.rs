// crates/gmw-site-rpc/src/server/tests.rs
// ============================================================================
// Module: RPC Server Unit Tests
// Description: Unit tests for envelope handling, error mapping, and audit.
// Purpose: Validate server module behavior with in-memory fixtures.
// Dependencies: gmw-site-rpc
// ============================================================================

//! ## Overview
//! Drives [`parse_request`] directly with raw bodies and checks status codes,
//! JSON-RPC error codes, and the audit event recorded for each request.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::Mutex;

use axum::body::Bytes;
use axum::http::StatusCode;
use gmw_site_config::SiteConfig;
use gmw_site_config::StoreType;
use serde_json::Value;
use serde_json::json;

use super::ServerError;
use super::ServerState;
use super::SiteServer;
use super::cors_layer;
use super::parse_request;
use crate::audit::RpcAuditEvent;
use crate::audit::RpcAuditSink;
use crate::audit::RpcOutcome;
use crate::procedures::ProcedureName;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

#[derive(Default)]
struct TestAudit {
    events: Mutex<Vec<RpcAuditEvent>>,
}

impl RpcAuditSink for TestAudit {
    fn record(&self, event: &RpcAuditEvent) {
        self.events.lock().expect("events lock").push(event.clone());
    }
}

fn sample_state(max_body_bytes: usize) -> (ServerState, Arc<TestAudit>) {
    let audit = Arc::new(TestAudit::default());
    let mut config = memory_config();
    config.server.max_body_bytes = max_body_bytes;
    let server = SiteServer::from_config(config).expect("memory server");
    let state = server.with_audit_sink(audit.clone()).into_state();
    (state, audit)
}

fn peer() -> Option<SocketAddr> {
    Some(SocketAddr::from(([127, 0, 0, 1], 40_000)))
}

async fn post_json(state: &ServerState, payload: &Value) -> (StatusCode, Value) {
    let bytes = Bytes::from(serde_json::to_vec(payload).expect("payload bytes"));
    post_raw(state, bytes).await
}

async fn post_raw(state: &ServerState, bytes: Bytes) -> (StatusCode, Value) {
    let (status, response) = parse_request(state, peer(), &bytes).await;
    (status, serde_json::to_value(&response).expect("response json"))
}

fn memory_config() -> SiteConfig {
    let mut config = SiteConfig::default();
    config.store.store_type = StoreType::Memory;
    config.store.path = None;
    config.server.audit.enabled = false;
    config
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[tokio::test]
async fn body_over_limit_is_rejected() {
    let payload = json!({ "jsonrpc": "2.0", "id": 1, "method": "healthcheck" });
    let bytes = Bytes::from(serde_json::to_vec(&payload).unwrap());
    let (state, audit) = sample_state(bytes.len() - 1);
    let (status, body) = post_raw(&state, bytes).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"]["code"], -32070);
    assert_eq!(body["id"], Value::Null);
    let events = audit.events.lock().unwrap();
    assert_eq!(events[0].error_kind, Some("body_too_large"));
}

#[tokio::test]
async fn body_at_limit_is_accepted() {
    let payload = json!({ "jsonrpc": "2.0", "id": 1, "method": "healthcheck" });
    let bytes = Bytes::from(serde_json::to_vec(&payload).unwrap());
    let (state, _audit) = sample_state(bytes.len());
    let (status, body) = post_raw(&state, bytes).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["status"], "ok");
}

#[tokio::test]
async fn malformed_json_is_an_invalid_request() {
    let (state, _audit) = sample_state(1024);
    let (status, body) = post_raw(&state, Bytes::from_static(b"{\"jsonrpc\":")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], -32600);
}

#[tokio::test]
async fn wrong_version_is_an_invalid_request() {
    let (state, _audit) = sample_state(1024);
    let (status, body) =
        post_json(&state, &json!({ "jsonrpc": "1.0", "id": 3, "method": "healthcheck" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], -32600);
    assert_eq!(body["id"], 3);
}

#[tokio::test]
async fn unknown_method_is_not_found() {
    let (state, audit) = sample_state(1024);
    let (status, body) =
        post_json(&state, &json!({ "jsonrpc": "2.0", "id": "a", "method": "dropTables" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], -32601);
    assert_eq!(body["id"], "a");
    let events = audit.events.lock().unwrap();
    assert_eq!(events[0].procedure, None);
    assert_eq!(events[0].outcome, RpcOutcome::Error);
}

#[tokio::test]
async fn null_request_id_is_audited_as_absent() {
    let (state, audit) = sample_state(1024);
    post_json(&state, &json!({ "jsonrpc": "2.0", "id": null, "method": "healthcheck" })).await;
    post_json(&state, &json!({ "jsonrpc": "1.0", "id": null, "method": "healthcheck" })).await;
    post_json(&state, &json!({ "jsonrpc": "2.0", "id": null, "method": "dropTables" })).await;
    post_json(&state, &json!({ "jsonrpc": "2.0", "id": 7, "method": "healthcheck" })).await;
    let events = audit.events.lock().unwrap();
    let ids: Vec<Option<&str>> = events.iter().map(|event| event.request_id.as_deref()).collect();
    assert_eq!(ids, vec![None, None, None, Some("7")]);
    assert_eq!(events[0].outcome, RpcOutcome::Ok);
    assert_eq!(events[1].error_kind, Some("invalid_request"));
    assert_eq!(events[2].error_kind, Some("unknown_procedure"));
}

#[tokio::test]
async fn validation_failure_carries_field_detail() {
    let (state, audit) = sample_state(4096);
    let (status, body) = post_json(
        &state,
        &json!({
            "jsonrpc": "2.0",
            "id": 9,
            "method": "createServiceInquiry",
            "params": {
                "name": "Ada",
                "email": "ada@example.com",
                "service_type": "iot",
                "description": "short",
            },
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], -32602);
    assert_eq!(body["error"]["data"]["field"], "description");
    assert_eq!(body["error"]["data"]["message"], "Description must be at least 10 characters");
    let events = audit.events.lock().unwrap();
    assert_eq!(events[0].procedure, Some(ProcedureName::CreateServiceInquiry));
    assert_eq!(events[0].error_kind, Some("invalid_params"));
}

#[tokio::test]
async fn absent_and_null_params_mean_no_input() {
    let (state, _audit) = sample_state(4096);
    let (status, body) =
        post_json(&state, &json!({ "jsonrpc": "2.0", "id": 1, "method": "getBlogPosts" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], json!([]));
    let (status, body) = post_json(
        &state,
        &json!({ "jsonrpc": "2.0", "id": 2, "method": "getCompanyStats", "params": null }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], json!([]));
}

#[tokio::test]
async fn null_result_is_serialized_for_missing_slug() {
    let (state, _audit) = sample_state(4096);
    let (status, body) = post_json(
        &state,
        &json!({
            "jsonrpc": "2.0",
            "id": 5,
            "method": "getBlogPostBySlug",
            "params": { "slug": "nope" },
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], Value::Null);
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn procedures_list_reports_every_procedure() {
    let (state, audit) = sample_state(1024);
    let (status, body) =
        post_json(&state, &json!({ "jsonrpc": "2.0", "id": 1, "method": "procedures/list" })).await;
    assert_eq!(status, StatusCode::OK);
    let procedures = body["result"]["procedures"].as_array().unwrap();
    assert_eq!(procedures.len(), ProcedureName::all().len());
    assert_eq!(procedures[0], json!({ "name": "healthcheck", "kind": "query" }));
    let events = audit.events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].outcome, RpcOutcome::Ok);
    assert!(events[0].response_bytes > 0);
    assert_eq!(events[0].peer_ip.as_deref(), Some("127.0.0.1"));
}

#[test]
fn from_config_rejects_invalid_config() {
    let mut config = memory_config();
    config.server.bind = "not-an-address".to_string();
    match SiteServer::from_config(config) {
        Err(ServerError::Config(_)) => {}
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("invalid config accepted"),
    }
}

#[test]
fn from_config_builds_memory_server() {
    let server = SiteServer::from_config(memory_config()).expect("memory server");
    assert!(server.into_app().is_ok());
}

#[test]
fn explicit_cors_origins_build_a_layer() {
    let mut config = memory_config();
    config.server.cors.allowed_origins =
        vec!["https://gmwtechgroup.com".to_string(), "http://localhost:3000".to_string()];
    assert!(cors_layer(&config.server.cors).is_ok());
}
