mod common;

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;

use axum::body::{Body, to_bytes};
use axum::extract::ConnectInfo;
use axum::http::{Method, Request, StatusCode, header};
use axum::response::Response;
use common::{RecordingMailer, SITE_ORIGIN, StaticRuns, TestGate, Verdict};
use portfolio_api::AppState;
use portfolio_api::domain::gateways::WorkflowRunSource;
use portfolio_api::routes::app_router;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Larger than the router's read cap for the contact route.
const HUGE_BODY_BYTES: usize = 70_000;

fn gate() -> TestGate {
    common::create_test_state(None, Verdict::Human, Some(RecordingMailer::new()))
}

fn empty(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn contact(origin: Option<&str>, content_type: &str, body: impl Into<Body>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/api/send-email")
        .header(header::CONTENT_TYPE, content_type);
    if let Some(origin) = origin {
        builder = builder.header(header::ORIGIN, origin);
    }
    builder.body(body.into()).unwrap()
}

/// A JSON object padded past `size` bytes.
fn json_body_of(size: usize) -> String {
    json!({
        "name": "Jane",
        "email": "jane@x.com",
        "message": "x".repeat(size),
    })
    .to_string()
}

fn from_peer(mut request: Request<Body>, peer: &str) -> Request<Body> {
    let addr: SocketAddr = peer.parse().unwrap();
    request.extensions_mut().insert(ConnectInfo(addr));
    request
}

async fn read_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}

async fn call(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
    let response = app_router(state, false).oneshot(request).await.unwrap();
    read_json(response).await
}

// ─── Health ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_health_is_mounted() {
    let (status, json) = call(gate().state, empty(Method::GET, "/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_trailing_slash_is_trimmed() {
    let (status, json) = call(gate().state, empty(Method::GET, "/health/")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(json.get("checks").is_some());
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (status, _) = call(gate().state, empty(Method::GET, "/api/unknown")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ─── Contact ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_contact_rejects_other_methods_with_json() {
    for method in [Method::GET, Method::PUT, Method::DELETE] {
        let (status, json) = call(gate().state, empty(method, "/api/send-email")).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(json["error"], "Method not allowed");
    }
}

#[tokio::test]
async fn test_contact_delivers_through_full_router() {
    let gate = gate();
    let body = json!({ "name": "Jane", "email": "jane@x.com", "message": "Hi" }).to_string();

    let (status, json) = call(
        gate.state.clone(),
        contact(Some(SITE_ORIGIN), "application/json", body),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "ok": true }));
    assert_eq!(gate.sent().len(), 1);
}

#[tokio::test]
async fn test_huge_body_from_foreign_origin_is_forbidden() {
    let gate = gate();

    let (status, json) = call(
        gate.state.clone(),
        contact(
            Some("https://evil.example"),
            "application/json",
            json_body_of(HUGE_BODY_BYTES),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json, json!({ "error": "Forbidden origin" }));
    assert!(gate.sent().is_empty());
}

#[tokio::test]
async fn test_huge_non_json_body_is_unsupported() {
    let (status, json) = call(
        gate().state,
        contact(None, "text/plain", "x".repeat(HUGE_BODY_BYTES)),
    )
    .await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(json["error"], "Unsupported Media Type");
}

#[tokio::test]
async fn test_huge_json_body_is_too_large_with_json_error() {
    let gate = gate();

    let (status, json) = call(
        gate.state.clone(),
        contact(
            Some(SITE_ORIGIN),
            "application/json",
            json_body_of(HUGE_BODY_BYTES),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(json, json!({ "error": "Payload too large" }));
    assert!(gate.sent().is_empty());
}

#[tokio::test]
async fn test_body_over_gate_limit_is_too_large() {
    let (status, json) = call(
        gate().state,
        contact(None, "application/json", json_body_of(6000)),
    )
    .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(json["error"], "Payload too large");
}

// ─── Status rate limiting ────────────────────────────────────────────────────

fn status_state() -> AppState {
    let runs = Arc::new(StaticRuns {
        runs: vec![common::workflow_run(1)],
        calls: AtomicUsize::new(0),
    });
    common::create_status_state(Some(runs as Arc<dyn WorkflowRunSource>), None)
}

#[tokio::test]
async fn test_status_routes_allow_burst_then_limit() {
    let app = app_router(status_state(), false);

    for _ in 0..20 {
        let request = from_peer(empty(Method::GET, "/api/github-builds"), "203.0.113.7:4000");
        let (status, json) = read_json(app.clone().oneshot(request).await.unwrap()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["latest"].as_array().unwrap().len(), 1);
    }

    let request = from_peer(empty(Method::GET, "/api/github-builds"), "203.0.113.7:4000");
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    // Buckets are per client IP.
    let request = from_peer(empty(Method::GET, "/api/github-builds"), "198.51.100.9:4000");
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_contact_gate_is_not_rate_limited() {
    let gate = gate();
    let app = app_router(gate.state.clone(), false);

    for _ in 0..25 {
        let request = from_peer(
            contact(None, "application/json", json_body_of(10)),
            "203.0.113.7:4000",
        );
        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(gate.sent().len(), 25);
}

#[tokio::test]
async fn test_vercel_route_is_limited_behind_proxy() {
    let app = app_router(status_state(), true);

    let forwarded = |ip: &'static str| {
        let mut request = empty(Method::GET, "/api/vercel-deployment");
        request
            .headers_mut()
            .insert("x-forwarded-for", ip.parse().unwrap());
        from_peer(request, "10.0.0.1:4000")
    };

    for _ in 0..20 {
        let response = app.clone().oneshot(forwarded("192.0.2.1")).await.unwrap();
        let (status, json) = read_json(response).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "Missing Vercel credentials");
    }

    let response = app.clone().oneshot(forwarded("192.0.2.1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let response = app.clone().oneshot(forwarded("192.0.2.2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
