// tests/support/helpers.rs
use super::mocks::InMemoryUserRepo;
use axum::body::{self, Body};
use axum::http::{Method, Request, StatusCode};
use rating_core::application::services::{ApplicationServices, ServiceConfig};
use rating_core::domain::user::UserRepository;
use rating_core::presentation::http::{routes, state::HttpState};
use serde_json::Value;
use std::sync::Arc;

pub fn build_test_state(repo: Arc<InMemoryUserRepo>, config: ServiceConfig) -> HttpState {
    let user_repo: Arc<dyn UserRepository> = repo;
    let services = Arc::new(ApplicationServices::new(user_repo, config));
    HttpState { services }
}

/// Router over a fresh in-memory store with default policies.
pub fn make_test_router() -> (axum::Router, Arc<InMemoryUserRepo>) {
    make_test_router_with(ServiceConfig::default())
}

pub fn make_test_router_with(config: ServiceConfig) -> (axum::Router, Arc<InMemoryUserRepo>) {
    make_test_router_with_transport(config, routes::RouterConfig::default())
}

pub fn make_test_router_with_transport(
    config: ServiceConfig,
    transport: routes::RouterConfig,
) -> (axum::Router, Arc<InMemoryUserRepo>) {
    let repo = Arc::new(InMemoryUserRepo::new());
    let state = build_test_state(Arc::clone(&repo), config);
    (routes::build_router_with(state, transport), repo)
}

pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub async fn read_json(resp: axum::response::Response) -> Value {
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

/// Assert that a response is an ErrorResponse JSON with the expected status and error string.
pub async fn assert_error_response(
    resp: axum::response::Response,
    expected_status: StatusCode,
    expected_error: &str,
) -> String {
    assert_eq!(resp.status(), expected_status);
    let (parts, body_stream) = resp.into_parts();
    let body_bytes = body::to_bytes(body_stream, 1024 * 1024)
        .await
        .expect("read body");
    let ct = parts
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(ct.starts_with("application/json"), "unexpected content-type: {ct}");
    let json: Value =
        serde_json::from_slice(&body_bytes).expect("expected valid json body for error");
    let err_field = json.get("error").and_then(|v| v.as_str()).unwrap_or("");
    let msg_field = json.get("message").and_then(|v| v.as_str()).unwrap_or("");
    assert_eq!(err_field, expected_error, "unexpected error field: {err_field}");
    assert!(!msg_field.is_empty(), "expected non-empty message field in ErrorResponse");
    msg_field.to_string()
}
