#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use projecthub_core::antiforgery::{issue_token, COOKIE_NAME, HEADER_NAME};
use projecthub_db::gateway::MemoryStore;
use tower::ServiceExt;

use projecthub_api::config::ServerConfig;
use projecthub_api::router::build_app_router;
use projecthub_api::state::AppState;

/// Fixed signing key so tests can mint their own tokens.
pub const TEST_SECRET: &[u8] = b"projecthub-test-secret-0123456789";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        database_url: "memory:".to_string(),
        database_max_connections: 1,
        antiforgery_secret: TEST_SECRET.to_vec(),
        static_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/static").to_string(),
    }
}

/// Full application router over a seeded in-memory store.
pub fn build_test_app() -> Router {
    build_test_app_with(Arc::new(MemoryStore::seeded()))
}

/// Full application router over `store`, so a test can inspect it afterwards.
///
/// Uses the same [`build_app_router`] as `main.rs`, so integration tests
/// exercise the production middleware stack.
pub fn build_test_app_with(store: Arc<MemoryStore>) -> Router {
    let config = test_config();
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as text.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

/// Request builder carrying a valid anti-forgery cookie and header.
pub fn with_token(method: Method, uri: &str) -> axum::http::request::Builder {
    let token = issue_token(TEST_SECRET);
    Request::builder()
        .method(method)
        .uri(uri)
        .header(COOKIE, format!("{COOKIE_NAME}={token}"))
        .header(HEADER_NAME, token)
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = with_token(Method::POST, uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = with_token(Method::PUT, uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    let request = with_token(Method::POST, uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = with_token(Method::DELETE, uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_form(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}
