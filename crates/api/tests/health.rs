//! Integration tests for the health check, root pages, and general HTTP behaviour.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, body_text, get, send};

#[tokio::test]
async fn health_reports_memory_backend_as_reachable() {
    let app = common::build_test_app();
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["backend"], "memory");
    assert_eq!(json["storeReachable"], true);
}

#[tokio::test]
async fn unknown_route_returns_404_with_request_id() {
    let app = common::build_test_app();
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().get("x-request-id").is_some());
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert!(json["requestId"].is_string());
}

#[tokio::test]
async fn landing_and_about_pages() {
    let app = common::build_test_app();
    let json = body_json(get(app.clone(), "/").await).await;
    assert_eq!(json["name"], "ProjectHub");

    let response = get(app, "/about").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["description"].is_string());
}

#[tokio::test]
async fn comment_script_is_served() {
    let app = common::build_test_app();
    let response = get(app, "/static/js/project_comment.js").await;

    assert_eq!(response.status(), StatusCode::OK);
    let script = body_text(response).await;
    assert!(script.contains("function loadComments"));
    assert!(script.contains("commentsList"));
    assert!(script.contains("response.status === 403"));
    assert!(script.contains("antiforgery = null"));
}

#[tokio::test]
async fn preflight_allows_antiforgery_header_from_configured_origin() {
    let app = common::build_test_app();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/project-management/comments")
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "x-csrf-token")
        .body(Body::empty())
        .unwrap();
    let response = send(app, request).await;

    let headers = response.headers();
    assert_eq!(
        headers["access-control-allow-origin"],
        "http://localhost:5173"
    );
    assert_eq!(headers["access-control-allow-credentials"], "true");
    let allowed = headers["access-control-allow-headers"].to_str().unwrap();
    assert!(allowed.contains("x-csrf-token"));
}
