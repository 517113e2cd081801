//! HTTP-level integration tests for the project endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_empty, post_json, put_json};
use serde_json::json;

// ---------------------------------------------------------------------------
// Project CRUD
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_projects_returns_seed_data() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/projects").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
    assert_eq!(json["data"][0]["name"], "Assignment 1");
    assert_eq!(json["data"][0]["projectId"], 1);
}

#[tokio::test]
async fn test_create_project_returns_201_and_round_trips() {
    let app = common::build_test_app();
    let response = post_json(
        app.clone(),
        "/api/v1/projects",
        json!({"name": "Capstone", "description": "Final term project"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["data"]["projectId"].as_i64().unwrap();
    assert_eq!(id, 3);

    let response = get(app, &format!("/api/v1/projects/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Capstone");
    assert_eq!(json["data"]["description"], "Final term project");
}

#[tokio::test]
async fn test_create_invalid_project_returns_422_with_input() {
    let app = common::build_test_app();
    let long_name = "n".repeat(101);
    let response = post_json(
        app.clone(),
        "/api/v1/projects",
        json!({"name": long_name, "description": ""}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["input"]["name"], long_name);
    let errors = json["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["field"], "description");
    assert_eq!(errors[0]["message"], "The description field is required.");
    assert_eq!(
        errors[1]["message"],
        "Project Name cannot be longer than 100 characters."
    );

    let json = body_json(get(app, "/api/v1/projects").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_nonexistent_project_returns_404() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/projects/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_update_project() {
    let app = common::build_test_app();
    let response = put_json(
        app.clone(),
        "/api/v1/projects/1",
        json!({"projectId": 1, "name": "Updated", "description": "New text"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Updated");
    assert_eq!(json["data"]["rowVersion"], 2);

    // The form-style edit route behaves the same way.
    let response = post_json(
        app.clone(),
        "/api/v1/projects/1/edit",
        json!({"projectId": 1, "name": "Again", "description": "New text"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(app, "/api/v1/projects/1").await).await;
    assert_eq!(json["data"]["name"], "Again");
}

#[tokio::test]
async fn test_update_ignores_unlisted_fields() {
    let app = common::build_test_app();
    let response = put_json(
        app,
        "/api/v1/projects/2",
        json!({
            "projectId": 2,
            "name": "Renamed",
            "description": "Same",
            "tasks": [{"title": "smuggled"}],
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["projectId"], 2);
    assert!(json["data"].get("tasks").is_none());
}

#[tokio::test]
async fn test_update_with_mismatched_id_returns_404_and_changes_nothing() {
    let app = common::build_test_app();
    let response = put_json(
        app.clone(),
        "/api/v1/projects/1",
        json!({"projectId": 2, "name": "Hijack", "description": "x"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    for id in [1, 2] {
        let json = body_json(get(app.clone(), &format!("/api/v1/projects/{id}")).await).await;
        assert_ne!(json["data"]["name"], "Hijack");
        assert_eq!(json["data"]["rowVersion"], 1);
    }
}

#[tokio::test]
async fn test_concurrent_edit_with_stale_version_returns_409() {
    let app = common::build_test_app();
    let first = put_json(
        app.clone(),
        "/api/v1/projects/1",
        json!({"projectId": 1, "name": "First", "description": "d", "rowVersion": 1}),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = put_json(
        app.clone(),
        "/api/v1/projects/1",
        json!({"projectId": 1, "name": "Second", "description": "d", "rowVersion": 1}),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(second).await["code"], "CONFLICT");

    let json = body_json(get(app, "/api/v1/projects/1").await).await;
    assert_eq!(json["data"]["name"], "First");
}

#[tokio::test]
async fn test_two_phase_delete() {
    let app = common::build_test_app();

    let response = get(app.clone(), "/api/v1/projects/2/delete").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["name"], "Assignment 2");

    let response = post_empty(app.clone(), "/api/v1/projects/2/delete").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app.clone(), "/api/v1/projects/2").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete(app, "/api/v1/projects/2").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_project_cascades_to_tasks() {
    let app = common::build_test_app();
    for title in ["One", "Two"] {
        let response = post_json(
            app.clone(),
            "/api/v1/projects/1/tasks",
            json!({"title": title, "description": "work"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = delete(app.clone(), "/api/v1/projects/1").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let json = body_json(get(app, "/api/v1/projects/1/tasks").await).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_blank_search_returns_everything() {
    let app = common::build_test_app();
    for uri in [
        "/api/v1/projects/search",
        "/api/v1/projects/search?searchString=",
        "/api/v1/projects/search?searchString=%20%20",
    ] {
        let json = body_json(get(app.clone(), uri).await).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 2, "{uri}");
        assert_eq!(json["searchPerformed"], false);
        assert!(json["searchString"].is_null());
    }
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let app = common::build_test_app();
    let json = body_json(get(app.clone(), "/api/v1/projects/search?searchString=ASSIGN").await).await;
    assert_eq!(json["searchPerformed"], true);
    assert_eq!(json["searchString"], "assign");
    assert_eq!(json["data"][0]["name"], "Assignment 1");

    let json = body_json(get(app, "/api/v1/projects/search/Assignment%202").await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["projectId"], 2);
}
