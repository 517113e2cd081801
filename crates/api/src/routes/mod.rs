pub mod antiforgery;
pub mod health;
pub mod home;
pub mod project;
pub mod project_comment;
pub mod project_task;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                            list, create
/// /projects/search                     search (?searchString=)
/// /projects/search/{text}              search
/// /projects/{id}                       get, update, delete
/// /projects/{id}/edit                  update (POST)
/// /projects/{id}/delete                confirm (GET), delete (POST)
/// /projects/{id}/tasks                 list, create
/// /projects/{id}/tasks/new             blank task
///
/// /tasks/search                        search (?projectId=&searchString=)
/// /tasks/{id}                          details, update, delete
/// /tasks/{id}/edit                     update (POST)
/// /tasks/{id}/delete                   confirm (GET), delete (POST)
///
/// /project-management/comments         list (?projectId=), add
/// /home/general-search                 dispatch (GET query, POST form)
/// /antiforgery/token                   issue token
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Projects, plus project-scoped task listing and creation.
        .nest("/projects", project::router())
        // Tasks addressed by their own id.
        .nest("/tasks", project_task::router())
        // Comments (script-driven).
        .nest("/project-management/comments", project_comment::router())
        // General search dispatch.
        .nest("/home", home::api_router())
        // Anti-forgery token issuance.
        .nest("/antiforgery", antiforgery::router())
}
