//! Route definitions for the `/projects` resource.
//!
//! Also nests task listing and creation under `/projects/{id}/tasks`,
//! where `id` is the parent project.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{project, project_task};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /search                    -> search
/// GET    /search/{text}             -> search_path
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update
/// DELETE /{id}                      -> delete
/// POST   /{id}/edit                 -> update
/// GET    /{id}/delete               -> confirm_delete
/// POST   /{id}/delete               -> delete
///
/// GET    /{id}/tasks                -> project_task::list
/// POST   /{id}/tasks                -> project_task::create
/// GET    /{id}/tasks/new            -> project_task::new_for_project
/// ```
pub fn router() -> Router<AppState> {
    let task_routes = Router::new()
        .route("/", get(project_task::list).post(project_task::create))
        .route("/new", get(project_task::new_for_project));

    Router::new()
        .route("/", get(project::list).post(project::create))
        .route("/search", get(project::search))
        .route("/search/{text}", get(project::search_path))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route("/{id}/edit", post(project::update))
        .route(
            "/{id}/delete",
            get(project::confirm_delete).post(project::delete),
        )
        // Same capture name as `/{id}` so the routes do not conflict.
        .nest("/{id}/tasks", task_routes)
}
