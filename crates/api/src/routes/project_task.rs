//! Route definitions for the `/tasks` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::project_task;
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// ```text
/// GET    /search         -> search
/// GET    /{id}           -> details
/// PUT    /{id}           -> update
/// DELETE /{id}           -> delete
/// POST   /{id}/edit      -> update
/// GET    /{id}/delete    -> confirm_delete
/// POST   /{id}/delete    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", get(project_task::search))
        .route(
            "/{id}",
            get(project_task::details)
                .put(project_task::update)
                .delete(project_task::delete),
        )
        .route("/{id}/edit", post(project_task::update))
        .route(
            "/{id}/delete",
            get(project_task::confirm_delete).post(project_task::delete),
        )
}
