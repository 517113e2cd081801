use axum::routing::get;
use axum::Router;

use crate::handlers::project_comment;
use crate::state::AppState;

/// Routes mounted at `/project-management/comments`.
///
/// ```text
/// GET    /    -> list (?projectId=)
/// POST   /    -> add
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(project_comment::list).post(project_comment::add))
}
