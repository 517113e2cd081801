use axum::routing::get;
use axum::Router;

use crate::handlers::home;
use crate::state::AppState;

/// Root-level pages (NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/about", get(home::about))
}

/// Routes mounted at `/api/v1/home`.
///
/// ```text
/// GET    /general-search    -> general_search (query string)
/// POST   /general-search    -> general_search_form (form body)
/// ```
pub fn api_router() -> Router<AppState> {
    Router::new().route(
        "/general-search",
        get(home::general_search).post(home::general_search_form),
    )
}
