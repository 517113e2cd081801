//! Landing, about, general search, and fallback handlers.

use axum::extract::{Form, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Redirect;
use axum::Json;
use projecthub_core::search::{resolve_general_search, SearchTarget};
use serde::Serialize;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::query::GeneralSearchParams;

/// Landing page payload.
#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub links: Vec<&'static str>,
}

/// GET /
pub async fn index() -> Json<HomeResponse> {
    Json(HomeResponse {
        name: "ProjectHub",
        version: env!("CARGO_PKG_VERSION"),
        links: vec![
            "/api/v1/projects",
            "/api/v1/projects/search",
            "/api/v1/tasks/search",
            "/about",
        ],
    })
}

/// GET /about
pub async fn about() -> Json<serde_json::Value> {
    Json(json!({
        "name": "ProjectHub",
        "description": "Track course projects, their tasks, and discussion comments.",
    }))
}

/// GET /api/v1/home/general-search?searchType=&searchString=
pub async fn general_search(Query(params): Query<GeneralSearchParams>) -> AppResult<Redirect> {
    dispatch(params)
}

/// POST /api/v1/home/general-search (form body)
pub async fn general_search_form(Form(params): Form<GeneralSearchParams>) -> AppResult<Redirect> {
    dispatch(params)
}

/// Redirect (303) to the search endpoint named by `searchType`, or home.
fn dispatch(params: GeneralSearchParams) -> AppResult<Redirect> {
    let target = resolve_general_search(
        params.search_type.as_deref(),
        params.search_string.as_deref(),
    );
    let location = match target {
        SearchTarget::Home => "/".to_string(),
        SearchTarget::Projects(text) => search_location("/api/v1/projects/search", &text)?,
        SearchTarget::Tasks(text) => search_location("/api/v1/tasks/search", &text)?,
    };
    tracing::debug!(%location, "General search dispatched");
    Ok(Redirect::to(&location))
}

fn search_location(path: &str, text: &str) -> AppResult<String> {
    let query = serde_urlencoded::to_string([("searchString", text)])
        .map_err(|e| AppError::InternalError(format!("Failed to encode search: {e}")))?;
    Ok(format!("{path}?{query}"))
}

/// Fallback for unmatched routes. Echoes the request id for support.
pub async fn not_found(headers: HeaderMap) -> (StatusCode, Json<serde_json::Value>) {
    let request_id = headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Resource not found",
            "code": "NOT_FOUND",
            "requestId": request_id,
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_location_encodes_text() {
        assert_eq!(
            search_location("/api/v1/projects/search", "a&b c").unwrap(),
            "/api/v1/projects/search?searchString=a%26b+c"
        );
    }
}
