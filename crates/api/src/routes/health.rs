//! Liveness endpoint at `/health`, outside the versioned API.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use projecthub_db::MEMORY_URL;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreHealth {
    /// `ok`, or `degraded` when the store cannot be reached.
    pub status: &'static str,
    pub version: &'static str,
    /// `memory` or `postgres`, picked from `DATABASE_URL`.
    pub backend: &'static str,
    pub store_reachable: bool,
}

/// A reachable store answers `200`; otherwise `503` with the same body.
async fn store_health(State(state): State<AppState>) -> (StatusCode, Json<StoreHealth>) {
    let store_reachable = match state.session().ping().await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "Store ping failed");
            false
        }
    };
    let backend = if state.config.database_url == MEMORY_URL {
        "memory"
    } else {
        "postgres"
    };

    let (code, status) = if store_reachable {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };
    let body = StoreHealth {
        status,
        version: env!("CARGO_PKG_VERSION"),
        backend,
        store_reachable,
    };
    (code, Json(body))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(store_health))
}
