use axum::routing::get;
use axum::Router;

use crate::handlers::antiforgery;
use crate::state::AppState;

/// Routes mounted at `/antiforgery`.
pub fn router() -> Router<AppState> {
    Router::new().route("/token", get(antiforgery::token))
}
