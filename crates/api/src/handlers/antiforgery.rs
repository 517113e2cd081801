//! Anti-forgery token issuance.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::IntoResponse;
use axum::Json;
use projecthub_core::antiforgery::{issue_token, HEADER_NAME};
use serde::Serialize;

use crate::middleware::antiforgery::token_cookie;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: String,
    /// Header the token must be echoed in on mutating requests.
    pub header_name: &'static str,
}

/// GET /api/v1/antiforgery/token
///
/// Sets the cookie half of the pair and returns the header half in the body.
pub async fn token(State(state): State<AppState>) -> impl IntoResponse {
    let token = issue_token(&state.config.antiforgery_secret);
    (
        [(SET_COOKIE, token_cookie(&token))],
        Json(TokenResponse {
            token,
            header_name: HEADER_NAME,
        }),
    )
}
