//! Anti-forgery extractor for state-mutating handlers.
//!
//! Double-submit check: the token sent in the `x-csrf-token` header must
//! equal the token stored in the anti-forgery cookie, and must carry a valid
//! signature for the server secret.

use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use projecthub_core::antiforgery::{verify_pair, COOKIE_NAME, HEADER_NAME};
use projecthub_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Proof that the request carried a matching anti-forgery token pair.
///
/// ```ignore
/// async fn create(_guard: AntiForgery, Json(input): Json<ProjectInput>) -> AppResult<...> {
///     ...
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AntiForgery;

impl FromRequestParts<AppState> for AntiForgery {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(HEADER_NAME)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| forbidden("Missing anti-forgery token header"))?;

        let cookie = cookie_value(&parts.headers, COOKIE_NAME)
            .ok_or_else(|| forbidden("Missing anti-forgery cookie"))?;

        if !verify_pair(&state.config.antiforgery_secret, &cookie, header) {
            tracing::warn!(method = %parts.method, uri = %parts.uri, "Anti-forgery check failed");
            return Err(forbidden("Invalid anti-forgery token"));
        }

        Ok(AntiForgery)
    }
}

fn forbidden(msg: &str) -> AppError {
    AppError::Core(CoreError::Forbidden(msg.into()))
}

/// Find `name` across every `Cookie` header of the request.
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.to_string())
}

/// `Set-Cookie` value that stores `token` for same-site requests only.
pub fn token_cookie(token: &str) -> String {
    format!("{COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Strict")
}
