use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use projecthub_core::error::CoreError;
use projecthub_db::gateway::GatewayError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`GatewayError`] for persistence
/// failures, and adds an HTTP-specific catch-all. Implements [`IntoResponse`] to
/// produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `projecthub_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A persistence error from the gateway.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(CoreError::Validation { input, errors }) => {
                // The rejected input goes back so the form can be redisplayed.
                let body = json!({
                    "error": "One or more fields are invalid",
                    "code": "VALIDATION_ERROR",
                    "input": input,
                    "errors": errors,
                });
                return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(body)).into_response();
            }
            AppError::Core(CoreError::NotFound { entity, id }) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} with id {id} not found"),
            ),
            AppError::Core(CoreError::Conflict(msg)) => {
                (StatusCode::CONFLICT, "CONFLICT", msg.clone())
            }
            AppError::Core(CoreError::Forbidden(msg)) => {
                (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone())
            }

            // --- Persistence errors ---
            AppError::Gateway(err) => classify_gateway_error(err),

            // --- HTTP-specific errors ---
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Classify a gateway error into an HTTP status, error code, and message.
///
/// - An unresolved stale write maps to 409.
/// - Foreign key violations map to 409.
/// - `RowNotFound` maps to 404.
/// - Everything else maps to 500 with a sanitized message.
fn classify_gateway_error(err: &GatewayError) -> (StatusCode, &'static str, String) {
    match err {
        GatewayError::StaleWrite { entity, id } => (
            StatusCode::CONFLICT,
            "CONFLICT",
            format!("{entity} with id {id} was modified by another request"),
        ),
        GatewayError::ForeignKey(constraint) => (
            StatusCode::CONFLICT,
            "CONFLICT",
            format!("Referenced row does not exist: {constraint}"),
        ),
        GatewayError::Database(sqlx::Error::RowNotFound) => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        GatewayError::Database(db_err) => {
            tracing::error!(error = %db_err, "Database error");
            internal()
        }
        GatewayError::Decode(msg) => {
            tracing::error!(error = %msg, "Row decode error");
            internal()
        }
    }
}
