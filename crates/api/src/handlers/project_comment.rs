//! Handlers for `/project-management/comments`, used by the comment script.

use axum::extract::rejection::JsonRejection;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::Json;
use projecthub_core::error::CoreError;
use projecthub_db::models::project_comment::{CommentInput, ProjectComment};

use crate::error::{AppError, AppResult};
use crate::middleware::antiforgery::AntiForgery;
use crate::middleware::session::UnitOfWork;
use crate::query::CommentListParams;
use crate::response::CommentReply;
use crate::services::ProjectCommentService;

/// GET /api/v1/project-management/comments?projectId=
///
/// Bare JSON array, newest first.
pub async fn list(
    UnitOfWork(session): UnitOfWork,
    Query(params): Query<CommentListParams>,
) -> AppResult<Json<Vec<ProjectComment>>> {
    let comments = ProjectCommentService::list(&session, params.project_id).await?;
    Ok(Json(comments))
}

/// POST /api/v1/project-management/comments
///
/// Invalid input answers `400` with `{success: false, ...}` instead of the
/// usual error envelope. A body that does not parse as a comment gets the
/// same reply, carrying the parser's message.
pub async fn add(
    _guard: AntiForgery,
    UnitOfWork(mut session): UnitOfWork,
    payload: Result<Json<CommentInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<CommentReply>)> {
    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => {
            let messages = vec![rejection.body_text()];
            return Ok((StatusCode::BAD_REQUEST, Json(CommentReply::rejected(messages))));
        }
    };
    match ProjectCommentService::add(&mut session, &input).await {
        Ok(_) => Ok((StatusCode::OK, Json(CommentReply::added()))),
        Err(AppError::Core(CoreError::Validation { errors, .. })) => {
            let messages = errors.into_iter().map(|e| e.message).collect();
            Ok((StatusCode::BAD_REQUEST, Json(CommentReply::rejected(messages))))
        }
        Err(err) => Err(err),
    }
}
