//! Comment operations.

use chrono::Utc;
use projecthub_core::types::DbId;
use projecthub_core::validation::{missing_reference, rejection, validate_input};
use projecthub_db::gateway::{Direction, Filter, GatewayError, Query, Session};
use projecthub_db::models::project::Project;
use projecthub_db::models::project_comment::{CommentInput, ProjectComment};

use crate::error::{AppError, AppResult};

pub struct ProjectCommentService;

impl ProjectCommentService {
    /// Comments on a project, newest first.
    pub async fn list(session: &Session, project_id: DbId) -> AppResult<Vec<ProjectComment>> {
        let query = Query::<ProjectComment>::new()
            .filter(Filter::eq("project_id", project_id))
            .order_by("date_posted", Direction::Desc)
            .order_by("project_comment_id", Direction::Desc);
        Ok(session.fetch(&query).await?)
    }

    /// Store a comment stamped with the current UTC time.
    ///
    /// A missing project is a validation failure on `projectId`, whether it
    /// was already gone or vanished before the save.
    pub async fn add(session: &mut Session, input: &CommentInput) -> AppResult<ProjectComment> {
        validate_input(input)?;
        let missing_project =
            || rejection(input, vec![missing_reference("projectId", "Project", input.project_id)]);
        if !session.exists::<Project>(input.project_id).await? {
            return Err(missing_project().into());
        }

        let mut comment = ProjectComment::new(input.project_id, input.content.clone(), Utc::now());
        let staged = session.add(&comment);
        let report = session.save().await.map_err(|err| match err {
            GatewayError::ForeignKey(_) => AppError::from(missing_project()),
            other => other.into(),
        })?;
        comment.project_comment_id = report
            .inserted_id(staged)
            .ok_or_else(|| AppError::InternalError("Insert returned no id".into()))?;

        tracing::info!(
            comment_id = comment.project_comment_id,
            project_id = comment.project_id,
            "Comment added"
        );
        Ok(comment)
    }
}
