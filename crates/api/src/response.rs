//! Shared response envelope and view types for API handlers.
//!
//! Plain resources use a `{ "data": ... }` envelope. Search pages carry the
//! search state next to the results so a client can redisplay the form.

use projecthub_core::types::DbId;
use projecthub_db::models::project::Project;
use projecthub_db::models::project_task::ProjectTask;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Project list or search results.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSearchView<T: Serialize> {
    pub data: Vec<T>,
    pub search_performed: bool,
    pub search_string: Option<String>,
}

/// Task list for one project, or task search results.
///
/// `project_id` is `None` for a search across every project.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListView<T: Serialize> {
    pub project_id: Option<DbId>,
    pub data: Vec<T>,
    pub search_performed: bool,
    pub search_string: Option<String>,
}

/// Reply to a comment submission. Never a redirect.
#[derive(Debug, Serialize)]
pub struct CommentReply {
    pub success: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl CommentReply {
    pub fn added() -> Self {
        Self {
            success: true,
            message: "Comment added successfully",
            errors: Vec::new(),
        }
    }

    pub fn rejected(errors: Vec<String>) -> Self {
        Self {
            success: false,
            message: "Invalid comment data",
            errors,
        }
    }
}

/// A task together with the project it belongs to.
#[derive(Debug, Serialize)]
pub struct TaskDetails {
    pub task: ProjectTask,
    pub project: Project,
}
