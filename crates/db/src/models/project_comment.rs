//! Project comment entity model and DTOs.

use projecthub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::gateway::{Column, ColumnKind, Entity, GatewayError, Record, Relation, Value};

/// A row from the `project_comments` table.
///
/// Serializes as `{projectCommentId, content, datePosted, projectId}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectComment {
    pub project_comment_id: DbId,
    pub content: Option<String>,
    /// Always UTC, stamped by the server when the comment is stored.
    pub date_posted: Timestamp,
    pub project_id: DbId,
    #[serde(skip)]
    pub row_version: i32,
}

impl ProjectComment {
    /// A not-yet-persisted comment posted at `date_posted`.
    pub fn new(project_id: DbId, content: Option<String>, date_posted: Timestamp) -> Self {
        Self {
            project_comment_id: 0,
            content,
            date_posted,
            project_id,
            row_version: 1,
        }
    }
}

impl Entity for ProjectComment {
    const NAME: &'static str = "ProjectComment";
    const TABLE: &'static str = "project_comments";
    const KEY: &'static str = "project_comment_id";
    const COLUMNS: &'static [Column] = &[
        Column::new("content", ColumnKind::NullableText),
        Column::new("date_posted", ColumnKind::Timestamp),
        Column::new("project_id", ColumnKind::BigInt),
    ];
    const PARENT: Option<Relation> = Some(Relation {
        table: "projects",
        column: "project_id",
    });

    fn id(&self) -> DbId {
        self.project_comment_id
    }

    fn row_version(&self) -> i32 {
        self.row_version
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("content", Value::from(self.content.clone())),
            ("date_posted", Value::Timestamp(self.date_posted)),
            ("project_id", Value::BigInt(self.project_id)),
        ]
    }

    fn from_record(record: &Record) -> Result<Self, GatewayError> {
        Ok(Self {
            project_comment_id: record.id,
            content: record.nullable_text("content")?,
            date_posted: record.timestamp("date_posted")?,
            project_id: record.big_int("project_id")?,
            row_version: record.row_version,
        })
    }
}

/// DTO for posting a comment.
///
/// Has no `date_posted` field: a client-supplied value is
/// dropped during deserialization and the server stamps its own.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CommentInput {
    #[validate(length(
        max = 500,
        message = "Project Message cannot be longer than 500 characters."
    ))]
    pub content: Option<String>,
    pub project_id: DbId,
}
