//! Project task entity model and DTOs.

use projecthub_core::types::DbId;
use projecthub_core::validation::required;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::gateway::{Column, ColumnKind, Entity, GatewayError, Record, Relation, Value};

/// A row from the `project_tasks` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTask {
    pub project_task_id: DbId,
    pub title: String,
    pub description: String,
    pub project_id: DbId,
    pub row_version: i32,
}

impl ProjectTask {
    /// A not-yet-persisted task under `project_id`.
    pub fn new(project_id: DbId, title: &str, description: &str) -> Self {
        Self {
            project_task_id: 0,
            title: title.to_string(),
            description: description.to_string(),
            project_id,
            row_version: 1,
        }
    }
}

impl Entity for ProjectTask {
    const NAME: &'static str = "ProjectTask";
    const TABLE: &'static str = "project_tasks";
    const KEY: &'static str = "project_task_id";
    const COLUMNS: &'static [Column] = &[
        Column::new("title", ColumnKind::Text),
        Column::new("description", ColumnKind::Text),
        Column::new("project_id", ColumnKind::BigInt),
    ];
    const PARENT: Option<Relation> = Some(Relation {
        table: "projects",
        column: "project_id",
    });

    fn id(&self) -> DbId {
        self.project_task_id
    }

    fn row_version(&self) -> i32 {
        self.row_version
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("title", Value::from(self.title.as_str())),
            ("description", Value::from(self.description.as_str())),
            ("project_id", Value::BigInt(self.project_id)),
        ]
    }

    fn from_record(record: &Record) -> Result<Self, GatewayError> {
        Ok(Self {
            project_task_id: record.id,
            title: record.text("title")?,
            description: record.text("description")?,
            project_id: record.big_int("project_id")?,
            row_version: record.row_version,
        })
    }
}

/// DTO for creating a task. The parent project comes from the route.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskInput {
    #[validate(
        custom(function = "required"),
        length(max = 100, message = "Task Title cannot be longer than 100 characters.")
    )]
    pub title: String,
    #[validate(
        custom(function = "required"),
        length(max = 500, message = "Task Description cannot be longer than 500 characters.")
    )]
    pub description: String,
}

/// DTO for editing a task: the only fields a client may change.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateProjectTask {
    pub project_task_id: DbId,
    #[validate(
        custom(function = "required"),
        length(max = 100, message = "Task Title cannot be longer than 100 characters.")
    )]
    pub title: String,
    #[validate(
        custom(function = "required"),
        length(max = 500, message = "Task Description cannot be longer than 500 characters.")
    )]
    pub description: String,
    pub project_id: DbId,
    pub row_version: Option<i32>,
}

#[cfg(test)]
mod tests {
    use projecthub_core::validation::{
        validate_input, MAX_TASK_DESCRIPTION_LENGTH, MAX_TASK_TITLE_LENGTH,
    };

    use super::*;

    #[test]
    fn overlong_fields_are_reported_by_name() {
        let input = TaskInput {
            title: "t".repeat(MAX_TASK_TITLE_LENGTH + 1),
            description: "d".repeat(MAX_TASK_DESCRIPTION_LENGTH + 1),
        };
        let Err(projecthub_core::error::CoreError::Validation { errors, .. }) =
            validate_input(&input)
        else {
            panic!("expected validation error");
        };
        assert_eq!(errors[0].field, "description");
        assert_eq!(errors[1].message, "Task Title cannot be longer than 100 characters.");
    }
}
