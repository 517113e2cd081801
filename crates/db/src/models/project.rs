//! Project entity model and DTOs.

use projecthub_core::types::DbId;
use projecthub_core::validation::required;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::gateway::{Column, ColumnKind, Entity, GatewayError, Record, Relation, Value};

/// Projects inserted by the initial migration (and by `MemoryStore::seeded`).
pub const SEED_PROJECTS: &[(&str, &str)] = &[
    ("Assignment 1", "Comp2139 - Assignment 1"),
    ("Assignment 2", "Comp2139 - Assignment 2"),
];

/// A row from the `projects` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub project_id: DbId,
    pub name: String,
    pub description: String,
    pub row_version: i32,
}

impl Project {
    /// A not-yet-persisted project.
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            project_id: 0,
            name: name.to_string(),
            description: description.to_string(),
            row_version: 1,
        }
    }
}

impl Entity for Project {
    const NAME: &'static str = "Project";
    const TABLE: &'static str = "projects";
    const KEY: &'static str = "project_id";
    const COLUMNS: &'static [Column] = &[
        Column::new("name", ColumnKind::Text),
        Column::new("description", ColumnKind::Text),
    ];
    const CHILDREN: &'static [Relation] = &[
        Relation {
            table: "project_tasks",
            column: "project_id",
        },
        Relation {
            table: "project_comments",
            column: "project_id",
        },
    ];

    fn id(&self) -> DbId {
        self.project_id
    }

    fn row_version(&self) -> i32 {
        self.row_version
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("name", Value::from(self.name.as_str())),
            ("description", Value::from(self.description.as_str())),
        ]
    }

    fn from_record(record: &Record) -> Result<Self, GatewayError> {
        Ok(Self {
            project_id: record.id,
            name: record.text("name")?,
            description: record.text("description")?,
            row_version: record.row_version,
        })
    }
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectInput {
    #[validate(
        custom(function = "required"),
        length(max = 100, message = "Project Name cannot be longer than 100 characters.")
    )]
    pub name: String,
    #[validate(
        custom(function = "required"),
        length(
            max = 500,
            message = "Project Description cannot be longer than 500 characters."
        )
    )]
    pub description: String,
}

/// DTO for editing a project: the only fields a client may change.
///
/// `project_id` must repeat the id from the URL. `row_version`, when given,
/// is the version the client loaded; omitting it compares against the
/// version read at the start of the request instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateProject {
    pub project_id: DbId,
    #[validate(
        custom(function = "required"),
        length(max = 100, message = "Project Name cannot be longer than 100 characters.")
    )]
    pub name: String,
    #[validate(
        custom(function = "required"),
        length(
            max = 500,
            message = "Project Description cannot be longer than 500 characters."
        )
    )]
    pub description: String,
    pub row_version: Option<i32>,
}

#[cfg(test)]
mod tests {
    use projecthub_core::validation::{
        validate_input, MAX_PROJECT_DESCRIPTION_LENGTH, MAX_PROJECT_NAME_LENGTH,
    };

    use super::*;

    #[test]
    fn limits_are_inclusive() {
        let at_limit = ProjectInput {
            name: "n".repeat(MAX_PROJECT_NAME_LENGTH),
            description: "d".repeat(MAX_PROJECT_DESCRIPTION_LENGTH),
        };
        assert!(validate_input(&at_limit).is_ok());

        let over = ProjectInput {
            name: "n".repeat(MAX_PROJECT_NAME_LENGTH + 1),
            ..at_limit
        };
        assert!(validate_input(&over).is_err());
    }

    #[test]
    fn update_dto_ignores_unknown_fields() {
        let dto: UpdateProject = serde_json::from_value(serde_json::json!({
            "projectId": 4,
            "name": "n",
            "description": "d",
            "tasks": [],
            "rowVersion": 3,
        }))
        .unwrap();
        assert_eq!(dto.project_id, 4);
        assert_eq!(dto.row_version, Some(3));
    }
}
