//! Field-level validation constants and helpers.
//!
//! Input DTOs derive [`validator::Validate`]; this module turns the derive's
//! [`ValidationErrors`] into a flat, deterministic list of [`FieldError`]s and
//! wraps them into [`CoreError::Validation`] together with the rejected input.

use heck::ToLowerCamelCase;
use serde::Serialize;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Length limits
// ---------------------------------------------------------------------------

/// Maximum length of a project name in characters.
pub const MAX_PROJECT_NAME_LENGTH: usize = 100;

/// Maximum length of a project description in characters.
pub const MAX_PROJECT_DESCRIPTION_LENGTH: usize = 500;

/// Maximum length of a task title in characters.
pub const MAX_TASK_TITLE_LENGTH: usize = 100;

/// Maximum length of a task description in characters.
pub const MAX_TASK_DESCRIPTION_LENGTH: usize = 500;

/// Maximum length of a comment body in characters.
pub const MAX_COMMENT_CONTENT_LENGTH: usize = 500;

// ---------------------------------------------------------------------------
// Field errors
// ---------------------------------------------------------------------------

/// A single validation failure attached to a named input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// camelCase field name as it appears in the JSON payload.
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Flatten derive-produced errors into a list sorted by field name.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_lower_camel_case();
            errs.iter()
                .map(|e| FieldError::new(field.clone(), describe(&field, e)))
                .collect::<Vec<_>>()
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field).then(a.message.cmp(&b.message)));
    out
}

/// Build a [`CoreError::Validation`] carrying the rejected input.
pub fn rejection<T: Serialize>(input: &T, errors: Vec<FieldError>) -> CoreError {
    CoreError::Validation {
        input: serde_json::to_value(input).unwrap_or(serde_json::Value::Null),
        errors,
    }
}

/// Run the derived validators for `input`, returning a rejection on failure.
pub fn validate_input<T: Validate + Serialize>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| rejection(input, field_errors(&errors)))
}

/// Custom validator: the value must contain at least one non-whitespace character.
pub fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

fn describe(field: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }
    match error.code.as_ref() {
        "required" => format!("The {field} field is required."),
        code => format!("The {field} field is invalid ({code})."),
    }
}

/// Error for a field whose value points at a missing parent entity.
pub fn missing_reference(field: &str, entity: &str, id: crate::types::DbId) -> FieldError {
    FieldError::new(field, format!("{entity} with id {id} does not exist"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
