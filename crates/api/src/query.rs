//! Query-string parameter types for API handlers.
//!
//! Parameter names are camelCase on the wire (`?searchString=&projectId=`).

use projecthub_core::types::DbId;
use serde::Deserialize;

/// `?searchString=` for project search.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub search_string: Option<String>,
}

/// `?projectId=&searchString=` for task search. Both filters are optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSearchParams {
    pub project_id: Option<DbId>,
    pub search_string: Option<String>,
}

/// `?projectId=` for the comment list.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentListParams {
    pub project_id: DbId,
}

/// Query string or form body of the general search box.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralSearchParams {
    pub search_type: Option<String>,
    pub search_string: Option<String>,
}
