//! Keyword search helpers and the general search dispatcher.
//!
//! This module lives in `core` (zero internal deps) so both the service layer
//! and the HTTP layer agree on how search input is normalized.

// ---------------------------------------------------------------------------
// Search string normalization
// ---------------------------------------------------------------------------

/// Normalize a free-text search string for case-insensitive matching.
///
/// Trims surrounding whitespace and lowercases the rest. Returns `None` when
/// the input is absent, empty, or whitespace-only, meaning "no search".
///
/// ```
/// use projecthub_core::search::normalize_search;
/// assert_eq!(normalize_search(Some("  ASSIGN ")), Some("assign".to_string()));
/// assert_eq!(normalize_search(Some("   ")), None);
/// assert_eq!(normalize_search(None), None);
/// ```
pub fn normalize_search(input: Option<&str>) -> Option<String> {
    let trimmed = input?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

// ---------------------------------------------------------------------------
// General search dispatch
// ---------------------------------------------------------------------------

/// Search type values that route to the project search.
pub const PROJECT_SEARCH_TYPES: &[&str] = &["project", "projects"];

/// Search type values that route to the task search.
pub const TASK_SEARCH_TYPES: &[&str] = &["task", "tasks"];

/// Where a general search request should be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTarget {
    /// Nothing usable was submitted; go back to the landing page.
    Home,
    /// Project keyword search with the submitted search string.
    Projects(String),
    /// Task keyword search with the submitted search string.
    Tasks(String),
}

/// Decide which search endpoint handles a `(searchType, searchString)` pair.
///
/// The search type is trimmed and case-folded before matching. An empty type,
/// an empty search string, or an unrecognized type all resolve to
/// [`SearchTarget::Home`].
pub fn resolve_general_search(
    search_type: Option<&str>,
    search_string: Option<&str>,
) -> SearchTarget {
    let search_type = search_type.map(|t| t.trim().to_lowercase());
    let search_string = search_string.map(str::trim).filter(|s| !s.is_empty());

    let (Some(search_type), Some(search_string)) = (search_type, search_string) else {
        return SearchTarget::Home;
    };

    if PROJECT_SEARCH_TYPES.contains(&search_type.as_str()) {
        SearchTarget::Projects(search_string.to_string())
    } else if TASK_SEARCH_TYPES.contains(&search_type.as_str()) {
        SearchTarget::Tasks(search_string.to_string())
    } else {
        SearchTarget::Home
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- normalize_search ----------------------------------------------------

    #[test]
    fn normalize_lowercases_and_trims() {
        assert_eq!(
            normalize_search(Some(" Assignment 1 ")),
            Some("assignment 1".to_string())
        );
    }

    #[test]
    fn normalize_empty_is_none() {
        assert_eq!(normalize_search(Some("")), None);
        assert_eq!(normalize_search(Some("\t\n ")), None);
    }

    #[test]
    fn normalize_keeps_inner_whitespace() {
        assert_eq!(normalize_search(Some("a  b")), Some("a  b".to_string()));
    }

    // -- resolve_general_search ----------------------------------------------

    #[test]
    fn project_type_is_case_insensitive() {
        assert_eq!(
            resolve_general_search(Some("  PROJECT "), Some("lab")),
            SearchTarget::Projects("lab".to_string())
        );
    }

    #[test]
    fn tasks_type_routes_to_tasks() {
        assert_eq!(
            resolve_general_search(Some("tasks"), Some("write")),
            SearchTarget::Tasks("write".to_string())
        );
        assert_eq!(
            resolve_general_search(Some("Task"), Some("write")),
            SearchTarget::Tasks("write".to_string())
        );
    }

    #[test]
    fn missing_inputs_go_home() {
        assert_eq!(resolve_general_search(None, Some("x")), SearchTarget::Home);
        assert_eq!(resolve_general_search(Some("project"), None), SearchTarget::Home);
        assert_eq!(
            resolve_general_search(Some("   "), Some("x")),
            SearchTarget::Home
        );
        assert_eq!(
            resolve_general_search(Some("project"), Some("  ")),
            SearchTarget::Home
        );
    }

    #[test]
    fn unknown_type_goes_home() {
        assert_eq!(
            resolve_general_search(Some("comments"), Some("x")),
            SearchTarget::Home
        );
    }

    #[test]
    fn search_string_is_trimmed_but_case_preserved() {
        assert_eq!(
            resolve_general_search(Some("project"), Some("  Lab 3 ")),
            SearchTarget::Projects("Lab 3".to_string())
        );
    }
}
