//! Project operations.

use projecthub_core::error::CoreError;
use projecthub_core::search::normalize_search;
use projecthub_core::types::DbId;
use projecthub_core::validation::validate_input;
use projecthub_db::gateway::{Filter, Query, Session};
use projecthub_db::models::project::{Project, ProjectInput, UpdateProject};

use super::{require, resolve_delete_failure, resolve_update_failure};
use crate::error::{AppError, AppResult};
use crate::response::ProjectSearchView;

pub struct ProjectService;

impl ProjectService {
    /// Every project in natural order.
    pub async fn list(session: &Session) -> AppResult<Vec<Project>> {
        Ok(session.list_all::<Project>().await?)
    }

    pub async fn get_by_id(session: &Session, id: DbId) -> AppResult<Project> {
        require::<Project>(session, id).await
    }

    /// Validate and persist a new project, returning it with its generated id.
    pub async fn create(session: &mut Session, input: &ProjectInput) -> AppResult<Project> {
        validate_input(input)?;

        let mut project = Project::new(&input.name, &input.description);
        let staged = session.add(&project);
        let report = session.save().await?;
        project.project_id = report
            .inserted_id(staged)
            .ok_or_else(|| AppError::InternalError("Insert returned no id".into()))?;

        tracing::info!(project_id = project.project_id, "Project created");
        Ok(project)
    }

    /// Apply an edit to the allow-listed fields of project `id`.
    ///
    /// The body must name the same project as the route. The write is checked
    /// against `input.row_version` when given, else against the version just
    /// loaded.
    pub async fn update(
        session: &mut Session,
        id: DbId,
        input: &UpdateProject,
    ) -> AppResult<Project> {
        if input.project_id != id {
            return Err(CoreError::NotFound {
                entity: "Project",
                id,
            }
            .into());
        }
        validate_input(input)?;

        let mut project = require::<Project>(session, id).await?;
        project.name.clone_from(&input.name);
        project.description.clone_from(&input.description);
        if let Some(version) = input.row_version {
            project.row_version = version;
        }

        session.update(&project);
        if let Err(err) = session.save().await {
            return Err(resolve_update_failure::<Project>(session, id, err).await);
        }
        project.row_version += 1;

        tracing::info!(project_id = id, "Project updated");
        Ok(project)
    }

    /// First phase of a delete: show what is about to be removed.
    pub async fn confirm_delete(session: &Session, id: DbId) -> AppResult<Project> {
        Self::get_by_id(session, id).await
    }

    /// Second phase of a delete. Tasks and comments go with the project.
    pub async fn delete_confirmed(session: &mut Session, id: DbId) -> AppResult<Project> {
        let project = require::<Project>(session, id).await?;
        session.remove(&project);
        session
            .save()
            .await
            .map_err(|err| resolve_delete_failure::<Project>(id, err))?;

        tracing::info!(project_id = id, "Project deleted");
        Ok(project)
    }

    /// Case-insensitive substring search on name or description.
    ///
    /// A blank search string lists everything with `search_performed == false`.
    pub async fn search(
        session: &Session,
        text: Option<&str>,
    ) -> AppResult<ProjectSearchView<Project>> {
        let search_string = normalize_search(text);
        let mut query = Query::<Project>::new();
        if let Some(needle) = &search_string {
            query = query.filter(
                Filter::contains("name", needle.as_str())
                    .or(Filter::contains("description", needle.as_str())),
            );
        }

        let data = session.fetch(&query).await?;
        tracing::debug!(matches = data.len(), search = ?search_string, "Project search");
        Ok(ProjectSearchView {
            data,
            search_performed: search_string.is_some(),
            search_string,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_matches::assert_matches;
    use projecthub_db::gateway::MemoryStore;

    use super::*;
    use crate::services::test_support::session_losing;

    fn seeded() -> Session {
        Session::new(Arc::new(MemoryStore::seeded()))
    }

    fn edit(id: DbId, name: &str, row_version: Option<i32>) -> UpdateProject {
        UpdateProject {
            project_id: id,
            name: name.into(),
            description: "Edited".into(),
            row_version,
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let mut session = seeded();
        let input = ProjectInput {
            name: "Capstone".into(),
            description: "Final project".into(),
        };
        let created = ProjectService::create(&mut session, &input).await.unwrap();
        assert_eq!(created.project_id, 3);

        let fetched = ProjectService::get_by_id(&session, created.project_id)
            .await
            .unwrap();
        assert_eq!(fetched.name, "Capstone");
        assert_eq!(fetched.description, "Final project");
    }

    #[tokio::test]
    async fn invalid_create_persists_nothing() {
        let mut session = seeded();
        let input = ProjectInput {
            name: "x".repeat(101),
            description: String::new(),
        };
        let err = ProjectService::create(&mut session, &input).await.unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Validation { ref errors, .. }) if errors.len() == 2);
        assert_eq!(ProjectService::list(&session).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn update_with_mismatched_id_is_not_found() {
        let mut session = seeded();
        let err = ProjectService::update(&mut session, 1, &edit(2, "Renamed", None))
            .await
            .unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::NotFound { id: 1, .. }));

        let untouched = ProjectService::get_by_id(&session, 2).await.unwrap();
        assert_eq!(untouched.name, "Assignment 2");
    }

    #[tokio::test]
    async fn second_update_with_same_version_conflicts() {
        let mut session = seeded();
        let first = ProjectService::update(&mut session, 1, &edit(1, "First", Some(1)))
            .await
            .unwrap();
        assert_eq!(first.row_version, 2);

        let err = ProjectService::update(&mut session, 1, &edit(1, "Second", Some(1)))
            .await
            .unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Conflict(_)));
        assert_eq!(
            ProjectService::get_by_id(&session, 1).await.unwrap().name,
            "First"
        );
    }

    #[tokio::test]
    async fn update_of_missing_project_is_not_found() {
        let mut session = seeded();
        let err = ProjectService::update(&mut session, 9, &edit(9, "Ghost", None))
            .await
            .unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::NotFound { id: 9, .. }));
    }

    #[tokio::test]
    async fn update_of_project_deleted_before_save_is_not_found() {
        let mut session = session_losing::<Project>(Arc::new(MemoryStore::seeded()), 1).await;
        let err = ProjectService::update(&mut session, 1, &edit(1, "Late", Some(1)))
            .await
            .unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::NotFound { entity: "Project", id: 1 }));
    }

    #[tokio::test]
    async fn delete_of_project_deleted_before_save_is_not_found() {
        let store = Arc::new(MemoryStore::seeded());
        let mut session = session_losing::<Project>(store.clone(), 2).await;
        assert_matches!(
            ProjectService::delete_confirmed(&mut session, 2).await,
            Err(AppError::Core(CoreError::NotFound { entity: "Project", id: 2 }))
        );
        assert_eq!(store.row_count("projects").await, 1);
    }

    #[tokio::test]
    async fn delete_confirmed_removes_project() {
        let mut session = seeded();
        let confirmed = ProjectService::confirm_delete(&session, 2).await.unwrap();
        assert_eq!(confirmed.name, "Assignment 2");

        ProjectService::delete_confirmed(&mut session, 2).await.unwrap();
        assert_matches!(
            ProjectService::get_by_id(&session, 2).await,
            Err(AppError::Core(CoreError::NotFound { .. }))
        );
        assert_matches!(
            ProjectService::delete_confirmed(&mut session, 2).await,
            Err(AppError::Core(CoreError::NotFound { .. }))
        );
    }

    #[tokio::test]
    async fn blank_search_returns_everything() {
        let session = seeded();
        for text in [None, Some(""), Some("   ")] {
            let view = ProjectService::search(&session, text).await.unwrap();
            assert_eq!(view.data.len(), 2);
            assert!(!view.search_performed);
            assert_eq!(view.search_string, None);
        }
    }

    #[tokio::test]
    async fn search_is_case_insensitive() {
        let session = seeded();
        let view = ProjectService::search(&session, Some("ASSIGN")).await.unwrap();
        assert!(view.search_performed);
        assert_eq!(view.search_string.as_deref(), Some("assign"));
        assert_eq!(view.data[0].name, "Assignment 1");

        let view = ProjectService::search(&session, Some("comp2139 - assignment 2"))
            .await
            .unwrap();
        assert_eq!(view.data.len(), 1);
        assert_eq!(view.data[0].project_id, 2);
    }
}
