//! Task operations. Every task belongs to exactly one project.

use projecthub_core::error::CoreError;
use projecthub_core::search::normalize_search;
use projecthub_core::types::DbId;
use projecthub_core::validation::{missing_reference, rejection, validate_input};
use projecthub_db::gateway::{Filter, GatewayError, Query, Session};
use projecthub_db::models::project::Project;
use projecthub_db::models::project_task::{ProjectTask, TaskInput, UpdateProjectTask};

use super::{require, resolve_delete_failure, resolve_update_failure};
use crate::error::{AppError, AppResult};
use crate::response::{TaskDetails, TaskListView};

pub struct ProjectTaskService;

impl ProjectTaskService {
    /// Tasks of one project in natural order.
    pub async fn list(session: &Session, project_id: DbId) -> AppResult<TaskListView<ProjectTask>> {
        let query = Query::<ProjectTask>::new().filter(Filter::eq("project_id", project_id));
        Ok(TaskListView {
            project_id: Some(project_id),
            data: session.fetch(&query).await?,
            search_performed: false,
            search_string: None,
        })
    }

    /// A task and its parent project.
    pub async fn details(session: &Session, id: DbId) -> AppResult<TaskDetails> {
        let task = require::<ProjectTask>(session, id).await?;
        let project = require::<Project>(session, task.project_id).await?;
        Ok(TaskDetails { task, project })
    }

    /// A blank task bound to `project_id`, ready to be filled in.
    pub async fn new_for_project(session: &Session, project_id: DbId) -> AppResult<ProjectTask> {
        require::<Project>(session, project_id).await?;
        Ok(ProjectTask::new(project_id, "", ""))
    }

    /// Validate and persist a new task under `project_id`.
    ///
    /// The parent comes from the route; the body cannot choose it. A parent
    /// deleted between the check and the save is still reported as not found.
    pub async fn create(
        session: &mut Session,
        project_id: DbId,
        input: &TaskInput,
    ) -> AppResult<ProjectTask> {
        require::<Project>(session, project_id).await?;
        validate_input(input)?;

        let mut task = ProjectTask::new(project_id, &input.title, &input.description);
        let staged = session.add(&task);
        let report = session.save().await.map_err(|err| match err {
            GatewayError::ForeignKey(_) => AppError::from(CoreError::NotFound {
                entity: "Project",
                id: project_id,
            }),
            other => other.into(),
        })?;
        task.project_task_id = report
            .inserted_id(staged)
            .ok_or_else(|| AppError::InternalError("Insert returned no id".into()))?;

        tracing::info!(task_id = task.project_task_id, project_id, "Task created");
        Ok(task)
    }

    /// Apply an edit to the allow-listed fields of task `id`.
    ///
    /// Moving the task to another project requires that project to exist.
    pub async fn update(
        session: &mut Session,
        id: DbId,
        input: &UpdateProjectTask,
    ) -> AppResult<ProjectTask> {
        if input.project_task_id != id {
            return Err(CoreError::NotFound {
                entity: "ProjectTask",
                id,
            }
            .into());
        }
        validate_input(input)?;

        let mut task = require::<ProjectTask>(session, id).await?;
        if input.project_id != task.project_id
            && !session.exists::<Project>(input.project_id).await?
        {
            return Err(rejection(
                input,
                vec![missing_reference("projectId", "Project", input.project_id)],
            )
            .into());
        }

        task.title.clone_from(&input.title);
        task.description.clone_from(&input.description);
        task.project_id = input.project_id;
        if let Some(version) = input.row_version {
            task.row_version = version;
        }

        session.update(&task);
        if let Err(err) = session.save().await {
            return Err(resolve_update_failure::<ProjectTask>(session, id, err).await);
        }
        task.row_version += 1;

        tracing::info!(task_id = id, project_id = task.project_id, "Task updated");
        Ok(task)
    }

    /// First phase of a delete: the task with its parent project.
    pub async fn confirm_delete(session: &Session, id: DbId) -> AppResult<TaskDetails> {
        Self::details(session, id).await
    }

    /// Second phase of a delete. Returns the removed task so the caller can
    /// navigate back to its project.
    pub async fn delete_confirmed(session: &mut Session, id: DbId) -> AppResult<ProjectTask> {
        let task = require::<ProjectTask>(session, id).await?;
        session.remove(&task);
        session
            .save()
            .await
            .map_err(|err| resolve_delete_failure::<ProjectTask>(id, err))?;

        tracing::info!(task_id = id, project_id = task.project_id, "Task deleted");
        Ok(task)
    }

    /// Filter by project and/or a case-insensitive substring on title or
    /// description. Either filter may be absent.
    pub async fn search(
        session: &Session,
        project_id: Option<DbId>,
        text: Option<&str>,
    ) -> AppResult<TaskListView<ProjectTask>> {
        let search_string = normalize_search(text);
        let mut query = Query::<ProjectTask>::new();
        if let Some(project_id) = project_id {
            query = query.filter(Filter::eq("project_id", project_id));
        }
        if let Some(needle) = &search_string {
            query = query.filter(
                Filter::contains("title", needle.as_str())
                    .or(Filter::contains("description", needle.as_str())),
            );
        }

        let data = session.fetch(&query).await?;
        tracing::debug!(matches = data.len(), project_id = ?project_id, search = ?search_string, "Task search");
        Ok(TaskListView {
            project_id,
            data,
            search_performed: search_string.is_some(),
            search_string,
        })
    }
}
