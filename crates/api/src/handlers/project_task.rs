//! Handlers for project tasks.
//!
//! Listing and creation are scoped under `/projects/{project_id}/tasks`;
//! everything addressed by task id lives under `/tasks`.

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use projecthub_core::types::DbId;
use projecthub_db::models::project_task::{ProjectTask, TaskInput, UpdateProjectTask};

use crate::error::AppResult;
use crate::middleware::antiforgery::AntiForgery;
use crate::middleware::session::UnitOfWork;
use crate::query::TaskSearchParams;
use crate::response::{DataResponse, TaskDetails, TaskListView};
use crate::services::ProjectTaskService;

/// GET /api/v1/projects/{project_id}/tasks
pub async fn list(
    UnitOfWork(session): UnitOfWork,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<TaskListView<ProjectTask>>> {
    let view = ProjectTaskService::list(&session, project_id).await?;
    Ok(Json(view))
}

/// GET /api/v1/projects/{project_id}/tasks/new
pub async fn new_for_project(
    UnitOfWork(session): UnitOfWork,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectTask>>> {
    let task = ProjectTaskService::new_for_project(&session, project_id).await?;
    Ok(Json(DataResponse { data: task }))
}

/// POST /api/v1/projects/{project_id}/tasks
pub async fn create(
    _guard: AntiForgery,
    UnitOfWork(mut session): UnitOfWork,
    Path(project_id): Path<DbId>,
    Json(input): Json<TaskInput>,
) -> AppResult<(StatusCode, Json<DataResponse<ProjectTask>>)> {
    let task = ProjectTaskService::create(&mut session, project_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: task })))
}

/// GET /api/v1/tasks/{id}
pub async fn details(
    UnitOfWork(session): UnitOfWork,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<TaskDetails>>> {
    let details = ProjectTaskService::details(&session, id).await?;
    Ok(Json(DataResponse { data: details }))
}

/// PUT /api/v1/tasks/{id} and POST /api/v1/tasks/{id}/edit
pub async fn update(
    _guard: AntiForgery,
    UnitOfWork(mut session): UnitOfWork,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProjectTask>,
) -> AppResult<Json<DataResponse<ProjectTask>>> {
    let task = ProjectTaskService::update(&mut session, id, &input).await?;
    Ok(Json(DataResponse { data: task }))
}

/// GET /api/v1/tasks/{id}/delete
pub async fn confirm_delete(
    UnitOfWork(session): UnitOfWork,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<TaskDetails>>> {
    let details = ProjectTaskService::confirm_delete(&session, id).await?;
    Ok(Json(DataResponse { data: details }))
}

/// DELETE /api/v1/tasks/{id} and POST /api/v1/tasks/{id}/delete
///
/// Answers with the removed task so the client can return to its project.
pub async fn delete(
    _guard: AntiForgery,
    UnitOfWork(mut session): UnitOfWork,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectTask>>> {
    let task = ProjectTaskService::delete_confirmed(&mut session, id).await?;
    Ok(Json(DataResponse { data: task }))
}

/// GET /api/v1/tasks/search?projectId=&searchString=
pub async fn search(
    UnitOfWork(session): UnitOfWork,
    Query(params): Query<TaskSearchParams>,
) -> AppResult<Json<TaskListView<ProjectTask>>> {
    let view = ProjectTaskService::search(
        &session,
        params.project_id,
        params.search_string.as_deref(),
    )
    .await?;
    Ok(Json(view))
}
