//! Handlers for the `/projects` resource.

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use projecthub_core::types::DbId;
use projecthub_db::models::project::{Project, ProjectInput, UpdateProject};

use crate::error::AppResult;
use crate::middleware::antiforgery::AntiForgery;
use crate::middleware::session::UnitOfWork;
use crate::query::SearchParams;
use crate::response::{DataResponse, ProjectSearchView};
use crate::services::ProjectService;

/// GET /api/v1/projects
pub async fn list(UnitOfWork(session): UnitOfWork) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = ProjectService::list(&session).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// POST /api/v1/projects
pub async fn create(
    _guard: AntiForgery,
    UnitOfWork(mut session): UnitOfWork,
    Json(input): Json<ProjectInput>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    let project = ProjectService::create(&mut session, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    UnitOfWork(session): UnitOfWork,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = ProjectService::get_by_id(&session, id).await?;
    Ok(Json(DataResponse { data: project }))
}

/// PUT /api/v1/projects/{id} and POST /api/v1/projects/{id}/edit
pub async fn update(
    _guard: AntiForgery,
    UnitOfWork(mut session): UnitOfWork,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = ProjectService::update(&mut session, id, &input).await?;
    Ok(Json(DataResponse { data: project }))
}

/// GET /api/v1/projects/{id}/delete
pub async fn confirm_delete(
    UnitOfWork(session): UnitOfWork,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = ProjectService::confirm_delete(&session, id).await?;
    Ok(Json(DataResponse { data: project }))
}

/// DELETE /api/v1/projects/{id} and POST /api/v1/projects/{id}/delete
pub async fn delete(
    _guard: AntiForgery,
    UnitOfWork(mut session): UnitOfWork,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ProjectService::delete_confirmed(&mut session, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/projects/search?searchString=
pub async fn search(
    UnitOfWork(session): UnitOfWork,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<ProjectSearchView<Project>>> {
    let view = ProjectService::search(&session, params.search_string.as_deref()).await?;
    Ok(Json(view))
}

/// GET /api/v1/projects/search/{text}
pub async fn search_path(
    UnitOfWork(session): UnitOfWork,
    Path(text): Path<String>,
) -> AppResult<Json<ProjectSearchView<Project>>> {
    let view = ProjectService::search(&session, Some(&text)).await?;
    Ok(Json(view))
}
