use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::{get, post},
};
use db::models::project::{CreateProject, Project, UpdateProject};
use utils::{response::ApiResponse, tenant::WorkspaceContext};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

pub async fn create_project(
    State(state): State<AppState>,
    ctx: WorkspaceContext,
    axum::Json(payload): axum::Json<CreateProject>,
) -> Result<ResponseJson<ApiResponse<Project>>, ApiError> {
    let project = Project::create(&state.db().pool, ctx, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(project)))
}

pub async fn list_projects(
    State(state): State<AppState>,
    ctx: WorkspaceContext,
) -> Result<ResponseJson<ApiResponse<Vec<Project>>>, ApiError> {
    let projects = Project::find_by_workspace(&state.db().pool, ctx).await?;
    Ok(ResponseJson(ApiResponse::success(projects)))
}

pub async fn get_project(
    State(state): State<AppState>,
    ctx: WorkspaceContext,
    Path(project_id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Project>>, ApiError> {
    let project = Project::find_by_id(&state.db().pool, ctx, project_id)
        .await?
        .ok_or(ApiError::NotFound("project"))?;
    Ok(ResponseJson(ApiResponse::success(project)))
}

pub async fn update_project(
    State(state): State<AppState>,
    ctx: WorkspaceContext,
    Path(project_id): Path<Uuid>,
    axum::Json(payload): axum::Json<UpdateProject>,
) -> Result<ResponseJson<ApiResponse<Project>>, ApiError> {
    let project = Project::update(&state.db().pool, ctx, project_id, &payload)
        .await?
        .ok_or(ApiError::NotFound("project"))?;
    Ok(ResponseJson(ApiResponse::success(project)))
}

pub async fn delete_project(
    State(state): State<AppState>,
    ctx: WorkspaceContext,
    Path(project_id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let deleted = Project::delete(&state.db().pool, ctx, project_id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("project"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects", post(create_project).get(list_projects))
        .route(
            "/projects/{project_id}",
            get(get_project)
                .put(update_project)
                .delete(delete_project),
        )
}
