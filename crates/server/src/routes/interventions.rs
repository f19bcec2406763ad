//! Intervention CRUD plus the calendar/kanban gesture commands.

use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::{get, post, put},
};
use db::models::intervention::{CreateIntervention, Intervention, UpdateIntervention};
use db::models::project::Project;
use services::services::schedule::{MoveStatusCommand, RescheduleCommand, ScheduleService};
use utils::{response::ApiResponse, tenant::WorkspaceContext};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

pub async fn create_intervention(
    State(state): State<AppState>,
    ctx: WorkspaceContext,
    Path(project_id): Path<Uuid>,
    axum::Json(payload): axum::Json<CreateIntervention>,
) -> Result<ResponseJson<ApiResponse<Intervention>>, ApiError> {
    let intervention = Intervention::create(&state.db().pool, ctx, project_id, &payload)
        .await?
        .ok_or(ApiError::NotFound("project or lot"))?;
    Ok(ResponseJson(ApiResponse::success(intervention)))
}

pub async fn list_interventions(
    State(state): State<AppState>,
    ctx: WorkspaceContext,
    Path(project_id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Vec<Intervention>>>, ApiError> {
    let interventions = Intervention::find_by_project(&state.db().pool, ctx, project_id).await?;
    Ok(ResponseJson(ApiResponse::success(interventions)))
}

/// Bulk delete of a project's whole schedule.
pub async fn delete_all_interventions(
    State(state): State<AppState>,
    ctx: WorkspaceContext,
    Path(project_id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<u64>>, ApiError> {
    Project::find_by_id(&state.db().pool, ctx, project_id)
        .await?
        .ok_or(ApiError::NotFound("project"))?;
    let deleted = Intervention::delete_all_for_project(&state.db().pool, ctx, project_id).await?;
    Ok(ResponseJson(ApiResponse::success(deleted)))
}

pub async fn get_intervention(
    State(state): State<AppState>,
    ctx: WorkspaceContext,
    Path(intervention_id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Intervention>>, ApiError> {
    let intervention = Intervention::find_by_id(&state.db().pool, ctx, intervention_id)
        .await?
        .ok_or(ApiError::NotFound("intervention"))?;
    Ok(ResponseJson(ApiResponse::success(intervention)))
}

pub async fn update_intervention(
    State(state): State<AppState>,
    ctx: WorkspaceContext,
    Path(intervention_id): Path<Uuid>,
    axum::Json(payload): axum::Json<UpdateIntervention>,
) -> Result<ResponseJson<ApiResponse<Intervention>>, ApiError> {
    let intervention = Intervention::update(&state.db().pool, ctx, intervention_id, &payload)
        .await?
        .ok_or(ApiError::NotFound("intervention"))?;
    Ok(ResponseJson(ApiResponse::success(intervention)))
}

pub async fn delete_intervention(
    State(state): State<AppState>,
    ctx: WorkspaceContext,
    Path(intervention_id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let deleted = Intervention::delete(&state.db().pool, ctx, intervention_id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("intervention"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

/// Drag/resize drop on the timeline.
pub async fn reschedule_intervention(
    State(state): State<AppState>,
    ctx: WorkspaceContext,
    Path(intervention_id): Path<Uuid>,
    axum::Json(payload): axum::Json<RescheduleCommand>,
) -> Result<ResponseJson<ApiResponse<Intervention>>, ApiError> {
    let intervention =
        ScheduleService::reschedule(&state.db().pool, ctx, intervention_id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(intervention)))
}

/// Kanban column drop.
pub async fn move_intervention_status(
    State(state): State<AppState>,
    ctx: WorkspaceContext,
    Path(intervention_id): Path<Uuid>,
    axum::Json(payload): axum::Json<MoveStatusCommand>,
) -> Result<ResponseJson<ApiResponse<Intervention>>, ApiError> {
    let intervention =
        ScheduleService::move_status(&state.db().pool, ctx, intervention_id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(intervention)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/projects/{project_id}/interventions",
            post(create_intervention)
                .get(list_interventions)
                .delete(delete_all_interventions),
        )
        .route(
            "/interventions/{intervention_id}",
            get(get_intervention)
                .put(update_intervention)
                .delete(delete_intervention),
        )
        .route(
            "/interventions/{intervention_id}/reschedule",
            put(reschedule_intervention),
        )
        .route(
            "/interventions/{intervention_id}/status",
            put(move_intervention_status),
        )
}
