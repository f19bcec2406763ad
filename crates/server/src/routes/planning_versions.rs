//! Save / list / delete / restore of planning versions.

use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use db::models::planning_version::{
    CreatePlanningVersion, PlanningVersion, PlanningVersionSummary,
};
use serde::{Deserialize, Serialize};
use services::services::{
    planning_version::PlanningVersionService,
    snapshot::PlanningSnapshot,
};
use ts_rs::TS;
use utils::{response::ApiResponse, tenant::WorkspaceContext};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

/// One version with its payload decoded.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct PlanningVersionDetail {
    pub id: Uuid,
    pub project_id: Uuid,
    pub version_number: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub snapshot: PlanningSnapshot,
}

impl PlanningVersionDetail {
    fn from_parts(version: PlanningVersion, snapshot: PlanningSnapshot) -> Self {
        Self {
            id: version.id,
            project_id: version.project_id,
            version_number: version.version_number,
            name: version.name,
            description: version.description,
            created_by: version.created_by,
            created_at: version.created_at,
            snapshot,
        }
    }
}

pub async fn create_version(
    State(state): State<AppState>,
    ctx: WorkspaceContext,
    Path(project_id): Path<Uuid>,
    axum::Json(payload): axum::Json<CreatePlanningVersion>,
) -> Result<ResponseJson<ApiResponse<PlanningVersionSummary>>, ApiError> {
    let version =
        PlanningVersionService::create(&state.db().pool, ctx, project_id, &payload).await?;
    let summary = PlanningVersionSummary {
        id: version.id,
        project_id: version.project_id,
        version_number: version.version_number,
        name: version.name,
        description: version.description,
        created_by: version.created_by,
        created_at: version.created_at,
    };
    Ok(ResponseJson(ApiResponse::success(summary)))
}

pub async fn list_versions(
    State(state): State<AppState>,
    ctx: WorkspaceContext,
    Path(project_id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Vec<PlanningVersionSummary>>>, ApiError> {
    let versions = PlanningVersionService::list(&state.db().pool, ctx, project_id).await?;
    Ok(ResponseJson(ApiResponse::success(versions)))
}

pub async fn get_version(
    State(state): State<AppState>,
    ctx: WorkspaceContext,
    Path(version_id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<PlanningVersionDetail>>, ApiError> {
    let (version, snapshot) = PlanningVersionService::get(&state.db().pool, ctx, version_id).await?;
    Ok(ResponseJson(ApiResponse::success(
        PlanningVersionDetail::from_parts(version, snapshot),
    )))
}

pub async fn delete_version(
    State(state): State<AppState>,
    ctx: WorkspaceContext,
    Path(version_id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    PlanningVersionService::delete(&state.db().pool, ctx, version_id).await?;
    Ok(ResponseJson(ApiResponse::success(())))
}

/// Overwrites the project's working set with the version's snapshot.
pub async fn restore_version(
    State(state): State<AppState>,
    ctx: WorkspaceContext,
    Path(version_id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<PlanningSnapshot>>, ApiError> {
    let snapshot = PlanningVersionService::restore(&state.db().pool, ctx, version_id).await?;
    Ok(ResponseJson(ApiResponse::success(snapshot)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/projects/{project_id}/versions",
            post(create_version).get(list_versions),
        )
        .route(
            "/versions/{version_id}",
            get(get_version).delete(delete_version),
        )
        .route("/versions/{version_id}/restore", post(restore_version))
}
