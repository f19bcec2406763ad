use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::{post, put},
};
use db::models::lot::{CreateLot, Lot, UpdateLot};
use utils::{response::ApiResponse, tenant::WorkspaceContext};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

pub async fn create_lot(
    State(state): State<AppState>,
    ctx: WorkspaceContext,
    Path(project_id): Path<Uuid>,
    axum::Json(payload): axum::Json<CreateLot>,
) -> Result<ResponseJson<ApiResponse<Lot>>, ApiError> {
    let lot = Lot::create(&state.db().pool, ctx, project_id, &payload)
        .await?
        .ok_or(ApiError::NotFound("project"))?;
    Ok(ResponseJson(ApiResponse::success(lot)))
}

pub async fn list_lots(
    State(state): State<AppState>,
    ctx: WorkspaceContext,
    Path(project_id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Vec<Lot>>>, ApiError> {
    let lots = Lot::find_by_project(&state.db().pool, ctx, project_id).await?;
    Ok(ResponseJson(ApiResponse::success(lots)))
}

pub async fn update_lot(
    State(state): State<AppState>,
    ctx: WorkspaceContext,
    Path(lot_id): Path<Uuid>,
    axum::Json(payload): axum::Json<UpdateLot>,
) -> Result<ResponseJson<ApiResponse<Lot>>, ApiError> {
    let lot = Lot::update(&state.db().pool, ctx, lot_id, &payload)
        .await?
        .ok_or(ApiError::NotFound("lot"))?;
    Ok(ResponseJson(ApiResponse::success(lot)))
}

pub async fn delete_lot(
    State(state): State<AppState>,
    ctx: WorkspaceContext,
    Path(lot_id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let deleted = Lot::delete(&state.db().pool, ctx, lot_id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("lot"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/projects/{project_id}/lots",
            post(create_lot).get(list_lots),
        )
        .route("/lots/{lot_id}", put(update_lot).delete(delete_lot))
}
