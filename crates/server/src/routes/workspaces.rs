//! Workspace (tenant) bootstrap routes.

use axum::{
    Router,
    extract::State,
    response::Json as ResponseJson,
    routing::post,
};
use db::models::workspace::{CreateWorkspace, Workspace};
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError};

pub async fn create_workspace(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreateWorkspace>,
) -> Result<ResponseJson<ApiResponse<Workspace>>, ApiError> {
    let workspace = Workspace::create(&state.db().pool, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(workspace)))
}

pub async fn list_workspaces(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<Workspace>>>, ApiError> {
    let workspaces = Workspace::find_all(&state.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(workspaces)))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/workspaces", post(create_workspace).get(list_workspaces))
}
