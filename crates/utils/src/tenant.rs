//! Request-scoped tenant identity.
//!
//! Every repository call that touches tenant-scoped rows takes a
//! [`WorkspaceContext`] explicitly; there is no ambient tenant state.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::response::ApiResponse;

pub const WORKSPACE_HEADER: &str = "x-workspace-id";

/// The active tenant for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct WorkspaceContext {
    pub workspace_id: Uuid,
}

impl WorkspaceContext {
    pub fn new(workspace_id: Uuid) -> Self {
        Self { workspace_id }
    }
}

/// Rejection for a missing or malformed workspace header.
#[derive(Debug)]
pub enum WorkspaceContextRejection {
    Missing,
    Invalid,
}

impl IntoResponse for WorkspaceContextRejection {
    fn into_response(self) -> Response {
        let message = match self {
            Self::Missing => format!("missing {WORKSPACE_HEADER} header"),
            Self::Invalid => format!("{WORKSPACE_HEADER} header is not a valid UUID"),
        };
        (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(message)),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for WorkspaceContext
where
    S: Send + Sync,
{
    type Rejection = WorkspaceContextRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(WORKSPACE_HEADER)
            .ok_or(WorkspaceContextRejection::Missing)?
            .to_str()
            .map_err(|_| WorkspaceContextRejection::Invalid)?;
        let workspace_id = Uuid::parse_str(raw).map_err(|_| WorkspaceContextRejection::Invalid)?;
        Ok(Self::new(workspace_id))
    }
}
