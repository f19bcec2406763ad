use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use services::services::{
    planning_version::PlanningVersionError, schedule::ScheduleError, snapshot::SnapshotError,
};
use thiserror::Error;
use tracing::error;
use utils::response::ApiResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    PlanningVersion(#[from] PlanningVersionError),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("{0} not found")]
    NotFound(&'static str),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::PlanningVersion(e) => match e {
                PlanningVersionError::EmptyName => StatusCode::BAD_REQUEST,
                PlanningVersionError::ProjectNotFound
                | PlanningVersionError::VersionNotFound => StatusCode::NOT_FOUND,
                PlanningVersionError::Snapshot(SnapshotError::UnsupportedSchema(_))
                | PlanningVersionError::Snapshot(SnapshotError::Malformed(_)) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                PlanningVersionError::Database(_) | PlanningVersionError::Encode(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::Schedule(e) => match e {
                ScheduleError::InvalidRange => StatusCode::BAD_REQUEST,
                ScheduleError::InterventionNotFound => StatusCode::NOT_FOUND,
                ScheduleError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("request failed: {self}");
        }
        (status, Json(ApiResponse::<()>::error(self.to_string()))).into_response()
    }
}
