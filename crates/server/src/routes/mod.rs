pub mod interventions;
pub mod lots;
pub mod planning_versions;
pub mod projects;
pub mod workspaces;

use axum::Router;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(workspaces::router())
        .merge(projects::router())
        .merge(lots::router())
        .merge(interventions::router())
        .merge(planning_versions::router())
}
