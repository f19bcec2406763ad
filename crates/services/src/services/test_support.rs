//! Shared fixtures for service tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use db::{
    DBService,
    models::{
        intervention::{CreateIntervention, Intervention, InterventionStatus},
        lot::{CreateLot, Lot},
        project::{CreateProject, Project},
        workspace::{CreateWorkspace, Workspace},
    },
};
use utils::tenant::WorkspaceContext;
use uuid::Uuid;

pub(crate) async fn test_db() -> DBService {
    DBService::new_in_memory()
        .await
        .expect("in-memory database")
}

pub(crate) async fn seed_project(db: &DBService) -> (WorkspaceContext, Project) {
    let workspace = Workspace::create(
        &db.pool,
        &CreateWorkspace {
            name: "Atelier Nord".to_string(),
        },
    )
    .await
    .expect("create workspace");
    let ctx = WorkspaceContext::new(workspace.id);
    let project = Project::create(
        &db.pool,
        ctx,
        &CreateProject {
            name: "Rue de la Paix renovation".to_string(),
            description: None,
        },
    )
    .await
    .expect("create project");
    (ctx, project)
}

pub(crate) async fn seed_lot(db: &DBService, ctx: WorkspaceContext, project_id: Uuid) -> Lot {
    Lot::create(
        &db.pool,
        ctx,
        project_id,
        &CreateLot {
            name: "Gros oeuvre".to_string(),
            color: Some("#b45309".to_string()),
            company_id: None,
        },
    )
    .await
    .expect("create lot")
    .expect("project owned by workspace")
}

pub(crate) fn day(offset: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap() + Duration::days(offset)
}

pub(crate) async fn seed_intervention(
    db: &DBService,
    ctx: WorkspaceContext,
    project_id: Uuid,
    lot_id: Uuid,
    title: &str,
) -> Intervention {
    Intervention::create(
        &db.pool,
        ctx,
        project_id,
        &CreateIntervention {
            lot_id,
            title: title.to_string(),
            description: Some("demolition of partition walls".to_string()),
            start_at: day(0),
            end_at: day(3),
            status: Some(InterventionStatus::Planned),
            color: Some("#2563eb".to_string()),
            team_size: Some(4),
            notes: Some("access via courtyard".to_string()),
            sub_row: Some(0),
        },
    )
    .await
    .expect("create intervention")
    .expect("lot belongs to project")
}
