//! Schedule mutation commands behind the calendar and kanban gestures.
//!
//! Each gesture maps to one explicit command with a typed result; the
//! view layer decides what to do with a failure instead of relying on a
//! cache refetch.

use chrono::{DateTime, Utc};
use db::models::intervention::{Intervention, InterventionStatus};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use thiserror::Error;
use ts_rs::TS;
use utils::tenant::WorkspaceContext;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("intervention not found")]
    InterventionNotFound,
    #[error("intervention end must not precede its start")]
    InvalidRange,
}

/// Drag/resize drop on the timeline.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct RescheduleCommand {
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    /// Present when the bar was dropped on another lot's row.
    pub lot_id: Option<Uuid>,
    pub sub_row: Option<i32>,
}

/// Card drop on a kanban column.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct MoveStatusCommand {
    pub status: InterventionStatus,
}

pub struct ScheduleService;

impl ScheduleService {
    /// Apply a drag/resize drop. Only start/end (and lot/sub_row when
    /// given) change; title, status, notes and the rest are untouched.
    pub async fn reschedule(
        pool: &SqlitePool,
        ctx: WorkspaceContext,
        intervention_id: Uuid,
        command: &RescheduleCommand,
    ) -> Result<Intervention, ScheduleError> {
        if command.end_at < command.start_at {
            return Err(ScheduleError::InvalidRange);
        }
        Intervention::reschedule(
            pool,
            ctx,
            intervention_id,
            command.start_at,
            command.end_at,
            command.lot_id,
            command.sub_row,
        )
        .await?
        .ok_or(ScheduleError::InterventionNotFound)
    }

    /// Apply a kanban column drop. The column identifier is the target
    /// status; nothing but the status field changes.
    pub async fn move_status(
        pool: &SqlitePool,
        ctx: WorkspaceContext,
        intervention_id: Uuid,
        command: &MoveStatusCommand,
    ) -> Result<Intervention, ScheduleError> {
        Intervention::update_status(pool, ctx, intervention_id, command.status.clone())
            .await?
            .ok_or(ScheduleError::InterventionNotFound)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::services::test_support::{day, seed_intervention, seed_lot, seed_project, test_db};

    #[tokio::test]
    async fn reschedule_moves_dates_and_nothing_else() {
        let db = test_db().await;
        let (ctx, project) = seed_project(&db).await;
        let lot = seed_lot(&db, ctx, project.id).await;
        let before = seed_intervention(&db, ctx, project.id, lot.id, "demolition").await;

        let command = RescheduleCommand {
            start_at: day(5),
            end_at: day(9),
            lot_id: None,
            sub_row: None,
        };
        let after = ScheduleService::reschedule(&db.pool, ctx, before.id, &command)
            .await
            .unwrap();

        assert_eq!(after.start_at, day(5));
        assert_eq!(after.end_at, day(9));
        assert_eq!(after.title, before.title);
        assert_eq!(after.status, before.status);
        assert_eq!(after.notes, before.notes);
        assert_eq!(after.team_size, before.team_size);
        assert_eq!(after.lot_id, before.lot_id);
    }

    #[tokio::test]
    async fn reschedule_can_move_to_another_lot_row() {
        let db = test_db().await;
        let (ctx, project) = seed_project(&db).await;
        let lot = seed_lot(&db, ctx, project.id).await;
        let other_lot = seed_lot(&db, ctx, project.id).await;
        let before = seed_intervention(&db, ctx, project.id, lot.id, "demolition").await;

        let command = RescheduleCommand {
            start_at: day(1),
            end_at: day(2),
            lot_id: Some(other_lot.id),
            sub_row: Some(2),
        };
        let after = ScheduleService::reschedule(&db.pool, ctx, before.id, &command)
            .await
            .unwrap();

        assert_eq!(after.lot_id, other_lot.id);
        assert_eq!(after.sub_row, 2);
    }

    #[tokio::test]
    async fn reschedule_rejects_inverted_range_without_writing() {
        let db = test_db().await;
        let (ctx, project) = seed_project(&db).await;
        let lot = seed_lot(&db, ctx, project.id).await;
        let before = seed_intervention(&db, ctx, project.id, lot.id, "demolition").await;

        let command = RescheduleCommand {
            start_at: day(9),
            end_at: day(5),
            lot_id: None,
            sub_row: None,
        };
        let result = ScheduleService::reschedule(&db.pool, ctx, before.id, &command).await;
        assert!(matches!(result, Err(ScheduleError::InvalidRange)));

        let unchanged = Intervention::find_by_id(&db.pool, ctx, before.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unchanged.start_at, before.start_at);
        assert_eq!(unchanged.end_at, before.end_at);
    }

    #[tokio::test]
    async fn reschedule_rejects_lot_from_another_tenant() {
        let db = test_db().await;
        let (ctx, project) = seed_project(&db).await;
        let lot = seed_lot(&db, ctx, project.id).await;
        let before = seed_intervention(&db, ctx, project.id, lot.id, "demolition").await;

        let (other_ctx, other_project) = seed_project(&db).await;
        let foreign_lot = seed_lot(&db, other_ctx, other_project.id).await;

        let command = RescheduleCommand {
            start_at: day(1),
            end_at: day(2),
            lot_id: Some(foreign_lot.id),
            sub_row: None,
        };
        let result = ScheduleService::reschedule(&db.pool, ctx, before.id, &command).await;
        assert!(matches!(result, Err(ScheduleError::InterventionNotFound)));

        let unchanged = Intervention::find_by_id(&db.pool, ctx, before.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unchanged.lot_id, lot.id);
        assert_eq!(unchanged.start_at, before.start_at);
        assert_eq!(unchanged.end_at, before.end_at);
    }

    #[tokio::test]
    async fn update_rejects_lot_from_another_project() {
        use db::models::{intervention::UpdateIntervention, project::CreateProject, project::Project};

        let db = test_db().await;
        let (ctx, project) = seed_project(&db).await;
        let lot = seed_lot(&db, ctx, project.id).await;
        let before = seed_intervention(&db, ctx, project.id, lot.id, "demolition").await;

        // Same tenant, different project: still not a valid target.
        let sibling = Project::create(
            &db.pool,
            ctx,
            &CreateProject {
                name: "Annex extension".to_string(),
                description: None,
            },
        )
        .await
        .unwrap();
        let sibling_lot = seed_lot(&db, ctx, sibling.id).await;

        let data = UpdateIntervention {
            lot_id: Some(sibling_lot.id),
            title: None,
            description: None,
            start_at: None,
            end_at: None,
            status: None,
            color: None,
            team_size: None,
            notes: None,
            sub_row: None,
        };
        let result = Intervention::update(&db.pool, ctx, before.id, &data)
            .await
            .unwrap();
        assert!(result.is_none());

        let unchanged = Intervention::find_by_id(&db.pool, ctx, before.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unchanged.lot_id, lot.id);
    }

    #[tokio::test]
    async fn move_status_changes_only_the_status_field() {
        let db = test_db().await;
        let (ctx, project) = seed_project(&db).await;
        let lot = seed_lot(&db, ctx, project.id).await;
        let before = seed_intervention(&db, ctx, project.id, lot.id, "demolition").await;

        let command = MoveStatusCommand {
            status: InterventionStatus::InProgress,
        };
        let after = ScheduleService::move_status(&db.pool, ctx, before.id, &command)
            .await
            .unwrap();

        assert_eq!(after.status, InterventionStatus::InProgress);
        assert_eq!(after.title, before.title);
        assert_eq!(after.start_at, before.start_at);
        assert_eq!(after.end_at, before.end_at);
        assert_eq!(after.notes, before.notes);
        assert_eq!(after.sub_row, before.sub_row);
    }

    #[tokio::test]
    async fn unknown_intervention_is_a_typed_not_found() {
        let db = test_db().await;
        let (ctx, _) = seed_project(&db).await;

        let command = MoveStatusCommand {
            status: InterventionStatus::Completed,
        };
        let result =
            ScheduleService::move_status(&db.pool, ctx, uuid::Uuid::new_v4(), &command).await;
        assert!(matches!(result, Err(ScheduleError::InterventionNotFound)));
    }

    #[tokio::test]
    async fn other_tenant_cannot_move_a_card() {
        let db = test_db().await;
        let (ctx, project) = seed_project(&db).await;
        let lot = seed_lot(&db, ctx, project.id).await;
        let intervention = seed_intervention(&db, ctx, project.id, lot.id, "demolition").await;

        let (other_ctx, _) = seed_project(&db).await;
        let command = MoveStatusCommand {
            status: InterventionStatus::Cancelled,
        };
        let result =
            ScheduleService::move_status(&db.pool, other_ctx, intervention.id, &command).await;
        assert!(matches!(result, Err(ScheduleError::InterventionNotFound)));

        let unchanged = Intervention::find_by_id(&db.pool, ctx, intervention.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unchanged.status, InterventionStatus::Planned);
    }
}
