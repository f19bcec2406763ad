use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Executor, FromRow, Sqlite, SqlitePool, Type};
use strum_macros::{Display, EnumString};
use ts_rs::TS;
use utils::tenant::WorkspaceContext;
use uuid::Uuid;

#[derive(
    Debug, Clone, Type, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default,
)]
#[sqlx(type_name = "intervention_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InterventionStatus {
    #[default]
    Planned,
    InProgress,
    Completed,
    Delayed,
    Cancelled,
}

/// One scheduled unit of work on a project lot.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize, TS)]
pub struct Intervention {
    pub id: Uuid,
    pub project_id: Uuid,
    pub lot_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub status: InterventionStatus,
    pub color: String,
    pub team_size: i32,
    pub notes: Option<String>,
    /// Stacking index for overlapping bars in the timeline.
    pub sub_row: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateIntervention {
    pub lot_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub status: Option<InterventionStatus>,
    pub color: Option<String>,
    pub team_size: Option<i32>,
    pub notes: Option<String>,
    pub sub_row: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct UpdateIntervention {
    pub lot_id: Option<Uuid>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub status: Option<InterventionStatus>,
    pub color: Option<String>,
    pub team_size: Option<i32>,
    pub notes: Option<String>,
    pub sub_row: Option<i32>,
}

const RETURNING_COLUMNS: &str = r#"RETURNING id, project_id, lot_id, title, description,
    start_at, end_at, status, color, team_size, notes, sub_row, created_at, updated_at"#;

impl Intervention {
    /// Inserts only when the project belongs to the caller's workspace and
    /// the lot belongs to the project; returns `None` otherwise.
    pub async fn create(
        pool: &SqlitePool,
        ctx: WorkspaceContext,
        project_id: Uuid,
        data: &CreateIntervention,
    ) -> Result<Option<Self>, sqlx::Error> {
        let id = Uuid::new_v4();
        let status = data.status.clone().unwrap_or_default();
        let sql = format!(
            r#"INSERT INTO interventions
                   (id, project_id, lot_id, title, description, start_at, end_at,
                    status, color, team_size, notes, sub_row)
               SELECT $1, $2, $3, $4, $5, $6, $7, $8,
                      COALESCE($9, '#3b82f6'), COALESCE($10, 1), $11, COALESCE($12, 0)
               WHERE EXISTS (
                   SELECT 1 FROM projects WHERE id = $2 AND workspace_id = $13
               )
               AND EXISTS (
                   SELECT 1 FROM lots WHERE id = $3 AND project_id = $2
               )
               {RETURNING_COLUMNS}"#
        );
        sqlx::query_as::<_, Intervention>(&sql)
            .bind(id)
            .bind(project_id)
            .bind(data.lot_id)
            .bind(&data.title)
            .bind(&data.description)
            .bind(data.start_at)
            .bind(data.end_at)
            .bind(status)
            .bind(&data.color)
            .bind(data.team_size)
            .bind(&data.notes)
            .bind(data.sub_row)
            .bind(ctx.workspace_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &SqlitePool,
        ctx: WorkspaceContext,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Intervention>(
            r#"SELECT i.id, i.project_id, i.lot_id, i.title, i.description,
                      i.start_at, i.end_at, i.status, i.color, i.team_size,
                      i.notes, i.sub_row, i.created_at, i.updated_at
               FROM interventions i
               JOIN projects p ON p.id = i.project_id
               WHERE i.id = $1 AND p.workspace_id = $2"#,
        )
        .bind(id)
        .bind(ctx.workspace_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_project(
        pool: &SqlitePool,
        ctx: WorkspaceContext,
        project_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Intervention>(
            r#"SELECT i.id, i.project_id, i.lot_id, i.title, i.description,
                      i.start_at, i.end_at, i.status, i.color, i.team_size,
                      i.notes, i.sub_row, i.created_at, i.updated_at
               FROM interventions i
               JOIN projects p ON p.id = i.project_id
               WHERE i.project_id = $1 AND p.workspace_id = $2
               ORDER BY i.start_at ASC"#,
        )
        .bind(project_id)
        .bind(ctx.workspace_id)
        .fetch_all(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        ctx: WorkspaceContext,
        id: Uuid,
        data: &UpdateIntervention,
    ) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!(
            r#"UPDATE interventions
               SET lot_id = COALESCE($3, lot_id),
                   title = COALESCE($4, title),
                   description = COALESCE($5, description),
                   start_at = COALESCE($6, start_at),
                   end_at = COALESCE($7, end_at),
                   status = COALESCE($8, status),
                   color = COALESCE($9, color),
                   team_size = COALESCE($10, team_size),
                   notes = COALESCE($11, notes),
                   sub_row = COALESCE($12, sub_row),
                   updated_at = datetime('now', 'subsec')
               WHERE id = $1
                 AND project_id IN (SELECT id FROM projects WHERE workspace_id = $2)
                 AND ($3 IS NULL OR EXISTS (
                     SELECT 1 FROM lots
                     WHERE id = $3 AND project_id = interventions.project_id
                 ))
               {RETURNING_COLUMNS}"#
        );
        sqlx::query_as::<_, Intervention>(&sql)
            .bind(id)
            .bind(ctx.workspace_id)
            .bind(data.lot_id)
            .bind(&data.title)
            .bind(&data.description)
            .bind(data.start_at)
            .bind(data.end_at)
            .bind(&data.status)
            .bind(&data.color)
            .bind(data.team_size)
            .bind(&data.notes)
            .bind(data.sub_row)
            .fetch_optional(pool)
            .await
    }

    /// Drag/resize drop: moves start/end (and optionally lot and sub_row),
    /// leaving every other field untouched. A target lot outside the
    /// intervention's project is rejected as `None`.
    pub async fn reschedule(
        pool: &SqlitePool,
        ctx: WorkspaceContext,
        id: Uuid,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
        lot_id: Option<Uuid>,
        sub_row: Option<i32>,
    ) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!(
            r#"UPDATE interventions
               SET start_at = $3,
                   end_at = $4,
                   lot_id = COALESCE($5, lot_id),
                   sub_row = COALESCE($6, sub_row),
                   updated_at = datetime('now', 'subsec')
               WHERE id = $1
                 AND project_id IN (SELECT id FROM projects WHERE workspace_id = $2)
                 AND ($5 IS NULL OR EXISTS (
                     SELECT 1 FROM lots
                     WHERE id = $5 AND project_id = interventions.project_id
                 ))
               {RETURNING_COLUMNS}"#
        );
        sqlx::query_as::<_, Intervention>(&sql)
            .bind(id)
            .bind(ctx.workspace_id)
            .bind(start_at)
            .bind(end_at)
            .bind(lot_id)
            .bind(sub_row)
            .fetch_optional(pool)
            .await
    }

    /// Kanban column drop: updates the status field only.
    pub async fn update_status(
        pool: &SqlitePool,
        ctx: WorkspaceContext,
        id: Uuid,
        status: InterventionStatus,
    ) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!(
            r#"UPDATE interventions
               SET status = $3,
                   updated_at = datetime('now', 'subsec')
               WHERE id = $1
                 AND project_id IN (SELECT id FROM projects WHERE workspace_id = $2)
               {RETURNING_COLUMNS}"#
        );
        sqlx::query_as::<_, Intervention>(&sql)
            .bind(id)
            .bind(ctx.workspace_id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(
        pool: &SqlitePool,
        ctx: WorkspaceContext,
        id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"DELETE FROM interventions
               WHERE id = $1
                 AND project_id IN (SELECT id FROM projects WHERE workspace_id = $2)"#,
        )
        .bind(id)
        .bind(ctx.workspace_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Bulk delete of a project's whole schedule.
    pub async fn delete_all_for_project(
        pool: &SqlitePool,
        ctx: WorkspaceContext,
        project_id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"DELETE FROM interventions
               WHERE project_id = $1
                 AND project_id IN (SELECT id FROM projects WHERE workspace_id = $2)"#,
        )
        .bind(project_id)
        .bind(ctx.workspace_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_by_project<'e, E>(executor: E, project_id: Uuid) -> Result<u64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM interventions WHERE project_id = $1")
            .bind(project_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Reinsert an intervention exactly as it was captured, timestamps included.
    pub async fn insert_snapshot_row<'e, E>(
        executor: E,
        intervention: &Intervention,
    ) -> Result<(), sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"INSERT INTO interventions
                   (id, project_id, lot_id, title, description, start_at, end_at,
                    status, color, team_size, notes, sub_row, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)"#,
        )
        .bind(intervention.id)
        .bind(intervention.project_id)
        .bind(intervention.lot_id)
        .bind(&intervention.title)
        .bind(&intervention.description)
        .bind(intervention.start_at)
        .bind(intervention.end_at)
        .bind(&intervention.status)
        .bind(&intervention.color)
        .bind(intervention.team_size)
        .bind(&intervention.notes)
        .bind(intervention.sub_row)
        .bind(intervention.created_at)
        .bind(intervention.updated_at)
        .execute(executor)
        .await?;
        Ok(())
    }
}
