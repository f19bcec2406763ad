use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use utils::tenant::WorkspaceContext;
use uuid::Uuid;

/// An immutable, per-project-numbered snapshot of the schedule working set.
/// Never mutated after insert; deleted explicitly.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct PlanningVersion {
    pub id: Uuid,
    pub project_id: Uuid,
    pub version_number: i64,
    pub name: String,
    pub description: Option<String>,
    /// JSON-serialized `PlanningSnapshot`.
    pub snapshot: String,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// List row without the (potentially large) snapshot payload.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct PlanningVersionSummary {
    pub id: Uuid,
    pub project_id: Uuid,
    pub version_number: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreatePlanningVersion {
    pub name: String,
    pub description: Option<String>,
    pub created_by: Option<Uuid>,
}

impl PlanningVersion {
    /// Insert with the next per-project version number. The number is
    /// computed inside the INSERT itself so two concurrent saves cannot
    /// read the same max; the unique (project_id, version_number) index
    /// backs the invariant.
    pub async fn insert_next(
        pool: &SqlitePool,
        project_id: Uuid,
        data: &CreatePlanningVersion,
        snapshot_json: &str,
    ) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        sqlx::query_as::<_, PlanningVersion>(
            r#"INSERT INTO planning_versions
                   (id, project_id, version_number, name, description, snapshot, created_by)
               SELECT $1, $2, COALESCE(MAX(version_number), 0) + 1, $3, $4, $5, $6
               FROM planning_versions
               WHERE project_id = $2
               RETURNING id, project_id, version_number, name, description,
                         snapshot, created_by, created_at"#,
        )
        .bind(id)
        .bind(project_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(snapshot_json)
        .bind(data.created_by)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(
        pool: &SqlitePool,
        ctx: WorkspaceContext,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, PlanningVersion>(
            r#"SELECT v.id, v.project_id, v.version_number, v.name, v.description,
                      v.snapshot, v.created_by, v.created_at
               FROM planning_versions v
               JOIN projects p ON p.id = v.project_id
               WHERE v.id = $1 AND p.workspace_id = $2"#,
        )
        .bind(id)
        .bind(ctx.workspace_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_summaries_by_project(
        pool: &SqlitePool,
        ctx: WorkspaceContext,
        project_id: Uuid,
    ) -> Result<Vec<PlanningVersionSummary>, sqlx::Error> {
        sqlx::query_as::<_, PlanningVersionSummary>(
            r#"SELECT v.id, v.project_id, v.version_number, v.name, v.description,
                      v.created_by, v.created_at
               FROM planning_versions v
               JOIN projects p ON p.id = v.project_id
               WHERE v.project_id = $1 AND p.workspace_id = $2
               ORDER BY v.version_number DESC"#,
        )
        .bind(project_id)
        .bind(ctx.workspace_id)
        .fetch_all(pool)
        .await
    }

    /// Versions are leaf rows; deleting one has no cascade effects.
    pub async fn delete(
        pool: &SqlitePool,
        ctx: WorkspaceContext,
        id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"DELETE FROM planning_versions
               WHERE id = $1
                 AND project_id IN (SELECT id FROM projects WHERE workspace_id = $2)"#,
        )
        .bind(id)
        .bind(ctx.workspace_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
