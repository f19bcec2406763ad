use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Executor, FromRow, Sqlite, SqlitePool};
use ts_rs::TS;
use utils::tenant::WorkspaceContext;
use uuid::Uuid;

/// A trade/package grouping of interventions.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize, TS)]
pub struct Lot {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub color: String,
    pub company_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateLot {
    pub name: String,
    pub color: Option<String>,
    pub company_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct UpdateLot {
    pub name: Option<String>,
    pub color: Option<String>,
    pub company_id: Option<Uuid>,
}

impl Lot {
    /// Inserts only when the project belongs to the caller's workspace;
    /// returns `None` otherwise.
    pub async fn create(
        pool: &SqlitePool,
        ctx: WorkspaceContext,
        project_id: Uuid,
        data: &CreateLot,
    ) -> Result<Option<Self>, sqlx::Error> {
        let id = Uuid::new_v4();
        sqlx::query_as::<_, Lot>(
            r#"INSERT INTO lots (id, project_id, name, color, company_id)
               SELECT $1, $2, $3, COALESCE($4, '#3b82f6'), $5
               WHERE EXISTS (
                   SELECT 1 FROM projects WHERE id = $2 AND workspace_id = $6
               )
               RETURNING id, project_id, name, color, company_id, created_at, updated_at"#,
        )
        .bind(id)
        .bind(project_id)
        .bind(&data.name)
        .bind(&data.color)
        .bind(data.company_id)
        .bind(ctx.workspace_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_id(
        pool: &SqlitePool,
        ctx: WorkspaceContext,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Lot>(
            r#"SELECT l.id, l.project_id, l.name, l.color, l.company_id, l.created_at, l.updated_at
               FROM lots l
               JOIN projects p ON p.id = l.project_id
               WHERE l.id = $1 AND p.workspace_id = $2"#,
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
        sqlx::query_as::<_, Lot>(
            r#"SELECT l.id, l.project_id, l.name, l.color, l.company_id, l.created_at, l.updated_at
               FROM lots l
               JOIN projects p ON p.id = l.project_id
               WHERE l.project_id = $1 AND p.workspace_id = $2
               ORDER BY l.created_at ASC"#,
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
        data: &UpdateLot,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Lot>(
            r#"UPDATE lots
               SET name = COALESCE($3, name),
                   color = COALESCE($4, color),
                   company_id = COALESCE($5, company_id),
                   updated_at = datetime('now', 'subsec')
               WHERE id = $1
                 AND project_id IN (SELECT id FROM projects WHERE workspace_id = $2)
               RETURNING id, project_id, name, color, company_id, created_at, updated_at"#,
        )
        .bind(id)
        .bind(ctx.workspace_id)
        .bind(&data.name)
        .bind(&data.color)
        .bind(data.company_id)
        .fetch_optional(pool)
        .await
    }

    /// Cascades to the lot's interventions.
    pub async fn delete(
        pool: &SqlitePool,
        ctx: WorkspaceContext,
        id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"DELETE FROM lots
               WHERE id = $1
                 AND project_id IN (SELECT id FROM projects WHERE workspace_id = $2)"#,
        )
        .bind(id)
        .bind(ctx.workspace_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_by_project<'e, E>(executor: E, project_id: Uuid) -> Result<u64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM lots WHERE project_id = $1")
            .bind(project_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Reinsert a lot exactly as it was captured, timestamps included.
    pub async fn insert_snapshot_row<'e, E>(executor: E, lot: &Lot) -> Result<(), sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"INSERT INTO lots (id, project_id, name, color, company_id, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7)"#,
        )
        .bind(lot.id)
        .bind(lot.project_id)
        .bind(&lot.name)
        .bind(&lot.color)
        .bind(lot.company_id)
        .bind(lot.created_at)
        .bind(lot.updated_at)
        .execute(executor)
        .await?;
        Ok(())
    }
}
