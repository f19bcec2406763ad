use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use utils::tenant::WorkspaceContext;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Project {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateProject {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Project {
    pub async fn create(
        pool: &SqlitePool,
        ctx: WorkspaceContext,
        data: &CreateProject,
    ) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        sqlx::query_as::<_, Project>(
            r#"INSERT INTO projects (id, workspace_id, name, description)
               VALUES ($1, $2, $3, $4)
               RETURNING id, workspace_id, name, description, created_at, updated_at"#,
        )
        .bind(id)
        .bind(ctx.workspace_id)
        .bind(&data.name)
        .bind(&data.description)
        .fetch_one(pool)
        .await
    }

    /// Scoped to the caller's workspace; another tenant's project id
    /// resolves to `None`.
    pub async fn find_by_id(
        pool: &SqlitePool,
        ctx: WorkspaceContext,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            r#"SELECT id, workspace_id, name, description, created_at, updated_at
               FROM projects
               WHERE id = $1 AND workspace_id = $2"#,
        )
        .bind(id)
        .bind(ctx.workspace_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_workspace(
        pool: &SqlitePool,
        ctx: WorkspaceContext,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            r#"SELECT id, workspace_id, name, description, created_at, updated_at
               FROM projects
               WHERE workspace_id = $1
               ORDER BY created_at DESC"#,
        )
        .bind(ctx.workspace_id)
        .fetch_all(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        ctx: WorkspaceContext,
        id: Uuid,
        data: &UpdateProject,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            r#"UPDATE projects
               SET name = COALESCE($3, name),
                   description = COALESCE($4, description),
                   updated_at = datetime('now', 'subsec')
               WHERE id = $1 AND workspace_id = $2
               RETURNING id, workspace_id, name, description, created_at, updated_at"#,
        )
        .bind(id)
        .bind(ctx.workspace_id)
        .bind(&data.name)
        .bind(&data.description)
        .fetch_optional(pool)
        .await
    }

    /// Cascades to lots, interventions and planning versions.
    pub async fn delete(
        pool: &SqlitePool,
        ctx: WorkspaceContext,
        id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND workspace_id = $2")
            .bind(id)
            .bind(ctx.workspace_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        DBService,
        models::workspace::{CreateWorkspace, Workspace},
    };

    async fn workspace_ctx(db: &DBService, name: &str) -> WorkspaceContext {
        let workspace = Workspace::create(
            &db.pool,
            &CreateWorkspace {
                name: name.to_string(),
            },
        )
        .await
        .unwrap();
        WorkspaceContext::new(workspace.id)
    }

    #[tokio::test]
    async fn projects_are_invisible_across_workspaces() {
        let db = DBService::new_in_memory().await.unwrap();
        let ctx_a = workspace_ctx(&db, "Atelier A").await;
        let ctx_b = workspace_ctx(&db, "Atelier B").await;

        let project = Project::create(
            &db.pool,
            ctx_a,
            &CreateProject {
                name: "Loft conversion".to_string(),
                description: None,
            },
        )
        .await
        .unwrap();

        assert!(
            Project::find_by_id(&db.pool, ctx_b, project.id)
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            Project::find_by_workspace(&db.pool, ctx_b)
                .await
                .unwrap()
                .is_empty()
        );
        assert_eq!(Project::delete(&db.pool, ctx_b, project.id).await.unwrap(), 0);

        // Still intact for its owner.
        let found = Project::find_by_id(&db.pool, ctx_a, project.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.name, "Loft conversion");
    }

    #[tokio::test]
    async fn update_touches_only_provided_fields() {
        let db = DBService::new_in_memory().await.unwrap();
        let ctx = workspace_ctx(&db, "Atelier").await;

        let project = Project::create(
            &db.pool,
            ctx,
            &CreateProject {
                name: "Loft conversion".to_string(),
                description: Some("two floors".to_string()),
            },
        )
        .await
        .unwrap();

        let updated = Project::update(
            &db.pool,
            ctx,
            project.id,
            &UpdateProject {
                name: Some("Loft conversion phase 2".to_string()),
                description: None,
            },
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(updated.name, "Loft conversion phase 2");
        assert_eq!(updated.description.as_deref(), Some("two floors"));
    }
}
