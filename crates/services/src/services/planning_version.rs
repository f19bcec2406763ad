//! Planning version lifecycle: save, list, delete, restore.

use db::models::{
    intervention::Intervention,
    lot::Lot,
    planning_version::{CreatePlanningVersion, PlanningVersion, PlanningVersionSummary},
    project::Project,
};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;
use utils::tenant::WorkspaceContext;
use uuid::Uuid;

use super::snapshot::{PlanningSnapshot, SnapshotError};

#[derive(Debug, Error)]
pub enum PlanningVersionError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("version name must not be empty")]
    EmptyName,
    #[error("project not found")]
    ProjectNotFound,
    #[error("version not found")]
    VersionNotFound,
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),
}

pub struct PlanningVersionService;

impl PlanningVersionService {
    /// All versions for a project, newest number first, without payloads.
    pub async fn list(
        pool: &SqlitePool,
        ctx: WorkspaceContext,
        project_id: Uuid,
    ) -> Result<Vec<PlanningVersionSummary>, PlanningVersionError> {
        Project::find_by_id(pool, ctx, project_id)
            .await?
            .ok_or(PlanningVersionError::ProjectNotFound)?;
        Ok(PlanningVersion::find_summaries_by_project(pool, ctx, project_id).await?)
    }

    pub async fn get(
        pool: &SqlitePool,
        ctx: WorkspaceContext,
        version_id: Uuid,
    ) -> Result<(PlanningVersion, PlanningSnapshot), PlanningVersionError> {
        let version = PlanningVersion::find_by_id(pool, ctx, version_id)
            .await?
            .ok_or(PlanningVersionError::VersionNotFound)?;
        let snapshot = PlanningSnapshot::from_json(&version.snapshot)?;
        Ok((version, snapshot))
    }

    /// Save the project's current working set as the next numbered version.
    /// A blank name is rejected before anything is read or written.
    pub async fn create(
        pool: &SqlitePool,
        ctx: WorkspaceContext,
        project_id: Uuid,
        data: &CreatePlanningVersion,
    ) -> Result<PlanningVersion, PlanningVersionError> {
        if data.name.trim().is_empty() {
            return Err(PlanningVersionError::EmptyName);
        }
        Project::find_by_id(pool, ctx, project_id)
            .await?
            .ok_or(PlanningVersionError::ProjectNotFound)?;

        let lots = Lot::find_by_project(pool, ctx, project_id).await?;
        let interventions = Intervention::find_by_project(pool, ctx, project_id).await?;
        let snapshot = PlanningSnapshot::capture(lots, interventions);
        let json = snapshot.to_json().map_err(PlanningVersionError::Encode)?;

        let version = PlanningVersion::insert_next(pool, project_id, data, &json).await?;
        info!(
            project_id = %project_id,
            version_number = version.version_number,
            "saved planning version"
        );
        Ok(version)
    }

    pub async fn delete(
        pool: &SqlitePool,
        ctx: WorkspaceContext,
        version_id: Uuid,
    ) -> Result<(), PlanningVersionError> {
        let deleted = PlanningVersion::delete(pool, ctx, version_id).await?;
        if deleted == 0 {
            return Err(PlanningVersionError::VersionNotFound);
        }
        Ok(())
    }

    /// Full overwrite, no merge: the project's current lots and
    /// interventions are replaced by the snapshot's rows inside one
    /// transaction, so a re-read returns exactly the saved state. The
    /// pre-restore state is discarded unless it was saved first.
    pub async fn restore(
        pool: &SqlitePool,
        ctx: WorkspaceContext,
        version_id: Uuid,
    ) -> Result<PlanningSnapshot, PlanningVersionError> {
        let version = PlanningVersion::find_by_id(pool, ctx, version_id)
            .await?
            .ok_or(PlanningVersionError::VersionNotFound)?;
        let snapshot = PlanningSnapshot::from_json(&version.snapshot)?;

        let mut tx = pool.begin().await?;
        Intervention::delete_by_project(&mut *tx, version.project_id).await?;
        Lot::delete_by_project(&mut *tx, version.project_id).await?;
        for lot in &snapshot.lots {
            Lot::insert_snapshot_row(&mut *tx, lot).await?;
        }
        for intervention in &snapshot.interventions {
            Intervention::insert_snapshot_row(&mut *tx, intervention).await?;
        }
        tx.commit().await?;

        info!(
            project_id = %version.project_id,
            version_number = version.version_number,
            "restored planning version"
        );
        Ok(snapshot)
    }
}
