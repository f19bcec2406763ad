//! Snapshot payloads for planning versions.
//!
//! A snapshot is a verbatim copy of a project's working set (lots +
//! interventions) at save time, wrapped with an explicit schema version
//! tag so a future shape change can be detected and migrated instead of
//! silently misparsed.

use db::models::{intervention::Intervention, lot::Lot};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Current shape of the snapshot payload.
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot payload is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unsupported snapshot schema version {0}")]
    UnsupportedSchema(u32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct PlanningSnapshot {
    pub schema_version: u32,
    pub lots: Vec<Lot>,
    pub interventions: Vec<Intervention>,
}

/// Only the tag, so the version check runs before the full parse.
#[derive(Debug, Deserialize)]
struct SnapshotHeader {
    #[serde(default)]
    schema_version: u32,
}

impl PlanningSnapshot {
    /// Wrap the caller-supplied working set verbatim. No transformation
    /// or normalization is applied.
    pub fn capture(lots: Vec<Lot>, interventions: Vec<Intervention>) -> Self {
        Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            lots,
            interventions,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        let header: SnapshotHeader = serde_json::from_str(raw)?;
        if header.schema_version != SNAPSHOT_SCHEMA_VERSION {
            return Err(SnapshotError::UnsupportedSchema(header.schema_version));
        }
        Ok(serde_json::from_str(raw)?)
    }
}
