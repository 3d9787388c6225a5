//! The `sync_state.json` record.

use crate::snapshot::{EntityCounts, Snapshot};
use crate::text::to_iso_millis;
use serde::Serialize;

/// Summary of an export written at the archive root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncState {
    /// Repository full name.
    pub repo: String,

    /// Snapshot capture time, ISO-8601 UTC with milliseconds.
    pub synced_at: String,

    /// Collection sizes.
    pub counts: EntityCounts,
}

impl SyncState {
    /// Describes `snapshot`.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            repo: snapshot.repo_name().to_string(),
            synced_at: to_iso_millis(&snapshot.captured_at),
            counts: snapshot.counts(),
        }
    }
}
