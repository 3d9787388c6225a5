//! Export summary types.

use crate::snapshot::EntityCounts;
use std::path::PathBuf;

/// Summary of a completed export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Repository full name.
    pub repository: String,

    /// Number of entities exported per collection.
    pub counts: EntityCounts,

    /// Whether requests carried a token.
    pub authenticated: bool,

    /// Path of the text digest.
    pub digest_path: PathBuf,

    /// Path of the zip archive.
    pub archive_path: PathBuf,

    /// Size of the zip archive in bytes.
    pub archive_bytes: usize,

    /// Root of the unpacked tree, when written.
    pub unpacked_dir: Option<PathBuf>,
}

impl ExportSummary {
    /// Total number of exported entities, excluding the summary.
    #[must_use]
    pub fn total_items(&self) -> usize {
        let c = &self.counts;
        c.issues + c.pulls + c.issue_comments + c.review_comments + c.reviews + c.releases
    }
}
