//! Archive error types.

use thiserror::Error;

/// Errors that can occur while packaging a snapshot.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// An entity or thread line could not be serialized.
    #[error("Failed to serialize '{path}': {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The zip writer failed.
    #[error("Failed to write zip archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Writing the unpacked tree failed.
    #[error("Failed to write '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
