//! Runner error types.

use crate::archive::ArchiveError;
use crate::config::ConfigError;
use crate::github::FetchError;
use crate::target::ValidationError;
use crate::token_cache::TokenCacheError;

/// Errors that can occur during an export.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration loading errors.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The repository input was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A GitHub request failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Packaging the archive failed.
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// Persisting the token cache failed.
    #[error(transparent)]
    TokenCache(#[from] TokenCacheError),

    /// A token was required but none was accepted by GitHub.
    #[error("No working token found.")]
    NoWorkingToken,

    /// Writing an output file failed.
    #[error("Failed to write '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl RunnerError {
    /// Returns true when the export stopped on a GitHub rate limit.
    #[must_use]
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, Self::Fetch(e) if e.is_rate_limit())
    }
}
