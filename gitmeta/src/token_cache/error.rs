//! Token cache error types.

use thiserror::Error;

/// Errors that can occur while persisting the token cache.
#[derive(Debug, Error)]
pub enum TokenCacheError {
    /// Failed to write the cache file or create its directory.
    #[error("Failed to write token cache '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to encode the cache.
    #[error("Failed to encode token cache: {0}")]
    Encode(#[from] serde_json::Error),
}
