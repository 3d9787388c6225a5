//! Repository target validation errors.

use thiserror::Error;

/// Errors that can occur while parsing a repository target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Input was empty after trimming.
    #[error("Provide a GitHub repository URL.")]
    EmptyInput,

    /// Input is neither `owner/name` nor a GitHub repository URL.
    #[error("Expected https://github.com/owner/name, got '{input}'")]
    InvalidRepoUrl { input: String },
}
