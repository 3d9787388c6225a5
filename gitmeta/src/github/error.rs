//! GitHub fetch error types.

use thiserror::Error;

/// Boxed cause of a transport failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while fetching GitHub resources.
///
/// [`FetchError::RateLimitExceeded`] is the one failure callers usually
/// branch on; every other variant is a generic request failure.
#[derive(Debug, Error)]
pub enum FetchError {
    /// GitHub answered 403, which it uses for primary and secondary rate limits.
    #[error("{message}")]
    RateLimitExceeded {
        /// Human-readable description including the reset time when known.
        message: String,
        /// Reset time in epoch milliseconds, when the reset header was parseable.
        reset_at: Option<i64>,
    },

    /// Non-success status other than 403.
    #[error("GitHub API {status} for {url}: {body}")]
    Http {
        status: u16,
        url: String,
        /// Response body, truncated to 400 characters.
        body: String,
    },

    /// The request could not be completed.
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },

    /// The response body was not the expected JSON.
    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// A header value could not be encoded.
    #[error("Invalid value for header '{name}'")]
    InvalidHeader { name: &'static str },

    /// The API base URL or a resource path did not form a valid URL.
    #[error("Invalid API URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// GitHub client initialization error.
    #[error("Failed to initialize GitHub client: {0}")]
    Client(#[from] octocrab::Error),
}

impl FetchError {
    /// Returns true when this failure is a rate limit.
    #[must_use]
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, Self::RateLimitExceeded { .. })
    }

    /// Reset time in epoch milliseconds for rate limit failures.
    #[must_use]
    pub fn reset_at(&self) -> Option<i64> {
        match self {
            Self::RateLimitExceeded { reset_at, .. } => *reset_at,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_accessors() {
        let limited = FetchError::RateLimitExceeded {
            message: "hit".to_string(),
            reset_at: Some(123),
        };
        assert!(limited.is_rate_limit());
        assert_eq!(limited.reset_at(), Some(123));

        let http = FetchError::Http {
            status: 404,
            url: "https://api.github.com/repos/o/r".to_string(),
            body: "Not Found".to_string(),
        };
        assert!(!http.is_rate_limit());
        assert_eq!(http.reset_at(), None);
        assert_eq!(
            http.to_string(),
            "GitHub API 404 for https://api.github.com/repos/o/r: Not Found"
        );
    }
}
