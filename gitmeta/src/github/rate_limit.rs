//! Rate limit header parsing for GitHub API responses.
//!
//! GitHub reports its budget on every response through `X-RateLimit-*`
//! headers and signals exhaustion with HTTP 403. Nothing here waits or
//! retries: a 403 becomes a [`FetchError::RateLimitExceeded`] and the caller
//! decides what to do.

use super::error::FetchError;
use crate::text::{clip, to_iso_millis};
use chrono::{DateTime, Utc};
use http::HeaderMap;
use tracing::{debug, warn};

/// Remaining requests below which a warning is logged.
const LOW_REMAINING_THRESHOLD: u32 = 5;

/// Characters of the response body kept in a rate limit message.
const MESSAGE_BODY_LIMIT: usize = 200;

const LIMIT_HEADER: &str = "x-ratelimit-limit";
const REMAINING_HEADER: &str = "x-ratelimit-remaining";
const RESET_HEADER: &str = "x-ratelimit-reset";

/// Rate limit information reported on a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Requests remaining in the current window.
    pub remaining: u32,

    /// Unix timestamp when the rate limit resets.
    pub reset: u64,

    /// Total requests allowed per window.
    pub limit: u32,
}

impl RateLimitInfo {
    /// Reads the `X-RateLimit-*` headers, if all three are present.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        Some(Self {
            remaining: header_number(headers, REMAINING_HEADER)?,
            reset: header_number(headers, RESET_HEADER)?,
            limit: header_number(headers, LIMIT_HEADER)?,
        })
    }

    /// Logs the remaining budget, warning when it runs low.
    pub fn trace(&self) {
        if self.remaining < LOW_REMAINING_THRESHOLD {
            warn!(
                remaining = self.remaining,
                limit = self.limit,
                reset = self.reset,
                "GitHub rate limit nearly exhausted"
            );
        } else {
            debug!(
                remaining = self.remaining,
                limit = self.limit,
                "GitHub rate limit status"
            );
        }
    }
}

/// Reset time from `X-RateLimit-Reset` converted to epoch milliseconds.
pub fn reset_at_millis(headers: &HeaderMap) -> Option<i64> {
    header_number::<i64>(headers, RESET_HEADER)?.checked_mul(1000)
}

/// Builds the rate limit failure for a 403 response.
pub fn rate_limit_error(status: u16, headers: &HeaderMap, body: &str) -> FetchError {
    let reset_at = reset_at_millis(headers);
    let body = clip(body, MESSAGE_BODY_LIMIT);
    let reset = reset_at
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|instant| to_iso_millis(&instant));

    let message = match reset {
        Some(reset) => {
            format!("GitHub rate limit hit ({status}). Reset at {reset}. Body: {body}")
        }
        None => format!("GitHub rate limit hit ({status}). Body: {body}"),
    };

    FetchError::RateLimitExceeded { message, reset_at }
}

fn header_number<N: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<N> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(*value));
        }
        map
    }

    #[test]
    fn test_rate_limit_info() {
        let map = headers(&[
            ("x-ratelimit-limit", "5000"),
            ("x-ratelimit-remaining", "4999"),
            ("x-ratelimit-reset", "1700000000"),
        ]);

        let info = RateLimitInfo::from_headers(&map).unwrap();

        assert_eq!(info.remaining, 4999);
        assert_eq!(info.reset, 1_700_000_000);
        assert_eq!(info.limit, 5000);
    }

    #[test]
    fn test_rate_limit_info_requires_all_headers() {
        let map = headers(&[("x-ratelimit-remaining", "10")]);
        assert!(RateLimitInfo::from_headers(&map).is_none());
    }

    #[test]
    fn rate_limit_error_with_reset_header() {
        let map = headers(&[("x-ratelimit-reset", "1700000000")]);

        let error = rate_limit_error(403, &map, "API rate limit exceeded");

        assert_eq!(error.reset_at(), Some(1_700_000_000_000));
        assert_eq!(
            error.to_string(),
            "GitHub rate limit hit (403). Reset at 2023-11-14T22:13:20.000Z. \
             Body: API rate limit exceeded"
        );
    }

    #[test]
    fn rate_limit_error_without_reset_header() {
        let error = rate_limit_error(403, &HeaderMap::new(), "Forbidden");

        assert!(error.is_rate_limit());
        assert_eq!(error.reset_at(), None);
        assert_eq!(
            error.to_string(),
            "GitHub rate limit hit (403). Body: Forbidden"
        );
    }

    #[test]
    fn rate_limit_error_ignores_unparseable_reset() {
        let map = headers(&[("x-ratelimit-reset", "soon")]);
        assert_eq!(rate_limit_error(403, &map, "").reset_at(), None);
    }

    #[test]
    fn rate_limit_message_clips_body() {
        let body = "x".repeat(500);
        let error = rate_limit_error(403, &HeaderMap::new(), &body);
        assert!(error.to_string().ends_with(&"x".repeat(200)));
        assert!(!error.to_string().contains(&"x".repeat(201)));
    }
}
