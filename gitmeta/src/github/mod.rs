//! GitHub REST access: headers, transport, status classification and
//! pagination.

mod client;
mod error;
mod headers;
mod pagination;
mod rate_limit;
mod transport;

pub use client::{check_status, is_token_accepted, GitHubClient, DEFAULT_API_URL};
pub use error::{BoxError, FetchError};
pub use headers::{build_headers, API_VERSION, DEFAULT_USER_AGENT, GITHUB_JSON};
pub use pagination::{fetch_all_pages, PER_PAGE};
pub use rate_limit::{rate_limit_error, reset_at_millis, RateLimitInfo};
pub use transport::{OctocrabTransport, RawResponse, Transport};

#[cfg(test)]
pub(crate) use transport::mock;
