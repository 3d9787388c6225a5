//! Request headers sent with every GitHub API call.

use super::error::FetchError;
use http::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use http::{HeaderMap, HeaderName, HeaderValue};

/// Media type requested from the REST API.
pub const GITHUB_JSON: &str = "application/vnd.github+json";

/// Pinned REST API version.
pub const API_VERSION: &str = "2022-11-28";

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = "gitmeta-ingest";

const API_VERSION_HEADER: HeaderName = HeaderName::from_static("x-github-api-version");

/// Builds the header set shared by all requests of one export.
///
/// The `Authorization` header is only added when `token` is non-blank after
/// trimming.
///
/// # Errors
///
/// Returns [`FetchError::InvalidHeader`] when the user agent or token cannot
/// be encoded as a header value.
pub fn build_headers(user_agent: &str, token: Option<&str>) -> Result<HeaderMap, FetchError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_JSON));
    headers.insert(API_VERSION_HEADER, HeaderValue::from_static(API_VERSION));
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(user_agent).map_err(|_| FetchError::InvalidHeader {
            name: "User-Agent",
        })?,
    );

    if let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
            FetchError::InvalidHeader {
                name: "Authorization",
            }
        })?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}
