//! Resource fetcher for the GitHub REST API.

use super::error::FetchError;
use super::headers::{build_headers, DEFAULT_USER_AGENT};
use super::rate_limit::{rate_limit_error, RateLimitInfo};
use super::transport::{OctocrabTransport, RawResponse, Transport};
use crate::text::clip;
use http::HeaderMap;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

/// Public GitHub REST API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Characters of an error response body kept in [`FetchError::Http`].
const ERROR_BODY_LIMIT: usize = 400;

/// Endpoint used to check whether a token is accepted.
const TOKEN_CHECK_PATH: &str = "/rate_limit";

/// Header GitHub sets on responses to OAuth and classic tokens.
const OAUTH_SCOPES_HEADER: &str = "x-oauth-scopes";

/// Performs single GitHub REST requests and classifies their outcome.
#[derive(Clone)]
pub struct GitHubClient<T = OctocrabTransport> {
    transport: T,
    base_url: Url,
    user_agent: String,
}

impl GitHubClient<OctocrabTransport> {
    /// Creates a client for the API at `api_url` backed by octocrab.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidUrl`] for a malformed URL and
    /// [`FetchError::Client`] if octocrab cannot be initialized.
    pub fn new(api_url: &str, user_agent: &str) -> Result<Self, FetchError> {
        let base_url = Url::parse(api_url).map_err(|source| FetchError::InvalidUrl {
            url: api_url.to_string(),
            source,
        })?;
        let transport = OctocrabTransport::new(&base_url, user_agent)?;
        Ok(Self::with_transport(transport, base_url).with_user_agent(user_agent))
    }
}

impl<T: Transport> GitHubClient<T> {
    /// Creates a client that sends requests through `transport`.
    pub fn with_transport(transport: T, base_url: Url) -> Self {
        Self {
            transport,
            base_url,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Sets the `User-Agent` sent with every request.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Returns the API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Builds the header set for requests made with `token`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidHeader`] if the token or user agent
    /// cannot be encoded.
    pub fn headers(&self, token: Option<&str>) -> Result<HeaderMap, FetchError> {
        build_headers(&self.user_agent, token)
    }

    /// Resolves a resource path and query parameters against the base URL.
    ///
    /// Paths are appended to the base URL's own path, so enterprise bases
    /// such as `https://ghe.example.com/api/v3` keep their prefix.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidUrl`] if the result is not a valid URL.
    pub fn endpoint(&self, path: &str, params: &[(&str, String)]) -> Result<Url, FetchError> {
        let joined = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path);
        let mut url = Url::parse(&joined).map_err(|source| FetchError::InvalidUrl {
            url: joined.clone(),
            source,
        })?;

        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Fetches `path` with query `params` and decodes the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::RateLimitExceeded`] on HTTP 403,
    /// [`FetchError::Http`] on other non-success statuses,
    /// [`FetchError::Transport`] if the request fails, and
    /// [`FetchError::Decode`] if the body is not the expected JSON.
    pub async fn fetch_json<D: DeserializeOwned>(
        &self,
        path: &str,
        headers: &HeaderMap,
        params: &[(&str, String)],
    ) -> Result<D, FetchError> {
        let url = self.endpoint(path, params)?;
        self.get_json(&url, headers).await
    }

    /// Fetches an already resolved URL and decodes the JSON body.
    ///
    /// # Errors
    ///
    /// Same as [`GitHubClient::fetch_json`].
    pub async fn get_json<D: DeserializeOwned>(
        &self,
        url: &Url,
        headers: &HeaderMap,
    ) -> Result<D, FetchError> {
        let response = self.send(url, headers).await?;
        let response = check_status(url, response)?;
        serde_json::from_str(&response.body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// Checks whether GitHub accepts `token`.
    ///
    /// A 401 means the token is invalid. A 403 that still carries the
    /// `X-OAuth-Scopes` header comes from a recognized but rate limited
    /// token and counts as valid. Any other status is valid when it is 2xx.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] if the request cannot be completed.
    pub async fn validate_token(&self, token: &str) -> Result<bool, FetchError> {
        let headers = self.headers(Some(token))?;
        let url = self.endpoint(TOKEN_CHECK_PATH, &[])?;
        let response = self.send(&url, &headers).await?;
        let valid = is_token_accepted(&response);
        info!(status = response.status, valid, "Validated token");
        Ok(valid)
    }

    async fn send(&self, url: &Url, headers: &HeaderMap) -> Result<RawResponse, FetchError> {
        debug!(url = %url, "GET");
        let response = self
            .transport
            .get(url, headers)
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        if let Some(info) = RateLimitInfo::from_headers(&response.headers) {
            info.trace();
        }

        Ok(response)
    }
}

/// Maps a non-success response to its [`FetchError`].
///
/// # Errors
///
/// Returns [`FetchError::RateLimitExceeded`] for 403 and [`FetchError::Http`]
/// for any other status outside 2xx.
pub fn check_status(url: &Url, response: RawResponse) -> Result<RawResponse, FetchError> {
    if response.status == 403 {
        return Err(rate_limit_error(
            response.status,
            &response.headers,
            &response.body,
        ));
    }

    if !response.is_success() {
        return Err(FetchError::Http {
            status: response.status,
            url: url.to_string(),
            body: clip(&response.body, ERROR_BODY_LIMIT).to_string(),
        });
    }

    Ok(response)
}

/// Classifies a `/rate_limit` response for token validation.
pub fn is_token_accepted(response: &RawResponse) -> bool {
    match response.status {
        401 => false,
        403 => response.headers.contains_key(OAUTH_SCOPES_HEADER),
        _ => response.is_success(),
    }
}
