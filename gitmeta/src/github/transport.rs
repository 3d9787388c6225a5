//! Transport boundary for GitHub HTTP I/O.
//!
//! The fetcher only needs one operation, a GET that yields the status,
//! headers and body text regardless of status. [`OctocrabTransport`] issues
//! it through octocrab's raw request API; tests substitute an in-memory
//! transport or a mock server.

use super::error::BoxError;
use async_trait::async_trait;
use http::header::USER_AGENT;
use http::HeaderMap;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use url::Url;

/// A response as received, before status classification.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,

    /// Response headers.
    pub headers: HeaderMap,

    /// Response body decoded as UTF-8.
    pub body: String,
}

impl RawResponse {
    /// Returns true for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs GET requests against the GitHub API.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends one GET request with the given headers.
    ///
    /// Non-success statuses are returned as responses, not errors; only
    /// failures to complete the exchange are errors.
    async fn get(&self, url: &Url, headers: &HeaderMap) -> Result<RawResponse, BoxError>;
}

/// Transport backed by an unauthenticated [`Octocrab`] instance.
///
/// Authentication is carried by the per-request header set, so a single
/// instance serves any token. The user agent is fixed at construction
/// because octocrab overwrites that header on every request. Octocrab's
/// retry layer is disabled: every request is sent exactly once.
#[derive(Clone)]
pub struct OctocrabTransport {
    octocrab: Octocrab,
}

impl OctocrabTransport {
    /// Creates a transport whose relative requests resolve against `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if octocrab rejects the base URL or cannot build its
    /// HTTP client.
    pub fn new(base_url: &Url, user_agent: &str) -> Result<Self, octocrab::Error> {
        let octocrab = Octocrab::builder()
            .base_uri(base_url.as_str())?
            .add_header(USER_AGENT, user_agent.to_string())
            .add_retry_config(RetryConfig::None)
            .build()?;
        Ok(Self { octocrab })
    }
}

#[async_trait]
impl Transport for OctocrabTransport {
    async fn get(&self, url: &Url, headers: &HeaderMap) -> Result<RawResponse, BoxError> {
        let response = self
            .octocrab
            ._get_with_headers(url.as_str(), Some(headers.clone()))
            .await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = self.octocrab.body_to_string(response).await?;

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
pub(crate) mod mock {
    //! In-memory transport for unit tests: no sockets, no loopback servers.

    use super::*;
    use http::HeaderValue;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    /// Returns queued responses per URL path in FIFO order and records every
    /// request it receives.
    #[derive(Default)]
    pub(crate) struct MockTransport {
        routes: Mutex<HashMap<String, VecDeque<RawResponse>>>,
        requests: Mutex<Vec<(Url, HeaderMap)>>,
    }

    impl MockTransport {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        /// Queues a response for requests to `path`, ignoring the query.
        pub(crate) fn push(&self, path: &str, response: RawResponse) {
            self.routes
                .lock()
                .expect("mock routes lock should not be poisoned")
                .entry(path.to_string())
                .or_default()
                .push_back(response);
        }

        /// Queues a JSON response with the given status.
        pub(crate) fn push_json(&self, path: &str, status: u16, body: serde_json::Value) {
            self.push(
                path,
                RawResponse {
                    status,
                    headers: HeaderMap::new(),
                    body: body.to_string(),
                },
            );
        }

        /// Queues a response with headers and a plain body.
        pub(crate) fn push_with_headers(
            &self,
            path: &str,
            status: u16,
            headers: &[(&'static str, &'static str)],
            body: &str,
        ) {
            let mut map = HeaderMap::new();
            for (name, value) in headers {
                map.insert(*name, HeaderValue::from_static(*value));
            }
            self.push(
                path,
                RawResponse {
                    status,
                    headers: map,
                    body: body.to_string(),
                },
            );
        }

        /// All requested URLs in order.
        pub(crate) fn requests(&self) -> Vec<Url> {
            self.requests
                .lock()
                .expect("mock requests lock should not be poisoned")
                .iter()
                .map(|(url, _)| url.clone())
                .collect()
        }

        /// Headers of the request at `index`.
        pub(crate) fn request_headers(&self, index: usize) -> HeaderMap {
            self.requests
                .lock()
                .expect("mock requests lock should not be poisoned")[index]
                .1
                .clone()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn get(&self, url: &Url, headers: &HeaderMap) -> Result<RawResponse, BoxError> {
            self.requests
                .lock()
                .expect("mock requests lock should not be poisoned")
                .push((url.clone(), headers.clone()));

            self.routes
                .lock()
                .expect("mock routes lock should not be poisoned")
                .get_mut(url.path())
                .and_then(VecDeque::pop_front)
                .ok_or_else(|| format!("no mock response registered for {url}").into())
        }
    }
}
