//! Page-number pagination over GitHub list endpoints.

use super::client::GitHubClient;
use super::error::FetchError;
use super::transport::Transport;
use http::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Items requested per page; a shorter page is the last one.
pub const PER_PAGE: usize = 100;

/// Retrieves every page of a list endpoint and concatenates the items.
///
/// Pages are requested with `per_page=100` and `page` counting up from 1
/// until a page comes back empty or with fewer than [`PER_PAGE`] items. A
/// page whose body is not a JSON array counts as empty.
///
/// # Arguments
///
/// * `client` - Fetcher used for each page request
/// * `path` - Resource path, e.g. `/repos/o/r/issues`
/// * `headers` - Header set sent with every page
/// * `base_params` - Query parameters sent ahead of the paging ones
///
/// # Errors
///
/// Returns the first [`FetchError`] encountered; items from earlier pages
/// are discarded.
pub async fn fetch_all_pages<T, D>(
    client: &GitHubClient<T>,
    path: &str,
    headers: &HeaderMap,
    base_params: &[(&str, String)],
) -> Result<Vec<D>, FetchError>
where
    T: Transport,
    D: DeserializeOwned,
{
    let mut items = Vec::new();
    let mut page = 1usize;

    loop {
        let mut params = base_params.to_vec();
        params.push(("per_page", PER_PAGE.to_string()));
        params.push(("page", page.to_string()));

        let url = client.endpoint(path, &params)?;
        let body: Value = client.get_json(&url, headers).await?;
        let entries = match body {
            Value::Array(entries) => entries,
            _ => Vec::new(),
        };
        let received = entries.len();
        debug!(path, page, received, "Fetched page");

        for entry in entries {
            let item = serde_json::from_value(entry).map_err(|source| FetchError::Decode {
                url: url.to_string(),
                source,
            })?;
            items.push(item);
        }

        if received < PER_PAGE {
            return Ok(items);
        }
        page += 1;
    }
}
