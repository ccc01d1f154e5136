//! HTTP client for the Brewfather v2 API.

use crate::config::Credentials;
use crate::error::{BrewfatherError, BrewfatherResult};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use tracing::debug;
use url::Url;

/// Root of the Brewfather v2 API. The trailing slash matters for joining
/// relative paths.
pub const DEFAULT_BASE_URL: &str = "https://api.brewfather.app/v2/";

/// Authenticated read-only client for the Brewfather API.
///
/// Every call is a single GET with no retries; the response body is returned
/// as raw JSON without interpretation so callers can pass it through
/// verbatim.
#[derive(Debug, Clone)]
pub struct BrewfatherClient {
    client: Client,
    base_url: Url,
}

impl BrewfatherClient {
    pub fn new(credentials: &Credentials) -> BrewfatherResult<Self> {
        let base_url = Url::parse(DEFAULT_BASE_URL)?;
        Self::with_base_url(credentials, base_url)
    }

    /// Point the client at a different API root (used by tests to target a
    /// local mock server).
    pub fn with_base_url(credentials: &Credentials, base_url: Url) -> BrewfatherResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&credentials.auth_header())
                .map_err(|_| BrewfatherError::Config("credentials are not header-safe".to_string()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder().default_headers(headers).build()?;
        Ok(Self { client, base_url })
    }

    /// Issue a GET against `path` (relative to the API root) and return the
    /// body as raw JSON.
    pub async fn get_json(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> BrewfatherResult<serde_json::Value> {
        let url = self.base_url.join(path)?;
        debug!(url = %url, "GET request");

        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "upstream error response");
            return Err(BrewfatherError::Upstream {
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}
