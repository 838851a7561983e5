//! HTTP client for the DataUSA search and data endpoints.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    query::{Query, SearchQuery, WageQuery},
    types::{DataResponse, SearchResponse, WageRecord},
    Error,
};

pub const DEFAULT_SEARCH_URL: &str = "https://delaware-app.datausa.io/api/searchLegacy";
pub const DEFAULT_DATA_URL: &str = "https://datausa.io/api/data";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Endpoint locations and the per-request timeout.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub search_url: String,
    pub data_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            data_url: DEFAULT_DATA_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// HTTP client for the DataUSA API.
///
/// Holds a single `reqwest::Client`; every request carries the configured
/// timeout, and a timed-out request surfaces as [`Error::Network`].
pub struct Client {
    http: reqwest::Client,
    search_url: String,
    data_url: String,
}

impl Client {
    /// Creates a client from explicit endpoint and timeout settings.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("wagegate/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::from(e)
            })?;
        Ok(Self {
            http,
            search_url: config.search_url,
            data_url: config.data_url,
        })
    }

    /// Creates a client serving both endpoints from one base URL, with the
    /// default timeout. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::new(ClientConfig {
            search_url: format!("{}/api/searchLegacy", base_url),
            data_url: format!("{}/api/data", base_url),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    fn get_url(&self, endpoint: &str, query: &impl Query) -> Result<Url, Error> {
        let url = Url::parse(endpoint).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::InvalidUrl(format!("{}: {}", endpoint, e))
        })?;
        Ok(query.add_to_url(&url))
    }

    async fn get<T, Q>(&self, endpoint: &str, query: &Q) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.get_url(endpoint, query)?;
        let resp = self
            .http
            .get(url)
            .header("accept", "application/json, text/plain, */*")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    tracing::error!("Request to {} timed out: {}", endpoint, e);
                } else {
                    tracing::error!("Failed to get resource from {}: {}", endpoint, e);
                }
                Error::from(e)
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::from(e)
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::Decode(e.to_string())
        })
    }

    /// Lists the members of the searched dimension (all detailed occupations
    /// with the default query).
    pub async fn search_occupations(&self, query: &SearchQuery) -> Result<SearchResponse, Error> {
        self.get::<SearchResponse, SearchQuery>(&self.search_url, query)
            .await
    }

    /// Fetches the year/state wage rows for one occupation.
    pub async fn get_wages(&self, query: &WageQuery) -> Result<DataResponse<WageRecord>, Error> {
        self.get::<DataResponse<WageRecord>, WageQuery>(&self.data_url, query)
            .await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}
