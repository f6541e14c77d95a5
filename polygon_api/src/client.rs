//! HTTP client for the Polygon.io REST API.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    query::{AggregatesQuery, DividendsQuery, Query},
    types::{AggregateResult, DividendsResponse, MarketStatus},
    Error,
};

/// Production API host.
pub const DEFAULT_BASE_URL: &str = "https://api.polygon.io";

/// HTTP client for the Polygon.io REST API.
///
/// Authenticates every request with the `apiKey` query parameter. Each
/// request builds a fresh `reqwest::Client` with a 30-second timeout; one
/// invocation of the CLI makes at most a handful of requests.
pub struct Client {
    /// Base URL for the API. Defaults to [`DEFAULT_BASE_URL`].
    base_api_url: String,
    api_key: String,
}

impl Client {
    /// Creates a new client pointing at the production API.
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, api_key: &str) -> Self {
        Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn get_url(&self, path: &str, query: Option<&impl Query>) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })?;
        let mut url = match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        };
        url.query_pairs_mut().append_pair("apiKey", &self.api_key);
        Ok(url)
    }

    async fn get<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.get_url(path, query)?;
        tracing::debug!("GET {}", path);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        let resp = client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                // The reqwest error embeds the URL, which carries the API key.
                tracing::error!("Failed to get resource {}: {}", path, e.without_url());
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e.without_url());
            Error::RequestFailed
        })?;

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            tracing::error!("API key rejected with status {}", status);
            return Err(Error::Unauthorized {
                status: status.as_u16(),
            });
        }

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let parsed = serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::MalformedResponse(e.to_string())
        })?;

        Ok(parsed)
    }

    /// Fetches the current open/closed state of markets and exchanges.
    pub async fn get_market_status(&self) -> Result<MarketStatus, Error> {
        self.get::<MarketStatus, DividendsQuery>("/v1/marketstatus/now", None)
            .await
    }

    /// Fetches the full dividend history for one ticker.
    pub async fn get_dividends(&self, query: &DividendsQuery) -> Result<DividendsResponse, Error> {
        self.get::<DividendsResponse, DividendsQuery>(&query.path(), Some(query))
            .await
    }

    /// Fetches aggregate bars for one ticker over a date range.
    pub async fn get_aggregates(&self, query: &AggregatesQuery) -> Result<AggregateResult, Error> {
        self.get::<AggregateResult, AggregatesQuery>(&query.path(), Some(query))
            .await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_carries_api_key() {
        let client = Client::with_base_url("https://example.com/", "secret");
        let query = DividendsQuery::new("AAPL");
        let url = client.get_url(&query.path(), Some(&query)).unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/v2/reference/dividends/AAPL?apiKey=secret"
        );
    }

    #[test]
    fn truncate_long_body() {
        let body = "x".repeat(2500);
        let truncated = truncate_body(&body);
        assert!(truncated.ends_with("...[truncated]"));
        assert_eq!(truncated.len(), 2000 + "...[truncated]".len());
        assert_eq!(truncate_body("short"), "short");
    }
}
