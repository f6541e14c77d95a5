//! Thin wrapper around the API client that maps errors into [`TraderError`],
//! performs the per-ticker fan-out used by the dividends command, and ties
//! key loading and bar normalization to the client.

use std::path::Path;

use polygon_api::types::{AggregateResult, DividendEvent, MarketStatus};
use polygon_api::{AggregatesQuery, Client, DividendsQuery};

use crate::aggregates::{normalize_aggregates, NormalizeOptions, Normalized};
use crate::error::TraderError;
use crate::keystore::load_api_key;

/// API client bound to one API key.
///
/// Requests run one after another. There is no caching, retrying, or paging:
/// every call is a single request/response round trip.
pub struct MarketClient {
    inner: Client,
}

impl MarketClient {
    /// Creates a client for the production API.
    pub fn new(api_key: &str) -> Self {
        Self {
            inner: Client::new(api_key),
        }
    }

    /// Creates a client with a custom base URL. Used for testing.
    pub fn with_base_url(base_url: &str, api_key: &str) -> Self {
        Self {
            inner: Client::with_base_url(base_url, api_key),
        }
    }

    /// Builds a client from the key stored at `config`.
    ///
    /// Returns `Ok(None)` when no key is stored there.
    pub fn from_key_file(config: &Path, base_url: &str) -> Result<Option<Self>, TraderError> {
        Ok(load_api_key(config)?.map(|api_key| Self::with_base_url(base_url, &api_key)))
    }

    pub async fn market_status(&self) -> Result<MarketStatus, TraderError> {
        Ok(self.inner.get_market_status().await?)
    }

    /// Fetches dividend events for each ticker, keeping the given order.
    ///
    /// Fails on the first ticker whose request fails.
    pub async fn dividends(
        &self,
        tickers: &[String],
    ) -> Result<Vec<(String, Vec<DividendEvent>)>, TraderError> {
        let mut out = Vec::with_capacity(tickers.len());
        for ticker in tickers {
            let resp = self.inner.get_dividends(&DividendsQuery::new(ticker)).await?;
            tracing::debug!("{} dividend events for {}", resp.results.len(), ticker);
            out.push((ticker.clone(), resp.results));
        }
        Ok(out)
    }

    pub async fn aggregates(&self, query: &AggregatesQuery) -> Result<AggregateResult, TraderError> {
        let mut result = self.inner.get_aggregates(query).await?;
        if result.ticker.is_none() {
            result.ticker = Some(query.ticker.clone());
        }
        tracing::debug!(
            "{} bars for {} ({} to {})",
            result.results_count,
            query.ticker,
            query.from,
            query.to
        );
        Ok(result)
    }

    /// Fetches bars and runs them through [`normalize_aggregates`].
    pub async fn normalized_aggregates(
        &self,
        query: &AggregatesQuery,
        options: &NormalizeOptions,
    ) -> Result<Normalized, TraderError> {
        let result = self.aggregates(query).await?;
        Ok(normalize_aggregates(result, options)?)
    }
}
