//! Aggregate ("candle") bars from the `/v2/aggs/ticker/...` endpoint.

use serde::{Deserialize, Serialize};

/// Bar timestamp. The provider sends epoch milliseconds; after conversion the
/// value is an RFC 3339 string.
///
/// Any other JSON value (null, a float, a bool) lands in `Other` so the
/// response still parses and the offending bar can be reported by index.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum BarTimestamp {
    Epoch(i64),
    Calendar(String),
    Other(serde_json::Value),
}

impl std::fmt::Display for BarTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BarTimestamp::Epoch(ms) => write!(f, "{}", ms),
            BarTimestamp::Calendar(s) => write!(f, "{}", s),
            BarTimestamp::Other(v) => write!(f, "{}", v),
        }
    }
}

/// One OHLCV bar. Field names follow the provider's single-letter keys so
/// that a persisted bar set reads the same as the raw response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AggregateBar {
    #[serde(rename = "t")]
    pub timestamp: BarTimestamp,
    #[serde(rename = "o")]
    pub open: f64,
    #[serde(rename = "h")]
    pub high: f64,
    #[serde(rename = "l")]
    pub low: f64,
    #[serde(rename = "c")]
    pub close: f64,
    /// Traded volume. Crypto and forex bars report fractional volume.
    #[serde(rename = "v")]
    pub volume: f64,
    /// Volume-weighted average price.
    #[serde(rename = "vw", default, skip_serializing_if = "Option::is_none")]
    pub vwap: Option<f64>,
    /// Number of trades in the bucket.
    #[serde(rename = "n", default, skip_serializing_if = "Option::is_none")]
    pub transactions: Option<u64>,
}

/// Response envelope for an aggregates request.
///
/// `results` is omitted by the provider when nothing matched, so it defaults
/// to empty.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_count: Option<i64>,
    pub results_count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjusted: Option<bool>,
    #[serde(default)]
    pub results: Vec<AggregateBar>,
    #[serde(rename = "request_id", default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl AggregateResult {
    /// True when the provider reported no bars for the request.
    pub fn is_empty(&self) -> bool {
        self.results_count == 0
    }
}
