//! Dividend records from the `/v2/reference/dividends/{ticker}` endpoint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single dividend event as reported by the provider.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DividendEvent {
    /// Ticker echoed back by the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,

    /// Ex-dividend date.
    pub ex_date: NaiveDate,

    /// Cash amount per share.
    pub amount: f64,

    pub declared_date: NaiveDate,

    pub record_date: NaiveDate,

    /// Payment date. Not always announced together with the other dates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
}

/// Envelope of a dividends request.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DividendsResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub results: Vec<DividendEvent>,
}
