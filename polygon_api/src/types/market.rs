use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Current trading status returned by `/v1/marketstatus/now`.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MarketStatus {
    /// Overall market state, e.g. `open`, `closed`, `extended-hours`.
    pub market: String,

    /// Provider clock at the time of the request.
    pub server_time: String,

    #[serde(default)]
    pub early_hours: Option<bool>,

    #[serde(default)]
    pub after_hours: Option<bool>,

    /// Per-exchange state keyed by exchange code (`nyse`, `nasdaq`, `otc`).
    #[serde(default)]
    pub exchanges: BTreeMap<String, String>,

    /// Per-currency-market state (`fx`, `crypto`).
    #[serde(default)]
    pub currencies: BTreeMap<String, String>,
}
