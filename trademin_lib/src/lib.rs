//! Library layer for trademin: API key storage, dividend summaries, and
//! aggregate bar normalization on top of the `polygon_api` client.

pub mod aggregates;
pub mod atomic_write;
pub mod client;
pub mod dividends;
pub mod error;
pub mod keystore;
pub mod validation;

pub use polygon_api;
pub use polygon_api::types;
pub use polygon_api::{AggregatesQuery, DividendsQuery, Query, SortOrder, Timespan};

pub use aggregates::{
    epoch_millis_to_rfc3339, normalize_aggregates, rfc3339_to_epoch_millis, NormalizeError,
    NormalizeOptions, Normalized,
};
pub use client::MarketClient;
pub use dividends::{
    summarize_dividends, summarize_ticker, DividendSummary, NextDividend,
    DEFAULT_DIVIDEND_CADENCE_DAYS,
};
pub use error::TraderError;
pub use keystore::{
    default_config_path, load_api_key, mask_api_key, save_api_key, KeyStoreError, SaveOutcome,
    DEFAULT_CONFIG_FILE,
};
