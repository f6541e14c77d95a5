use std::str::FromStr;

use chrono::NaiveDate;
use url::Url;

use super::{common::SortOrder, Query};

/// Bars over a date range for a single ticker.
///
/// The date range and multiplier are passed through to the provider as-is.
#[derive(Clone, Debug)]
pub struct AggregatesQuery {
    pub ticker: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    /// Size of each bucket in units of `timespan`. Defaults to 1.
    pub multiplier: u32,
    pub timespan: Timespan,
    /// Request split-adjusted values. Defaults to true.
    pub adjusted: bool,
    pub sort: SortOrder,
    /// Maximum number of base aggregates used to build the result. Defaults to 5000.
    pub limit: u32,
}

impl AggregatesQuery {
    pub fn new(ticker: &str, from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            ticker: ticker.to_string(),
            from,
            to,
            multiplier: 1,
            timespan: Timespan::default(),
            adjusted: true,
            sort: SortOrder::default(),
            limit: 5000,
        }
    }

    pub fn with_multiplier(mut self, multiplier: u32) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn with_timespan(mut self, timespan: Timespan) -> Self {
        self.timespan = timespan;
        self
    }

    pub fn with_adjusted(mut self, adjusted: bool) -> Self {
        self.adjusted = adjusted;
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

impl Query for AggregatesQuery {
    fn path(&self) -> String {
        format!(
            "/v2/aggs/ticker/{}/range/{}/{}/{}/{}",
            self.ticker,
            self.multiplier,
            self.timespan,
            self.from.format("%Y-%m-%d"),
            self.to.format("%Y-%m-%d"),
        )
    }

    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("adjusted", &self.adjusted.to_string())
            .append_pair("sort", &self.sort.to_string())
            .append_pair("limit", &self.limit.to_string());
        url
    }
}

/// Bucket unit for aggregate bars.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Timespan {
    #[default]
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl std::fmt::Display for Timespan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Timespan::Minute => "minute",
                Timespan::Hour => "hour",
                Timespan::Day => "day",
                Timespan::Week => "week",
                Timespan::Month => "month",
                Timespan::Quarter => "quarter",
                Timespan::Year => "year",
            }
        )?;
        Ok(())
    }
}

impl FromStr for Timespan {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minute" => Ok(Timespan::Minute),
            "hour" => Ok(Timespan::Hour),
            "day" => Ok(Timespan::Day),
            "week" => Ok(Timespan::Week),
            "month" => Ok(Timespan::Month),
            "quarter" => Ok(Timespan::Quarter),
            "year" => Ok(Timespan::Year),
            _ => Err(()),
        }
    }
}
