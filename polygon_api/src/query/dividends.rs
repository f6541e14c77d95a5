use url::Url;

use super::Query;

/// Dividend history for a single ticker.
#[derive(Clone, Debug)]
pub struct DividendsQuery {
    pub ticker: String,
}

impl DividendsQuery {
    pub fn new(ticker: &str) -> Self {
        Self {
            ticker: ticker.to_string(),
        }
    }
}

impl Query for DividendsQuery {
    fn path(&self) -> String {
        format!("/v2/reference/dividends/{}", self.ticker)
    }

    fn add_to_url(&self, url: &Url) -> Url {
        url.clone()
    }
}
