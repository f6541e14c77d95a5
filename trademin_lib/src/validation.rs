use chrono::{Duration, NaiveDate};
use chrono_tz::Tz;

use crate::error::TraderError;

pub const MAX_TICKER_LENGTH: usize = 12;
pub const MAX_LIMIT: u32 = 50_000;

/// Validate a ticker symbol: trim, uppercase, and check length and charset.
///
/// Accepts letters, digits and `.`, `:` and `-`, which covers share classes
/// (`BRK.B`) and prefixed crypto/forex pairs (`X:BTCUSD`).
pub fn validate_ticker(input: &str) -> Result<String, TraderError> {
    let ticker = input.trim().to_uppercase();
    if ticker.is_empty() {
        return Err(TraderError::InvalidInput("ticker is empty".to_string()));
    }
    if ticker.len() > MAX_TICKER_LENGTH {
        return Err(TraderError::InvalidInput(format!(
            "ticker '{}' exceeds maximum length of {} characters",
            input, MAX_TICKER_LENGTH
        )));
    }
    if let Some(bad) = ticker
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | ':' | '-')))
    {
        return Err(TraderError::InvalidInput(format!(
            "ticker '{}' contains invalid character '{}'",
            input, bad
        )));
    }
    Ok(ticker)
}

/// Validate a list of tickers, dropping duplicates while keeping first-seen order.
pub fn validate_tickers(inputs: &[String]) -> Result<Vec<String>, TraderError> {
    let mut tickers: Vec<String> = Vec::with_capacity(inputs.len());
    for input in inputs {
        let ticker = validate_ticker(input)?;
        if !tickers.contains(&ticker) {
            tickers.push(ticker);
        }
    }
    if tickers.is_empty() {
        return Err(TraderError::InvalidInput(
            "at least one ticker is required".to_string(),
        ));
    }
    Ok(tickers)
}

/// Parse a date argument: `today`, `yesterday`, or `YYYY-MM-DD`.
///
/// Relative keywords resolve against `today`, which the caller supplies.
pub fn parse_date_arg(input: &str, today: NaiveDate) -> Result<NaiveDate, TraderError> {
    match input.trim().to_lowercase().as_str() {
        "today" => Ok(today),
        "yesterday" => Ok(today - Duration::days(1)),
        other => NaiveDate::parse_from_str(other, "%Y-%m-%d").map_err(|_| {
            TraderError::InvalidInput(format!(
                "invalid date '{}'. Use YYYY-MM-DD, today or yesterday",
                input
            ))
        }),
    }
}

/// Validate that `from` does not come after `to`.
pub fn validate_date_range(from: NaiveDate, to: NaiveDate) -> Result<(), TraderError> {
    if from > to {
        return Err(TraderError::InvalidInput(format!(
            "--from ({}) must not be after --to ({})",
            from, to
        )));
    }
    Ok(())
}

/// Validate the bar multiplier (must be >= 1).
pub fn validate_multiplier(multiplier: u32) -> Result<u32, TraderError> {
    if multiplier < 1 {
        return Err(TraderError::InvalidInput(
            "multiplier must be >= 1".to_string(),
        ));
    }
    Ok(multiplier)
}

/// Validate the result limit (must be 1..=50000).
pub fn validate_limit(limit: u32) -> Result<u32, TraderError> {
    if !(1..=MAX_LIMIT).contains(&limit) {
        return Err(TraderError::InvalidInput(format!(
            "limit must be between 1 and {}",
            MAX_LIMIT
        )));
    }
    Ok(limit)
}

/// Parse an IANA timezone name such as `UTC` or `America/New_York`.
pub fn parse_timezone(input: &str) -> Result<Tz, TraderError> {
    input.trim().parse::<Tz>().map_err(|_| {
        TraderError::InvalidInput(format!(
            "unknown timezone '{}'. Use an IANA name such as UTC or America/New_York",
            input
        ))
    })
}
