//! Aggregate bar normalization: timestamp validation, epoch-to-calendar
//! conversion, and persistence of the bar sequence.

use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;
use polygon_api::types::{AggregateResult, BarTimestamp};
use thiserror::Error;

use crate::atomic_write::write_atomic;

/// Errors from [`normalize_aggregates`].
#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("Malformed timestamp for {ticker} at bar {index}: {value} ({reason})")]
    MalformedTimestamp {
        ticker: String,
        index: usize,
        value: String,
        reason: &'static str,
    },
    #[error("Malformed response for {ticker}: resultsCount is {reported} but {received} bars were returned")]
    CountMismatch {
        ticker: String,
        reported: i64,
        received: usize,
    },
    #[error("Failed to serialize bars: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Failed to write bars to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// How to post-process an aggregates response.
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Rewrite epoch milliseconds as RFC 3339 strings.
    pub convert_timestamps: bool,
    /// Zone the calendar strings are rendered in.
    pub timezone: Tz,
    /// Write the bar sequence (without the envelope) to this file.
    pub save_as: Option<PathBuf>,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            convert_timestamps: true,
            timezone: Tz::UTC,
            save_as: None,
        }
    }
}

/// Outcome of a successful normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    /// The provider returned no bars. The result is passed back untouched.
    NoData(AggregateResult),
    /// The (possibly converted) result.
    Bars(AggregateResult),
}

/// Validates every bar timestamp, optionally converts them, and optionally
/// persists the bars.
///
/// Nothing is written unless every timestamp is valid. Bars are never
/// reordered, dropped or duplicated.
pub fn normalize_aggregates(
    mut result: AggregateResult,
    options: &NormalizeOptions,
) -> Result<Normalized, NormalizeError> {
    let ticker = result.ticker.clone().unwrap_or_default();
    if usize::try_from(result.results_count).ok() != Some(result.results.len()) {
        return Err(NormalizeError::CountMismatch {
            ticker,
            reported: result.results_count,
            received: result.results.len(),
        });
    }

    if result.is_empty() {
        return Ok(Normalized::NoData(result));
    }

    let instants = result
        .results
        .iter()
        .enumerate()
        .map(|(index, bar)| {
            parse_bar_timestamp(&bar.timestamp).map_err(|reason| {
                NormalizeError::MalformedTimestamp {
                    ticker: ticker.clone(),
                    index,
                    value: bar.timestamp.to_string(),
                    reason,
                }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if options.convert_timestamps {
        for (bar, instant) in result.results.iter_mut().zip(instants) {
            bar.timestamp = BarTimestamp::Calendar(format_instant(instant, options.timezone));
        }
    }

    if let Some(path) = &options.save_as {
        save_bars(&result, path)?;
    }

    Ok(Normalized::Bars(result))
}

/// Writes only the bar sequence of `result` as pretty JSON, replacing any
/// existing file.
pub fn save_bars(result: &AggregateResult, path: &Path) -> Result<(), NormalizeError> {
    let json = serde_json::to_vec_pretty(&result.results)?;
    write_atomic(path, &json).map_err(|source| NormalizeError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("Saved {} bars to {}", result.results.len(), path.display());
    Ok(())
}

/// Renders epoch milliseconds as an RFC 3339 string in `tz` with millisecond
/// precision. Returns `None` for negative or unrepresentable values.
pub fn epoch_millis_to_rfc3339(millis: i64, tz: Tz) -> Option<String> {
    epoch_millis_to_instant(millis)
        .ok()
        .map(|instant| format_instant(instant, tz))
}

/// Parses an RFC 3339 string back into epoch milliseconds.
pub fn rfc3339_to_epoch_millis(value: &str) -> Result<i64, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value).map(|dt| dt.timestamp_millis())
}

fn format_instant(instant: DateTime<Utc>, tz: Tz) -> String {
    instant
        .with_timezone(&tz)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn epoch_millis_to_instant(millis: i64) -> Result<DateTime<Utc>, &'static str> {
    if millis < 0 {
        return Err("negative epoch value");
    }
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or("epoch value out of range")
}

fn parse_bar_timestamp(timestamp: &BarTimestamp) -> Result<DateTime<Utc>, &'static str> {
    match timestamp {
        BarTimestamp::Epoch(millis) => epoch_millis_to_instant(*millis),
        BarTimestamp::Calendar(value) => DateTime::parse_from_rfc3339(value)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| "not an epoch or RFC 3339 value"),
        BarTimestamp::Other(_) => Err("not an epoch or RFC 3339 value"),
    }
}
