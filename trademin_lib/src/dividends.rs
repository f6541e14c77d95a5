//! Per-ticker dividend summaries: the most recent ex-date and the next one,
//! announced or estimated.

use chrono::{Duration, NaiveDate};
use polygon_api::types::DividendEvent;
use serde::Serialize;

/// Cadence assumed when fewer than two past ex-dates are known. Roughly one
/// quarter, the common US payout schedule.
pub const DEFAULT_DIVIDEND_CADENCE_DAYS: i64 = 91;

/// The upcoming ex-dividend date for a ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextDividend {
    pub ex_date: NaiveDate,
    /// True when the date is projected from past events rather than announced.
    pub guess: bool,
}

/// Summary of one ticker's dividend history relative to a reference date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DividendSummary {
    pub ticker: String,
    pub count: usize,
    pub last: Option<DividendEvent>,
    pub next: Option<NextDividend>,
}

/// Summarizes every ticker in `dividends`, keeping input order.
///
/// `today` splits past from future: an event whose ex-date equals `today`
/// counts as past.
pub fn summarize_dividends(
    dividends: &[(String, Vec<DividendEvent>)],
    today: NaiveDate,
) -> Vec<DividendSummary> {
    dividends
        .iter()
        .map(|(ticker, events)| summarize_ticker(ticker, events, today))
        .collect()
}

/// Summarizes the events of a single ticker. Event order is not relied upon.
pub fn summarize_ticker(ticker: &str, events: &[DividendEvent], today: NaiveDate) -> DividendSummary {
    let (past, future): (Vec<&DividendEvent>, Vec<&DividendEvent>) =
        events.iter().partition(|e| e.ex_date <= today);

    // Ties on ex-date go to the latest declaration.
    let last = past
        .iter()
        .copied()
        .max_by(|a, b| (a.ex_date, a.declared_date).cmp(&(b.ex_date, b.declared_date)));

    let announced = future.iter().copied().min_by(|a, b| {
        a.ex_date
            .cmp(&b.ex_date)
            .then_with(|| b.declared_date.cmp(&a.declared_date))
    });

    let next = match (announced, last) {
        (Some(event), _) => Some(NextDividend {
            ex_date: event.ex_date,
            guess: false,
        }),
        // No guess when the projection falls past the last representable date.
        (None, Some(last)) => last
            .ex_date
            .checked_add_signed(estimate_cadence(&past))
            .map(|ex_date| NextDividend {
                ex_date,
                guess: true,
            }),
        (None, None) => None,
    };

    DividendSummary {
        ticker: ticker.to_string(),
        count: events.len(),
        last: last.cloned(),
        next,
    }
}

/// Interval between the two most recent distinct past ex-dates, or the
/// default cadence when there are fewer than two.
fn estimate_cadence(past: &[&DividendEvent]) -> Duration {
    let mut dates: Vec<NaiveDate> = past.iter().map(|e| e.ex_date).collect();
    dates.sort_unstable();
    dates.dedup();

    match dates.as_slice() {
        [.., previous, latest] => *latest - *previous,
        _ => Duration::days(DEFAULT_DIVIDEND_CADENCE_DAYS),
    }
}
