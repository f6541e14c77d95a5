use std::fmt::Write as _;
use std::str::FromStr;

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use trademin_lib::types::{AggregateBar, MarketStatus};
use trademin_lib::DividendSummary;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => anyhow::bail!(
                "unknown output format '{}'. Valid values: table, json, csv, markdown",
                other
            ),
        }
    }
}

#[derive(Tabled, Serialize)]
struct StatusRow {
    #[tabled(rename = "Market")]
    #[serde(rename = "Market")]
    market: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
}

#[derive(Tabled, Serialize)]
struct DividendRow {
    #[tabled(rename = "Ticker")]
    #[serde(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Total")]
    #[serde(rename = "Total")]
    total: usize,
    #[tabled(rename = "Last Amount")]
    #[serde(rename = "Last Amount")]
    last_amount: String,
    #[tabled(rename = "Last Ex-Date")]
    #[serde(rename = "Last Ex-Date")]
    last_ex_date: String,
    #[tabled(rename = "Next Ex-Date")]
    #[serde(rename = "Next Ex-Date")]
    next_ex_date: String,
    #[tabled(rename = "Estimate")]
    #[serde(rename = "Estimate")]
    estimate: String,
}

#[derive(Tabled, Serialize)]
struct BarRow {
    #[tabled(rename = "Time")]
    #[serde(rename = "Time")]
    time: String,
    #[tabled(rename = "Open")]
    #[serde(rename = "Open")]
    open: f64,
    #[tabled(rename = "High")]
    #[serde(rename = "High")]
    high: f64,
    #[tabled(rename = "Low")]
    #[serde(rename = "Low")]
    low: f64,
    #[tabled(rename = "Close")]
    #[serde(rename = "Close")]
    close: f64,
    #[tabled(rename = "Volume")]
    #[serde(rename = "Volume")]
    volume: String,
    #[tabled(rename = "VWAP")]
    #[serde(rename = "VWAP")]
    vwap: String,
}

// -- Row builders --

fn build_status_rows(status: &MarketStatus) -> Vec<StatusRow> {
    let mut rows = vec![StatusRow {
        market: "overall".to_string(),
        status: status.market.clone(),
    }];
    rows.extend(status.exchanges.iter().map(|(name, state)| StatusRow {
        market: name.clone(),
        status: state.clone(),
    }));
    rows.extend(status.currencies.iter().map(|(name, state)| StatusRow {
        market: name.clone(),
        status: state.clone(),
    }));
    rows
}

fn build_dividend_rows(summaries: &[DividendSummary]) -> Vec<DividendRow> {
    summaries
        .iter()
        .map(|s| DividendRow {
            ticker: s.ticker.clone(),
            total: s.count,
            last_amount: s
                .last
                .as_ref()
                .map(|e| format!("${}", e.amount))
                .unwrap_or_default(),
            last_ex_date: s
                .last
                .as_ref()
                .map(|e| e.ex_date.to_string())
                .unwrap_or_default(),
            next_ex_date: s
                .next
                .as_ref()
                .map(|n| n.ex_date.to_string())
                .unwrap_or_default(),
            estimate: match &s.next {
                Some(n) if n.guess => "yes".to_string(),
                Some(_) => "no".to_string(),
                None => String::new(),
            },
        })
        .collect()
}

fn build_bar_rows(bars: &[AggregateBar]) -> Vec<BarRow> {
    bars.iter()
        .map(|b| BarRow {
            time: b.timestamp.to_string(),
            open: b.open,
            high: b.high,
            low: b.low,
            close: b.close,
            volume: format_volume(b.volume),
            vwap: b.vwap.map(|v| format!("{:.4}", v)).unwrap_or_default(),
        })
        .collect()
}

// -- Table / markdown output --

fn render<T: Tabled>(rows: Vec<T>, format: &OutputFormat) -> String {
    let mut table = Table::new(rows);
    if *format == OutputFormat::Markdown {
        table.with(Style::markdown());
    }
    table.to_string()
}

pub fn print_status_table(status: &MarketStatus, format: &OutputFormat) {
    println!("Server time: {}", status.server_time);
    println!("{}", render(build_status_rows(status), format));
}

pub fn print_dividends_table(summaries: &[DividendSummary], format: &OutputFormat) {
    println!("{}", render(build_dividend_rows(summaries), format));
}

// -- Plain text summary --

/// One block per ticker:
///
/// ```text
/// Summary: KO as of 2023-06-01
///   Total:  2
///   Last:   $0.46 on 2023-03-14
///   Next:   2023-06-26 (ESTIMATE)
/// ---
/// ```
fn format_dividend_summary(summary: &DividendSummary, as_of: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Summary: {} as of {}", summary.ticker, as_of);
    let _ = writeln!(out, "  Total:  {}", summary.count);
    if let Some(last) = &summary.last {
        let _ = writeln!(out, "  Last:   ${} on {}", last.amount, last.ex_date);
    }
    if let Some(next) = &summary.next {
        let estimate = if next.guess { " (ESTIMATE)" } else { "" };
        let _ = writeln!(out, "  Next:   {}{}", next.ex_date, estimate);
    }
    out.push_str("---");
    out
}

pub fn print_dividends_summary(summaries: &[DividendSummary], as_of: NaiveDate) {
    for summary in summaries {
        println!("{}", format_dividend_summary(summary, as_of));
    }
}

pub fn print_bars_table(bars: &[AggregateBar], format: &OutputFormat) {
    println!("{}", render(build_bar_rows(bars), format));
}

// -- CSV output --

fn write_csv<T: Serialize, W: std::io::Write>(rows: Vec<T>, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_status_csv(status: &MarketStatus) -> Result<()> {
    write_csv(build_status_rows(status), std::io::stdout())
}

pub fn print_dividends_csv(summaries: &[DividendSummary]) -> Result<()> {
    write_csv(build_dividend_rows(summaries), std::io::stdout())
}

pub fn print_bars_csv(bars: &[AggregateBar]) -> Result<()> {
    write_csv(build_bar_rows(bars), std::io::stdout())
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

fn format_volume(volume: f64) -> String {
    if volume >= 1_000_000.0 {
        format!("{:.2}M", volume / 1_000_000.0)
    } else if volume >= 1_000.0 {
        format!("{:.1}K", volume / 1_000.0)
    } else {
        format!("{}", volume)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trademin_lib::types::{BarTimestamp, DividendEvent};
    use trademin_lib::NextDividend;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_summaries() -> Vec<DividendSummary> {
        vec![
            DividendSummary {
                ticker: "MSFT".to_string(),
                count: 3,
                last: Some(DividendEvent {
                    ticker: Some("MSFT".to_string()),
                    ex_date: date(2023, 5, 17),
                    amount: 0.68,
                    declared_date: date(2023, 3, 14),
                    record_date: date(2023, 5, 18),
                    payment_date: Some(date(2023, 6, 8)),
                }),
                next: Some(NextDividend {
                    ex_date: date(2023, 8, 16),
                    guess: false,
                }),
            },
            DividendSummary {
                ticker: "TSLA".to_string(),
                count: 0,
                last: None,
                next: None,
            },
        ]
    }

    fn sample_bars() -> Vec<AggregateBar> {
        vec![AggregateBar {
            timestamp: BarTimestamp::Calendar("2023-01-09T05:00:00.000Z".to_string()),
            open: 130.465,
            high: 133.41,
            low: 129.89,
            close: 130.15,
            volume: 70_790_813.0,
            vwap: Some(131.6292),
            transactions: Some(645_365),
        }]
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_format_volume() {
        assert_eq!(format_volume(70_790_813.0), "70.79M");
        assert_eq!(format_volume(12_500.0), "12.5K");
        assert_eq!(format_volume(42.0), "42");
        assert_eq!(format_volume(0.5), "0.5");
    }

    #[test]
    fn test_build_dividend_rows_mapping() {
        let rows = build_dividend_rows(&sample_summaries());
        assert_eq!(rows.len(), 2);

        let msft = &rows[0];
        assert_eq!(msft.ticker, "MSFT");
        assert_eq!(msft.total, 3);
        assert_eq!(msft.last_amount, "$0.68");
        assert_eq!(msft.last_ex_date, "2023-05-17");
        assert_eq!(msft.next_ex_date, "2023-08-16");
        assert_eq!(msft.estimate, "no");

        let tsla = &rows[1];
        assert_eq!(tsla.total, 0);
        assert_eq!(tsla.last_amount, "");
        assert_eq!(tsla.next_ex_date, "");
        assert_eq!(tsla.estimate, "");
    }

    #[test]
    fn test_build_bar_rows_mapping() {
        let rows = build_bar_rows(&sample_bars());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].time, "2023-01-09T05:00:00.000Z");
        assert_eq!(rows[0].volume, "70.79M");
        assert_eq!(rows[0].vwap, "131.6292");
    }

    #[test]
    fn test_build_status_rows_order() {
        let status: MarketStatus = serde_json::from_value(serde_json::json!({
            "market": "closed",
            "serverTime": "2023-06-03T10:00:00-04:00",
            "exchanges": {"nyse": "closed", "nasdaq": "closed"},
            "currencies": {"fx": "closed", "crypto": "open"}
        }))
        .unwrap();
        let rows = build_status_rows(&status);
        let names: Vec<&str> = rows.iter().map(|r| r.market.as_str()).collect();
        assert_eq!(names, vec!["overall", "nasdaq", "nyse", "crypto", "fx"]);
        assert_eq!(rows[4].status, "closed");
    }

    #[test]
    fn test_dividend_summary_announced_next() {
        let out = format_dividend_summary(&sample_summaries()[0], date(2023, 6, 1));
        assert_eq!(
            out,
            "Summary: MSFT as of 2023-06-01\n\
             \x20 Total:  3\n\
             \x20 Last:   $0.68 on 2023-05-17\n\
             \x20 Next:   2023-08-16\n\
             ---"
        );
    }

    #[test]
    fn test_dividend_summary_estimated_next() {
        let mut summary = sample_summaries().remove(0);
        summary.next = Some(NextDividend {
            ex_date: date(2023, 8, 16),
            guess: true,
        });
        let out = format_dividend_summary(&summary, date(2023, 6, 1));
        assert!(out.contains("  Next:   2023-08-16 (ESTIMATE)\n"));
    }

    #[test]
    fn test_dividend_summary_without_events() {
        let out = format_dividend_summary(&sample_summaries()[1], date(2023, 6, 1));
        assert_eq!(out, "Summary: TSLA as of 2023-06-01\n  Total:  0\n---");
    }

    #[test]
    fn test_markdown_render() {
        let out = render(build_dividend_rows(&sample_summaries()), &OutputFormat::Markdown);
        assert!(out.starts_with("| Ticker"));
        assert!(out.contains("| MSFT"));
    }

    #[test]
    fn test_csv_headers() {
        let mut buf = Vec::new();
        write_csv(build_bar_rows(&sample_bars()), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Time,Open,High,Low,Close,Volume,VWAP"
        );
        assert!(lines.next().unwrap().starts_with("2023-01-09T05:00:00.000Z,130.465"));
    }
}
