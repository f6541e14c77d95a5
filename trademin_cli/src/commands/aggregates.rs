//! The `aggregates` subcommand: OHLCV bars for one ticker, optionally saved
//! to a JSON file.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use chrono::Local;
use clap::Args;
use trademin_lib::validation;
use trademin_lib::{AggregatesQuery, MarketClient, NormalizeOptions, Normalized, SortOrder, Timespan};

use crate::output::{print_bars_csv, print_bars_table, print_json, OutputFormat};

#[derive(Args)]
pub struct AggregatesArgs {
    /// Ticker symbol (e.g. AAPL, X:BTCUSD)
    pub ticker: String,

    /// Start of the range: YYYY-MM-DD, today or yesterday
    #[arg(long, default_value = "yesterday")]
    pub from: String,

    /// End of the range: YYYY-MM-DD, today or yesterday
    #[arg(long, default_value = "yesterday")]
    pub to: String,

    /// Size of each bar in units of --timespan
    #[arg(long, default_value = "1")]
    pub multiplier: u32,

    /// Bar unit: minute, hour, day, week, month, quarter, year
    #[arg(long, default_value = "minute")]
    pub timespan: String,

    /// Request prices that are not adjusted for splits
    #[arg(long)]
    pub unadjusted: bool,

    /// Sort by timestamp: asc or desc
    #[arg(long, default_value = "asc")]
    pub sort: String,

    /// Maximum number of base aggregates (1-50000)
    #[arg(long, default_value = "5000")]
    pub limit: u32,

    /// Write the bars as JSON to this file (replaces an existing file)
    #[arg(long)]
    pub save_as: Option<PathBuf>,

    /// Keep timestamps as epoch milliseconds
    #[arg(long)]
    pub keep_epochs: bool,

    /// IANA timezone for converted timestamps
    #[arg(long, default_value = "UTC")]
    pub timezone: String,
}

fn build_query(args: &AggregatesArgs) -> Result<AggregatesQuery> {
    let ticker = validation::validate_ticker(&args.ticker)?;
    let today = Local::now().date_naive();
    let from = validation::parse_date_arg(&args.from, today)?;
    let to = validation::parse_date_arg(&args.to, today)?;
    validation::validate_date_range(from, to)?;

    let timespan = args.timespan.parse::<Timespan>().map_err(|_| {
        anyhow!(
            "unknown timespan '{}'. Valid values: minute, hour, day, week, month, quarter, year",
            args.timespan
        )
    })?;
    let sort = args
        .sort
        .parse::<SortOrder>()
        .map_err(|_| anyhow!("unknown sort order '{}'. Valid values: asc, desc", args.sort))?;

    Ok(AggregatesQuery::new(&ticker, from, to)
        .with_multiplier(validation::validate_multiplier(args.multiplier)?)
        .with_timespan(timespan)
        .with_adjusted(!args.unadjusted)
        .with_sort(sort)
        .with_limit(validation::validate_limit(args.limit)?))
}

pub async fn run(args: &AggregatesArgs, client: &MarketClient, format: &OutputFormat) -> Result<()> {
    let query = build_query(args)?;
    let options = NormalizeOptions {
        convert_timestamps: !args.keep_epochs,
        timezone: validation::parse_timezone(&args.timezone)?,
        save_as: args.save_as.clone(),
    };

    let result = match client.normalized_aggregates(&query, &options).await? {
        Normalized::NoData(_) => {
            println!("No results returned!");
            return Ok(());
        }
        Normalized::Bars(result) => result,
    };

    if let Some(path) = &options.save_as {
        eprintln!("Saved {} bars to {}", result.results.len(), path.display());
    }
    eprintln!(
        "{} {} bars for {} ({} to {})",
        result.results_count, query.timespan, query.ticker, query.from, query.to
    );

    match format {
        OutputFormat::Table | OutputFormat::Markdown => print_bars_table(&result.results, format),
        OutputFormat::Json => print_json(&result),
        OutputFormat::Csv => print_bars_csv(&result.results)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use trademin_lib::Query;

    fn args() -> AggregatesArgs {
        AggregatesArgs {
            ticker: "aapl".to_string(),
            from: "2023-01-09".to_string(),
            to: "2023-01-10".to_string(),
            multiplier: 1,
            timespan: "minute".to_string(),
            unadjusted: false,
            sort: "asc".to_string(),
            limit: 5000,
            save_as: None,
            keep_epochs: false,
            timezone: "UTC".to_string(),
        }
    }

    #[test]
    fn builds_query_from_args() {
        let mut a = args();
        a.timespan = "day".to_string();
        a.sort = "desc".to_string();
        a.unadjusted = true;
        let query = build_query(&a).unwrap();
        assert_eq!(query.ticker, "AAPL");
        assert_eq!(query.from, NaiveDate::from_ymd_opt(2023, 1, 9).unwrap());
        assert_eq!(query.sort, SortOrder::Desc);
        assert!(!query.adjusted);
        assert_eq!(query.path(), "/v2/aggs/ticker/AAPL/range/1/day/2023-01-09/2023-01-10");
    }

    #[test]
    fn rejects_bad_args() {
        let mut a = args();
        a.timespan = "fortnight".to_string();
        assert!(build_query(&a).is_err());

        let mut a = args();
        a.sort = "random".to_string();
        assert!(build_query(&a).is_err());

        let mut a = args();
        a.from = "2023-02-01".to_string();
        assert!(build_query(&a).is_err());

        let mut a = args();
        a.limit = 0;
        assert!(build_query(&a).is_err());
    }
}
