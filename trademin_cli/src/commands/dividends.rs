//! The `dividends` subcommand: last and next ex-dividend dates per ticker.

use anyhow::Result;
use chrono::Local;
use clap::Args;
use trademin_lib::validation;
use trademin_lib::{summarize_dividends, MarketClient};

use crate::output::{
    print_dividends_csv, print_dividends_summary, print_dividends_table, print_json, OutputFormat,
};

#[derive(Args)]
pub struct DividendsArgs {
    /// One or more ticker symbols (e.g. MSFT KO JNJ)
    #[arg(required = true, num_args = 1..)]
    pub tickers: Vec<String>,

    /// Reference date for past/next split: YYYY-MM-DD, today or yesterday
    #[arg(long, default_value = "today")]
    pub as_of: String,
}

pub async fn run(args: &DividendsArgs, client: &MarketClient, format: &OutputFormat) -> Result<()> {
    let tickers = validation::validate_tickers(&args.tickers)?;
    let today = validation::parse_date_arg(&args.as_of, Local::now().date_naive())?;

    let dividends = client.dividends(&tickers).await?;
    let summaries = summarize_dividends(&dividends, today);

    if *format != OutputFormat::Table {
        eprintln!("Dividend summary as of {}", today);
    }

    match format {
        OutputFormat::Table => print_dividends_summary(&summaries, today),
        OutputFormat::Markdown => print_dividends_table(&summaries, format),
        OutputFormat::Json => print_json(&summaries),
        OutputFormat::Csv => print_dividends_csv(&summaries)?,
    }

    Ok(())
}
