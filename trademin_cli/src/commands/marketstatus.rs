use anyhow::Result;
use trademin_lib::MarketClient;

use crate::output::{print_json, print_status_csv, print_status_table, OutputFormat};

pub async fn run(client: &MarketClient, format: &OutputFormat) -> Result<()> {
    let status = client.market_status().await?;

    match format {
        OutputFormat::Table | OutputFormat::Markdown => print_status_table(&status, format),
        OutputFormat::Json => print_json(&status),
        OutputFormat::Csv => print_status_csv(&status)?,
    }

    Ok(())
}
