mod commands;
mod output;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use trademin_lib::polygon_api::DEFAULT_BASE_URL;
use trademin_lib::{default_config_path, MarketClient};

use crate::output::OutputFormat;

/// Environment variable consulted when the config file holds no key.
const API_KEY_ENV: &str = "POLYGON_API_KEY";

#[derive(Parser)]
#[command(name = "trademin-poly")]
#[command(about = "Query market status, dividends and aggregate bars from Polygon.io")]
struct Cli {
    /// Path to the API key file [default: ~/.trademin/polygon_api_key]
    #[arg(long, env = "TRADEMIN_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Output format: table, json, csv or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show whether markets are open or closed
    Marketstatus,
    /// Store or display the API key
    Configure(commands::configure::ConfigureArgs),
    /// Summarize last and next dividends for tickers
    Dividends(commands::dividends::DividendsArgs),
    /// Fetch candle bars for a ticker
    Aggregates(commands::aggregates::AggregatesArgs),
}

/// Builds a client from the stored key, or the environment as a fallback.
///
/// Returns `None` after telling the user how to configure a key.
fn authenticated_client(config: &Path) -> Result<Option<MarketClient>> {
    let base_url =
        std::env::var("POLYGON_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    if let Some(client) = MarketClient::from_key_file(config, &base_url)? {
        return Ok(Some(client));
    }

    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => {
            Ok(Some(MarketClient::with_base_url(&base_url, key.trim())))
        }
        _ => {
            eprintln!(
                "API key not found in {}. Run `trademin-poly configure --api-key <KEY>` or set {}.",
                config.display(),
                API_KEY_ENV
            );
            Ok(None)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("trademin=info".parse().unwrap()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format: OutputFormat = cli.output.parse()?;
    let config = cli.config.clone().unwrap_or_else(default_config_path);

    match &cli.command {
        Commands::Configure(args) => commands::configure::run(args, &config)?,
        Commands::Marketstatus => {
            if let Some(client) = authenticated_client(&config)? {
                commands::marketstatus::run(&client, &format).await?
            }
        }
        Commands::Dividends(args) => {
            if let Some(client) = authenticated_client(&config)? {
                commands::dividends::run(args, &client, &format).await?
            }
        }
        Commands::Aggregates(args) => {
            if let Some(client) = authenticated_client(&config)? {
                commands::aggregates::run(args, &client, &format).await?
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aggregates_defaults() {
        let cli = Cli::try_parse_from(["trademin-poly", "aggregates", "aapl"]).unwrap();
        let Commands::Aggregates(args) = cli.command else {
            panic!("expected aggregates");
        };
        assert_eq!(args.ticker, "aapl");
        assert_eq!(args.from, "yesterday");
        assert_eq!(args.to, "yesterday");
        assert_eq!(args.multiplier, 1);
        assert_eq!(args.timespan, "minute");
        assert_eq!(args.limit, 5000);
        assert_eq!(args.sort, "asc");
        assert!(!args.keep_epochs);
        assert!(args.save_as.is_none());
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "trademin-poly",
            "dividends",
            "MSFT",
            "KO",
            "--output",
            "json",
            "--config",
            "/tmp/key",
        ])
        .unwrap();
        assert_eq!(cli.output, "json");
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/key")));
        let Commands::Dividends(args) = cli.command else {
            panic!("expected dividends");
        };
        assert_eq!(args.tickers, vec!["MSFT", "KO"]);
    }

    #[test]
    fn dividends_requires_a_ticker() {
        assert!(Cli::try_parse_from(["trademin-poly", "dividends"]).is_err());
    }

    #[test]
    fn parses_configure_flags() {
        let cli = Cli::try_parse_from([
            "trademin-poly",
            "configure",
            "--api-key",
            "abc",
            "--overwrite",
        ])
        .unwrap();
        let Commands::Configure(args) = cli.command else {
            panic!("expected configure");
        };
        assert_eq!(args.api_key.as_deref(), Some("abc"));
        assert!(args.overwrite);
        assert!(!args.show);
    }

    #[test]
    fn stored_key_yields_client() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = dir.path().join("key");
        std::fs::write(&config, "stored-key").unwrap();
        assert!(authenticated_client(&config).unwrap().is_some());
    }

    #[test]
    fn missing_key_yields_no_client() {
        std::env::remove_var(API_KEY_ENV);
        let dir = tempfile::TempDir::new().unwrap();
        let config = dir.path().join("absent");
        assert!(authenticated_client(&config).unwrap().is_none());

        std::fs::write(&config, "  \n").unwrap();
        assert!(authenticated_client(&config).unwrap().is_none());
    }

    #[test]
    fn unreadable_key_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(authenticated_client(dir.path()).is_err());
    }
}
