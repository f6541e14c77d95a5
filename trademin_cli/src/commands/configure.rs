//! The `configure` subcommand: store or display the API key.

use std::path::Path;

use anyhow::Result;
use clap::Args;
use trademin_lib::{load_api_key, mask_api_key, save_api_key, SaveOutcome};

#[derive(Args)]
pub struct ConfigureArgs {
    /// API key to store in the config file
    #[arg(long)]
    pub api_key: Option<String>,

    /// Replace a key that is already stored
    #[arg(long)]
    pub overwrite: bool,

    /// Print the stored key in full instead of masked
    #[arg(long)]
    pub show: bool,
}

pub fn run(args: &ConfigureArgs, config: &Path) -> Result<()> {
    match &args.api_key {
        Some(api_key) => match save_api_key(api_key, config, args.overwrite)? {
            SaveOutcome::Written { replaced: true } => {
                println!("API key replaced in {}", config.display())
            }
            SaveOutcome::Written { replaced: false } => {
                println!("API key saved to {}", config.display())
            }
            SaveOutcome::Rejected => println!(
                "An API key is already stored in {}. Pass --overwrite to replace it.",
                config.display()
            ),
        },
        None => match load_api_key(config)? {
            Some(api_key) => {
                let shown = if args.show {
                    api_key
                } else {
                    mask_api_key(&api_key)
                };
                println!("API key found in {}:\n\t{}", config.display(), shown);
            }
            None => println!("API key not found in {}", config.display()),
        },
    }
    Ok(())
}
