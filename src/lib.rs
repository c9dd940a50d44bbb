pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::{CurrencyPair, FeeTier, RateAndFeeResolver};
use crate::providers::fee_api::{HttpFeeListingProvider, HttpRateProvider};
use anyhow::Result;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Convert {
        amount: String,
        from: Option<String>,
        to: Option<String>,
        swap: bool,
    },
    Fees {
        tier: Option<FeeTier>,
    },
    Rates,
    Interactive,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Fee calculator starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let timeout = Duration::from_secs(config.timeout_secs);
    let listing_provider = HttpFeeListingProvider::new(&config.providers.fees, timeout);
    let rate_provider = HttpRateProvider::new(&config.providers.rates, timeout);
    let resolver = RateAndFeeResolver::new(
        &listing_provider,
        &rate_provider,
        &config.rate_pair.from,
        &config.rate_pair.to,
        config.fee_rate,
    );

    let resolution = cli::resolve_with_progress(&resolver).await;
    let default_pair = CurrencyPair::new(&config.send_currency, &config.receive_currency);

    match command {
        AppCommand::Convert {
            amount,
            from,
            to,
            swap,
        } => {
            let pair = CurrencyPair::new(
                from.as_deref().unwrap_or(&default_pair.send),
                to.as_deref().unwrap_or(&default_pair.receive),
            );
            cli::convert::run(&resolution, &amount, pair, swap)
        }
        AppCommand::Fees { tier } => cli::fees::run(&resolution, tier),
        AppCommand::Rates => cli::rates::run(&resolution.snapshot),
        AppCommand::Interactive => cli::interactive::run(&resolution, default_pair),
    }
}
