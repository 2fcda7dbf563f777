//! Across Swap API token-support probe.
//!
//! Queries the swap quote endpoint for each token in the static registry
//! across the three known providers (uniswap, 0x, lifi) and prints one
//! report line per token. Strictly sequential, one attempt per pair, no
//! retries. Exit code reflects configuration validity only, never probe
//! outcomes.

use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::Address;
use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use probe_api::{AcrossClient, Provider, DEFAULT_ENDPOINT};
use probe_core::{
    render, ProbeConfig, QuoteChecker, DEFAULT_AMOUNT, DEFAULT_FROM_CHAIN_ID, DEFAULT_TIMEOUT,
    DEFAULT_TO_CHAIN_ID, DEFAULT_WALLET, TOKENS,
};

#[derive(Debug, Parser)]
#[command(name = "across-probe", about = "Across Swap API token support probe")]
struct Cli {
    /// Swap quote endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Origin chain ID
    #[arg(long, default_value_t = DEFAULT_FROM_CHAIN_ID)]
    from_chain_id: u64,

    /// Destination chain ID
    #[arg(long, default_value_t = DEFAULT_TO_CHAIN_ID)]
    to_chain_id: u64,

    /// Input amount in wei-like units
    #[arg(long, default_value = DEFAULT_AMOUNT)]
    amount: String,

    /// Wallet address sent as depositor/recipient
    #[arg(long, default_value_t = DEFAULT_WALLET)]
    wallet: Address,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the report.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ProbeConfig::new(&cli.endpoint, cli.from_chain_id, cli.to_chain_id)?
        .with_amount(cli.amount)
        .with_wallet(cli.wallet)
        .with_timeout(Duration::from_secs(cli.timeout_secs));

    info!(
        endpoint = %config.endpoint,
        from_chain_id = config.from_chain_id,
        to_chain_id = config.to_chain_id,
        "Starting Across swap support probe"
    );

    let client = AcrossClient::new(config.endpoint.as_str(), config.timeout)?;
    let checker = QuoteChecker::new(Arc::new(client), config);

    let reports = checker.run_all(TOKENS, &Provider::ALL).await;
    println!("{}", render(&reports));

    Ok(())
}
