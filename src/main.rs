//! strategy-tvl - Trading Strategy TVL adapter
//!
//! Operator binary for inspecting the vaults and summation requests the
//! adapter hands to the host aggregation framework.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

use strategy_tvl::adapters::cli::{CliApp, Command, RequestCmd, VaultsCmd};
use strategy_tvl::adapters::{ReplyCache, TradingStrategyClient};
use strategy_tvl::application::{dry_run_exports, VaultResolver};
use strategy_tvl::config::{load_config, Config};
use strategy_tvl::domain::Chain;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (TVL_API_URL may live there)
    dotenvy::dotenv().ok();

    let app = CliApp::parse();

    let config = match &app.config {
        Some(path) => {
            let path = shellexpand::tilde(&path.to_string_lossy()).to_string();
            load_config(&path).with_context(|| format!("Failed to load configuration from {}", path))?
        }
        None => Config::default(),
    };

    init_logging(app.verbose, app.debug, &config.logging.level)?;

    match app.command {
        Command::Vaults(cmd) => vaults_command(cmd, &config).await,
        Command::Request(cmd) => request_command(cmd, &config).await,
        Command::Chains => chains_command(&config),
    }
}

fn init_logging(verbose: bool, debug: bool, configured: &str) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_new(configured)
            .with_context(|| format!("Invalid log level '{}'", configured))?
    };

    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    Ok(())
}

fn build_cache(config: &Config) -> Result<Arc<ReplyCache>> {
    let client = TradingStrategyClient::with_config(config.trading_strategy())
        .context("Failed to create Trading Strategy client")?;
    Ok(Arc::new(ReplyCache::new(Arc::new(client))))
}

async fn vaults_command(cmd: VaultsCmd, config: &Config) -> Result<()> {
    let resolver = VaultResolver::new(build_cache(config)?, config.default_tokens());
    let vaults = resolver
        .vault_addresses(cmd.chain.id)
        .await
        .context("Failed to fetch strategy vaults")?;
    tracing::info!(chain = %cmd.chain, vaults = vaults.len(), "Resolved vaults");

    for address in vaults {
        println!("{}", address);
    }
    Ok(())
}

async fn request_command(cmd: RequestCmd, config: &Config) -> Result<()> {
    let chain_ids = match cmd.chain {
        Some(chain) => vec![chain.id],
        None => config.adapter.chains.clone(),
    };

    let requests = dry_run_exports(build_cache(config)?, config.default_tokens(), &chain_ids, cmd.block)
        .await
        .context("Failed to run chain exports")?;

    for request in &requests {
        let json = if cmd.pretty {
            serde_json::to_string_pretty(request)?
        } else {
            serde_json::to_string(request)?
        };
        println!("{}", json);
    }
    Ok(())
}

fn chains_command(config: &Config) -> Result<()> {
    let tokens = config.default_tokens();

    for chain in Chain::all() {
        let exported = if config.adapter.chains.contains(&chain.id) { "exported" } else { "" };
        let token_count = tokens.for_chain(chain.name).map(|t| t.len());
        match token_count {
            Some(count) => println!("{:>6}  {:<10} {:>3} tokens  {}", chain.id, chain.name, count, exported),
            None => println!("{:>6}  {:<10}  no tokens  {}", chain.id, chain.name, exported),
        }
    }
    Ok(())
}
