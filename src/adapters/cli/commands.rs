//! CLI Command Definitions
//!
//! Argument parsing for the strategy-tvl operator binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::Chain;

/// strategy-tvl - Trading Strategy TVL adapter
#[derive(Parser, Debug)]
#[command(
    name = "strategy-tvl",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "Trading Strategy TVL adapter",
    long_about = "Resolves Trading Strategy vault addresses per chain and shows the token \
                  summation request handed to the host aggregation framework."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (built-in defaults when omitted)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List strategy vault addresses on a chain
    Vaults(VaultsCmd),

    /// Run the chain exports against a dry-run summer and print each
    /// token summation request as JSON
    Request(RequestCmd),

    /// List known chains
    Chains,
}

/// List vault addresses
#[derive(Parser, Debug)]
pub struct VaultsCmd {
    /// Chain name or numeric chain id (e.g. polygon or 137)
    #[arg(long, value_name = "CHAIN", default_value = "polygon")]
    pub chain: Chain,
}

/// Show summation requests
#[derive(Parser, Debug)]
pub struct RequestCmd {
    /// Chain name or numeric chain id; all configured `[adapter] chains` when omitted
    #[arg(long, value_name = "CHAIN")]
    pub chain: Option<Chain>,

    /// Block to read balances at (latest when omitted)
    #[arg(long, value_name = "BLOCK")]
    pub block: Option<u64>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}
