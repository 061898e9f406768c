//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits:
//! - Trading Strategy: vault list API client and its cache
//! - Dry run: stand-in token summer for running outside the host
//! - CLI: Command-line interface definitions

pub mod tradingstrategy;
pub mod dry_run;
pub mod cli;

pub use tradingstrategy::{ReplyCache, TradingStrategyClient, TradingStrategyConfig};
pub use dry_run::DryRunSummer;
pub use cli::CliApp;
