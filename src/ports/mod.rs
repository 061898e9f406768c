//! Ports Layer - Trait definitions for external dependencies
//!
//! This module defines the interfaces (ports) that adapters must implement:
//! - Strategy vault list source (Trading Strategy API)
//! - Token balance summation (owned by the host framework)

pub mod strategy_source;
pub mod token_summer;
#[cfg(any(test, feature = "test-util"))]
pub mod mocks;

pub use strategy_source::{FetchError, StrategySourcePort};
pub use token_summer::{
    Balances, ChainApi, ChainBlocks, SumTokensError, SumTokensRequest, TokenSummerPort,
};
