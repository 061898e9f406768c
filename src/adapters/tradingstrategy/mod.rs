//! Trading Strategy Adapter
//!
//! Implementation of the StrategySourcePort for the Trading Strategy API,
//! plus the process-lifetime cache the TVL adapter reads through.

mod client;
mod cache;

pub use client::{parse_reply, TradingStrategyClient, TradingStrategyConfig, DEFAULT_TVL_URL};
pub use cache::ReplyCache;
