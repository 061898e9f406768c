//! Domain Layer - Core types for the Trading Strategy TVL adapter
//!
//! Pure data and lookup logic with no I/O.
//! All external interactions happen through the ports layer.

pub mod chain;
pub mod strategy;
pub mod default_tokens;

pub use chain::{chain_id_by_name, chain_name, Chain, ChainError, CHAIN_NAMES};
pub use strategy::{chain_strategy_vault_addresses, ChainIdField, ProtocolTvlReply, StrategyRecord};
pub use default_tokens::{DefaultTokens, NULL_ADDRESS};
