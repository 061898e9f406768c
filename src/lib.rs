//! strategy-tvl - Trading Strategy TVL Adapter Library
//!
//! Resolves the Trading Strategy vaults deployed on a chain and delegates
//! token balance summation to the host aggregation framework.
//!
//! # Modules
//!
//! - `domain`: Strategy records, chain name table, default token lists
//! - `ports`: Trait abstractions (StrategySourcePort, TokenSummerPort)
//! - `adapters`: External implementations (Trading Strategy API, cache, CLI)
//! - `config`: Configuration loading and validation
//! - `application`: TVL adapter and per-chain exports

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod config;
pub mod application;
