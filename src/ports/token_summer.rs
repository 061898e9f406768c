//! Token Summation Port
//!
//! The host framework's balance summation primitive. Given a set of owner
//! addresses and token addresses it reads every owner's balance of every
//! token at the context block and returns the aggregated balances.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Block height per chain name, as handed over by the host
pub type ChainBlocks = HashMap<String, u64>;

/// Per-chain execution context supplied by the host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainApi {
    /// Canonical chain name
    pub chain: String,
    /// Block to read balances at, latest when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ChainApi {
    pub fn new(chain: impl Into<String>) -> Self {
        Self {
            chain: chain.into(),
            ..Default::default()
        }
    }

    pub fn at_block(mut self, block: u64) -> Self {
        self.block = Some(block);
        self
    }

    pub fn at_time(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Arguments for one summation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SumTokensRequest {
    pub api: ChainApi,
    /// Addresses whose balances are summed
    pub owners: Vec<String>,
    /// Tokens to sum; `None` when no list is known for the chain
    pub tokens: Option<Vec<String>>,
}

/// Aggregated balances, token key to raw integer amount
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Balances(pub BTreeMap<String, String>);

impl Balances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, token: impl Into<String>, amount: impl Into<String>) {
        self.0.insert(token.into(), amount.into());
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.0.get(token).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("token summation failed: {0}")]
pub struct SumTokensError(pub String);

/// Host balance summation primitive
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenSummerPort: Send + Sync {
    async fn sum_tokens(&self, request: SumTokensRequest) -> Result<Balances, SumTokensError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_api_builder() {
        let api = ChainApi::new("polygon").at_block(50_000_000);
        assert_eq!(api.chain, "polygon");
        assert_eq!(api.block, Some(50_000_000));
        assert!(api.timestamp.is_none());
    }

    #[test]
    fn test_request_serializes_missing_tokens_as_null() {
        let request = SumTokensRequest {
            api: ChainApi::new("mantle"),
            owners: vec!["0xA".to_string()],
            tokens: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["api"]["chain"], "mantle");
        assert!(json["api"].get("block").is_none());
        assert_eq!(json["owners"][0], "0xA");
        assert!(json["tokens"].is_null());
    }

    #[test]
    fn test_balances_are_transparent_map() {
        let mut balances = Balances::new();
        balances.insert("polygon:0xUSDC", "1000000");

        let json = serde_json::to_string(&balances).unwrap();
        assert_eq!(json, r#"{"polygon:0xUSDC":"1000000"}"#);
        assert_eq!(balances.get("polygon:0xUSDC"), Some("1000000"));
    }
}
