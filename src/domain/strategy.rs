//! Strategy Vault Records
//!
//! Types for the Trading Strategy `/strategies/tvl` payload and the
//! per-chain vault address extraction over it.

use std::fmt;

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};

/// Chain id as it appears in the API payload.
///
/// The API is not strict about the type. Numbers and numeric strings are
/// compared loosely: a string matches when it reads as the same integer in
/// decimal, `0x` hex or float notation (`"137"`, `"0x89"`, `"1.37e2"`).
/// Any other JSON type is treated as absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChainIdField {
    Number(serde_json::Number),
    Text(String),
}

impl ChainIdField {
    /// Numeric value, if the field holds a non-negative integer
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            ChainIdField::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(integral_u64)),
            ChainIdField::Text(s) => parse_loose_u64(s),
        }
    }

    /// Loose equality against a numeric chain id
    pub fn matches(&self, chain_id: u64) -> bool {
        self.as_u64() == Some(chain_id)
    }
}

fn integral_u64(f: f64) -> Option<u64> {
    (f.is_finite() && f.fract() == 0.0 && f >= 0.0 && f < u64::MAX as f64).then_some(f as u64)
}

fn parse_loose_u64(s: &str) -> Option<u64> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return u64::from_str_radix(hex, 16).ok();
    }
    s.parse::<u64>()
        .ok()
        .or_else(|| s.parse::<f64>().ok().and_then(integral_u64))
}

fn deserialize_chain_id<'de, D>(deserializer: D) -> Result<Option<ChainIdField>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => Some(ChainIdField::Number(n)),
        serde_json::Value::String(s) => Some(ChainIdField::Text(s)),
        _ => None,
    })
}

/// One deployed strategy vault
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyRecord {
    /// Missing or null for strategies on chains without an EVM chain id
    #[serde(default, deserialize_with = "deserialize_chain_id")]
    pub chain_id: Option<ChainIdField>,
    /// Vault (owner) address holding the strategy assets
    #[serde(default)]
    pub address: Option<String>,
}

impl StrategyRecord {
    pub fn new(chain_id: u64, address: impl Into<String>) -> Self {
        Self {
            chain_id: Some(ChainIdField::Number(chain_id.into())),
            address: Some(address.into()),
        }
    }

    pub fn is_on_chain(&self, chain_id: u64) -> bool {
        self.chain_id
            .as_ref()
            .map(|c| c.matches(chain_id))
            .unwrap_or(false)
    }
}

/// Full `/strategies/tvl` reply
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProtocolTvlReply {
    /// Served either as an array or as an object keyed by strategy id.
    /// Object values are kept in document order.
    #[serde(deserialize_with = "deserialize_strategies")]
    pub strategies: Vec<StrategyRecord>,
}

impl ProtocolTvlReply {
    pub fn new(strategies: Vec<StrategyRecord>) -> Self {
        Self { strategies }
    }

    /// See [`chain_strategy_vault_addresses`]
    pub fn vault_addresses(&self, chain_id: u64) -> Vec<String> {
        chain_strategy_vault_addresses(self, chain_id)
    }
}

/// Addresses of every strategy vault deployed on `chain_id`, in source order.
/// Matching records without an address are skipped.
pub fn chain_strategy_vault_addresses(reply: &ProtocolTvlReply, chain_id: u64) -> Vec<String> {
    reply
        .strategies
        .iter()
        .filter(|strat| strat.is_on_chain(chain_id))
        .filter_map(|strat| strat.address.clone())
        .collect()
}

fn deserialize_strategies<'de, D>(deserializer: D) -> Result<Vec<StrategyRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StrategiesVisitor;

    impl<'de> Visitor<'de> for StrategiesVisitor {
        type Value = Vec<StrategyRecord>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an array or a map of strategy records")
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut out = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(value) = seq.next_element::<serde_json::Value>()? {
                out.extend(parse_record(value));
            }
            Ok(out)
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut out = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((_, value)) = map.next_entry::<de::IgnoredAny, serde_json::Value>()? {
                out.extend(parse_record(value));
            }
            Ok(out)
        }
    }

    deserializer.deserialize_any(StrategiesVisitor)
}

/// Malformed records are skipped so one bad entry cannot hide the others
fn parse_record(value: serde_json::Value) -> Option<StrategyRecord> {
    match serde_json::from_value(value) {
        Ok(record) => Some(record),
        Err(err) => {
            tracing::debug!(%err, "Skipping malformed strategy record");
            None
        }
    }
}
