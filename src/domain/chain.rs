//! Chain Name Table
//!
//! Maps numeric EVM chain ids to the canonical lowercase chain names the
//! host aggregation framework keys its balances and token lists by.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Chain ids with a known canonical name
pub const CHAIN_NAMES: &[(u64, &str)] = &[
    (1, "ethereum"),
    (137, "polygon"),
    (5000, "mantle"),
    (8453, "base"),
    (56, "bsc"),
];

/// Chain lookup errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("Does not know chain name for chain id {0}")]
    UnknownChainId(u64),

    #[error("Does not know chain id for chain name '{0}'")]
    UnknownChainName(String),
}

/// Resolve the canonical chain name for a chain id
pub fn chain_name(chain_id: u64) -> Result<&'static str, ChainError> {
    CHAIN_NAMES
        .iter()
        .find(|(id, _)| *id == chain_id)
        .map(|(_, name)| *name)
        .ok_or(ChainError::UnknownChainId(chain_id))
}

/// Reverse lookup, case-insensitive
pub fn chain_id_by_name(name: &str) -> Result<u64, ChainError> {
    let wanted = name.trim().to_ascii_lowercase();
    CHAIN_NAMES
        .iter()
        .find(|(_, n)| *n == wanted)
        .map(|(id, _)| *id)
        .ok_or_else(|| ChainError::UnknownChainName(name.to_string()))
}

/// A chain present in the name table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Chain {
    pub id: u64,
    pub name: &'static str,
}

impl Chain {
    pub fn from_id(chain_id: u64) -> Result<Self, ChainError> {
        Ok(Self {
            id: chain_id,
            name: chain_name(chain_id)?,
        })
    }

    /// All chains in table order
    pub fn all() -> impl Iterator<Item = Chain> {
        CHAIN_NAMES.iter().map(|(id, name)| Chain { id: *id, name })
    }
}

impl FromStr for Chain {
    type Err = ChainError;

    /// Accepts either a chain name ("polygon") or a numeric id ("137")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<u64>() {
            Ok(id) => Chain::from_id(id),
            Err(_) => Chain::from_id(chain_id_by_name(s)?),
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_chain_names() {
        assert_eq!(chain_name(1).unwrap(), "ethereum");
        assert_eq!(chain_name(137).unwrap(), "polygon");
        assert_eq!(chain_name(5000).unwrap(), "mantle");
        assert_eq!(chain_name(8453).unwrap(), "base");
        assert_eq!(chain_name(56).unwrap(), "bsc");
    }

    #[test]
    fn test_unmapped_chain_id_errors() {
        let result = chain_name(999);
        assert_eq!(result, Err(ChainError::UnknownChainId(999)));
        assert!(Chain::from_id(999).is_err());
    }

    #[test]
    fn test_reverse_lookup() {
        assert_eq!(chain_id_by_name("polygon").unwrap(), 137);
        assert_eq!(chain_id_by_name(" Base ").unwrap(), 8453);
        assert!(matches!(
            chain_id_by_name("solana"),
            Err(ChainError::UnknownChainName(_))
        ));
    }

    #[test]
    fn test_parse_chain_from_name_or_id() {
        let by_name: Chain = "polygon".parse().unwrap();
        let by_id: Chain = "137".parse().unwrap();
        assert_eq!(by_name, by_id);
        assert_eq!(by_name.to_string(), "polygon (137)");

        assert!("999".parse::<Chain>().is_err());
        assert!("fantom".parse::<Chain>().is_err());
    }

    #[test]
    fn test_all_chains_in_table_order() {
        let ids: Vec<u64> = Chain::all().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 137, 5000, 8453, 56]);
    }
}
