//! Default Token Lists
//!
//! Per-chain lists of commonly held token addresses. Any vault may hold any
//! token, so the summation is run over these well-known assets.
//! The native gas token is represented by the zero address.

use std::collections::HashMap;

/// Native gas token placeholder
pub const NULL_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

pub const ETHEREUM_TOKENS: &[&str] = &[
    NULL_ADDRESS,
    // USDT
    "0xdAC17F958D2ee523a2206206994597C13D831ec7",
    // USDC
    "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
    // WETH
    "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2",
    // DAI
    "0x6B175474E89094C44Da98b954EedeAC495271d0F",
    // WBTC
    "0x2260FAC5E5542a773Aa44fBCfeDf7C193bc2C599",
];

pub const POLYGON_TOKENS: &[&str] = &[
    NULL_ADDRESS,
    // USDC.e (bridged)
    "0x2791Bca1f2de4661ED88A30C99A7a9449Aa84174",
    // USDC (native)
    "0x3c499c542cEF5E3811e1192ce70d8cC03d5c3359",
    // USDT
    "0xc2132D05D31c914a87C6611C10748AEb04B58e8F",
    // WETH
    "0x7ceB23fD6bC0adD59E62ac25578270cFf1b9f619",
    // WMATIC
    "0x0d500B1d8E8eF31E21C99d1Db9A6444d3ADf1270",
    // DAI
    "0x8f3Cf7ad23Cd3CaDbD9735AFf958023239c6A063",
    // WBTC
    "0x1BFD67037B42Cf73acF2047067bd4F2C47D9BfD6",
];

pub const BSC_TOKENS: &[&str] = &[
    NULL_ADDRESS,
    // WBNB
    "0xbb4CdB9CBd36B01bD1cBaEBF2De08d9173bc095c",
    // BUSD
    "0xe9e7CEA3DedcA5984780Bafc599bD69ADd087D56",
    // USDT
    "0x55d398326f99059fF775485246999027B3197955",
    // USDC
    "0x8AC76a51cc950d9822D68b83fE1Ad97B32Cd580d",
    // ETH
    "0x2170Ed0880ac9A755fd29B2688956BD959F933F8",
];

pub const BASE_TOKENS: &[&str] = &[
    NULL_ADDRESS,
    // USDC
    "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913",
    // WETH
    "0x4200000000000000000000000000000000000006",
    // DAI
    "0x50c5725949A6F0c72E6C4a641F24049A917DB0Cb",
];

/// Token lists keyed by canonical chain name.
///
/// Mantle has no built-in list; it must be supplied through configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultTokens {
    lists: HashMap<String, Vec<String>>,
}

impl DefaultTokens {
    /// Built-in lists only
    pub fn builtin() -> Self {
        let lists = [
            ("ethereum", ETHEREUM_TOKENS),
            ("polygon", POLYGON_TOKENS),
            ("bsc", BSC_TOKENS),
            ("base", BASE_TOKENS),
        ]
        .into_iter()
        .map(|(chain, tokens)| {
            (
                chain.to_string(),
                tokens.iter().map(|t| t.to_string()).collect(),
            )
        })
        .collect();

        Self { lists }
    }

    /// Empty table, mostly useful in tests
    pub fn empty() -> Self {
        Self {
            lists: HashMap::new(),
        }
    }

    /// Append extra tokens for a chain, skipping duplicates (case-insensitive)
    pub fn extend(&mut self, chain_name: &str, tokens: impl IntoIterator<Item = String>) {
        let list = self.lists.entry(chain_name.to_ascii_lowercase()).or_default();
        for token in tokens {
            if !list.iter().any(|t| t.eq_ignore_ascii_case(&token)) {
                list.push(token);
            }
        }
    }

    /// Builder form of [`DefaultTokens::extend`]
    pub fn with_tokens(mut self, chain_name: &str, tokens: impl IntoIterator<Item = String>) -> Self {
        self.extend(chain_name, tokens);
        self
    }

    pub fn for_chain(&self, chain_name: &str) -> Option<&[String]> {
        self.lists.get(chain_name).map(Vec::as_slice)
    }

    pub fn has_chain(&self, chain_name: &str) -> bool {
        self.lists.contains_key(chain_name)
    }
}

impl Default for DefaultTokens {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lists() {
        let tokens = DefaultTokens::builtin();

        let polygon = tokens.for_chain("polygon").unwrap();
        assert_eq!(polygon.len(), POLYGON_TOKENS.len());
        assert_eq!(polygon[0], NULL_ADDRESS);

        assert!(tokens.has_chain("ethereum"));
        assert!(tokens.has_chain("bsc"));
        assert!(tokens.has_chain("base"));
    }

    #[test]
    fn test_mantle_has_no_builtin_list() {
        let tokens = DefaultTokens::builtin();
        assert!(tokens.for_chain("mantle").is_none());
    }

    #[test]
    fn test_extend_skips_duplicates() {
        let usdc = "0x2791bca1f2de4661ed88a30c99a7a9449aa84174".to_string();
        let extra = "0x0000000000000000000000000000000000001010".to_string();

        let tokens = DefaultTokens::builtin().with_tokens("Polygon", vec![usdc, extra.clone()]);
        let polygon = tokens.for_chain("polygon").unwrap();

        assert_eq!(polygon.len(), POLYGON_TOKENS.len() + 1);
        assert_eq!(polygon.last(), Some(&extra));
    }

    #[test]
    fn test_extend_new_chain() {
        let tokens = DefaultTokens::empty()
            .with_tokens("mantle", vec!["0x09Bc4E0D864854c6aFB6eB9A9cdF58aC190D0dF9".to_string()]);
        assert_eq!(tokens.for_chain("mantle").map(|t| t.len()), Some(1));
    }
}
