//! TVL Adapter
//!
//! Resolves the strategy vaults deployed on a chain and hands them, with the
//! chain's default token list, to the host's token summation primitive.
//! Every vault may hold any token on its chain, so all vaults are treated as
//! owners of all default tokens.

use std::sync::Arc;
use thiserror::Error;

use crate::adapters::tradingstrategy::ReplyCache;
use crate::domain::{chain_strategy_vault_addresses, ChainError, DefaultTokens};
use crate::ports::{
    Balances, ChainApi, ChainBlocks, FetchError, SumTokensError, SumTokensRequest, TokenSummerPort,
};

/// TVL computation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TvlError {
    #[error("Failed to fetch strategy vaults: {0}")]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error(transparent)]
    SumTokens(#[from] SumTokensError),
}

/// Resolves owners and tokens for a chain from the cached vault list
pub struct VaultResolver {
    cache: Arc<ReplyCache>,
    default_tokens: DefaultTokens,
}

impl VaultResolver {
    pub fn new(cache: Arc<ReplyCache>, default_tokens: DefaultTokens) -> Self {
        Self {
            cache,
            default_tokens,
        }
    }

    /// Vault addresses on `chain_id`, read through the cache
    pub async fn vault_addresses(&self, chain_id: u64) -> Result<Vec<String>, TvlError> {
        let reply = self.cache.get().await?;
        Ok(chain_strategy_vault_addresses(&reply, chain_id))
    }

    /// Build the summation request for a chain without submitting it
    pub async fn build_request(
        &self,
        chain_id: u64,
        chain_name: &str,
        api: ChainApi,
    ) -> Result<SumTokensRequest, TvlError> {
        let owners = self.vault_addresses(chain_id).await?;

        let tokens = self.default_tokens.for_chain(chain_name).map(<[String]>::to_vec);
        if tokens.is_none() {
            tracing::warn!(chain = chain_name, "No default token list for chain");
        }

        tracing::info!(
            chain = chain_name,
            chain_id,
            vaults = owners.len(),
            tokens = tokens.as_ref().map(Vec::len).unwrap_or(0),
            "Resolved strategy vaults"
        );

        Ok(SumTokensRequest { api, owners, tokens })
    }
}

/// Vault balance calculator for any chain in the name table
pub struct TvlAdapter {
    resolver: VaultResolver,
    summer: Arc<dyn TokenSummerPort>,
}

impl TvlAdapter {
    pub fn new(
        cache: Arc<ReplyCache>,
        summer: Arc<dyn TokenSummerPort>,
        default_tokens: DefaultTokens,
    ) -> Self {
        Self {
            resolver: VaultResolver::new(cache, default_tokens),
            summer,
        }
    }

    /// Sum the default token balances of every vault on a chain.
    ///
    /// The summation port is called even when no vault is deployed on the
    /// chain; its result is returned untouched.
    pub async fn fetch_vault_balances(
        &self,
        chain_id: u64,
        chain_name: &str,
        api: &ChainApi,
        eth_block: Option<u64>,
        chain_blocks: &ChainBlocks,
    ) -> Result<Balances, TvlError> {
        tracing::debug!(
            chain = chain_name,
            ?eth_block,
            chain_block = ?chain_blocks.get(chain_name),
            "Computing vault balances"
        );

        let request = self.resolver.build_request(chain_id, chain_name, api.clone()).await?;
        let balances = self.summer.sum_tokens(request).await?;
        Ok(balances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProtocolTvlReply, StrategyRecord};
    use crate::ports::strategy_source::MockStrategySourcePort;
    use crate::ports::token_summer::MockTokenSummerPort;
    use mockall::predicate::*;

    fn cache_with(reply: ProtocolTvlReply) -> Arc<ReplyCache> {
        let mut source = MockStrategySourcePort::new();
        source
            .expect_fetch_reply()
            .times(1)
            .returning(move || Ok(reply.clone()));
        Arc::new(ReplyCache::new(Arc::new(source)))
    }

    fn polygon_reply() -> ProtocolTvlReply {
        ProtocolTvlReply::new(vec![
            StrategyRecord::new(137, "0xA"),
            StrategyRecord::new(1, "0xB"),
            StrategyRecord::new(137, "0xC"),
        ])
    }

    #[tokio::test]
    async fn test_forwards_owners_and_default_tokens() {
        let tokens = vec!["0xUSDC".to_string(), "0xWETH".to_string()];
        let default_tokens = DefaultTokens::empty().with_tokens("polygon", tokens.clone());

        let expected = SumTokensRequest {
            api: ChainApi::new("polygon").at_block(55_000_000),
            owners: vec!["0xA".to_string(), "0xC".to_string()],
            tokens: Some(tokens),
        };

        let mut balances = Balances::new();
        balances.insert("polygon:0xUSDC", "2500000");
        let returned = balances.clone();

        let mut summer = MockTokenSummerPort::new();
        summer
            .expect_sum_tokens()
            .with(eq(expected))
            .times(1)
            .returning(move |_| Ok(returned.clone()));

        let adapter = TvlAdapter::new(cache_with(polygon_reply()), Arc::new(summer), default_tokens);

        let api = ChainApi::new("polygon").at_block(55_000_000);
        let result = adapter
            .fetch_vault_balances(137, "polygon", &api, Some(19_000_000), &ChainBlocks::new())
            .await
            .unwrap();

        assert_eq!(result, balances);
    }

    #[tokio::test]
    async fn test_empty_owners_still_summed() {
        let mut summer = MockTokenSummerPort::new();
        summer
            .expect_sum_tokens()
            .withf(|request| request.owners.is_empty())
            .times(1)
            .returning(|_| Ok(Balances::new()));

        let adapter = TvlAdapter::new(
            cache_with(polygon_reply()),
            Arc::new(summer),
            DefaultTokens::builtin(),
        );

        let result = adapter
            .fetch_vault_balances(8453, "base", &ChainApi::new("base"), None, &ChainBlocks::new())
            .await
            .unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_missing_default_tokens_passed_as_none() {
        let mut summer = MockTokenSummerPort::new();
        summer
            .expect_sum_tokens()
            .withf(|request| request.tokens.is_none() && request.api.chain == "mantle")
            .times(1)
            .returning(|_| Err(SumTokensError("no tokens given".to_string())));

        let adapter = TvlAdapter::new(
            cache_with(ProtocolTvlReply::new(vec![StrategyRecord::new(5000, "0xM")])),
            Arc::new(summer),
            DefaultTokens::builtin(),
        );

        let result = adapter
            .fetch_vault_balances(5000, "mantle", &ChainApi::new("mantle"), None, &ChainBlocks::new())
            .await;

        assert_eq!(
            result,
            Err(TvlError::SumTokens(SumTokensError("no tokens given".to_string())))
        );
    }

    #[tokio::test]
    async fn test_fetch_error_propagates_without_summing() {
        let mut source = MockStrategySourcePort::new();
        source
            .expect_fetch_reply()
            .times(1)
            .returning(|| Err(FetchError::Http("connection reset".to_string())));

        let mut summer = MockTokenSummerPort::new();
        summer.expect_sum_tokens().never();

        let adapter = TvlAdapter::new(
            Arc::new(ReplyCache::new(Arc::new(source))),
            Arc::new(summer),
            DefaultTokens::builtin(),
        );

        let result = adapter
            .fetch_vault_balances(137, "polygon", &ChainApi::new("polygon"), None, &ChainBlocks::new())
            .await;

        assert!(matches!(result, Err(TvlError::Fetch(FetchError::Http(_)))));
    }

    #[tokio::test]
    async fn test_build_request_uses_builtin_tokens() {
        let resolver = VaultResolver::new(cache_with(polygon_reply()), DefaultTokens::builtin());

        let request = resolver
            .build_request(1, "ethereum", ChainApi::new("ethereum"))
            .await
            .unwrap();

        assert_eq!(request.owners, vec!["0xB"]);
        assert_eq!(
            request.tokens.as_deref(),
            DefaultTokens::builtin().for_chain("ethereum")
        );
    }
}
