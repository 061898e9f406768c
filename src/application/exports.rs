//! Chain Exports
//!
//! The entry points the host aggregation framework calls: one `tvl` export
//! per chain, keyed by canonical chain name.

use std::collections::BTreeMap;
use std::sync::Arc;
use async_trait::async_trait;

use crate::adapters::dry_run::DryRunSummer;
use crate::adapters::tradingstrategy::ReplyCache;
use crate::domain::{Chain, ChainError, DefaultTokens};
use crate::ports::{Balances, ChainApi, ChainBlocks, SumTokensRequest};
use super::tvl_adapter::{TvlAdapter, TvlError};

/// Chains exported by default
pub const EXPORTED_CHAIN_IDS: &[u64] = &[137];

/// Host-facing TVL entry point for one chain
#[async_trait]
pub trait TvlExport: Send + Sync {
    async fn tvl(
        &self,
        api: &ChainApi,
        eth_block: Option<u64>,
        chain_blocks: &ChainBlocks,
    ) -> Result<Balances, TvlError>;
}

/// TVL export bound to a single chain
#[derive(Clone)]
pub struct ChainTvl {
    chain: Chain,
    adapter: Arc<TvlAdapter>,
}

impl ChainTvl {
    pub fn new(chain: Chain, adapter: Arc<TvlAdapter>) -> Self {
        Self { chain, adapter }
    }

    pub fn chain(&self) -> Chain {
        self.chain
    }
}

#[async_trait]
impl TvlExport for ChainTvl {
    async fn tvl(
        &self,
        api: &ChainApi,
        eth_block: Option<u64>,
        chain_blocks: &ChainBlocks,
    ) -> Result<Balances, TvlError> {
        self.adapter
            .fetch_vault_balances(self.chain.id, self.chain.name, api, eth_block, chain_blocks)
            .await
    }
}

/// Build the chain name to export map.
///
/// Fails on the first chain id missing from the name table.
/// All exports share the adapter, and with it the vault list cache.
pub fn exports(
    adapter: Arc<TvlAdapter>,
    chain_ids: &[u64],
) -> Result<BTreeMap<String, ChainTvl>, ChainError> {
    chain_ids
        .iter()
        .map(|id| {
            let chain = Chain::from_id(*id)?;
            Ok((chain.name.to_string(), ChainTvl::new(chain, adapter.clone())))
        })
        .collect()
}

/// Run the exports for `chain_ids` once against [`DryRunSummer`] and
/// return the summation request each chain handed over, in export order.
pub async fn dry_run_exports(
    cache: Arc<ReplyCache>,
    default_tokens: DefaultTokens,
    chain_ids: &[u64],
    block: Option<u64>,
) -> Result<Vec<SumTokensRequest>, TvlError> {
    let summer = Arc::new(DryRunSummer::new());
    let adapter = Arc::new(TvlAdapter::new(cache, summer.clone(), default_tokens));
    let now = chrono::Utc::now();

    for (name, export) in exports(adapter, chain_ids)? {
        let mut api = ChainApi::new(name.clone()).at_time(now);
        let mut chain_blocks = ChainBlocks::new();
        if let Some(block) = block {
            api = api.at_block(block);
            chain_blocks.insert(name, block);
        }
        export.tvl(&api, None, &chain_blocks).await?;
    }

    Ok(summer.take_requests())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProtocolTvlReply, StrategyRecord};
    use crate::ports::mocks::{MockStrategySource, RecordingTokenSummer};

    fn adapter(summer: RecordingTokenSummer) -> Arc<TvlAdapter> {
        let source = MockStrategySource::new(ProtocolTvlReply::new(vec![
            StrategyRecord::new(137, "0xA"),
        ]));
        let cache = Arc::new(ReplyCache::new(Arc::new(source)));
        Arc::new(TvlAdapter::new(cache, Arc::new(summer), DefaultTokens::builtin()))
    }

    #[test]
    fn test_default_exports_polygon_only() {
        let map = exports(adapter(RecordingTokenSummer::new()), EXPORTED_CHAIN_IDS).unwrap();

        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["polygon"]);
        assert_eq!(map["polygon"].chain().id, 137);
    }

    #[test]
    fn test_unmapped_chain_id_fails_export() {
        let result = exports(adapter(RecordingTokenSummer::new()), &[137, 999]);
        assert!(matches!(result, Err(ChainError::UnknownChainId(999))));
    }

    #[tokio::test]
    async fn test_dry_run_covers_configured_chains() {
        let source = MockStrategySource::new(ProtocolTvlReply::new(vec![
            StrategyRecord::new(137, "0xA"),
            StrategyRecord::new(1, "0xB"),
        ]));
        let cache = Arc::new(ReplyCache::new(Arc::new(source.clone())));

        let requests = dry_run_exports(cache, DefaultTokens::builtin(), &[137, 1], Some(100))
            .await
            .unwrap();

        assert_eq!(source.call_count(), 1);
        assert_eq!(requests.len(), 2);
        // Export map order: ethereum, polygon
        assert_eq!(requests[0].api.chain, "ethereum");
        assert_eq!(requests[0].owners, vec!["0xB"]);
        assert_eq!(requests[1].api.chain, "polygon");
        assert_eq!(requests[1].owners, vec!["0xA"]);
        assert!(requests.iter().all(|r| r.api.block == Some(100) && r.api.timestamp.is_some()));
    }

    #[tokio::test]
    async fn test_dry_run_rejects_unmapped_chain() {
        let source = MockStrategySource::new(ProtocolTvlReply::default());
        let cache = Arc::new(ReplyCache::new(Arc::new(source.clone())));

        let result = dry_run_exports(cache, DefaultTokens::builtin(), &[999], None).await;

        assert_eq!(result, Err(TvlError::Chain(ChainError::UnknownChainId(999))));
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn test_polygon_tvl_delegates_to_summer() {
        let summer = RecordingTokenSummer::new();
        let map = exports(adapter(summer.clone()), EXPORTED_CHAIN_IDS).unwrap();

        let api = ChainApi::new("polygon");
        map["polygon"].tvl(&api, None, &ChainBlocks::new()).await.unwrap();

        let requests = summer.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].owners, vec!["0xA"]);
        assert_eq!(requests[0].api, api);
    }
}
