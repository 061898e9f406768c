//! Strategy Source Port
//!
//! Where the protocol's vault list comes from.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::ProtocolTvlReply;

/// Vault list fetch error.
///
/// `Clone` because one in-flight fetch is shared by every waiting caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Source of the `/strategies/tvl` reply
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StrategySourcePort: Send + Sync {
    /// Fetch and parse the full vault list. No caching at this level.
    async fn fetch_reply(&self) -> Result<ProtocolTvlReply, FetchError>;
}
