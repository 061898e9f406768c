//! Trading Strategy API Client
//!
//! HTTP client for the public `/strategies/tvl` endpoint, which lists every
//! deployed strategy vault together with its chain id.

use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;

use crate::domain::ProtocolTvlReply;
use crate::ports::strategy_source::{FetchError, StrategySourcePort};

/// Public vault list endpoint
pub const DEFAULT_TVL_URL: &str = "https://tradingstrategy.ai/strategies/tvl";

/// Trading Strategy API client configuration
#[derive(Debug, Clone)]
pub struct TradingStrategyConfig {
    /// Full URL of the vault list endpoint
    pub tvl_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for TradingStrategyConfig {
    fn default() -> Self {
        Self {
            tvl_url: DEFAULT_TVL_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Trading Strategy vault list client. Issues exactly one GET per call.
#[derive(Debug, Clone)]
pub struct TradingStrategyClient {
    config: TradingStrategyConfig,
    http: Client,
}

impl TradingStrategyClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self, FetchError> {
        Self::with_config(TradingStrategyConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: TradingStrategyConfig) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| FetchError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    /// Fetch and parse the vault list
    pub async fn get_strategies(&self) -> Result<ProtocolTvlReply, FetchError> {
        tracing::debug!(url = %self.config.tvl_url, "Fetching strategy vault list");

        let response = self.http
            .get(&self.config.tvl_url)
            .send()
            .await
            .map_err(|e| FetchError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Http(e.to_string()))?;

        let reply = parse_reply(&body)?;
        tracing::info!(
            strategies = reply.strategies.len(),
            "Fetched strategy vault list"
        );
        Ok(reply)
    }
}

/// Parse a `/strategies/tvl` response body
pub fn parse_reply(body: &str) -> Result<ProtocolTvlReply, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))
}

#[async_trait]
impl StrategySourcePort for TradingStrategyClient {
    async fn fetch_reply(&self) -> Result<ProtocolTvlReply, FetchError> {
        self.get_strategies().await
    }
}
