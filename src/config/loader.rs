//! Configuration Loader
//!
//! Loads and validates configuration from TOML files. Every section is
//! optional; missing values fall back to the built-in defaults.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::adapters::tradingstrategy::{TradingStrategyConfig, DEFAULT_TVL_URL};
use crate::application::EXPORTED_CHAIN_IDS;
use crate::domain::{chain_name, DefaultTokens};

/// Environment variable overriding `api.url`
pub const TVL_API_URL_ENV: &str = "TVL_API_URL";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub adapter: AdapterSection,
    #[serde(default)]
    pub logging: LoggingSection,
    /// Extra token addresses per chain name, appended to the built-in lists
    #[serde(default)]
    pub default_tokens: BTreeMap<String, Vec<String>>,
}

/// Trading Strategy API section
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSection {
    /// Vault list endpoint
    #[serde(default = "default_api_url")]
    pub url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiSection {
    /// Get API URL with environment variable override
    /// Checks TVL_API_URL env var first, falls back to config value
    pub fn get_url(&self) -> String {
        std::env::var(TVL_API_URL_ENV)
            .ok()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| self.url.clone())
    }
}

/// Adapter section
#[derive(Debug, Clone, Deserialize)]
pub struct AdapterSection {
    /// Chain ids exported to the host
    #[serde(default = "default_chains")]
    pub chains: Vec<u64>,
}

impl Default for AdapterSection {
    fn default() -> Self {
        Self {
            chains: default_chains(),
        }
    }
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_TVL_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_chains() -> Vec<u64> {
    EXPORTED_CHAIN_IDS.to_vec()
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.url.is_empty() {
            return Err(ConfigError::ValidationError(
                "api.url cannot be empty".to_string(),
            ));
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "api.timeout_secs must be > 0".to_string(),
            ));
        }

        if self.adapter.chains.is_empty() {
            return Err(ConfigError::ValidationError(
                "adapter.chains cannot be empty".to_string(),
            ));
        }

        for id in &self.adapter.chains {
            chain_name(*id).map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        }

        Ok(())
    }

    /// API client settings, with the env override applied
    pub fn trading_strategy(&self) -> TradingStrategyConfig {
        TradingStrategyConfig {
            tvl_url: self.api.get_url(),
            timeout: Duration::from_secs(self.api.timeout_secs),
        }
    }

    /// Built-in token lists extended with the configured extras
    pub fn default_tokens(&self) -> DefaultTokens {
        self.default_tokens
            .iter()
            .fold(DefaultTokens::builtin(), |tokens, (chain, extra)| {
                tokens.with_tokens(chain, extra.iter().cloned())
            })
    }
}
