//! Configuration Module
//!
//! Loads and validates configuration from TOML files.

pub mod loader;

pub use loader::{
    Config, ConfigError, load_config, TVL_API_URL_ENV,
};
