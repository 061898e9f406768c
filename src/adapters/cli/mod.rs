//! CLI Adapter
//!
//! Command-line interface for the strategy-tvl binary.
//! Uses clap derive macros for argument parsing.

mod commands;

pub use commands::{CliApp, Command, RequestCmd, VaultsCmd};
