//! Configuration Module
//!
//! Loads and validates configuration from TOML files and the environment.

pub mod loader;

pub use loader::{
    Config, ConfigError, JupiterSection, SolanaSection, TradeSection, load_config,
};
