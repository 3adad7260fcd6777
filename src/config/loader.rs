//! Configuration Loader
//!
//! Loads and validates configuration from an optional TOML file, then applies
//! environment overrides (`RPC_URL`, `WALLET_PRIVATE_KEY`, `JUPITER_API_KEY`).
//! Every field has a default, so running without a file is valid.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::adapters::jupiter::{JupiterConfig, DEFAULT_API_BASE_URL};
use crate::adapters::solana::{parse_commitment, ConfirmationSettings, MAINNET_RPC_URL};
use crate::application::{RoundTripConfig, UnconfirmedBuyPolicy};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub jupiter: JupiterSection,
    pub solana: SolanaSection,
    pub trade: TradeSection,
}

/// Jupiter API configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JupiterSection {
    /// Jupiter swap API base URL
    pub api_url: String,
    /// Optional API key for higher rate limits (get from jup.ag)
    pub api_key: Option<String>,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for JupiterSection {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

/// Solana RPC configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SolanaSection {
    /// RPC endpoint (use private RPC for production)
    pub rpc_url: String,
    /// Commitment level: "processed", "confirmed", "finalized"
    pub commitment: String,
    /// Wallet keypair file, used when WALLET_PRIVATE_KEY is not set
    pub keypair_path: Option<String>,
    /// Base58 secret key, only ever taken from the environment
    #[serde(skip)]
    pub private_key: Option<String>,
    /// Give up waiting for confirmation after this many seconds
    pub confirm_timeout_secs: u64,
    /// Signature status poll interval
    pub poll_interval_ms: u64,
}

impl Default for SolanaSection {
    fn default() -> Self {
        Self {
            rpc_url: MAINNET_RPC_URL.to_string(),
            commitment: "confirmed".to_string(),
            keypair_path: None,
            private_key: None,
            confirm_timeout_secs: 60,
            poll_interval_ms: 500,
        }
    }
}

/// Round-trip configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TradeSection {
    /// Wait between the buy result and the sell leg
    pub settle_delay_ms: u64,
    /// "proceed" or "abort" when the buy is not confirmed
    pub unconfirmed_buy_policy: UnconfirmedBuyPolicy,
}

impl Default for TradeSection {
    fn default() -> Self {
        Self {
            settle_delay_ms: 2000,
            unconfirmed_buy_policy: UnconfirmedBuyPolicy::Proceed,
        }
    }
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
    /// Load from `path` if given (defaults otherwise), apply process
    /// environment overrides, and validate
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => load_config(path)?,
            None => Config::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup; empty values are ignored
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get("RPC_URL") {
            self.solana.rpc_url = url;
        }
        if let Some(key) = get("WALLET_PRIVATE_KEY") {
            self.solana.private_key = Some(key);
        }
        if let Some(key) = get("JUPITER_API_KEY") {
            self.jupiter.api_key = Some(key);
        }
    }

    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jupiter.api_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "api_url cannot be empty".to_string(),
            ));
        }

        if self.jupiter.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "jupiter.timeout_secs must be > 0".to_string(),
            ));
        }

        if self.solana.rpc_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "rpc_url cannot be empty".to_string(),
            ));
        }

        parse_commitment(&self.solana.commitment)
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        if self.solana.confirm_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "solana.confirm_timeout_secs must be > 0".to_string(),
            ));
        }

        if self.solana.poll_interval_ms == 0 {
            return Err(ConfigError::ValidationError(
                "solana.poll_interval_ms must be > 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn jupiter_config(&self) -> JupiterConfig {
        JupiterConfig {
            api_base_url: self.jupiter.api_url.trim_end_matches('/').to_string(),
            api_key: self.jupiter.api_key.clone().filter(|k| !k.is_empty()),
            timeout: Duration::from_secs(self.jupiter.timeout_secs),
        }
    }

    pub fn confirmation_settings(&self) -> ConfirmationSettings {
        ConfirmationSettings {
            timeout: Duration::from_secs(self.solana.confirm_timeout_secs),
            poll_interval: Duration::from_millis(self.solana.poll_interval_ms),
        }
    }

    pub fn round_trip_config(&self) -> RoundTripConfig {
        RoundTripConfig {
            settle_delay: Duration::from_millis(self.trade.settle_delay_ms),
            unconfirmed_buy_policy: self.trade.unconfirmed_buy_policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_valid_config() -> String {
        r#"
[jupiter]
api_url = "https://quote-api.jup.ag/v6/"
timeout_secs = 10

[solana]
rpc_url = "https://api.devnet.solana.com"
commitment = "finalized"
keypair_path = "~/.config/solana/id.json"
confirm_timeout_secs = 45
poll_interval_ms = 250

[trade]
settle_delay_ms = 3000
unconfirmed_buy_policy = "abort"
"#
        .to_string()
    }

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let file = write_config(&create_valid_config());
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.jupiter.timeout_secs, 10);
        assert_eq!(config.solana.commitment, "finalized");
        assert_eq!(config.solana.keypair_path.as_deref(), Some("~/.config/solana/id.json"));
        assert_eq!(config.trade.unconfirmed_buy_policy, UnconfirmedBuyPolicy::Abort);
        assert!(config.solana.private_key.is_none());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.jupiter.api_url, "https://api.jup.ag/swap/v1");
        assert_eq!(config.solana.rpc_url, "https://api.mainnet-beta.solana.com");
        assert_eq!(config.trade.settle_delay_ms, 2000);
        assert_eq!(config.trade.unconfirmed_buy_policy, UnconfirmedBuyPolicy::Proceed);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let file = write_config("[trade]\nsettle_delay_ms = 5000\n");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.trade.settle_delay_ms, 5000);
        assert_eq!(config.trade.unconfirmed_buy_policy, UnconfirmedBuyPolicy::Proceed);
        assert_eq!(config.solana.commitment, "confirmed");
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_config("/nonexistent/path/config.toml");
        assert!(matches!(result.unwrap_err(), ConfigError::IoError(_)));
    }

    #[test]
    fn test_invalid_toml() {
        let file = write_config("[trade\nsettle_delay_ms = ");
        assert!(matches!(load_config(file.path()).unwrap_err(), ConfigError::ParseError(_)));
    }

    #[test]
    fn test_invalid_commitment() {
        let file = write_config("[solana]\ncommitment = \"whenever\"\n");
        assert!(matches!(
            load_config(file.path()).unwrap_err(),
            ConfigError::ValidationError(_)
        ));
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let file = write_config("[trade]\nunconfirmed_buy_policy = \"retry\"\n");
        assert!(matches!(load_config(file.path()).unwrap_err(), ConfigError::ParseError(_)));
    }

    #[test]
    fn test_zero_confirm_timeout() {
        let file = write_config("[solana]\nconfirm_timeout_secs = 0\n");
        assert!(matches!(
            load_config(file.path()).unwrap_err(),
            ConfigError::ValidationError(_)
        ));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("RPC_URL", "https://rpc.example.com"),
            ("WALLET_PRIVATE_KEY", "secret"),
            ("JUPITER_API_KEY", ""),
        ]);

        let mut config = Config::default();
        config.apply_env_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.solana.rpc_url, "https://rpc.example.com");
        assert_eq!(config.solana.private_key.as_deref(), Some("secret"));
        // empty values are ignored
        assert!(config.jupiter.api_key.is_none());
    }

    #[test]
    fn test_derived_settings() {
        let file = write_config(&create_valid_config());
        let config = load_config(file.path()).unwrap();

        let jupiter = config.jupiter_config();
        assert_eq!(jupiter.api_base_url, "https://quote-api.jup.ag/v6");
        assert_eq!(jupiter.timeout, Duration::from_secs(10));

        let confirmation = config.confirmation_settings();
        assert_eq!(confirmation.timeout, Duration::from_secs(45));
        assert_eq!(confirmation.poll_interval, Duration::from_millis(250));

        let round_trip = config.round_trip_config();
        assert_eq!(round_trip.settle_delay, Duration::from_millis(3000));
        assert_eq!(round_trip.unconfirmed_buy_policy, UnconfirmedBuyPolicy::Abort);
    }
}
