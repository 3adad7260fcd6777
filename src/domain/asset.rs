//! Asset identifiers
//!
//! Tradable assets are identified by their mint address. The native coin is
//! represented by the wrapped-SOL mint, which Jupiter wraps and unwraps for us.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

/// Wrapped SOL mint, used as the native-asset sentinel
pub const NATIVE_MINT: &str = "So11111111111111111111111111111111111111112";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssetError {
    #[error("Invalid mint address '{0}': {1}")]
    InvalidMint(String, String),
    #[error("Cannot swap {0} into itself")]
    SelfSwap(String),
}

/// Opaque identifier of a tradable asset (a mint address)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    /// The native-asset sentinel
    pub fn native() -> Self {
        Self(NATIVE_MINT.to_string())
    }

    /// Parse and validate a base58 mint address
    pub fn parse(mint: &str) -> Result<Self, AssetError> {
        let trimmed = mint.trim();
        Pubkey::from_str(trimmed)
            .map_err(|e| AssetError::InvalidMint(trimmed.to_string(), e.to_string()))?;
        Ok(Self(trimmed.to_string()))
    }

    pub fn is_native(&self) -> bool {
        self.0 == NATIVE_MINT
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short label for logs: "SOL" for the native sentinel, the mint otherwise
    pub fn label(&self) -> &str {
        if self.is_native() {
            "SOL"
        } else {
            &self.0
        }
    }
}

impl From<Pubkey> for AssetId {
    fn from(pubkey: Pubkey) -> Self {
        Self(pubkey.to_string())
    }
}

impl FromStr for AssetId {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reject a pair whose two sides are the same asset
pub fn ensure_distinct(from: &AssetId, to: &AssetId) -> Result<(), AssetError> {
    if from == to {
        return Err(AssetError::SelfSwap(from.label().to_string()));
    }
    Ok(())
}
