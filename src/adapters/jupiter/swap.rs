//! Jupiter Swap Types
//!
//! Request and response structures for the Jupiter swap-build API.

use serde::{Deserialize, Serialize};

use crate::ports::UnsignedTransactionPayload;

/// Multiplier applied to the network-suggested prioritization fee
pub const PRIORITY_FEE_AUTO_MULTIPLIER: u32 = 2;

/// Body of `POST /swap`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapBuildRequest {
    /// The full quote response from /quote endpoint
    pub quote_response: serde_json::Value,
    /// User's public key (wallet address)
    pub user_public_key: String,
    /// Let Jupiter wrap and unwrap SOL
    pub wrap_and_unwrap_sol: bool,
    /// Let Jupiter size the compute unit limit
    pub dynamic_compute_unit_limit: bool,
    pub prioritization_fee_lamports: PrioritizationFee,
}

impl SwapBuildRequest {
    /// Request with the fixed swap policy: auto wrap/unwrap, dynamic compute
    /// units, and a 2x prioritization fee multiplier
    pub fn new(quote_response: serde_json::Value, user_public_key: String) -> Self {
        Self {
            quote_response,
            user_public_key,
            wrap_and_unwrap_sol: true,
            dynamic_compute_unit_limit: true,
            prioritization_fee_lamports: PrioritizationFee {
                auto_multiplier: PRIORITY_FEE_AUTO_MULTIPLIER,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrioritizationFee {
    pub auto_multiplier: u32,
}

/// Response from Jupiter swap API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapResponse {
    /// Base64 encoded serialized transaction ready to sign and send
    pub swap_transaction: String,
    /// Last valid block height for this transaction
    #[serde(default)]
    pub last_valid_block_height: Option<u64>,
    /// Prioritization fee applied (in lamports)
    #[serde(default)]
    pub prioritization_fee_lamports: Option<u64>,
}

impl SwapResponse {
    /// Decode the transaction field
    pub fn payload(&self) -> Result<UnsignedTransactionPayload, String> {
        let payload = UnsignedTransactionPayload::from_base64(&self.swap_transaction)
            .map_err(|e| format!("swapTransaction is not valid base64: {}", e))?;
        if payload.is_empty() {
            return Err("swapTransaction is empty".to_string());
        }
        Ok(payload)
    }
}
