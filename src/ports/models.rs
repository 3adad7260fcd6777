//! Data structures passed between the pipeline ports
//!
//! Quotes and transaction payloads are kept opaque so the aggregator adapter
//! can be replaced without touching the orchestration code.

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::domain::{ensure_distinct, AssetId};
use super::execution::SwapError;

/// Price quote for an ordered asset pair.
///
/// The aggregator's response body is kept verbatim in `payload` because the
/// transaction builder must receive exactly what the quote endpoint returned.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    input_mint: AssetId,
    output_mint: AssetId,
    input_amount: u64,
    output_amount: u64,
    payload: serde_json::Value,
}

impl Quote {
    pub fn new(
        input_mint: AssetId,
        output_mint: AssetId,
        input_amount: u64,
        output_amount: u64,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            input_mint,
            output_mint,
            input_amount,
            output_amount,
            payload,
        }
    }

    pub fn input_mint(&self) -> &AssetId {
        &self.input_mint
    }

    pub fn output_mint(&self) -> &AssetId {
        &self.output_mint
    }

    /// Declared input amount in base units
    pub fn input_amount(&self) -> u64 {
        self.input_amount
    }

    /// Expected output amount in base units
    pub fn output_amount(&self) -> u64 {
        self.output_amount
    }

    /// Aggregator-specific body, untouched
    pub fn payload(&self) -> &serde_json::Value {
        &self.payload
    }

    /// Check the quote answers the request it was fetched for
    pub fn ensure_matches(
        &self,
        from: &AssetId,
        to: &AssetId,
        requested_amount: u64,
    ) -> Result<(), SwapError> {
        if self.input_amount != requested_amount {
            return Err(SwapError::QuoteFailure(format!(
                "quoted input {} does not match requested amount {}",
                self.input_amount, requested_amount
            )));
        }
        if &self.input_mint != from || &self.output_mint != to {
            return Err(SwapError::QuoteFailure(format!(
                "quote is for {} -> {}, requested {} -> {}",
                self.input_mint.label(),
                self.output_mint.label(),
                from.label(),
                to.label()
            )));
        }
        Ok(())
    }
}

/// One leg of a swap, built fresh for every leg
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
    pub from_asset: AssetId,
    pub to_asset: AssetId,
    /// Input amount in base units
    pub input_amount: u64,
    /// Base58 public key of the signer
    pub signer: String,
}

impl SwapRequest {
    /// Create a request, rejecting self-swaps and empty amounts
    pub fn new(
        from_asset: AssetId,
        to_asset: AssetId,
        input_amount: u64,
        signer: String,
    ) -> Result<Self, SwapError> {
        ensure_distinct(&from_asset, &to_asset)
            .map_err(|e| SwapError::InvalidRequest(e.to_string()))?;

        if input_amount == 0 {
            return Err(SwapError::InvalidRequest(format!(
                "input amount for {} -> {} must be greater than zero",
                from_asset.label(),
                to_asset.label()
            )));
        }

        Ok(Self {
            from_asset,
            to_asset,
            input_amount,
            signer,
        })
    }
}

/// Serialized transaction returned by the builder, not yet signed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTransactionPayload(Vec<u8>);

impl UnsignedTransactionPayload {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Decode a base64 transaction as returned by the swap endpoint
    pub fn from_base64(encoded: &str) -> Result<Self, base64::DecodeError> {
        base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map(Self)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::pubkey::Pubkey;

    fn token() -> AssetId {
        AssetId::from(Pubkey::new_unique())
    }

    #[test]
    fn test_swap_request_valid() {
        let target = token();
        let req = SwapRequest::new(AssetId::native(), target.clone(), 1_000, "wallet".into()).unwrap();
        assert_eq!(req.to_asset, target);
        assert_eq!(req.input_amount, 1_000);
    }

    #[test]
    fn test_swap_request_rejects_native_self_swap() {
        let result = SwapRequest::new(AssetId::native(), AssetId::native(), 1_000, "wallet".into());
        assert!(matches!(result, Err(SwapError::InvalidRequest(_))));
    }

    #[test]
    fn test_swap_request_rejects_zero_amount() {
        let result = SwapRequest::new(AssetId::native(), token(), 0, "wallet".into());
        assert!(matches!(result, Err(SwapError::InvalidRequest(_))));
    }

    #[test]
    fn test_quote_matches_request() {
        let target = token();
        let quote = Quote::new(AssetId::native(), target.clone(), 1_000, 5_000, serde_json::json!({}));
        assert!(quote.ensure_matches(&AssetId::native(), &target, 1_000).is_ok());
    }

    #[test]
    fn test_quote_amount_mismatch() {
        let target = token();
        let quote = Quote::new(AssetId::native(), target.clone(), 999, 5_000, serde_json::json!({}));
        let result = quote.ensure_matches(&AssetId::native(), &target, 1_000);
        assert!(matches!(result, Err(SwapError::QuoteFailure(_))));
    }

    #[test]
    fn test_quote_pair_mismatch() {
        let target = token();
        let quote = Quote::new(target.clone(), AssetId::native(), 1_000, 5_000, serde_json::json!({}));
        let result = quote.ensure_matches(&AssetId::native(), &target, 1_000);
        assert!(matches!(result, Err(SwapError::QuoteFailure(_))));
    }

    #[test]
    fn test_payload_from_base64() {
        let payload = UnsignedTransactionPayload::from_base64("AQID").unwrap();
        assert_eq!(payload.as_bytes(), &[1, 2, 3]);
        assert_eq!(payload.len(), 3);
        assert!(UnsignedTransactionPayload::from_base64("!!!").is_err());
    }
}
