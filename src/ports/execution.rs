//! Execution Port - Swap pipeline interfaces
//!
//! Quote fetching, transaction building and network submission are defined as
//! traits so the aggregator and the RPC node can be swapped or mocked.

use std::sync::Arc;

use async_trait::async_trait;
use solana_sdk::transaction::VersionedTransaction;
use thiserror::Error;

use crate::domain::AssetId;
use super::models::{Quote, UnsignedTransactionPayload};

/// Slippage tolerance sent with every quote request (0.5%)
pub const DEFAULT_SLIPPAGE_BPS: u16 = 50;

/// Node-level broadcast retries requested on send
pub const BROADCAST_MAX_RETRIES: usize = 100;

/// Failures of the swap pipeline, one variant per stage
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SwapError {
    #[error("Invalid swap request: {0}")]
    InvalidRequest(String),
    #[error("Quote request failed: {0}")]
    QuoteFailure(String),
    #[error("Swap transaction build failed: {0}")]
    TransactionBuildFailure(String),
    #[error("Transaction deserialization failed: {0}")]
    DeserializationFailure(String),
    #[error("Transaction signing failed: {0}")]
    SigningFailure(String),
    #[error("Transaction broadcast failed: {0}")]
    BroadcastFailure(String),
    #[error("Transaction not confirmed: {0}")]
    ConfirmationTimeout(String),
}

impl SwapError {
    /// Fatal errors abort the leg; broadcast and confirmation failures do not
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            SwapError::BroadcastFailure(_) | SwapError::ConfirmationTimeout(_)
        )
    }
}

/// Options for broadcasting a signed transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendOptions {
    pub skip_preflight: bool,
    pub max_retries: usize,
}

impl Default for SendOptions {
    fn default() -> Self {
        Self {
            skip_preflight: true,
            max_retries: BROADCAST_MAX_RETRIES,
        }
    }
}

/// How a confirmation wait ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationOutcome {
    Confirmed,
    /// The network rejected the transaction or the status lookup failed
    Failed(String),
    TimedOut,
}

/// Aggregator quote endpoint
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Quote `input_amount` of `from` into `to`.
    ///
    /// Returns `SwapError::QuoteFailure` on any transport, status or body
    /// problem, including a quote whose input amount differs from the request.
    async fn get_quote(
        &self,
        from: &AssetId,
        to: &AssetId,
        input_amount: u64,
        max_slippage_bps: u16,
    ) -> Result<Quote, SwapError>;
}

/// Aggregator swap-build endpoint
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SwapTransactionBuilder: Send + Sync {
    /// Build an unsigned transaction realizing `quote` for `signer`
    async fn build_transaction(
        &self,
        quote: &Quote,
        signer: &str,
    ) -> Result<UnsignedTransactionPayload, SwapError>;
}

/// Blockchain node used for broadcast and confirmation
#[async_trait]
pub trait NetworkClient: Send + Sync {
    /// Broadcast a signed transaction, returning its signature.
    /// Errors are `SwapError::BroadcastFailure`.
    async fn send_raw_transaction(
        &self,
        transaction: &VersionedTransaction,
        options: SendOptions,
    ) -> Result<String, SwapError>;

    /// Wait until the transaction is confirmed, rejected, or the wait times out
    async fn confirm_transaction(&self, signature: &str) -> ConfirmationOutcome;
}

#[async_trait]
impl<T: QuoteProvider + ?Sized> QuoteProvider for Arc<T> {
    async fn get_quote(
        &self,
        from: &AssetId,
        to: &AssetId,
        input_amount: u64,
        max_slippage_bps: u16,
    ) -> Result<Quote, SwapError> {
        (**self).get_quote(from, to, input_amount, max_slippage_bps).await
    }
}

#[async_trait]
impl<T: SwapTransactionBuilder + ?Sized> SwapTransactionBuilder for Arc<T> {
    async fn build_transaction(
        &self,
        quote: &Quote,
        signer: &str,
    ) -> Result<UnsignedTransactionPayload, SwapError> {
        (**self).build_transaction(quote, signer).await
    }
}

#[async_trait]
impl<T: NetworkClient + ?Sized> NetworkClient for Arc<T> {
    async fn send_raw_transaction(
        &self,
        transaction: &VersionedTransaction,
        options: SendOptions,
    ) -> Result<String, SwapError> {
        (**self).send_raw_transaction(transaction, options).await
    }

    async fn confirm_transaction(&self, signature: &str) -> ConfirmationOutcome {
        (**self).confirm_transaction(signature).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(SwapError::QuoteFailure("x".into()).is_fatal());
        assert!(SwapError::TransactionBuildFailure("x".into()).is_fatal());
        assert!(SwapError::DeserializationFailure("x".into()).is_fatal());
        assert!(SwapError::SigningFailure("x".into()).is_fatal());
        assert!(SwapError::InvalidRequest("x".into()).is_fatal());
        assert!(!SwapError::BroadcastFailure("x".into()).is_fatal());
        assert!(!SwapError::ConfirmationTimeout("x".into()).is_fatal());
    }

    #[test]
    fn test_send_options_default() {
        let options = SendOptions::default();
        assert!(options.skip_preflight);
        assert_eq!(options.max_retries, 100);
    }

    #[test]
    fn test_error_display() {
        let err = SwapError::QuoteFailure("HTTP 500".to_string());
        assert_eq!(err.to_string(), "Quote request failed: HTTP 500");
    }
}
