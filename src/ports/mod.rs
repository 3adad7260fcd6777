//! Ports Layer - Trait definitions for external dependencies
//!
//! Following hexagonal architecture, these traits abstract:
//! - Price quotes (aggregator quote endpoint)
//! - Transaction building (aggregator swap endpoint)
//! - Broadcast and confirmation (Solana RPC)

pub mod execution;
pub mod models;
#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

pub use execution::{
    ConfirmationOutcome, NetworkClient, QuoteProvider, SendOptions, SwapError,
    SwapTransactionBuilder, BROADCAST_MAX_RETRIES, DEFAULT_SLIPPAGE_BPS,
};
pub use models::{Quote, SwapRequest, UnsignedTransactionPayload};
