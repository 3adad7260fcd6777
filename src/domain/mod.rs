//! Domain Layer - Core types for the round-trip swapper
//!
//! Pure types and arithmetic with no network access:
//! - `asset`: Mint identifiers and the native-asset sentinel
//! - `amount`: Lamport conversions and the sell-leg buffer
//! - `execution`: Per-leg execution results

pub mod asset;
pub mod amount;
pub mod execution;

pub use asset::{AssetId, AssetError, NATIVE_MINT, ensure_distinct};
pub use amount::{
    AmountError, LAMPORTS_PER_SOL, SELL_BUFFER_BPS, format_sol, sell_amount_after_buffer,
    sol_to_lamports,
};
pub use execution::{ExecutionResult, LegDirection};
