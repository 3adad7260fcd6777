//! Jupiter Adapter
//!
//! Quote fetching and swap-transaction building against the Jupiter
//! DEX aggregator.

mod client;
mod quote;
mod swap;

pub use client::{JupiterClient, JupiterConfig, JupiterError, DEFAULT_API_BASE_URL};
pub use quote::{quote_from_body, QuoteRequest, QuoteResponse};
pub use swap::{PrioritizationFee, SwapBuildRequest, SwapResponse, PRIORITY_FEE_AUTO_MULTIPLIER};
