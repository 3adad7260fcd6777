//! Amount conversions and the sell-leg buffer
//!
//! Everything that crosses a component boundary is an integer amount of base
//! units. Decimal input from the user is converted once, here.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use thiserror::Error;

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Buffer withheld from the buy output before selling, in basis points (0.02%)
pub const SELL_BUFFER_BPS: u64 = 2;

const BPS_DENOMINATOR: u128 = 10_000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("Invalid amount '{0}'")]
    Invalid(String),
    #[error("Amount must be greater than zero")]
    NotPositive,
    #[error("Amount {0} SOL does not fit in u64 lamports")]
    Overflow(String),
}

/// Sell-leg input derived from the buy-leg output.
///
/// `buy_output - (buy_output / 100) * 0.02`, truncated to whole base units.
/// The buffer is rounded up so the result never exceeds the exact value.
pub fn sell_amount_after_buffer(buy_output: u64) -> u64 {
    let scaled = buy_output as u128 * SELL_BUFFER_BPS as u128;
    let buffer = scaled.div_ceil(BPS_DENOMINATOR);
    // buffer <= buy_output, so this cannot underflow
    buy_output - buffer as u64
}

/// Parse a user-supplied SOL amount ("0.5" or "0,5") into lamports.
pub fn sol_to_lamports(input: &str) -> Result<u64, AmountError> {
    let normalized = input.trim().replace(',', ".");
    let sol = Decimal::from_str(&normalized)
        .map_err(|_| AmountError::Invalid(input.trim().to_string()))?;

    if sol <= Decimal::ZERO {
        return Err(AmountError::NotPositive);
    }

    let lamports = sol
        .checked_mul(Decimal::from(LAMPORTS_PER_SOL))
        .ok_or_else(|| AmountError::Overflow(normalized.clone()))?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    let lamports = lamports
        .to_u64()
        .ok_or_else(|| AmountError::Overflow(normalized.clone()))?;

    if lamports == 0 {
        return Err(AmountError::NotPositive);
    }
    Ok(lamports)
}

/// Format lamports as SOL with nine decimals
pub fn format_sol(lamports: u64) -> String {
    let sol = Decimal::from(lamports) / dec!(1000000000);
    format!("{:.9}", sol)
}
