//! Round-Trip Orchestrator
//!
//! Buys a target token with SOL, waits for the wallet state to settle, then
//! sells the bought amount (minus a small buffer) back into SOL.
//!
//! ```text
//! Idle -> BuyPending -> BuySettling -> SellPending -> Done
//!            \______________\______________\______> Failed
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::adapters::solana::WalletManager;
use crate::domain::{sell_amount_after_buffer, AssetId, ExecutionResult, LegDirection};
use crate::ports::{NetworkClient, QuoteProvider, SwapError, SwapRequest, SwapTransactionBuilder};
use super::swap_executor::SwapExecutor;

/// Delay between the buy result and the first sell-leg request
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundTripState {
    Idle,
    BuyPending,
    BuySettling,
    SellPending,
    Done,
    Failed,
}

/// What to do when the buy transaction could not be confirmed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnconfirmedBuyPolicy {
    /// Sell the quoted amount anyway
    #[default]
    Proceed,
    /// Stop before the sell leg
    Abort,
}

#[derive(Debug, Clone)]
pub struct RoundTripConfig {
    pub settle_delay: Duration,
    pub unconfirmed_buy_policy: UnconfirmedBuyPolicy,
}

impl Default for RoundTripConfig {
    fn default() -> Self {
        Self {
            settle_delay: DEFAULT_SETTLE_DELAY,
            unconfirmed_buy_policy: UnconfirmedBuyPolicy::Proceed,
        }
    }
}

#[derive(Debug, Error)]
pub enum RoundTripError {
    #[error("Buy leg failed: {0}")]
    BuyFailed(#[source] SwapError),
    #[error("Buy transaction was not confirmed, sell leg skipped")]
    BuyUnconfirmed { buy: ExecutionResult },
    #[error("Sell leg failed: {source}")]
    SellFailed {
        buy: ExecutionResult,
        #[source]
        source: SwapError,
    },
}

impl RoundTripError {
    /// Buy result, if the buy leg got as far as submission
    pub fn buy_result(&self) -> Option<&ExecutionResult> {
        match self {
            RoundTripError::BuyFailed(_) => None,
            RoundTripError::BuyUnconfirmed { buy } | RoundTripError::SellFailed { buy, .. } => {
                Some(buy)
            }
        }
    }
}

/// Both legs of a completed round trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundTripReport {
    pub target: AssetId,
    pub buy_input_amount: u64,
    pub buy: ExecutionResult,
    pub sell_input_amount: u64,
    pub sell: ExecutionResult,
}

impl RoundTripReport {
    pub fn fully_confirmed(&self) -> bool {
        self.buy.confirmed && self.sell.confirmed
    }
}

pub struct RoundTripOrchestrator<Q, B, N> {
    executor: SwapExecutor<Q, B, N>,
    config: RoundTripConfig,
    state: RoundTripState,
}

impl<Q, B, N> RoundTripOrchestrator<Q, B, N>
where
    Q: QuoteProvider,
    B: SwapTransactionBuilder,
    N: NetworkClient,
{
    pub fn new(executor: SwapExecutor<Q, B, N>, config: RoundTripConfig) -> Self {
        Self {
            executor,
            config,
            state: RoundTripState::Idle,
        }
    }

    pub fn state(&self) -> RoundTripState {
        self.state
    }

    fn transition(&mut self, next: RoundTripState) {
        tracing::debug!("Round trip {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn fail<E>(&mut self, error: E) -> Result<RoundTripReport, E> {
        self.transition(RoundTripState::Failed);
        Err(error)
    }

    /// Buy `target` with `amount_lamports` of SOL and sell it back.
    ///
    /// Any fatal error aborts the round trip; the other leg is never tried
    /// after a failure and nothing is retried.
    pub async fn run(
        &mut self,
        target: &AssetId,
        amount_lamports: u64,
        wallet: &WalletManager,
    ) -> Result<RoundTripReport, RoundTripError> {
        self.state = RoundTripState::Idle;
        let native = AssetId::native();

        let buy_request = match SwapRequest::new(
            native.clone(),
            target.clone(),
            amount_lamports,
            wallet.public_key(),
        ) {
            Ok(request) => request,
            Err(e) => return self.fail(RoundTripError::BuyFailed(e)),
        };

        self.transition(RoundTripState::BuyPending);
        tracing::info!("Buying token...");
        let buy = match self.executor.execute(&buy_request, wallet).await {
            Ok(result) => result,
            Err(e) => return self.fail(RoundTripError::BuyFailed(e)),
        };
        log_leg(LegDirection::Buy, &buy);

        if !buy.confirmed && self.config.unconfirmed_buy_policy == UnconfirmedBuyPolicy::Abort {
            tracing::warn!("Buy not confirmed, aborting before sell leg");
            return self.fail(RoundTripError::BuyUnconfirmed { buy });
        }

        self.transition(RoundTripState::BuySettling);
        tokio::time::sleep(self.config.settle_delay).await;

        let sell_amount = sell_amount_after_buffer(buy.output_amount);
        tracing::info!(
            "Sell amount: {} (buy output {} minus buffer)",
            sell_amount,
            buy.output_amount
        );

        let sell_request = match SwapRequest::new(
            target.clone(),
            native,
            sell_amount,
            wallet.public_key(),
        ) {
            Ok(request) => request,
            Err(source) => return self.fail(RoundTripError::SellFailed { buy, source }),
        };

        self.transition(RoundTripState::SellPending);
        tracing::info!("Selling token...");
        let sell = match self.executor.execute(&sell_request, wallet).await {
            Ok(result) => result,
            Err(source) => return self.fail(RoundTripError::SellFailed { buy, source }),
        };
        log_leg(LegDirection::Sell, &sell);

        self.transition(RoundTripState::Done);
        Ok(RoundTripReport {
            target: target.clone(),
            buy_input_amount: amount_lamports,
            buy,
            sell_input_amount: sell_amount,
            sell,
        })
    }
}

fn log_leg(direction: LegDirection, result: &ExecutionResult) {
    match result.explorer_url() {
        Some(url) => tracing::info!(
            "{:?} TXID: {} confirmed={} ({})",
            direction,
            result.transaction_id.as_deref().unwrap_or_default(),
            result.confirmed,
            url
        ),
        None => tracing::warn!("{:?} leg has no transaction id", direction),
    }
}
