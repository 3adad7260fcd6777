//! Swap Executor
//!
//! Runs one leg through the pipeline: quote, build, sign and submit.

use crate::adapters::solana::WalletManager;
use crate::domain::ExecutionResult;
use crate::ports::{
    NetworkClient, QuoteProvider, SendOptions, SwapError, SwapRequest, SwapTransactionBuilder,
    DEFAULT_SLIPPAGE_BPS,
};
use super::submitter::TransactionSubmitter;

pub struct SwapExecutor<Q, B, N> {
    quotes: Q,
    builder: B,
    submitter: TransactionSubmitter<N>,
}

impl<Q, B, N> SwapExecutor<Q, B, N>
where
    Q: QuoteProvider,
    B: SwapTransactionBuilder,
    N: NetworkClient,
{
    pub fn new(quotes: Q, builder: B, network: N) -> Self {
        Self {
            quotes,
            builder,
            submitter: TransactionSubmitter::new(network),
        }
    }

    pub fn with_send_options(mut self, options: SendOptions) -> Self {
        self.submitter = self.submitter.with_send_options(options);
        self
    }

    /// Execute a single swap leg at the fixed 50 bps slippage.
    ///
    /// The quote fetched here is the only one handed to the builder, and its
    /// expected output becomes the result's output amount.
    pub async fn execute(
        &self,
        request: &SwapRequest,
        wallet: &WalletManager,
    ) -> Result<ExecutionResult, SwapError> {
        if request.signer != wallet.public_key() {
            return Err(SwapError::InvalidRequest(format!(
                "request signer {} does not match wallet {}",
                request.signer,
                wallet.public_key()
            )));
        }

        tracing::info!(
            "Swap from {} to {} ({} base units)",
            request.from_asset.label(),
            request.to_asset.label(),
            request.input_amount
        );

        let quote = self
            .quotes
            .get_quote(
                &request.from_asset,
                &request.to_asset,
                request.input_amount,
                DEFAULT_SLIPPAGE_BPS,
            )
            .await?;
        tracing::debug!(
            "Quote: {} -> {} expected",
            quote.input_amount(),
            quote.output_amount()
        );

        let payload = self.builder.build_transaction(&quote, &request.signer).await?;
        tracing::debug!("Swap transaction built ({} bytes)", payload.len());

        self.submitter
            .sign_and_submit(&payload, wallet, quote.output_amount())
            .await
    }
}
