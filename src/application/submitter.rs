//! Transaction Submitter
//!
//! Deserializes the aggregator's transaction, signs it with the wallet,
//! broadcasts it and waits for confirmation. Only deserialization and signing
//! errors are returned; broadcast and confirmation problems are recorded on
//! the [`ExecutionResult`].

use solana_sdk::transaction::VersionedTransaction;

use crate::adapters::solana::WalletManager;
use crate::domain::ExecutionResult;
use crate::ports::{
    ConfirmationOutcome, NetworkClient, SendOptions, SwapError, UnsignedTransactionPayload,
};

pub struct TransactionSubmitter<N> {
    network: N,
    send_options: SendOptions,
}

impl<N: NetworkClient> TransactionSubmitter<N> {
    pub fn new(network: N) -> Self {
        Self {
            network,
            send_options: SendOptions::default(),
        }
    }

    pub fn with_send_options(mut self, options: SendOptions) -> Self {
        self.send_options = options;
        self
    }

    pub fn network(&self) -> &N {
        &self.network
    }

    /// Sign and submit `payload`. `expected_output` comes from the quote the
    /// payload was built for and is reported as-is.
    pub async fn sign_and_submit(
        &self,
        payload: &UnsignedTransactionPayload,
        wallet: &WalletManager,
        expected_output: u64,
    ) -> Result<ExecutionResult, SwapError> {
        let unsigned: VersionedTransaction = bincode::deserialize(payload.as_bytes())
            .map_err(|e| SwapError::DeserializationFailure(e.to_string()))?;

        let signed = wallet
            .sign_versioned_transaction(unsigned)
            .map_err(|e| SwapError::SigningFailure(e.to_string()))?;

        let signature = match self
            .network
            .send_raw_transaction(&signed, self.send_options)
            .await
        {
            Ok(signature) => signature,
            Err(e) => {
                tracing::warn!("Broadcast failed, continuing without a transaction id: {}", e);
                return Ok(ExecutionResult::not_broadcast(expected_output, e.to_string()));
            }
        };
        tracing::info!("Transaction sent: https://solscan.io/tx/{}", signature);

        match self.network.confirm_transaction(&signature).await {
            ConfirmationOutcome::Confirmed => {
                tracing::info!("Transaction {} confirmed", signature);
                Ok(ExecutionResult::confirmed(expected_output, signature))
            }
            ConfirmationOutcome::Failed(reason) => {
                let warning = SwapError::ConfirmationTimeout(reason).to_string();
                tracing::warn!("{} ({})", warning, signature);
                Ok(ExecutionResult::unconfirmed(expected_output, signature, warning))
            }
            ConfirmationOutcome::TimedOut => {
                let warning =
                    SwapError::ConfirmationTimeout("timed out waiting for confirmation".into())
                        .to_string();
                tracing::warn!("{} ({})", warning, signature);
                Ok(ExecutionResult::unconfirmed(expected_output, signature, warning))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mocks::{unsigned_payload_for, MockNetwork};
    use solana_sdk::pubkey::Pubkey;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_confirmed_submission() {
        let wallet = WalletManager::new_random();
        let network = Arc::new(MockNetwork::new());
        let submitter = TransactionSubmitter::new(Arc::clone(&network));

        let payload = unsigned_payload_for(&wallet.pubkey());
        let result = submitter.sign_and_submit(&payload, &wallet, 42).await.unwrap();

        assert!(result.confirmed);
        assert_eq!(result.output_amount, 42);

        let sends = network.sends();
        assert_eq!(sends.len(), 1);
        assert!(sends[0].options.skip_preflight);
        assert_eq!(sends[0].options.max_retries, 100);
        assert!(sends[0].transaction.verify_with_results()[0]);
        assert_eq!(
            result.transaction_id.as_deref(),
            Some(sends[0].transaction.signatures[0].to_string().as_str())
        );
        assert_eq!(network.confirms()[0].0, result.transaction_id.clone().unwrap());
    }

    #[tokio::test]
    async fn test_garbage_payload_is_deserialization_failure() {
        let wallet = WalletManager::new_random();
        let network = Arc::new(MockNetwork::new());
        let submitter = TransactionSubmitter::new(Arc::clone(&network));

        let payload = UnsignedTransactionPayload::new(vec![0xff; 7]);
        let result = submitter.sign_and_submit(&payload, &wallet, 42).await;

        assert!(matches!(result, Err(SwapError::DeserializationFailure(_))));
        assert!(network.sends().is_empty());
    }

    #[tokio::test]
    async fn test_wrong_signer_is_signing_failure() {
        let wallet = WalletManager::new_random();
        let network = Arc::new(MockNetwork::new());
        let submitter = TransactionSubmitter::new(Arc::clone(&network));

        let payload = unsigned_payload_for(&Pubkey::new_unique());
        let result = submitter.sign_and_submit(&payload, &wallet, 42).await;

        assert!(matches!(result, Err(SwapError::SigningFailure(_))));
        assert!(network.sends().is_empty());
    }

    #[tokio::test]
    async fn test_broadcast_failure_is_not_fatal() {
        let wallet = WalletManager::new_random();
        let network = Arc::new(
            MockNetwork::new().with_send_failure(SwapError::BroadcastFailure("node down".into())),
        );
        let submitter = TransactionSubmitter::new(Arc::clone(&network));

        let payload = unsigned_payload_for(&wallet.pubkey());
        let result = submitter.sign_and_submit(&payload, &wallet, 42).await.unwrap();

        assert!(!result.confirmed);
        assert!(result.transaction_id.is_none());
        assert_eq!(result.output_amount, 42);
        assert!(result.warning.unwrap().contains("node down"));
        assert!(network.confirms().is_empty());
    }

    #[tokio::test]
    async fn test_confirmation_timeout_is_not_fatal() {
        let wallet = WalletManager::new_random();
        let network = Arc::new(MockNetwork::new().with_confirmation(ConfirmationOutcome::TimedOut));
        let submitter = TransactionSubmitter::new(Arc::clone(&network));

        let payload = unsigned_payload_for(&wallet.pubkey());
        let result = submitter.sign_and_submit(&payload, &wallet, 42).await.unwrap();

        assert!(!result.confirmed);
        assert!(result.transaction_id.is_some());
        assert!(result.warning.unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn test_onchain_rejection_is_not_fatal() {
        let wallet = WalletManager::new_random();
        let network = Arc::new(MockNetwork::new().with_confirmation(ConfirmationOutcome::Failed(
            "custom program error: 0x1771".into(),
        )));
        let submitter = TransactionSubmitter::new(Arc::clone(&network));

        let payload = unsigned_payload_for(&wallet.pubkey());
        let result = submitter.sign_and_submit(&payload, &wallet, 42).await.unwrap();

        assert!(!result.confirmed);
        assert!(result.warning.unwrap().contains("0x1771"));
    }

    #[tokio::test]
    async fn test_custom_send_options() {
        let wallet = WalletManager::new_random();
        let network = Arc::new(MockNetwork::new());
        let submitter = TransactionSubmitter::new(Arc::clone(&network)).with_send_options(SendOptions {
            skip_preflight: false,
            max_retries: 5,
        });

        let payload = unsigned_payload_for(&wallet.pubkey());
        submitter.sign_and_submit(&payload, &wallet, 1).await.unwrap();

        assert!(!network.sends()[0].options.skip_preflight);
        assert_eq!(network.sends()[0].options.max_retries, 5);
    }
}
