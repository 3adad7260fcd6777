use async_trait::async_trait;
use solana_client::rpc_client::RpcClient;
use solana_client::rpc_config::RpcSendTransactionConfig;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    signature::Signature,
    transaction::VersionedTransaction,
};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;

use crate::ports::{ConfirmationOutcome, NetworkClient, SendOptions, SwapError};

pub const MAINNET_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

#[derive(Debug, Error)]
pub enum SolanaClientError {
    #[error("RPC request failed: {0}")]
    RpcError(String),
    #[error("Transaction failed: {0}")]
    TransactionError(String),
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),
    #[error("Unknown commitment level: {0}")]
    InvalidCommitment(String),
}

/// How long and how often to poll for a signature status
#[derive(Debug, Clone, Copy)]
pub struct ConfirmationSettings {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for ConfirmationSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            poll_interval: Duration::from_millis(500),
        }
    }
}

/// Parse "processed" / "confirmed" / "finalized"
pub fn parse_commitment(level: &str) -> Result<CommitmentConfig, SolanaClientError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "processed" => Ok(CommitmentConfig::processed()),
        "confirmed" => Ok(CommitmentConfig::confirmed()),
        "finalized" => Ok(CommitmentConfig::finalized()),
        other => Err(SolanaClientError::InvalidCommitment(other.to_string())),
    }
}

/// Wrapper around Solana RPC client with async-compatible methods
#[derive(Clone)]
pub struct SolanaClient {
    client: Arc<RpcClient>,
    commitment: CommitmentConfig,
    confirmation: ConfirmationSettings,
}

impl SolanaClient {
    /// Create a new Solana RPC client at "confirmed" commitment
    pub fn new(rpc_url: String) -> Self {
        Self::with_settings(rpc_url, CommitmentConfig::confirmed(), ConfirmationSettings::default())
    }

    pub fn with_settings(
        rpc_url: String,
        commitment: CommitmentConfig,
        confirmation: ConfirmationSettings,
    ) -> Self {
        let client = Arc::new(RpcClient::new_with_commitment(rpc_url, commitment));
        Self {
            client,
            commitment,
            confirmation,
        }
    }

    pub fn url(&self) -> String {
        self.client.url()
    }

    /// Get SOL balance for a public key
    pub async fn get_balance(&self, pubkey: &str) -> Result<u64, SolanaClientError> {
        let pubkey = solana_sdk::pubkey::Pubkey::from_str(pubkey)
            .map_err(|e| SolanaClientError::InvalidPublicKey(e.to_string()))?;

        // Spawn blocking to make sync RPC call async-compatible
        let client = Arc::clone(&self.client);
        tokio::task::spawn_blocking(move || {
            client
                .get_balance(&pubkey)
                .map_err(|e| SolanaClientError::RpcError(e.to_string()))
        })
        .await
        .map_err(|e| SolanaClientError::RpcError(format!("Task join error: {}", e)))?
    }

    /// Send a signed versioned transaction with explicit send options
    pub async fn send_transaction(
        &self,
        transaction: &VersionedTransaction,
        options: SendOptions,
    ) -> Result<String, SolanaClientError> {
        let tx = transaction.clone();
        let client = Arc::clone(&self.client);
        let config = RpcSendTransactionConfig {
            skip_preflight: options.skip_preflight,
            max_retries: Some(options.max_retries),
            ..RpcSendTransactionConfig::default()
        };

        tokio::task::spawn_blocking(move || {
            client
                .send_transaction_with_config(&tx, config)
                .map(|sig| sig.to_string())
                .map_err(|e| SolanaClientError::TransactionError(e.to_string()))
        })
        .await
        .map_err(|e| SolanaClientError::RpcError(format!("Task join error: {}", e)))?
    }

    /// Look up a signature once at the client's commitment.
    ///
    /// `None` means the network has not seen it yet; `Some(Err)` means it
    /// landed and failed.
    pub async fn signature_status(
        &self,
        signature_str: &str,
    ) -> Result<Option<Result<(), String>>, SolanaClientError> {
        let signature = Signature::from_str(signature_str)
            .map_err(|e| SolanaClientError::InvalidSignature(e.to_string()))?;

        let client = Arc::clone(&self.client);
        let commitment = self.commitment;
        tokio::task::spawn_blocking(move || {
            client
                .get_signature_status_with_commitment(&signature, commitment)
                .map(|status| status.map(|result| result.map_err(|e| e.to_string())))
                .map_err(|e| SolanaClientError::RpcError(e.to_string()))
        })
        .await
        .map_err(|e| SolanaClientError::RpcError(format!("Task join error: {}", e)))?
    }

    /// Poll a signature until it lands, fails, or the timeout expires
    pub async fn wait_for_confirmation(&self, signature: &str) -> ConfirmationOutcome {
        let deadline = Instant::now() + self.confirmation.timeout;

        loop {
            match self.signature_status(signature).await {
                Ok(Some(Ok(()))) => return ConfirmationOutcome::Confirmed,
                Ok(Some(Err(e))) => return ConfirmationOutcome::Failed(e),
                Ok(None) => {}
                Err(SolanaClientError::InvalidSignature(e)) => {
                    return ConfirmationOutcome::Failed(format!("Invalid signature: {}", e));
                }
                Err(e) => tracing::debug!("Signature status lookup failed: {}", e),
            }

            if Instant::now() >= deadline {
                return ConfirmationOutcome::TimedOut;
            }
            tokio::time::sleep(self.confirmation.poll_interval).await;
        }
    }
}

#[async_trait]
impl NetworkClient for SolanaClient {
    async fn send_raw_transaction(
        &self,
        transaction: &VersionedTransaction,
        options: SendOptions,
    ) -> Result<String, SwapError> {
        self.send_transaction(transaction, options)
            .await
            .map_err(|e| SwapError::BroadcastFailure(e.to_string()))
    }

    async fn confirm_transaction(&self, signature: &str) -> ConfirmationOutcome {
        self.wait_for_confirmation(signature).await
    }
}
