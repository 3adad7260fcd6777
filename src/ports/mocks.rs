//! Scripted port implementations for tests
//!
//! Compiled for unit tests and behind the `test-utils` feature for the
//! integration tests.
//!
//! Each mock records its calls (with a tokio timestamp, so paused-clock tests
//! can check ordering and delays) and answers from a queue of scripted results.
//! An empty queue falls back to a successful default.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use solana_sdk::{
    hash::Hash,
    message::{Message, VersionedMessage},
    pubkey::Pubkey,
    signature::Signature,
    transaction::VersionedTransaction,
};
use tokio::time::Instant;

use crate::domain::AssetId;
use super::execution::{
    ConfirmationOutcome, NetworkClient, QuoteProvider, SendOptions, SwapError,
    SwapTransactionBuilder,
};
use super::models::{Quote, UnsignedTransactionPayload};

/// Serialized, unsigned transaction whose only required signer is `payer`
pub fn unsigned_payload_for(payer: &Pubkey) -> UnsignedTransactionPayload {
    let message = Message::new_with_blockhash(&[], Some(payer), &Hash::new_unique());
    let required = message.header.num_required_signatures as usize;
    let transaction = VersionedTransaction {
        signatures: vec![Signature::default(); required],
        message: VersionedMessage::Legacy(message),
    };
    let bytes = bincode::serialize(&transaction).expect("transaction serializes");
    UnsignedTransactionPayload::new(bytes)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteCall {
    pub from: AssetId,
    pub to: AssetId,
    pub amount: u64,
    pub slippage_bps: u16,
    pub at: Instant,
}

/// Quote provider answering with scripted output amounts
#[derive(Debug, Default)]
pub struct MockQuotes {
    script: Mutex<VecDeque<Result<u64, SwapError>>>,
    calls: Mutex<Vec<QuoteCall>>,
}

impl MockQuotes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a quote with the given expected output
    pub fn with_output(self, output_amount: u64) -> Self {
        self.script.lock().unwrap().push_back(Ok(output_amount));
        self
    }

    /// Queue a failure
    pub fn with_failure(self, error: SwapError) -> Self {
        self.script.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn calls(&self) -> Vec<QuoteCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuoteProvider for MockQuotes {
    async fn get_quote(
        &self,
        from: &AssetId,
        to: &AssetId,
        input_amount: u64,
        max_slippage_bps: u16,
    ) -> Result<Quote, SwapError> {
        self.calls.lock().unwrap().push(QuoteCall {
            from: from.clone(),
            to: to.clone(),
            amount: input_amount,
            slippage_bps: max_slippage_bps,
            at: Instant::now(),
        });

        let output = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(input_amount))?;

        let payload = serde_json::json!({
            "inputMint": from.as_str(),
            "outputMint": to.as_str(),
            "inAmount": input_amount.to_string(),
            "outAmount": output.to_string(),
        });
        Ok(Quote::new(from.clone(), to.clone(), input_amount, output, payload))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuildCall {
    pub quote: Quote,
    pub signer: String,
    pub at: Instant,
}

/// Swap builder returning an unsigned transaction for a fixed payer
#[derive(Debug)]
pub struct MockBuilder {
    payer: Pubkey,
    script: Mutex<VecDeque<Result<UnsignedTransactionPayload, SwapError>>>,
    calls: Mutex<Vec<BuildCall>>,
}

impl MockBuilder {
    pub fn new(payer: Pubkey) -> Self {
        Self {
            payer,
            script: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_payload(self, payload: UnsignedTransactionPayload) -> Self {
        self.script.lock().unwrap().push_back(Ok(payload));
        self
    }

    pub fn with_failure(self, error: SwapError) -> Self {
        self.script.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn calls(&self) -> Vec<BuildCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SwapTransactionBuilder for MockBuilder {
    async fn build_transaction(
        &self,
        quote: &Quote,
        signer: &str,
    ) -> Result<UnsignedTransactionPayload, SwapError> {
        self.calls.lock().unwrap().push(BuildCall {
            quote: quote.clone(),
            signer: signer.to_string(),
            at: Instant::now(),
        });

        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(unsigned_payload_for(&self.payer)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SendCall {
    pub transaction: VersionedTransaction,
    pub options: SendOptions,
    pub at: Instant,
}

/// Network client accepting every broadcast unless scripted otherwise
#[derive(Debug, Default)]
pub struct MockNetwork {
    send_script: Mutex<VecDeque<Result<(), SwapError>>>,
    confirm_script: Mutex<VecDeque<ConfirmationOutcome>>,
    sends: Mutex<Vec<SendCall>>,
    confirms: Mutex<Vec<(String, Instant)>>,
}

impl MockNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_send_failure(self, error: SwapError) -> Self {
        self.send_script.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn with_confirmation(self, outcome: ConfirmationOutcome) -> Self {
        self.confirm_script.lock().unwrap().push_back(outcome);
        self
    }

    pub fn sends(&self) -> Vec<SendCall> {
        self.sends.lock().unwrap().clone()
    }

    pub fn confirms(&self) -> Vec<(String, Instant)> {
        self.confirms.lock().unwrap().clone()
    }
}

#[async_trait]
impl NetworkClient for MockNetwork {
    async fn send_raw_transaction(
        &self,
        transaction: &VersionedTransaction,
        options: SendOptions,
    ) -> Result<String, SwapError> {
        self.sends.lock().unwrap().push(SendCall {
            transaction: transaction.clone(),
            options,
            at: Instant::now(),
        });

        self.send_script.lock().unwrap().pop_front().unwrap_or(Ok(()))?;
        transaction
            .signatures
            .first()
            .map(|signature| signature.to_string())
            .ok_or_else(|| SwapError::BroadcastFailure("transaction has no signatures".into()))
    }

    async fn confirm_transaction(&self, signature: &str) -> ConfirmationOutcome {
        self.confirms
            .lock()
            .unwrap()
            .push((signature.to_string(), Instant::now()));

        self.confirm_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(ConfirmationOutcome::Confirmed)
    }
}
