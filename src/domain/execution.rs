//! Execution results
//!
//! Outcome of one swap leg once the transaction has been handed to the network.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which side of the round trip a leg belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LegDirection {
    /// Native asset into the target token
    Buy,
    /// Target token back into the native asset
    Sell,
}

/// Result of a swap leg.
///
/// `output_amount` is the aggregator's quoted output, not an on-chain
/// measurement. `transaction_id` is `None` when the broadcast failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    /// Expected output in base units
    pub output_amount: u64,
    /// Transaction signature, if the network accepted the broadcast
    pub transaction_id: Option<String>,
    /// Whether the network confirmed the transaction
    pub confirmed: bool,
    /// Non-fatal broadcast or confirmation failure, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub completed_at: DateTime<Utc>,
}

impl ExecutionResult {
    pub fn confirmed(output_amount: u64, transaction_id: String) -> Self {
        Self {
            output_amount,
            transaction_id: Some(transaction_id),
            confirmed: true,
            warning: None,
            completed_at: Utc::now(),
        }
    }

    /// Broadcast accepted but confirmation failed or timed out
    pub fn unconfirmed(output_amount: u64, transaction_id: String, warning: String) -> Self {
        Self {
            output_amount,
            transaction_id: Some(transaction_id),
            confirmed: false,
            warning: Some(warning),
            completed_at: Utc::now(),
        }
    }

    /// Broadcast failed, no signature known
    pub fn not_broadcast(output_amount: u64, warning: String) -> Self {
        Self {
            output_amount,
            transaction_id: None,
            confirmed: false,
            warning: Some(warning),
            completed_at: Utc::now(),
        }
    }

    /// Solscan link for the transaction, if one was broadcast
    pub fn explorer_url(&self) -> Option<String> {
        self.transaction_id
            .as_ref()
            .map(|sig| format!("https://solscan.io/tx/{}", sig))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmed_result() {
        let result = ExecutionResult::confirmed(500_000, "sig123".to_string());
        assert!(result.confirmed);
        assert_eq!(result.output_amount, 500_000);
        assert_eq!(result.transaction_id.as_deref(), Some("sig123"));
        assert!(result.warning.is_none());
        assert_eq!(result.explorer_url().unwrap(), "https://solscan.io/tx/sig123");
    }

    #[test]
    fn test_unconfirmed_result() {
        let result = ExecutionResult::unconfirmed(42, "sig456".to_string(), "timed out".to_string());
        assert!(!result.confirmed);
        assert_eq!(result.transaction_id.as_deref(), Some("sig456"));
        assert_eq!(result.warning.as_deref(), Some("timed out"));
    }

    #[test]
    fn test_not_broadcast_result() {
        let result = ExecutionResult::not_broadcast(42, "node unreachable".to_string());
        assert!(!result.confirmed);
        assert!(result.transaction_id.is_none());
        assert!(result.explorer_url().is_none());
    }

    #[test]
    fn test_direction_serialization() {
        assert_eq!(serde_json::to_string(&LegDirection::Buy).unwrap(), r#""buy""#);
        assert_eq!(serde_json::to_string(&LegDirection::Sell).unwrap(), r#""sell""#);
    }
}
