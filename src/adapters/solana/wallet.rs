use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::VersionedTransaction,
};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Failed to load keypair from file: {0}")]
    LoadError(String),
    #[error("Failed to sign transaction: {0}")]
    SigningError(String),
    #[error("Invalid keypair bytes: {0}")]
    InvalidKeypair(String),
    #[error("Invalid base58 private key: {0}")]
    InvalidBase58(String),
}

/// Wallet manager for loading and signing with Solana keypairs
pub struct WalletManager {
    keypair: Keypair,
}

impl WalletManager {
    /// Load keypair from a file path (JSON array format)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, WalletError> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| WalletError::LoadError(format!("Failed to read file: {}", e)))?;

        // Parse JSON array of bytes
        let bytes: Vec<u8> = serde_json::from_str(&contents)
            .map_err(|e| WalletError::LoadError(format!("Invalid JSON format: {}", e)))?;

        Self::from_bytes(&bytes)
    }

    /// Load keypair from a base58-encoded 64-byte secret key
    pub fn from_base58(secret: &str) -> Result<Self, WalletError> {
        let bytes = bs58::decode(secret.trim())
            .into_vec()
            .map_err(|e| WalletError::InvalidBase58(e.to_string()))?;

        Self::from_bytes(&bytes)
    }

    /// Load keypair from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, WalletError> {
        let keypair = Keypair::try_from(bytes)
            .map_err(|e| WalletError::InvalidKeypair(e.to_string()))?;

        Ok(Self { keypair })
    }

    /// Create a new random keypair (for testing)
    pub fn new_random() -> Self {
        Self {
            keypair: Keypair::new(),
        }
    }

    /// Get the public key as a string
    pub fn public_key(&self) -> String {
        self.keypair.pubkey().to_string()
    }

    /// Get the public key as Pubkey
    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    /// Sign a versioned transaction.
    ///
    /// Fails if this wallet is not one of the message's required signers or
    /// the message needs more signers than this one.
    pub fn sign_versioned_transaction(
        &self,
        transaction: VersionedTransaction,
    ) -> Result<VersionedTransaction, WalletError> {
        VersionedTransaction::try_new(transaction.message, &[&self.keypair])
            .map_err(|e| WalletError::SigningError(e.to_string()))
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mocks::unsigned_payload_for;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn unsigned_for(payer: &Pubkey) -> VersionedTransaction {
        bincode::deserialize(unsigned_payload_for(payer).as_bytes()).unwrap()
    }

    #[test]
    fn test_new_random_wallet() {
        let wallet = WalletManager::new_random();
        let pubkey = wallet.public_key();
        assert!(!pubkey.is_empty());
        assert!(pubkey.len() >= 32 && pubkey.len() <= 44);
    }

    #[test]
    fn test_from_bytes() {
        let keypair = Keypair::new();

        let wallet = WalletManager::from_bytes(&keypair.to_bytes()).unwrap();
        assert_eq!(wallet.pubkey(), keypair.pubkey());
    }

    #[test]
    fn test_from_base58() {
        let keypair = Keypair::new();
        let encoded = bs58::encode(keypair.to_bytes()).into_string();

        let wallet = WalletManager::from_base58(&format!(" {}\n", encoded)).unwrap();
        assert_eq!(wallet.public_key(), keypair.pubkey().to_string());
    }

    #[test]
    fn test_from_base58_invalid() {
        let result = WalletManager::from_base58("0OIl");
        assert!(matches!(result, Err(WalletError::InvalidBase58(_))));

        let short = bs58::encode([1u8; 10]).into_string();
        let result = WalletManager::from_base58(&short);
        assert!(matches!(result, Err(WalletError::InvalidKeypair(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let keypair = Keypair::new();

        let json = serde_json::to_string(&keypair.to_bytes().to_vec()).unwrap();
        temp_file.write_all(json.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let wallet = WalletManager::from_file(temp_file.path()).unwrap();
        assert_eq!(wallet.pubkey(), keypair.pubkey());
    }

    #[test]
    fn test_invalid_json_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"not valid json").unwrap();
        temp_file.flush().unwrap();

        let result = WalletManager::from_file(temp_file.path());
        assert!(matches!(result, Err(WalletError::LoadError(_))));
    }

    #[test]
    fn test_sign_versioned_transaction() {
        let wallet = WalletManager::new_random();
        let unsigned = unsigned_for(&wallet.pubkey());

        let signed = wallet.sign_versioned_transaction(unsigned).unwrap();
        assert_eq!(signed.signatures.len(), 1);
        assert!(signed.verify_with_results().iter().all(|ok| *ok));
    }

    #[test]
    fn test_sign_rejects_foreign_payer() {
        let wallet = WalletManager::new_random();
        let unsigned = unsigned_for(&Pubkey::new_unique());

        let result = wallet.sign_versioned_transaction(unsigned);
        assert!(matches!(result, Err(WalletError::SigningError(_))));
    }
}
