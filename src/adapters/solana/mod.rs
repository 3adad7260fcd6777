mod rpc;
mod wallet;

pub use rpc::{parse_commitment, ConfirmationSettings, SolanaClient, SolanaClientError, MAINNET_RPC_URL};
pub use wallet::{WalletError, WalletManager};
