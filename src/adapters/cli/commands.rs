//! CLI Commands
//!
//! Argument definitions for the round-trip swapper.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Jupiter round-trip swapper for Solana
#[derive(Parser, Debug)]
#[command(
    name = "jup-roundtrip",
    version = env!("CARGO_PKG_VERSION"),
    about = "Buy a token with SOL through Jupiter and sell it straight back",
    long_about = "Buys the target token with the given amount of SOL, waits for the wallet \
                  to settle, then sells the received tokens (minus a 0.02% buffer) back to SOL."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Optional configuration file (defaults and environment otherwise)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Buy the token with SOL, then sell it back
    RoundTrip(RoundTripCmd),

    /// Preview the buy-side quote without trading
    Quote(QuoteCmd),

    /// Show wallet address and SOL balance
    Balance,
}

#[derive(Parser, Debug)]
pub struct RoundTripCmd {
    /// Target token mint address
    #[arg(short, long, value_name = "MINT")]
    pub token: String,

    /// Amount of SOL to spend (e.g. 0.05 or 0,05)
    #[arg(short, long, value_name = "SOL")]
    pub amount: String,
}

#[derive(Parser, Debug)]
pub struct QuoteCmd {
    /// Target token mint address
    #[arg(short, long, value_name = "MINT")]
    pub token: String,

    /// Amount of SOL to quote
    #[arg(short, long, value_name = "SOL")]
    pub amount: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        let app = CliApp::parse_from([
            "jup-roundtrip",
            "--verbose",
            "round-trip",
            "--token",
            "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
            "--amount",
            "0,05",
        ]);

        assert!(app.verbose);
        assert!(app.config.is_none());
        match app.command {
            Command::RoundTrip(cmd) => {
                assert_eq!(cmd.token, "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v");
                assert_eq!(cmd.amount, "0,05");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_balance_with_config() {
        let app = CliApp::parse_from(["jup-roundtrip", "balance", "--config", "prod.toml"]);
        assert!(matches!(app.command, Command::Balance));
        assert_eq!(app.config, Some(PathBuf::from("prod.toml")));
    }

    #[test]
    fn test_round_trip_requires_token() {
        let result = CliApp::try_parse_from(["jup-roundtrip", "round-trip", "--amount", "1"]);
        assert!(result.is_err());
    }
}
