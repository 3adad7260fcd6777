//! jup-roundtrip - Jupiter round-trip swapper library
//!
//! Buys a token with SOL through the Jupiter aggregator and sells it back.
//!
//! # Modules
//!
//! - `domain`: Asset identifiers, amounts, execution results
//! - `ports`: Trait abstractions (QuoteProvider, SwapTransactionBuilder, NetworkClient)
//! - `adapters`: External implementations (Jupiter, Solana, CLI)
//! - `config`: Configuration loading and validation
//! - `application`: Swap pipeline and round-trip orchestrator

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod config;
pub mod application;
