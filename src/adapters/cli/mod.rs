//! CLI Adapter
//!
//! Command-line interface for the round-trip swapper.
//! Uses clap derive macros for argument parsing.

mod commands;

pub use commands::{CliApp, Command, QuoteCmd, RoundTripCmd};
