//! jup-roundtrip - buy a token with SOL through Jupiter and sell it back

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use jup_roundtrip::adapters::cli::{CliApp, Command, QuoteCmd, RoundTripCmd};
use jup_roundtrip::adapters::jupiter::JupiterClient;
use jup_roundtrip::adapters::solana::{parse_commitment, SolanaClient, WalletManager};
use jup_roundtrip::application::{RoundTripOrchestrator, SwapExecutor};
use jup_roundtrip::config::Config;
use jup_roundtrip::domain::{format_sol, sol_to_lamports, AssetId};
use jup_roundtrip::ports::{QuoteProvider, DEFAULT_SLIPPAGE_BPS};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (secrets go here, not in config files)
    dotenvy::dotenv().ok();

    let app = CliApp::parse();
    init_logging(app.verbose, app.debug);

    let config = Config::load(app.config.as_deref()).context("Failed to load configuration")?;

    match app.command {
        Command::RoundTrip(cmd) => round_trip_command(&config, cmd).await,
        Command::Quote(cmd) => quote_command(&config, cmd).await,
        Command::Balance => balance_command(&config).await,
    }
}

fn init_logging(verbose: bool, debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    fmt().with_env_filter(filter).init();
}

fn solana_client(config: &Config) -> Result<SolanaClient> {
    let commitment = parse_commitment(&config.solana.commitment)?;
    Ok(SolanaClient::with_settings(
        config.solana.rpc_url.clone(),
        commitment,
        config.confirmation_settings(),
    ))
}

/// Wallet from WALLET_PRIVATE_KEY, falling back to the configured keypair file
fn load_wallet(config: &Config) -> Result<WalletManager> {
    if let Some(ref secret) = config.solana.private_key {
        return WalletManager::from_base58(secret).context("Failed to decode WALLET_PRIVATE_KEY");
    }

    match config.solana.keypair_path {
        Some(ref path) => {
            let expanded = shellexpand::tilde(path).to_string();
            WalletManager::from_file(&expanded)
                .with_context(|| format!("Failed to load wallet from '{}'", expanded))
        }
        None => bail!("Wallet private key is required (set WALLET_PRIVATE_KEY or solana.keypair_path)"),
    }
}

async fn show_wallet(solana: &SolanaClient, wallet: &WalletManager) -> Result<()> {
    tracing::info!("RPC endpoint: {}", solana.url());
    tracing::info!("Connected to wallet: {}", wallet.public_key());

    let balance = solana
        .get_balance(&wallet.public_key())
        .await
        .context("Failed to get balance")?;
    tracing::info!("Wallet balance: {} SOL", format_sol(balance));
    Ok(())
}

async fn round_trip_command(config: &Config, cmd: RoundTripCmd) -> Result<()> {
    let wallet = load_wallet(config)?;
    let solana = solana_client(config)?;
    show_wallet(&solana, &wallet).await?;

    let target = AssetId::parse(&cmd.token).context("Invalid target token address")?;
    let lamports = sol_to_lamports(&cmd.amount).context("Invalid amount")?;

    let jupiter = JupiterClient::with_config(config.jupiter_config())
        .context("Failed to create Jupiter client")?;
    let executor = SwapExecutor::new(jupiter.clone(), jupiter, solana);
    let mut orchestrator = RoundTripOrchestrator::new(executor, config.round_trip_config());

    let report = orchestrator
        .run(&target, lamports, &wallet)
        .await
        .context("Round trip failed")?;

    for (leg, result) in [("Buy", &report.buy), ("Sell", &report.sell)] {
        println!(
            "{} TXID: {}",
            leg,
            result.transaction_id.as_deref().unwrap_or("")
        );
        if let Some(url) = result.explorer_url() {
            println!("{}", url);
        }
        if let Some(ref warning) = result.warning {
            println!("  warning: {}", warning);
        }
    }
    println!(
        "Spent {} SOL, sold {} base units, expected {} SOL back",
        format_sol(report.buy_input_amount),
        report.sell_input_amount,
        format_sol(report.sell.output_amount)
    );

    Ok(())
}

async fn quote_command(config: &Config, cmd: QuoteCmd) -> Result<()> {
    let target = AssetId::parse(&cmd.token).context("Invalid target token address")?;
    let lamports = sol_to_lamports(&cmd.amount).context("Invalid amount")?;

    let jupiter = JupiterClient::with_config(config.jupiter_config())?;
    let quote = jupiter
        .get_quote(&AssetId::native(), &target, lamports, DEFAULT_SLIPPAGE_BPS)
        .await
        .context("Failed to get quote")?;

    println!(
        "Quote: {} SOL -> {} base units of {}",
        format_sol(quote.input_amount()),
        quote.output_amount(),
        target
    );
    if let Some(impact) = quote.payload().get("priceImpactPct").and_then(|v| v.as_str()) {
        println!("Price impact: {}%", impact);
    }

    Ok(())
}

async fn balance_command(config: &Config) -> Result<()> {
    let wallet = load_wallet(config)?;
    let solana = solana_client(config)?;
    let balance = solana
        .get_balance(&wallet.public_key())
        .await
        .context("Failed to get balance")?;

    println!("Wallet: {}", wallet.public_key());
    println!("Balance: {} lamports ({} SOL)", balance, format_sol(balance));
    Ok(())
}
