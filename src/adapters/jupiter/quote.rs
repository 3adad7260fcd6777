//! Jupiter Quote Types
//!
//! Request and response structures for the Jupiter quote API.

use serde::{Deserialize, Serialize};

use crate::domain::AssetId;
use crate::ports::Quote;

/// Query parameters for `GET /quote`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    /// Input token mint address
    pub input_mint: String,
    /// Output token mint address
    pub output_mint: String,
    /// Amount in base units (lamports for SOL)
    pub amount: u64,
    /// Slippage tolerance in basis points (1 = 0.01%)
    pub slippage_bps: u16,
}

impl QuoteRequest {
    pub fn new(input_mint: &AssetId, output_mint: &AssetId, amount: u64, slippage_bps: u16) -> Self {
        Self {
            input_mint: input_mint.to_string(),
            output_mint: output_mint.to_string(),
            amount,
            slippage_bps,
        }
    }

    pub(crate) fn query_pairs(&self) -> [(&'static str, String); 4] {
        [
            ("inputMint", self.input_mint.clone()),
            ("outputMint", self.output_mint.clone()),
            ("amount", self.amount.to_string()),
            ("slippageBps", self.slippage_bps.to_string()),
        ]
    }
}

/// Fields of the quote body this crate reads.
///
/// The full body is kept as raw JSON in the resulting [`Quote`]; this view only
/// extracts the amounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub input_mint: String,
    pub output_mint: String,
    /// Input amount in base units
    pub in_amount: String,
    /// Output amount in base units
    pub out_amount: String,
    /// Minimum output amount after slippage
    #[serde(default)]
    pub other_amount_threshold: Option<String>,
    #[serde(default)]
    pub slippage_bps: Option<u16>,
    /// Price impact percentage (as string)
    #[serde(default)]
    pub price_impact_pct: Option<String>,
}

impl QuoteResponse {
    pub fn input_amount(&self) -> Result<u64, String> {
        self.in_amount
            .parse()
            .map_err(|_| format!("inAmount '{}' is not an integer", self.in_amount))
    }

    pub fn output_amount(&self) -> Result<u64, String> {
        self.out_amount
            .parse()
            .map_err(|_| format!("outAmount '{}' is not an integer", self.out_amount))
    }
}

/// Turn a raw quote body into a [`Quote`], keeping the body verbatim
pub fn quote_from_body(body: serde_json::Value) -> Result<Quote, String> {
    let view: QuoteResponse = serde_json::from_value(body.clone())
        .map_err(|e| format!("Malformed quote body: {}", e))?;

    let input_mint = AssetId::parse(&view.input_mint).map_err(|e| e.to_string())?;
    let output_mint = AssetId::parse(&view.output_mint).map_err(|e| e.to_string())?;

    Ok(Quote::new(
        input_mint,
        output_mint,
        view.input_amount()?,
        view.output_amount()?,
        body,
    ))
}
