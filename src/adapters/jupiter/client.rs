//! Jupiter API Client
//!
//! HTTP client for the Jupiter swap API. Implements the quote and
//! transaction-build ports. Each port call issues exactly one HTTP request.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::domain::AssetId;
use crate::ports::{Quote, QuoteProvider, SwapError, SwapTransactionBuilder, UnsignedTransactionPayload};
use super::quote::{quote_from_body, QuoteRequest};
use super::swap::{SwapBuildRequest, SwapResponse};

pub const DEFAULT_API_BASE_URL: &str = "https://api.jup.ag/swap/v1";

/// Transport-level errors of the Jupiter client
#[derive(Debug, Error)]
pub enum JupiterError {
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),
    #[error("HTTP request failed: {0}")]
    Http(String),
    #[error("API error {status}: {body}")]
    Api { status: StatusCode, body: String },
    #[error("Rate limit exceeded")]
    RateLimited,
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Jupiter API client configuration
#[derive(Debug, Clone)]
pub struct JupiterConfig {
    /// Base URL for Jupiter API
    pub api_base_url: String,
    /// Optional API key for higher rate limits
    pub api_key: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for JupiterConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Jupiter DEX aggregator client
#[derive(Debug, Clone)]
pub struct JupiterClient {
    config: JupiterConfig,
    http: Client,
}

impl JupiterClient {
    /// Create a new Jupiter client with default configuration
    pub fn new() -> Result<Self, JupiterError> {
        Self::with_config(JupiterConfig::default())
    }

    /// Create a new Jupiter client with custom configuration
    pub fn with_config(config: JupiterConfig) -> Result<Self, JupiterError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| JupiterError::ClientBuild(e.to_string()))?;

        Ok(Self { config, http })
    }

    /// Fetch the raw quote body for a request
    pub async fn fetch_quote(&self, request: &QuoteRequest) -> Result<serde_json::Value, JupiterError> {
        let url = format!("{}/quote", self.config.api_base_url);
        tracing::debug!(
            "GET {} {} -> {} amount={} slippageBps={}",
            url, request.input_mint, request.output_mint, request.amount, request.slippage_bps
        );

        let req = self.authorized(self.http.get(&url).query(&request.query_pairs()));
        let response = self.send_once(req).await?;
        self.handle_response(response).await
    }

    /// Request a serialized swap transaction
    pub async fn fetch_swap_transaction(
        &self,
        request: &SwapBuildRequest,
    ) -> Result<SwapResponse, JupiterError> {
        let url = format!("{}/swap", self.config.api_base_url);
        tracing::debug!("POST {} for {}", url, request.user_public_key);

        let req = self.authorized(self.http.post(&url).json(request));
        let response = self.send_once(req).await?;
        self.handle_response(response).await
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        match self.config.api_key {
            Some(ref api_key) => req.header("x-api-key", api_key),
            None => req,
        }
    }

    /// Send a request once; any failure is returned to the caller as-is
    async fn send_once(&self, req: RequestBuilder) -> Result<reqwest::Response, JupiterError> {
        req.send().await.map_err(|e| {
            tracing::debug!("Jupiter request failed: {}", e);
            JupiterError::Http(e.to_string())
        })
    }

    /// Handle API response and deserialize
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, JupiterError> {
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(JupiterError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(JupiterError::Api { status, body });
        }

        response
            .json()
            .await
            .map_err(|e| JupiterError::Parse(e.to_string()))
    }
}

#[async_trait]
impl QuoteProvider for JupiterClient {
    async fn get_quote(
        &self,
        from: &AssetId,
        to: &AssetId,
        input_amount: u64,
        max_slippage_bps: u16,
    ) -> Result<Quote, SwapError> {
        let request = QuoteRequest::new(from, to, input_amount, max_slippage_bps);

        let body = self
            .fetch_quote(&request)
            .await
            .map_err(|e| SwapError::QuoteFailure(e.to_string()))?;

        let quote = quote_from_body(body).map_err(SwapError::QuoteFailure)?;
        quote.ensure_matches(from, to, input_amount)?;
        Ok(quote)
    }
}

#[async_trait]
impl SwapTransactionBuilder for JupiterClient {
    async fn build_transaction(
        &self,
        quote: &Quote,
        signer: &str,
    ) -> Result<UnsignedTransactionPayload, SwapError> {
        let request = SwapBuildRequest::new(quote.payload().clone(), signer.to_string());

        let response = self
            .fetch_swap_transaction(&request)
            .await
            .map_err(|e| SwapError::TransactionBuildFailure(e.to_string()))?;

        if let Some(fee) = response.prioritization_fee_lamports {
            tracing::debug!("Prioritization fee: {} lamports", fee);
        }

        response.payload().map_err(SwapError::TransactionBuildFailure)
    }
}
