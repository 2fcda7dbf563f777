//! Quoter abstraction over the swap quote endpoint.
//!
//! The live API's success/error payload shape is not under our control and
//! can change, so the checker talks to a `SwapQuoter` trait instead of a
//! concrete HTTP client. `AcrossClient` is the production implementation;
//! tests plug in mocks.

use std::collections::BTreeSet;
use std::fmt::Debug;

use alloy::primitives::Address;
use async_trait::async_trait;

use crate::provider::Provider;

/// Parameters for a single quote request.
///
/// Built per (token, provider) pair and never retained.
#[derive(Debug, Clone)]
pub struct QuoteParams {
    /// Input token address
    pub token_in: Address,
    /// Output token address
    pub token_out: Address,
    /// Origin chain ID
    pub from_chain_id: u64,
    /// Destination chain ID
    pub to_chain_id: u64,
    /// Input amount, raw wei-like string
    pub amount: String,
    /// Wallet address passed as depositor/recipient
    pub wallet: Address,
    /// Provider-selection hint
    pub provider: Provider,
}

/// A successful quote response.
#[derive(Debug, Clone, Default)]
pub struct Quote {
    /// HTTP status of the winning request
    pub status: u16,
    /// Providers mentioned anywhere in the response payload
    pub provider_mentions: BTreeSet<Provider>,
}

/// Failure modes of a single quote request.
///
/// All variants classify to "not supported by this provider"; the detail is
/// kept for the report notes only.
#[derive(Debug, Clone, thiserror::Error)]
pub enum QuoteError {
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error("API error: {0}")]
    Api(String),
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

/// Trait for swap quote backends.
#[async_trait]
pub trait SwapQuoter: Send + Sync + Debug {
    /// Identifier for logging (e.g., "across").
    fn quoter_id(&self) -> &str;

    /// Fetch a single quote. One best-effort attempt, no retries.
    async fn fetch_quote(&self, params: &QuoteParams) -> Result<Quote, QuoteError>;
}
