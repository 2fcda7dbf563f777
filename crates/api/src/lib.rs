//! HTTP client for the Across Swap quote API.
//!
//! This crate provides:
//! - `AcrossClient`: defensive GET client for the swap quote endpoint
//! - `SwapQuoter`: trait seam so the checker can run against mocks
//! - `Provider`: the closed set of liquidity providers the API routes to

mod across;
mod provider;
mod quoter;

pub use across::{AcrossClient, DEFAULT_ENDPOINT};
pub use provider::Provider;
pub use quoter::{Quote, QuoteError, QuoteParams, SwapQuoter};
