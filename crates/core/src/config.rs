//! Probe configuration.
//!
//! Everything the checker needs is carried here explicitly; there is no
//! global state. Endpoint validation happens at construction so a bad URL
//! aborts the run before any network call.

use std::time::Duration;

use alloy::primitives::{address, Address};
use url::Url;

/// Default source chain (Ethereum mainnet).
pub const DEFAULT_FROM_CHAIN_ID: u64 = 1;
/// Default destination chain (Ethereum mainnet).
pub const DEFAULT_TO_CHAIN_ID: u64 = 1;
/// Default swap amount: 1 token in wei-like units.
pub const DEFAULT_AMOUNT: &str = "1000000000000000000";
/// Default wallet passed as depositor/recipient.
pub const DEFAULT_WALLET: Address = address!("000000000000000000000000000000000000dead");
/// Per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fatal configuration failures. These abort the run with a non-zero exit.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid endpoint URL `{url}`: {source}")]
    InvalidEndpoint {
        url: String,
        source: url::ParseError,
    },
    #[error("endpoint must be an http(s) URL, got `{0}`")]
    UnsupportedScheme(String),
}

/// Configuration for one probe run.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Swap quote endpoint
    pub endpoint: Url,
    /// Origin chain ID
    pub from_chain_id: u64,
    /// Destination chain ID
    pub to_chain_id: u64,
    /// Input amount, raw wei-like string
    pub amount: String,
    /// Wallet address sent with each request
    pub wallet: Address,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ProbeConfig {
    /// Build a config from a raw endpoint string, validating it up front.
    pub fn new(endpoint: &str, from_chain_id: u64, to_chain_id: u64) -> Result<Self, ConfigError> {
        let endpoint_url = Url::parse(endpoint).map_err(|source| ConfigError::InvalidEndpoint {
            url: endpoint.to_string(),
            source,
        })?;

        match endpoint_url.scheme() {
            "http" | "https" => {}
            other => return Err(ConfigError::UnsupportedScheme(other.to_string())),
        }

        Ok(Self {
            endpoint: endpoint_url,
            from_chain_id,
            to_chain_id,
            amount: DEFAULT_AMOUNT.to_string(),
            wallet: DEFAULT_WALLET,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Set the swap amount.
    pub fn with_amount(mut self, amount: impl Into<String>) -> Self {
        self.amount = amount.into();
        self
    }

    /// Set the wallet address.
    pub fn with_wallet(mut self, wallet: Address) -> Self {
        self.wallet = wallet;
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        // The production endpoint constant is a valid URL.
        Self::new(
            probe_api::DEFAULT_ENDPOINT,
            DEFAULT_FROM_CHAIN_ID,
            DEFAULT_TO_CHAIN_ID,
        )
        .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProbeConfig::default();
        assert_eq!(config.endpoint.as_str(), probe_api::DEFAULT_ENDPOINT);
        assert_eq!(config.from_chain_id, 1);
        assert_eq!(config.to_chain_id, 1);
        assert_eq!(config.amount, DEFAULT_AMOUNT);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let err = ProbeConfig::new("not a url", 1, 1).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let err = ProbeConfig::new("ftp://app.across.to/api", 1, 1).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedScheme(_)));
    }

    #[test]
    fn test_builder_overrides() {
        let config = ProbeConfig::new("http://localhost:8080/quote", 1, 10)
            .unwrap()
            .with_amount("500")
            .with_timeout(Duration::from_secs(3));
        assert_eq!(config.to_chain_id, 10);
        assert_eq!(config.amount, "500");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }
}
