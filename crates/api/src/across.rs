//! Across Swap API quote client.
//!
//! The swap endpoint's parameter names and response shape have changed over
//! time, so the client is deliberately defensive: it tries the common query
//! parameter namings in order and treats the response JSON as an opaque
//! document, scanning it for provider mentions instead of binding to an
//! unverified schema.

use std::collections::BTreeSet;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::provider::Provider;
use crate::quoter::{Quote, QuoteError, QuoteParams, SwapQuoter};

/// Production Across swap quote endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://app.across.to/api/swap/quote";

/// Max response bytes echoed into error details.
const ERROR_DETAIL_LIMIT: usize = 200;

/// Across Swap API client.
#[derive(Debug, Clone)]
pub struct AcrossClient {
    client: reqwest::Client,
    endpoint: String,
}

impl AcrossClient {
    /// Create a client against the given endpoint with a per-request timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Endpoint this client talks to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build the query parameter variants to try, most current naming first.
    ///
    /// Addresses are formatted lowercase; some API revisions reject
    /// checksum-cased addresses.
    fn param_sets(params: &QuoteParams) -> Vec<Vec<(&'static str, String)>> {
        let token_in = format!("{}", params.token_in).to_lowercase();
        let token_out = format!("{}", params.token_out).to_lowercase();
        let wallet = format!("{}", params.wallet).to_lowercase();
        let provider = params.provider.as_str().to_string();

        vec![
            vec![
                ("fromChainId", params.from_chain_id.to_string()),
                ("toChainId", params.to_chain_id.to_string()),
                ("tokenIn", token_in.clone()),
                ("tokenOut", token_out.clone()),
                ("amount", params.amount.clone()),
                ("user", wallet.clone()),
                ("swapProvider", provider.clone()),
            ],
            vec![
                ("originChainId", params.from_chain_id.to_string()),
                ("destinationChainId", params.to_chain_id.to_string()),
                ("inputToken", token_in.clone()),
                ("outputToken", token_out.clone()),
                ("inputAmount", params.amount.clone()),
                ("recipient", wallet.clone()),
                ("provider", provider.clone()),
            ],
            vec![
                ("chainId", params.from_chain_id.to_string()),
                ("fromToken", token_in),
                ("toToken", token_out),
                ("amount", params.amount.clone()),
                ("account", wallet),
                ("dexProvider", provider),
            ],
        ]
    }

    /// Issue one GET with the given parameters and classify the outcome.
    async fn try_params(&self, query: &[(&'static str, String)]) -> Result<Quote, QuoteError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header("accept", "application/json")
            .query(query)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(classify_transport_error)?;

        let payload: Value = match serde_json::from_str(&body) {
            Ok(value) => value,
            Err(err) if status.is_success() => {
                return Err(QuoteError::MalformedPayload(err.to_string()));
            }
            Err(_) => {
                return Err(QuoteError::Http {
                    status: status.as_u16(),
                    message: truncate(&body),
                });
            }
        };

        if let Some(message) = error_field(&payload) {
            return Err(QuoteError::Api(message));
        }

        if !status.is_success() {
            return Err(QuoteError::Http {
                status: status.as_u16(),
                message: truncate(&body),
            });
        }

        Ok(Quote {
            status: status.as_u16(),
            provider_mentions: scan_provider_mentions(&payload),
        })
    }
}

#[async_trait]
impl SwapQuoter for AcrossClient {
    fn quoter_id(&self) -> &str {
        "across"
    }

    /// Fetch a quote, trying each parameter naming in order.
    ///
    /// Returns the first successful outcome; otherwise the error from the
    /// last variant tried.
    #[instrument(
        skip(self, params),
        fields(token_in = %params.token_in, token_out = %params.token_out, provider = %params.provider)
    )]
    async fn fetch_quote(&self, params: &QuoteParams) -> Result<Quote, QuoteError> {
        let mut last_error = QuoteError::Network("no request executed".to_string());

        for (variant, query) in Self::param_sets(params).iter().enumerate() {
            match self.try_params(query).await {
                Ok(quote) => {
                    debug!(variant, status = quote.status, "Quote request succeeded");
                    return Ok(quote);
                }
                Err(err) => {
                    debug!(variant, error = %err, "Quote request failed");
                    last_error = err;
                }
            }
        }

        Err(last_error)
    }
}

/// Map reqwest transport failures onto the two error classes we report.
fn classify_transport_error(err: reqwest::Error) -> QuoteError {
    if err.is_timeout() {
        QuoteError::Timeout
    } else {
        QuoteError::Network(err.to_string())
    }
}

/// Extract a truthy top-level `error` field, if present.
///
/// `null`, `false`, and the empty string do not count as errors; some API
/// revisions include the key unconditionally.
fn error_field(payload: &Value) -> Option<String> {
    let value = payload.get("error")?;
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Recursively collect provider names mentioned anywhere in the payload.
///
/// Values under keys containing "provider", "dex", or "source" are checked,
/// as is every scalar leaf. Substring matching mirrors how the API names
/// routers ("uniswapV3", "lifi-bridge").
fn scan_provider_mentions(payload: &Value) -> BTreeSet<Provider> {
    let mut found = BTreeSet::new();
    visit(payload, &mut found);
    found
}

fn visit(node: &Value, found: &mut BTreeSet<Provider>) {
    match node {
        Value::Object(map) => {
            for (key, value) in map {
                let low_key = key.to_lowercase();
                if low_key.contains("provider")
                    || low_key.contains("dex")
                    || low_key.contains("source")
                {
                    record_mentions(&value.to_string(), found);
                }
                visit(value, found);
            }
        }
        Value::Array(items) => {
            for item in items {
                visit(item, found);
            }
        }
        scalar => record_mentions(&scalar.to_string(), found),
    }
}

fn record_mentions(text: &str, found: &mut BTreeSet<Provider>) {
    for provider in Provider::ALL {
        if provider.mentioned_in(text) {
            found.insert(provider);
        }
    }
}

fn truncate(body: &str) -> String {
    if body.len() <= ERROR_DETAIL_LIMIT {
        body.to_string()
    } else {
        let mut end = ERROR_DETAIL_LIMIT;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::Address;

    fn params(provider: Provider) -> QuoteParams {
        QuoteParams {
            token_in: Address::repeat_byte(0x11),
            token_out: Address::repeat_byte(0x22),
            from_chain_id: 1,
            to_chain_id: 1,
            amount: "1000000000000000000".to_string(),
            wallet: Address::repeat_byte(0xde),
            provider,
        }
    }

    #[test]
    fn test_param_sets_cover_known_namings() {
        let sets = AcrossClient::param_sets(&params(Provider::ZeroX));
        assert_eq!(sets.len(), 3);

        let keys: Vec<Vec<&str>> = sets
            .iter()
            .map(|set| set.iter().map(|(k, _)| *k).collect())
            .collect();
        assert!(keys[0].contains(&"swapProvider"));
        assert!(keys[1].contains(&"provider"));
        assert!(keys[2].contains(&"dexProvider"));

        // Every variant carries the provider hint with the wire name.
        for set in &sets {
            assert!(set.iter().any(|(_, v)| v == "0x"));
        }
    }

    #[test]
    fn test_param_sets_lowercase_addresses() {
        let sets = AcrossClient::param_sets(&params(Provider::Uniswap));
        let (_, token_in) = sets[0].iter().find(|(k, _)| *k == "tokenIn").unwrap();
        assert_eq!(token_in, &token_in.to_lowercase());
        assert!(token_in.starts_with("0x"));
    }

    #[test]
    fn test_error_field_truthiness() {
        assert_eq!(
            error_field(&serde_json::json!({"error": "no route found"})),
            Some("no route found".to_string())
        );
        assert_eq!(error_field(&serde_json::json!({"error": null})), None);
        assert_eq!(error_field(&serde_json::json!({"error": false})), None);
        assert_eq!(error_field(&serde_json::json!({"error": ""})), None);
        assert_eq!(error_field(&serde_json::json!({"outputAmount": "1"})), None);
        assert_eq!(
            error_field(&serde_json::json!({"error": {"code": 400}})),
            Some(r#"{"code":400}"#.to_string())
        );
    }

    #[test]
    fn test_scan_mentions_in_nested_payload() {
        let payload = serde_json::json!({
            "route": {
                "swapProvider": "UniswapV3",
                "steps": [
                    {"tool": "lifi-bridge", "fee": "0.05"}
                ]
            },
            "outputAmount": "990000000000000000"
        });

        let mentions = scan_provider_mentions(&payload);
        assert!(mentions.contains(&Provider::Uniswap));
        assert!(mentions.contains(&Provider::Lifi));
        assert!(!mentions.contains(&Provider::ZeroX));
    }

    #[test]
    fn test_scan_mentions_in_scalar_leaves() {
        // "0x" matches hex-prefixed scalars too; the mention scan is a
        // diagnostic aid, not an exact classifier.
        let payload = serde_json::json!({"to": "0x1111111111111111111111111111111111111111"});
        let mentions = scan_provider_mentions(&payload);
        assert!(mentions.contains(&Provider::ZeroX));
    }

    #[test]
    fn test_scan_mentions_empty_payload() {
        assert!(scan_provider_mentions(&serde_json::json!({})).is_empty());
    }

    #[test]
    fn test_truncate_long_bodies() {
        let body = "x".repeat(ERROR_DETAIL_LIMIT + 50);
        let detail = truncate(&body);
        assert!(detail.ends_with("..."));
        assert_eq!(detail.len(), ERROR_DETAIL_LIMIT + 3);
        assert_eq!(truncate("short"), "short");
    }
}
