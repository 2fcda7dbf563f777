//! Probe results and the support report.

use std::collections::BTreeSet;

use alloy::primitives::Address;

use probe_api::Provider;

use crate::tokens::Token;

/// Outcome of one (token, provider) probe.
#[derive(Debug, Clone)]
pub struct QuoteResult {
    /// Provider this probe targeted
    pub provider: Provider,
    /// Whether the provider returned a usable quote
    pub success: bool,
    /// Error detail on failure
    pub detail: Option<String>,
    /// Providers mentioned in the response payload (success only)
    pub mentions: BTreeSet<Provider>,
}

impl QuoteResult {
    pub fn ok(provider: Provider, mentions: BTreeSet<Provider>) -> Self {
        Self {
            provider,
            success: true,
            detail: None,
            mentions,
        }
    }

    pub fn failed(provider: Provider, detail: impl Into<String>) -> Self {
        Self {
            provider,
            success: false,
            detail: Some(detail.into()),
            mentions: BTreeSet::new(),
        }
    }
}

/// Per-token report line.
#[derive(Debug, Clone)]
pub struct TokenReport {
    /// Token symbol
    pub symbol: &'static str,
    /// Token address (zero when unknown)
    pub address: Address,
    /// Whether at least one provider returned a quote
    pub supported: bool,
    /// Providers that returned a quote, in probing order. Empty when none
    /// did, never omitted.
    pub providers: Vec<Provider>,
    /// Human-readable diagnostics
    pub notes: String,
}

impl TokenReport {
    /// Report for a token without a known address; no probes were made.
    pub fn missing_address(token: &Token) -> Self {
        Self {
            symbol: token.symbol,
            address: token.address,
            supported: false,
            providers: Vec::new(),
            notes: "missing token address; update token registry".to_string(),
        }
    }

    /// Aggregate per-provider results into a report line.
    pub fn from_results(token: &Token, results: &[QuoteResult]) -> Self {
        let providers: Vec<Provider> = results
            .iter()
            .filter(|r| r.success)
            .map(|r| r.provider)
            .collect();

        let mentions: BTreeSet<Provider> = results
            .iter()
            .flat_map(|r| r.mentions.iter().copied())
            .collect();

        let supported = !providers.is_empty();
        let mut notes = if supported {
            let names: Vec<&str> = providers.iter().map(|p| p.as_str()).collect();
            format!("providers with successful quote: {}", names.join(", "))
        } else {
            results
                .iter()
                .filter_map(|r| {
                    r.detail
                        .as_deref()
                        .map(|d| format!("{}: {}", r.provider, d))
                })
                .collect::<Vec<_>>()
                .join("; ")
        };

        if !mentions.is_empty() {
            let names: Vec<&str> = mentions.iter().map(|p| p.as_str()).collect();
            notes.push_str(&format!(
                " | provider mentions in payload: {}",
                names.join(", ")
            ));
        }

        Self {
            symbol: token.symbol,
            address: token.address,
            supported,
            providers,
            notes,
        }
    }
}

/// Render the report printed to stdout: a header plus one line per token.
pub fn render(reports: &[TokenReport]) -> String {
    let mut out = String::from("Across Swap API support report\n");
    out.push_str(&"=".repeat(80));

    for report in reports {
        let providers = if report.providers.is_empty() {
            "none".to_string()
        } else {
            report
                .providers
                .iter()
                .map(|p| p.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        out.push_str(&format!(
            "\n{:>5} | supported={:<5} | providers={:<18} | {}",
            report.symbol,
            report.supported.to_string(),
            providers,
            report.notes
        ));
    }

    out
}
