//! Quote checker: sequential (token, provider) probing.
//!
//! One best-effort request per (token, provider) pair, in fixed order, one
//! outstanding request at a time. A failure is recorded and the loop moves
//! on; a success does not short-circuit the remaining providers, since the
//! point is to discover every provider that supports a token.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use probe_api::{Provider, QuoteParams, SwapQuoter};

use crate::config::ProbeConfig;
use crate::report::{QuoteResult, TokenReport};
use crate::tokens::{quote_target, Token};

/// Sequential quote checker over a pluggable quoter backend.
#[derive(Debug, Clone)]
pub struct QuoteChecker {
    quoter: Arc<dyn SwapQuoter>,
    config: ProbeConfig,
}

impl QuoteChecker {
    pub fn new(quoter: Arc<dyn SwapQuoter>, config: ProbeConfig) -> Self {
        Self { quoter, config }
    }

    /// Probe one token against each provider, in the given order.
    ///
    /// Returns exactly one result per provider.
    #[instrument(skip(self, token, token_out, providers), fields(token = token.symbol))]
    pub async fn check_token(
        &self,
        token: &Token,
        token_out: &Token,
        providers: &[Provider],
    ) -> Vec<QuoteResult> {
        let mut results = Vec::with_capacity(providers.len());

        for &provider in providers {
            let params = QuoteParams {
                token_in: token.address,
                token_out: token_out.address,
                from_chain_id: self.config.from_chain_id,
                to_chain_id: self.config.to_chain_id,
                amount: self.config.amount.clone(),
                wallet: self.config.wallet,
                provider,
            };

            match self.quoter.fetch_quote(&params).await {
                Ok(quote) => {
                    debug!(token = token.symbol, %provider, "Provider returned a quote");
                    results.push(QuoteResult::ok(provider, quote.provider_mentions));
                }
                Err(err) => {
                    debug!(token = token.symbol, %provider, error = %err, "Provider probe failed");
                    results.push(QuoteResult::failed(provider, err.to_string()));
                }
            }
        }

        results
    }

    /// Probe every token in list order and aggregate per-token reports.
    ///
    /// Tokens without a known address are reported without any network call.
    /// Per-token outcomes are independent: nothing a token does affects the
    /// next one.
    pub async fn run_all(&self, tokens: &[Token], providers: &[Provider]) -> Vec<TokenReport> {
        let mut reports = Vec::with_capacity(tokens.len());

        for token in tokens {
            if !token.has_address() {
                debug!(token = token.symbol, "Skipping token without address");
                reports.push(TokenReport::missing_address(token));
                continue;
            }

            let token_out = quote_target(token);
            let results = self.check_token(token, &token_out, providers).await;
            reports.push(TokenReport::from_results(token, &results));
        }

        let supported = reports.iter().filter(|r| r.supported).count();
        info!(
            tokens = reports.len(),
            supported,
            quoter = self.quoter.quoter_id(),
            "Probe run complete"
        );

        reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::{BTreeSet, HashMap};
    use std::sync::atomic::{AtomicUsize, Ordering};

    use alloy::primitives::Address;
    use async_trait::async_trait;

    use probe_api::{Quote, QuoteError};

    use crate::tokens::{BAL, DAI, TOKENS, VLR};

    /// Quoter scripted per (token_in, provider); everything else fails with
    /// `default_error`.
    #[derive(Debug)]
    struct MockQuoter {
        successes: HashMap<(Address, Provider), Quote>,
        default_error: QuoteError,
        calls: AtomicUsize,
    }

    impl MockQuoter {
        fn failing_with(default_error: QuoteError) -> Self {
            Self {
                successes: HashMap::new(),
                default_error,
                calls: AtomicUsize::new(0),
            }
        }

        fn with_success(mut self, token_in: Address, provider: Provider, quote: Quote) -> Self {
            self.successes.insert((token_in, provider), quote);
            self
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SwapQuoter for MockQuoter {
        fn quoter_id(&self) -> &str {
            "mock"
        }

        async fn fetch_quote(&self, params: &QuoteParams) -> Result<Quote, QuoteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.successes.get(&(params.token_in, params.provider)) {
                Some(quote) => Ok(quote.clone()),
                None => Err(self.default_error.clone()),
            }
        }
    }

    fn checker(quoter: Arc<MockQuoter>) -> QuoteChecker {
        QuoteChecker::new(quoter, ProbeConfig::default())
    }

    #[tokio::test]
    async fn test_one_result_per_provider() {
        let quoter = Arc::new(MockQuoter::failing_with(QuoteError::Api(
            "no route".to_string(),
        )));
        let checker = checker(quoter);

        let results = checker
            .check_token(&BAL, &DAI, &Provider::ALL)
            .await;

        assert_eq!(results.len(), Provider::ALL.len());
        let order: Vec<_> = results.iter().map(|r| r.provider).collect();
        assert_eq!(order, Provider::ALL.to_vec());
    }

    #[tokio::test]
    async fn test_success_does_not_short_circuit() {
        let quoter = Arc::new(
            MockQuoter::failing_with(QuoteError::Api("no route".to_string()))
                .with_success(BAL.address, Provider::Uniswap, Quote::default()),
        );
        let checker = checker(quoter.clone());

        let results = checker.check_token(&BAL, &DAI, &Provider::ALL).await;

        // All three providers were still asked.
        assert_eq!(quoter.call_count(), 3);
        assert!(results[0].success);
        assert!(!results[1].success);
        assert!(!results[2].success);
    }

    #[tokio::test]
    async fn test_only_dai_supported_via_zerox() {
        let quote = Quote {
            status: 200,
            provider_mentions: BTreeSet::from([Provider::ZeroX]),
        };
        let quoter = Arc::new(
            MockQuoter::failing_with(QuoteError::Http {
                status: 404,
                message: "no route".to_string(),
            })
            .with_success(DAI.address, Provider::ZeroX, quote),
        );
        let checker = checker(quoter);

        let reports = checker.run_all(TOKENS, &Provider::ALL).await;

        assert_eq!(reports.len(), TOKENS.len());
        for report in &reports {
            if report.symbol == "DAI" {
                assert!(report.supported);
                assert_eq!(report.providers, vec![Provider::ZeroX]);
            } else {
                assert!(!report.supported, "{} must not be supported", report.symbol);
                assert!(report.providers.is_empty());
            }
        }
    }

    #[tokio::test]
    async fn test_everything_times_out() {
        let quoter = Arc::new(MockQuoter::failing_with(QuoteError::Timeout));
        let checker = checker(quoter.clone());

        let reports = checker.run_all(TOKENS, &Provider::ALL).await;

        assert_eq!(reports.len(), 9);
        assert!(reports.iter().all(|r| !r.supported && r.providers.is_empty()));
        // 6 tokens have addresses, 3 providers each; zero-address tokens
        // never hit the quoter.
        assert_eq!(quoter.call_count(), 6 * 3);
    }

    #[tokio::test]
    async fn test_token_independence() {
        let quoter = Arc::new(
            MockQuoter::failing_with(QuoteError::Network("connection refused".to_string()))
                .with_success(BAL.address, Provider::Lifi, Quote::default())
                .with_success(DAI.address, Provider::Uniswap, Quote::default())
                .with_success(DAI.address, Provider::ZeroX, Quote::default()),
        );
        let checker = checker(quoter);

        let reports = checker.run_all(&[BAL, VLR, DAI], &Provider::ALL).await;

        assert_eq!(reports[0].providers, vec![Provider::Lifi]);
        assert!(reports[1].providers.is_empty());
        assert!(reports[1].notes.contains("missing token address"));
        assert_eq!(
            reports[2].providers,
            vec![Provider::Uniswap, Provider::ZeroX]
        );
    }

    #[tokio::test]
    async fn test_missing_address_token_makes_no_calls() {
        let quoter = Arc::new(MockQuoter::failing_with(QuoteError::Timeout));
        let checker = checker(quoter.clone());

        let reports = checker.run_all(&[VLR], &Provider::ALL).await;

        assert_eq!(reports.len(), 1);
        assert_eq!(quoter.call_count(), 0);
    }

    #[tokio::test]
    async fn test_failure_detail_is_recorded() {
        let quoter = Arc::new(MockQuoter::failing_with(QuoteError::Http {
            status: 500,
            message: "upstream".to_string(),
        }));
        let checker = checker(quoter);

        let results = checker.check_token(&BAL, &DAI, &Provider::ALL).await;
        for result in results {
            assert_eq!(result.detail.as_deref(), Some("HTTP 500: upstream"));
        }
    }
}
