//! Ordered provider chains with first-success semantics.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::provider::{FetchContext, Provider, ProviderError};

/// One failed attempt within a chain run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderAttempt {
    pub provider: &'static str,
    pub error: ProviderError,
}

/// Chain run that produced a value.
#[derive(Debug, Clone)]
pub struct ChainSuccess<T> {
    pub value: T,
    pub provider: &'static str,
    /// Failures of the providers tried before `provider`.
    pub failures: Vec<ProviderAttempt>,
    pub latency_ms: u64,
}

/// Chain run where every provider failed.
#[derive(Debug, Clone)]
pub struct ChainFailure {
    pub failures: Vec<ProviderAttempt>,
    pub latency_ms: u64,
}

pub type ChainResult<T> = Result<ChainSuccess<T>, ChainFailure>;

/// Read-only ordered list of providers producing `T`.
pub struct SourceChain<T> {
    label: &'static str,
    providers: Vec<Box<dyn Provider<Output = T>>>,
}

impl<T: Send> SourceChain<T> {
    pub fn new(label: &'static str, providers: Vec<Box<dyn Provider<Output = T>>>) -> Self {
        Self { label, providers }
    }

    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// Provider names in attempt order.
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|provider| provider.name()).collect()
    }

    /// Tries each provider once, in order, returning the first success.
    pub async fn run(&self, ctx: FetchContext<'_>) -> ChainResult<T> {
        let started = Instant::now();
        let mut failures = Vec::new();

        for provider in &self.providers {
            let name = provider.name();
            debug!(chain = self.label, provider = name, "trying provider");

            match provider.fetch(ctx).await {
                Ok(value) => {
                    if !failures.is_empty() {
                        info!(
                            chain = self.label,
                            provider = name,
                            failed_attempts = failures.len(),
                            "fallback provider succeeded"
                        );
                    }
                    return Ok(ChainSuccess {
                        value,
                        provider: name,
                        failures,
                        latency_ms: elapsed_ms(started),
                    });
                }
                Err(error) => {
                    warn!(
                        chain = self.label,
                        provider = name,
                        code = error.code(),
                        "provider failed: {}",
                        error.message()
                    );
                    failures.push(ProviderAttempt {
                        provider: name,
                        error,
                    });
                }
            }
        }

        Err(ChainFailure {
            failures,
            latency_ms: elapsed_ms(started),
        })
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis().min(u128::from(u64::MAX)) as u64
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::http_client::OfflineHttpClient;
    use crate::provider::{ProviderErrorKind, ProviderFuture};

    struct Fixed {
        name: &'static str,
        outcome: Result<u32, ProviderError>,
        calls: Arc<AtomicUsize>,
    }

    impl Provider for Fixed {
        type Output = u32;

        fn name(&self) -> &'static str {
            self.name
        }

        fn fetch<'a>(&'a self, _ctx: FetchContext<'a>) -> ProviderFuture<'a, u32> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let outcome = self.outcome.clone();
            Box::pin(async move { outcome })
        }
    }

    fn fixed(
        name: &'static str,
        outcome: Result<u32, ProviderError>,
        calls: &Arc<AtomicUsize>,
    ) -> Box<dyn Provider<Output = u32>> {
        Box::new(Fixed {
            name,
            outcome,
            calls: Arc::clone(calls),
        })
    }

    fn ctx(http: &OfflineHttpClient) -> FetchContext<'_> {
        FetchContext {
            http,
            timeout_ms: 5_000,
        }
    }

    #[tokio::test]
    async fn stops_at_first_success() {
        let calls = Arc::new(AtomicUsize::new(0));
        let chain = SourceChain::new(
            "test",
            vec![
                fixed("a", Err(ProviderError::transport("down")), &calls),
                fixed("b", Ok(7), &calls),
                fixed("c", Ok(9), &calls),
            ],
        );

        let http = OfflineHttpClient;
        let success = chain.run(ctx(&http)).await.expect("b succeeds");

        assert_eq!(success.value, 7);
        assert_eq!(success.provider, "b");
        assert_eq!(success.failures.len(), 1);
        assert_eq!(success.failures[0].provider, "a");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn records_every_failure_kind_when_exhausted() {
        let calls = Arc::new(AtomicUsize::new(0));
        let chain = SourceChain::new(
            "test",
            vec![
                fixed("a", Err(ProviderError::transport("timeout")), &calls),
                fixed("b", Err(ProviderError::parse("not json")), &calls),
                fixed("c", Err(ProviderError::malformed("no field")), &calls),
            ],
        );

        let http = OfflineHttpClient;
        let failure = chain.run(ctx(&http)).await.expect_err("all fail");

        let kinds = failure
            .failures
            .iter()
            .map(|attempt| attempt.error.kind())
            .collect::<Vec<_>>();
        assert_eq!(
            kinds,
            vec![
                ProviderErrorKind::TransportFailure,
                ProviderErrorKind::ParseFailure,
                ProviderErrorKind::MalformedResponse,
            ]
        );
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn empty_chain_fails_without_attempts() {
        let chain: SourceChain<u32> = SourceChain::new("empty", Vec::new());
        let http = OfflineHttpClient;
        let failure = chain.run(ctx(&http)).await.expect_err("nothing to try");
        assert!(failure.failures.is_empty());
        assert_eq!(chain.label(), "empty");
    }
}
