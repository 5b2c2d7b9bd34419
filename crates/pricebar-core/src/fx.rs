//! USD → local currency exchange rate with its own provider chain.

use tracing::warn;

use crate::chain::{ProviderAttempt, SourceChain};
use crate::provider::FetchContext;

/// Outcome of an exchange-rate lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct RateResolution {
    pub rate: f64,
    /// `None` when every provider failed and the caller's fallback was used.
    pub provider: Option<&'static str>,
    pub failures: Vec<ProviderAttempt>,
}

pub struct ExchangeRateResolver {
    chain: SourceChain<f64>,
}

impl ExchangeRateResolver {
    pub fn new(chain: SourceChain<f64>) -> Self {
        Self { chain }
    }

    /// Never fails: returns `fallback` if the whole chain fails.
    pub async fn resolve(&self, ctx: FetchContext<'_>, fallback: f64) -> RateResolution {
        match self.chain.run(ctx).await {
            Ok(success) => RateResolution {
                rate: success.value,
                provider: Some(success.provider),
                failures: success.failures,
            },
            Err(failure) => {
                warn!(
                    attempts = failure.failures.len(),
                    fallback, "all exchange rate providers failed; using fallback rate"
                );
                RateResolution {
                    rate: fallback,
                    provider: None,
                    failures: failure.failures,
                }
            }
        }
    }
}
