//! Source chain resolver: real providers first, synthetic data last.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::warn;

use crate::adapters;
use crate::chain::{ProviderAttempt, SourceChain};
use crate::config::PricebarConfig;
use crate::fx::{ExchangeRateResolver, RateResolution};
use crate::http_client::HttpClient;
use crate::provider::FetchContext;
use crate::synthetic::synthetic_record;
use crate::{AssetClass, PriceRecord};

pub type PriceFuture<'a> = Pin<Box<dyn Future<Output = PriceRecord> + Send + 'a>>;

/// Infallible price acquisition seam used by the controller.
pub trait PriceSource: Send + Sync + 'static {
    fn fetch_price(&self, asset: AssetClass) -> PriceFuture<'_>;
}

/// Price plus the failed attempts that preceded it.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub record: PriceRecord,
    pub failures: Vec<ProviderAttempt>,
    pub latency_ms: u64,
}

pub struct PriceResolver {
    http: Arc<dyn HttpClient>,
    timeout_ms: u64,
    fallback_rate: f64,
    crypto: SourceChain<PriceRecord>,
    metal: SourceChain<PriceRecord>,
    rates: Arc<ExchangeRateResolver>,
}

impl PriceResolver {
    /// Resolver over the standard provider chains.
    pub fn new(http: Arc<dyn HttpClient>, config: &PricebarConfig) -> Self {
        let rates = Arc::new(ExchangeRateResolver::new(adapters::exchange_rate_chain()));
        let metal = adapters::metal_chain(
            config.reference_gold_usd_per_ounce,
            config.fallback_usd_rate,
            Arc::clone(&rates),
        );

        Self {
            http,
            timeout_ms: config.request_timeout_ms,
            fallback_rate: config.fallback_usd_rate,
            crypto: adapters::crypto_chain(),
            metal,
            rates,
        }
    }

    /// Resolver over caller-supplied chains.
    pub fn with_chains(
        http: Arc<dyn HttpClient>,
        config: &PricebarConfig,
        crypto: SourceChain<PriceRecord>,
        metal: SourceChain<PriceRecord>,
        rates: Arc<ExchangeRateResolver>,
    ) -> Self {
        Self {
            http,
            timeout_ms: config.request_timeout_ms,
            fallback_rate: config.fallback_usd_rate,
            crypto,
            metal,
            rates,
        }
    }

    fn context(&self) -> FetchContext<'_> {
        FetchContext {
            http: self.http.as_ref(),
            timeout_ms: self.timeout_ms,
        }
    }

    pub fn chain(&self, asset: AssetClass) -> &SourceChain<PriceRecord> {
        match asset {
            AssetClass::Crypto => &self.crypto,
            AssetClass::Metal => &self.metal,
        }
    }

    /// Runs the chain for `asset`; a synthetic record is returned when every
    /// provider fails.
    pub async fn resolve(&self, asset: AssetClass) -> Resolution {
        match self.chain(asset).run(self.context()).await {
            Ok(success) => Resolution {
                record: success.value,
                failures: success.failures,
                latency_ms: success.latency_ms,
            },
            Err(failure) => {
                warn!(
                    asset = asset.as_str(),
                    attempts = failure.failures.len(),
                    "all providers failed; using synthetic data"
                );
                Resolution {
                    record: synthetic_record(asset, self.fallback_rate),
                    failures: failure.failures,
                    latency_ms: failure.latency_ms,
                }
            }
        }
    }

    pub async fn fetch_price(&self, asset: AssetClass) -> PriceRecord {
        self.resolve(asset).await.record
    }

    /// USD → local rate, or `fallback` when every rate provider fails.
    pub async fn resolve_usd_to_local_rate(&self, fallback: f64) -> RateResolution {
        self.rates.resolve(self.context(), fallback).await
    }
}

impl PriceSource for PriceResolver {
    fn fetch_price(&self, asset: AssetClass) -> PriceFuture<'_> {
        Box::pin(PriceResolver::fetch_price(self, asset))
    }
}
