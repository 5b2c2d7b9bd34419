use std::sync::Arc;

use crate::domain::units::usd_ounce_to_local_gram;
use crate::fx::ExchangeRateResolver;
use crate::provider::{FetchContext, Provider, ProviderFuture};
use crate::{AssetClass, PriceRecord};

pub const NAME: &str = "reference-gold";

/// Last real step of the metal chain: a fixed USD/oz reference price at the
/// live USD rate. Only the exchange rate is fetched.
pub struct ReferenceGoldProvider {
    usd_per_ounce: f64,
    fallback_rate: f64,
    rates: Arc<ExchangeRateResolver>,
}

impl ReferenceGoldProvider {
    pub fn new(usd_per_ounce: f64, fallback_rate: f64, rates: Arc<ExchangeRateResolver>) -> Self {
        Self {
            usd_per_ounce,
            fallback_rate,
            rates,
        }
    }
}

impl Provider for ReferenceGoldProvider {
    type Output = PriceRecord;

    fn name(&self) -> &'static str {
        NAME
    }

    fn fetch<'a>(&'a self, ctx: FetchContext<'a>) -> ProviderFuture<'a, PriceRecord> {
        Box::pin(async move {
            let rate = self.rates.resolve(ctx, self.fallback_rate).await.rate;
            let per_gram = usd_ounce_to_local_gram(self.usd_per_ounce, rate);
            Ok(PriceRecord::new(AssetClass::Metal, per_gram, 0.0, NAME)?)
        })
    }
}
