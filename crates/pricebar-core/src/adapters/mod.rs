//! Provider adapters and the fixed chains built from them.
//!
//! | Chain | Order |
//! |-------|-------|
//! | crypto | okx → binance → coingecko |
//! | metal | coingecko-gold → goldprice-org → open-er-xau → reference-gold |
//! | exchange rate | open-er-usd → floatrates |

use std::sync::Arc;

use crate::chain::SourceChain;
use crate::fx::ExchangeRateResolver;
use crate::PriceRecord;

pub mod binance;
pub mod coingecko;
pub mod floatrates;
pub mod goldprice;
pub mod okx;
pub mod open_er;
pub mod reference_gold;

pub use reference_gold::ReferenceGoldProvider;

pub fn crypto_chain() -> SourceChain<PriceRecord> {
    SourceChain::new(
        "crypto",
        vec![
            Box::new(okx::provider()),
            Box::new(binance::provider()),
            Box::new(coingecko::bitcoin()),
        ],
    )
}

pub fn metal_chain(
    reference_usd_per_ounce: f64,
    fallback_rate: f64,
    rates: Arc<ExchangeRateResolver>,
) -> SourceChain<PriceRecord> {
    SourceChain::new(
        "metal",
        vec![
            Box::new(coingecko::gold()),
            Box::new(goldprice::provider()),
            Box::new(open_er::gold()),
            Box::new(ReferenceGoldProvider::new(
                reference_usd_per_ounce,
                fallback_rate,
                rates,
            )),
        ],
    )
}

pub fn exchange_rate_chain() -> SourceChain<f64> {
    SourceChain::new(
        "exchange_rate",
        vec![Box::new(open_er::usd_rate()), Box::new(floatrates::usd_rate())],
    )
}
