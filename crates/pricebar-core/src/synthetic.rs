//! Plausible-looking records used when every real provider has failed.

use fastrand::Rng;

use crate::domain::units::{round2, usd_ounce_to_local_gram};
use crate::{AssetClass, PriceRecord};

/// Default USD → local exchange rate when none is supplied or resolvable.
pub const DEFAULT_USD_RATE: f64 = 7.2;

pub const CRYPTO_PRICE_RANGE: (f64, f64) = (60_000.0, 70_000.0);
/// International spot range, USD per troy ounce.
pub const METAL_USD_OUNCE_RANGE: (f64, f64) = (2_000.0, 2_100.0);
pub const MAX_ABS_CHANGE: f64 = 2.0;

/// Generates a synthetic record for `asset` using the thread-local RNG.
pub fn synthetic_record(asset: AssetClass, usd_rate: f64) -> PriceRecord {
    synthetic_record_with(&mut Rng::new(), asset, usd_rate)
}

/// Generates a synthetic record from an explicit RNG.
///
/// Crypto prices are whole dollars in [60000, 70000). Metal prices are a spot
/// price in [2000, 2100) USD/oz converted to local currency per gram at
/// `usd_rate` (non-positive or non-finite rates fall back to
/// [`DEFAULT_USD_RATE`]). Changes are in [-2.00, 2.00], two decimals.
pub fn synthetic_record_with(rng: &mut Rng, asset: AssetClass, usd_rate: f64) -> PriceRecord {
    let price = match asset {
        AssetClass::Crypto => {
            let (low, high) = CRYPTO_PRICE_RANGE;
            (low + rng.f64() * (high - low)).floor()
        }
        AssetClass::Metal => {
            let (low, high) = METAL_USD_OUNCE_RANGE;
            let rate = if usd_rate.is_finite() && usd_rate > 0.0 {
                usd_rate
            } else {
                DEFAULT_USD_RATE
            };
            usd_ounce_to_local_gram(low + rng.f64() * (high - low), rate)
        }
    };

    PriceRecord::synthetic(asset, price, random_change(rng))
}

fn random_change(rng: &mut Rng) -> f64 {
    let magnitude = round2(rng.f64() * MAX_ABS_CHANGE);
    if rng.bool() {
        magnitude
    } else {
        -magnitude
    }
}
