//! open.er-api.com latest-rates endpoints: gold (XAU base) and USD base.

use serde_json::Value;

use crate::domain::units::per_ounce_to_per_gram;
use crate::domain::validate_positive;
use crate::provider::{number_at, JsonProvider, ProviderError};
use crate::{AssetClass, PriceRecord};

pub const XAU_NAME: &str = "open-er-xau";
pub const XAU_URL: &str = "https://open.er-api.com/v6/latest/XAU";

pub const USD_NAME: &str = "open-er-usd";
pub const USD_URL: &str = "https://open.er-api.com/v6/latest/USD";

pub fn gold() -> JsonProvider<PriceRecord> {
    JsonProvider::new(XAU_NAME, XAU_URL, normalize_gold)
}

pub fn usd_rate() -> JsonProvider<f64> {
    JsonProvider::new(USD_NAME, USD_URL, normalize_usd_rate)
}

/// With base XAU, `rates.CNY` is CNY per troy ounce.
pub fn normalize_gold(body: &Value) -> Result<PriceRecord, ProviderError> {
    let per_ounce = number_at(body, "/rates/CNY")?;
    Ok(PriceRecord::new(
        AssetClass::Metal,
        per_ounce_to_per_gram(per_ounce),
        0.0,
        XAU_NAME,
    )?)
}

pub fn normalize_usd_rate(body: &Value) -> Result<f64, ProviderError> {
    let rate = number_at(body, "/rates/CNY")?;
    validate_positive("rates.CNY", rate)?;
    Ok(rate)
}
