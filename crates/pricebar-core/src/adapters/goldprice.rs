use serde_json::Value;

use crate::domain::units::per_ounce_to_per_gram;
use crate::provider::{number_at, JsonProvider, ProviderError};
use crate::{AssetClass, PriceRecord};

pub const NAME: &str = "goldprice-org";
pub const URL: &str = "https://data-asg.goldprice.org/dbXRates/CNY";

pub fn provider() -> JsonProvider<PriceRecord> {
    JsonProvider::new(NAME, URL, normalize)
}

/// `items[0].xauPrice` is CNY per troy ounce; no change figure is published.
pub fn normalize(body: &Value) -> Result<PriceRecord, ProviderError> {
    let per_ounce = number_at(body, "/items/0/xauPrice")?;
    Ok(PriceRecord::new(
        AssetClass::Metal,
        per_ounce_to_per_gram(per_ounce),
        0.0,
        NAME,
    )?)
}
