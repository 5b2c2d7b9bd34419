use serde_json::Value;

use crate::domain::validate_positive;
use crate::provider::{number_at, JsonProvider, ProviderError};

pub const NAME: &str = "floatrates";
pub const URL: &str = "https://www.floatrates.com/daily/usd.json";

pub fn usd_rate() -> JsonProvider<f64> {
    JsonProvider::new(NAME, URL, normalize_usd_rate)
}

pub fn normalize_usd_rate(body: &Value) -> Result<f64, ProviderError> {
    let rate = number_at(body, "/cny/rate")?;
    validate_positive("cny.rate", rate)?;
    Ok(rate)
}
