use serde_json::Value;

use crate::provider::{number_at, JsonProvider, ProviderError};
use crate::{AssetClass, PriceRecord};

pub const NAME: &str = "okx";
pub const URL: &str = "https://www.okx.com/api/v5/market/ticker?instId=BTC-USDT";

pub fn provider() -> JsonProvider<PriceRecord> {
    JsonProvider::new(NAME, URL, normalize)
}

/// OKX has no 24h change field; it is derived from `last` and `open24h`.
pub fn normalize(body: &Value) -> Result<PriceRecord, ProviderError> {
    let last = number_at(body, "/data/0/last")?;
    let open = number_at(body, "/data/0/open24h")?;
    if open == 0.0 {
        return Err(ProviderError::malformed("open24h is zero"));
    }

    let change = (last - open) / open * 100.0;
    Ok(PriceRecord::new(AssetClass::Crypto, last, change, NAME)?)
}
