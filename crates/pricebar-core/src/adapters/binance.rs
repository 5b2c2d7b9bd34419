use serde_json::Value;

use crate::provider::{number_at, JsonProvider, ProviderError};
use crate::{AssetClass, PriceRecord};

pub const NAME: &str = "binance";
pub const URL: &str = "https://api.binance.com/api/v3/ticker/24hr?symbol=BTCUSDT";

pub fn provider() -> JsonProvider<PriceRecord> {
    JsonProvider::new(NAME, URL, normalize)
}

pub fn normalize(body: &Value) -> Result<PriceRecord, ProviderError> {
    let price = number_at(body, "/lastPrice")?;
    let change = number_at(body, "/priceChangePercent")?;
    Ok(PriceRecord::new(AssetClass::Crypto, price, change, NAME)?)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reads_string_encoded_ticker() {
        let body = json!({
            "symbol": "BTCUSDT",
            "lastPrice": "67123.45000000",
            "priceChangePercent": "-1.234"
        });

        let record = normalize(&body).expect("valid ticker");
        assert_eq!(record.unit_price, 67_123.45);
        assert_eq!(record.change_24h_percent, -1.234);
    }

    #[test]
    fn error_payload_is_malformed() {
        let body = json!({ "code": -1121, "msg": "Invalid symbol." });
        assert!(normalize(&body).is_err());
    }
}
