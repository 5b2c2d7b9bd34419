//! CoinGecko simple-price endpoints, used by both the crypto and metal chains.

use serde_json::Value;

use crate::domain::units::{per_ounce_to_per_gram, round2};
use crate::provider::{number_at, number_at_or, JsonProvider, ProviderError};
use crate::{AssetClass, PriceRecord};

pub const BITCOIN_NAME: &str = "coingecko";
pub const BITCOIN_URL: &str =
    "https://api.coingecko.com/api/v3/simple/price?ids=bitcoin&vs_currencies=usd&include_24hr_change=true";

pub const GOLD_NAME: &str = "coingecko-gold";
pub const GOLD_URL: &str =
    "https://api.coingecko.com/api/v3/simple/price?ids=gold&vs_currencies=cny&include_24hr_change=true";

pub fn bitcoin() -> JsonProvider<PriceRecord> {
    JsonProvider::new(BITCOIN_NAME, BITCOIN_URL, normalize_bitcoin)
}

pub fn gold() -> JsonProvider<PriceRecord> {
    JsonProvider::new(GOLD_NAME, GOLD_URL, normalize_gold)
}

pub fn normalize_bitcoin(body: &Value) -> Result<PriceRecord, ProviderError> {
    let price = number_at(body, "/bitcoin/usd")?;
    let change = number_at_or(body, "/bitcoin/usd_24h_change", 0.0)?;
    Ok(PriceRecord::new(AssetClass::Crypto, price, change, BITCOIN_NAME)?)
}

/// `gold.cny` is quoted per troy ounce.
pub fn normalize_gold(body: &Value) -> Result<PriceRecord, ProviderError> {
    let per_ounce = number_at(body, "/gold/cny")?;
    let change = round2(number_at_or(body, "/gold/cny_24h_change", 0.0)?);
    Ok(PriceRecord::new(
        AssetClass::Metal,
        per_ounce_to_per_gram(per_ounce),
        change,
        GOLD_NAME,
    )?)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn bitcoin_change_defaults_to_zero() {
        let record = normalize_bitcoin(&json!({ "bitcoin": { "usd": 65000 } })).expect("valid");
        assert_eq!(record.unit_price, 65_000.0);
        assert_eq!(record.change_24h_percent, 0.0);
    }

    #[test]
    fn bitcoin_missing_object_is_malformed() {
        assert!(normalize_bitcoin(&json!({ "status": { "error_code": 429 } })).is_err());
    }

    #[test]
    fn gold_is_converted_to_grams_and_rounded() {
        let body = json!({ "gold": { "cny": 16000.0, "cny_24h_change": 0.4567 } });
        let record = normalize_gold(&body).expect("valid");
        assert_eq!(record.asset, AssetClass::Metal);
        assert_eq!(record.unit_price, 514.41);
        assert_eq!(record.change_24h_percent, 0.46);
    }
}
