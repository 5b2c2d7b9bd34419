use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{UtcDateTime, ValidationError};

/// Which commodity the widget is currently displaying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    /// Bitcoin, quoted in USD.
    Crypto,
    /// Gold, quoted in local currency (CNY) per gram.
    Metal,
}

impl AssetClass {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Crypto => "crypto",
            Self::Metal => "metal",
        }
    }

    /// The other asset class.
    pub const fn flipped(self) -> Self {
        match self {
            Self::Crypto => Self::Metal,
            Self::Metal => Self::Crypto,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Crypto => 0,
            Self::Metal => 1,
        }
    }
}

impl Display for AssetClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetClass {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "crypto" | "btc" => Ok(Self::Crypto),
            "metal" | "gold" => Ok(Self::Metal),
            other => Err(ValidationError::InvalidAsset {
                value: other.to_owned(),
            }),
        }
    }
}

/// Canonical price record produced by the provider chain.
///
/// `unit_price` is USD for [`AssetClass::Crypto`] and local currency per gram
/// for [`AssetClass::Metal`]. Records are never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub asset: AssetClass,
    pub unit_price: f64,
    pub change_24h_percent: f64,
    /// Provider name, or `"synthetic"` for locally generated records.
    pub source: String,
    pub synthetic: bool,
    pub as_of: UtcDateTime,
}

pub const SYNTHETIC_SOURCE: &str = "synthetic";

impl PriceRecord {
    pub fn new(
        asset: AssetClass,
        unit_price: f64,
        change_24h_percent: f64,
        source: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("unit_price", unit_price)?;
        validate_finite("change_24h_percent", change_24h_percent)?;

        Ok(Self {
            asset,
            unit_price,
            change_24h_percent,
            source: source.into(),
            synthetic: false,
            as_of: UtcDateTime::now(),
        })
    }

    /// Builds a locally generated record. Callers draw values from bounded
    /// ranges, so no validation is performed.
    pub(crate) fn synthetic(asset: AssetClass, unit_price: f64, change_24h_percent: f64) -> Self {
        Self {
            asset,
            unit_price,
            change_24h_percent,
            source: String::from(SYNTHETIC_SOURCE),
            synthetic: true,
            as_of: UtcDateTime::now(),
        }
    }
}

pub(crate) fn validate_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    Ok(())
}

pub(crate) fn validate_non_negative(
    field: &'static str,
    value: f64,
) -> Result<(), ValidationError> {
    validate_finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

pub(crate) fn validate_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    validate_finite(field, value)?;
    if value <= 0.0 {
        return Err(ValidationError::NonPositiveValue { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_price() {
        let err = PriceRecord::new(AssetClass::Crypto, -1.0, 0.0, "okx").expect_err("must fail");
        assert_eq!(
            err,
            ValidationError::NegativeValue {
                field: "unit_price"
            }
        );
    }

    #[test]
    fn rejects_non_finite_change() {
        let err =
            PriceRecord::new(AssetClass::Metal, 500.0, f64::NAN, "goldprice-org").expect_err("nan");
        assert!(matches!(err, ValidationError::NonFiniteValue { .. }));
    }

    #[test]
    fn synthetic_records_are_tagged() {
        let record = PriceRecord::synthetic(AssetClass::Crypto, 65_000.0, -1.2);
        assert!(record.synthetic);
        assert_eq!(record.source, SYNTHETIC_SOURCE);
    }

    #[test]
    fn record_json_round_trips_with_utc_timestamp() {
        let record = PriceRecord::new(AssetClass::Metal, 509.85, -0.12, "goldprice-org")
            .expect("valid record");

        let json = serde_json::to_value(&record).expect("serializes");
        assert_eq!(json["asset"], "metal");
        assert!(json["as_of"].as_str().expect("string").ends_with('Z'));

        let decoded: PriceRecord = serde_json::from_value(json).expect("deserializes");
        assert_eq!(decoded, record);
    }

    #[test]
    fn record_json_with_offset_timestamp_is_rejected() {
        let json = serde_json::json!({
            "asset": "crypto",
            "unit_price": 65000.0,
            "change_24h_percent": 1.0,
            "source": "okx",
            "synthetic": false,
            "as_of": "2024-05-01T08:30:15+08:00"
        });

        let error = serde_json::from_value::<PriceRecord>(json).expect_err("offset timestamp");
        assert!(error.to_string().contains("RFC3339 UTC"));
    }

    #[test]
    fn asset_parses_aliases_and_flips() {
        assert_eq!("BTC".parse::<AssetClass>(), Ok(AssetClass::Crypto));
        assert_eq!(" gold ".parse::<AssetClass>(), Ok(AssetClass::Metal));
        assert!("silver".parse::<AssetClass>().is_err());
        assert_eq!(AssetClass::Crypto.flipped().flipped(), AssetClass::Crypto);
    }
}
