//! Runtime tunables, loadable from an optional TOML file.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::validate_positive;
use crate::error::{ConfigError, ValidationError};
use crate::synthetic::DEFAULT_USD_RATE;
use crate::AssetClass;

/// Every tunable of the price core and the terminal poll driver.
///
/// Missing keys take the defaults documented on each field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PricebarConfig {
    /// Per-attempt provider timeout. Default 5000.
    pub request_timeout_ms: u64,
    /// Cache freshness in normal mode. Default 9000.
    pub normal_freshness_ms: u64,
    /// Cache freshness in fast mode. Default 900.
    pub fast_freshness_ms: u64,
    /// How long fast mode stays on before expiring. Default 30000.
    pub fast_mode_duration_ms: u64,
    /// USD → local rate used when no rate provider answers. Default 7.2.
    pub fallback_usd_rate: f64,
    /// Fixed spot price for the last real metal provider. Default 2250.
    pub reference_gold_usd_per_ounce: f64,
    pub normal_poll_interval_ms: u64,
    pub fast_poll_interval_ms: u64,
    pub initial_asset: AssetClass,
}

impl Default for PricebarConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: 5_000,
            normal_freshness_ms: 9_000,
            fast_freshness_ms: 900,
            fast_mode_duration_ms: 30_000,
            fallback_usd_rate: DEFAULT_USD_RATE,
            reference_gold_usd_per_ounce: 2_250.0,
            normal_poll_interval_ms: 30_000,
            fast_poll_interval_ms: 1_000,
            initial_asset: AssetClass::Crypto,
        }
    }
}

impl PricebarConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("request_timeout_ms", self.request_timeout_ms),
            ("normal_freshness_ms", self.normal_freshness_ms),
            ("fast_freshness_ms", self.fast_freshness_ms),
            ("fast_mode_duration_ms", self.fast_mode_duration_ms),
            ("normal_poll_interval_ms", self.normal_poll_interval_ms),
            ("fast_poll_interval_ms", self.fast_poll_interval_ms),
        ] {
            if value == 0 {
                return Err(ValidationError::ZeroDuration { field });
            }
        }

        if self.fast_freshness_ms >= self.normal_freshness_ms {
            return Err(ValidationError::FreshnessOrder {
                fast_ms: self.fast_freshness_ms,
                normal_ms: self.normal_freshness_ms,
            });
        }

        validate_positive("fallback_usd_rate", self.fallback_usd_rate)?;
        validate_positive(
            "reference_gold_usd_per_ounce",
            self.reference_gold_usd_per_ounce,
        )?;
        Ok(())
    }

    pub fn freshness(&self, fast_mode: bool) -> Duration {
        Duration::from_millis(if fast_mode {
            self.fast_freshness_ms
        } else {
            self.normal_freshness_ms
        })
    }

    pub fn fast_mode_duration(&self) -> Duration {
        Duration::from_millis(self.fast_mode_duration_ms)
    }

    pub fn poll_interval(&self, fast_mode: bool) -> Duration {
        Duration::from_millis(if fast_mode {
            self.fast_poll_interval_ms
        } else {
            self.normal_poll_interval_ms
        })
    }
}
