//! Troy-ounce to gram conversion and display rounding for metal prices.

/// Grams in one troy ounce.
pub const GRAMS_PER_TROY_OUNCE: f64 = 31.1035;

/// Rounds to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Converts a local-currency-per-troy-ounce price to local currency per gram.
pub fn per_ounce_to_per_gram(per_ounce: f64) -> f64 {
    round2(per_ounce / GRAMS_PER_TROY_OUNCE)
}

/// Converts a USD-per-troy-ounce price to local currency per gram at `usd_rate`.
pub fn usd_ounce_to_local_gram(usd_per_ounce: f64, usd_rate: f64) -> f64 {
    round2(usd_per_ounce * usd_rate / GRAMS_PER_TROY_OUNCE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_usd_ounce_at_exchange_rate() {
        // 2202.50 * 7.20 / 31.1035 = 509.846...
        assert_eq!(usd_ounce_to_local_gram(2202.50, 7.20), 509.85);
    }

    #[test]
    fn converts_local_ounce_to_gram() {
        assert_eq!(per_ounce_to_per_gram(16_000.0), 514.41);
        assert_eq!(per_ounce_to_per_gram(0.0), 0.0);
    }

    #[test]
    fn rounds_to_cents() {
        assert_eq!(round2(1.005_1), 1.01);
        assert_eq!(round2(-0.234), -0.23);
    }
}
