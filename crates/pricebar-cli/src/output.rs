//! Terminal formatting for price records.

use pricebar_core::{AssetClass, PriceRecord};

/// `BTC/USD $64850` or `XAU/g ¥509.85 / g`.
pub fn format_price(record: &PriceRecord) -> String {
    match record.asset {
        AssetClass::Crypto => format!("BTC/USD ${}", record.unit_price.floor()),
        AssetClass::Metal => format!("XAU/g ¥{:.2} / g", record.unit_price),
    }
}

/// `+1.25%`, `-0.40%`, `0.00%`.
pub fn format_change(change: f64) -> String {
    let sign = if change > 0.0 { "+" } else { "" };
    format!("{sign}{change:.2}%")
}

/// One status line: price, change, source and fetch time.
pub fn format_line(record: &PriceRecord, fast_mode: bool) -> String {
    let mut line = format!(
        "{}  {}  [{}] {}",
        format_price(record),
        format_change(record.change_24h_percent),
        record.source,
        record.as_of.clock_label(),
    );
    if fast_mode {
        line.push_str("  (fast)");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(asset: AssetClass, price: f64, change: f64) -> PriceRecord {
        PriceRecord::new(asset, price, change, "okx").expect("valid record")
    }

    #[test]
    fn crypto_price_is_floored_dollars() {
        let line = format_price(&record(AssetClass::Crypto, 64_850.99, 0.0));
        assert_eq!(line, "BTC/USD $64850");
    }

    #[test]
    fn metal_price_has_two_decimals_per_gram() {
        let line = format_price(&record(AssetClass::Metal, 509.8, 0.0));
        assert_eq!(line, "XAU/g ¥509.80 / g");
    }

    #[test]
    fn change_gets_plus_only_when_positive() {
        assert_eq!(format_change(1.254), "+1.25%");
        assert_eq!(format_change(-0.4), "-0.40%");
        assert_eq!(format_change(0.0), "0.00%");
    }

    #[test]
    fn line_shows_source_and_fast_mode() {
        let line = format_line(&record(AssetClass::Crypto, 65_000.0, 1.0), true);
        assert!(line.starts_with("BTC/USD $65000  +1.00%  [okx] "));
        assert!(line.ends_with("(fast)"));
        assert!(!format_line(&record(AssetClass::Metal, 1.0, 0.0), false).contains("fast"));
    }
}
