//! # Domain Models
//!
//! Canonical types shared by the provider chain, the cache and the CLI.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`AssetClass`] | Crypto (BTC/USD) or metal (gold, local currency per gram) |
//! | [`PriceRecord`] | Normalized price with 24h change and provenance |
//! | [`UtcDateTime`] | UTC timestamp |
//!
//! Construction validates invariants: prices are finite and non-negative,
//! changes are finite.

mod models;
mod timestamp;
pub mod units;

pub use models::{AssetClass, PriceRecord, SYNTHETIC_SOURCE};
pub(crate) use models::validate_positive;
pub use timestamp::UtcDateTime;
