//! Last-known price per asset class with age-based freshness.

use std::time::Duration;

use tokio::time::Instant;

use crate::{AssetClass, PriceRecord};

/// Cached record and the instant its fetch was started.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub record: PriceRecord,
    pub fetched_at: Instant,
}

/// One slot per asset class; entries are only ever replaced whole.
#[derive(Debug, Clone, Default)]
pub struct PriceCache {
    entries: [Option<CacheEntry>; 2],
}

impl PriceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&self, asset: AssetClass) -> Option<&CacheEntry> {
        self.entries[asset.index()].as_ref()
    }

    /// Age of the entry for `asset`, or `None` when nothing is cached.
    pub fn age(&self, asset: AssetClass, now: Instant) -> Option<Duration> {
        self.entry(asset)
            .map(|entry| now.saturating_duration_since(entry.fetched_at))
    }

    /// Returns the cached record if it is strictly younger than `max_age`.
    pub fn fresh(&self, asset: AssetClass, now: Instant, max_age: Duration) -> Option<&PriceRecord> {
        let entry = self.entry(asset)?;
        if now.saturating_duration_since(entry.fetched_at) < max_age {
            Some(&entry.record)
        } else {
            None
        }
    }

    pub fn put(&mut self, asset: AssetClass, record: PriceRecord, fetched_at: Instant) {
        self.entries[asset.index()] = Some(CacheEntry { record, fetched_at });
    }
}
