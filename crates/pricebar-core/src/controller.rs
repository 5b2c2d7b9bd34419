//! Freshness cache and mode controller.
//!
//! [`PriceController`] owns all mutable widget state: the active asset class,
//! the fast/normal refresh mode with its cancelable expiry task, and the
//! per-asset price cache. It is the only surface a presentation layer calls.
//!
//! ```text
//!            toggle_fast_mode()
//!   NORMAL ───────────────────────▶ FAST   (expiry task scheduled)
//!     ▲                              │
//!     ├──── toggle_fast_mode() ──────┤     (expiry task aborted, no event)
//!     └──── expiry elapsed ──────────┘     (ModeEvent::FastModeEnded)
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::cache::PriceCache;
use crate::config::PricebarConfig;
use crate::resolver::PriceSource;
use crate::synthetic::synthetic_record;
use crate::{AssetClass, PriceRecord};

/// Notifications emitted to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeEvent {
    /// Fast mode ran out its timer and reverted to normal.
    FastModeEnded,
}

struct ModeState {
    active_asset: AssetClass,
    fast_mode: bool,
    /// Bumped on every enable so a stale expiry task never applies.
    generation: u64,
    expiry: Option<JoinHandle<()>>,
}

impl ModeState {
    fn cancel_expiry(&mut self) {
        if let Some(handle) = self.expiry.take() {
            handle.abort();
        }
    }
}

struct AppState {
    mode: ModeState,
    cache: PriceCache,
}

type SharedState = Arc<Mutex<AppState>>;

fn lock(state: &SharedState) -> MutexGuard<'_, AppState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct PriceController {
    state: SharedState,
    source: Arc<dyn PriceSource>,
    config: PricebarConfig,
    in_flight: [tokio::sync::Mutex<()>; 2],
    events: broadcast::Sender<ModeEvent>,
}

impl PriceController {
    pub fn new(source: Arc<dyn PriceSource>, config: PricebarConfig) -> Self {
        let (events, _) = broadcast::channel(8);
        let state = AppState {
            mode: ModeState {
                active_asset: config.initial_asset,
                fast_mode: false,
                generation: 0,
                expiry: None,
            },
            cache: PriceCache::new(),
        };

        Self {
            state: Arc::new(Mutex::new(state)),
            source,
            config,
            in_flight: [tokio::sync::Mutex::new(()), tokio::sync::Mutex::new(())],
            events,
        }
    }

    /// Receiver for [`ModeEvent`]s emitted after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<ModeEvent> {
        self.events.subscribe()
    }

    pub fn current_asset(&self) -> AssetClass {
        lock(&self.state).mode.active_asset
    }

    /// Flips crypto ↔ metal. Fast mode and cached prices are untouched.
    pub fn toggle_asset(&self) -> AssetClass {
        let mut state = lock(&self.state);
        state.mode.active_asset = state.mode.active_asset.flipped();
        info!(asset = state.mode.active_asset.as_str(), "active asset toggled");
        state.mode.active_asset
    }

    pub fn is_fast_mode(&self) -> bool {
        lock(&self.state).mode.fast_mode
    }

    /// Flips fast mode and returns the new state.
    ///
    /// Enabling schedules the expiry task; disabling aborts it without
    /// emitting [`ModeEvent::FastModeEnded`]. Must be called from within a
    /// tokio runtime.
    pub fn toggle_fast_mode(&self) -> bool {
        let mut state = lock(&self.state);

        if state.mode.fast_mode {
            state.mode.fast_mode = false;
            state.mode.cancel_expiry();
            info!("fast mode disabled");
            return false;
        }

        state.mode.fast_mode = true;
        state.mode.generation = state.mode.generation.wrapping_add(1);
        state.mode.cancel_expiry();
        state.mode.expiry = Some(tokio::spawn(expire_fast_mode(
            Arc::clone(&self.state),
            self.events.clone(),
            Instant::now() + self.config.fast_mode_duration(),
            state.mode.generation,
        )));
        info!(
            duration_ms = self.config.fast_mode_duration_ms,
            "fast mode enabled"
        );
        true
    }

    /// Current price for the active asset class.
    ///
    /// A cached record strictly younger than the freshness threshold (900 ms
    /// in fast mode, 9000 ms otherwise by default) is returned as-is unless
    /// `force_refresh` is set. While a fetch for the same asset is running,
    /// non-forced callers get the last known record immediately; they only
    /// wait when nothing is cached yet, and then reuse that fetch's result.
    pub async fn get_price(&self, force_refresh: bool) -> PriceRecord {
        let asset = self.current_asset();

        if !force_refresh {
            if let Some(record) = self.fresh_cached(asset) {
                debug!(asset = asset.as_str(), "cache hit");
                return record;
            }
        }

        let in_flight = &self.in_flight[asset.index()];
        let _guard = match in_flight.try_lock() {
            Ok(guard) => guard,
            Err(_) => {
                if !force_refresh {
                    if let Some(record) = self.last_known(asset) {
                        return record;
                    }
                }
                in_flight.lock().await
            }
        };

        if !force_refresh {
            if let Some(record) = self.fresh_cached(asset) {
                debug!(asset = asset.as_str(), "served by concurrent fetch");
                return record;
            }
        }

        let fetched_at = Instant::now();
        let record = self.fetch(asset).await;
        lock(&self.state)
            .cache
            .put(asset, record.clone(), fetched_at);
        record
    }

    fn fresh_cached(&self, asset: AssetClass) -> Option<PriceRecord> {
        let state = lock(&self.state);
        let threshold = self.config.freshness(state.mode.fast_mode);
        state
            .cache
            .fresh(asset, Instant::now(), threshold)
            .cloned()
    }

    /// Cached record regardless of age.
    fn last_known(&self, asset: AssetClass) -> Option<PriceRecord> {
        let state = lock(&self.state);
        let entry = state.cache.entry(asset)?;
        debug!(
            asset = asset.as_str(),
            age_ms = state
                .cache
                .age(asset, Instant::now())
                .map_or(0, |age| age.as_millis() as u64),
            "fetch in flight; serving last known price"
        );
        Some(entry.record.clone())
    }

    async fn fetch(&self, asset: AssetClass) -> PriceRecord {
        let source = Arc::clone(&self.source);
        match tokio::spawn(async move { source.fetch_price(asset).await }).await {
            Ok(record) => record,
            Err(error) => {
                warn!(
                    asset = asset.as_str(),
                    "price source aborted ({error}); using synthetic data"
                );
                synthetic_record(asset, self.config.fallback_usd_rate)
            }
        }
    }
}

impl Drop for PriceController {
    fn drop(&mut self) {
        lock(&self.state).mode.cancel_expiry();
    }
}

async fn expire_fast_mode(
    state: SharedState,
    events: broadcast::Sender<ModeEvent>,
    deadline: Instant,
    generation: u64,
) {
    tokio::time::sleep_until(deadline).await;

    let expired = {
        let mut state = lock(&state);
        if state.mode.fast_mode && state.mode.generation == generation {
            state.mode.fast_mode = false;
            state.mode.expiry = None;
            true
        } else {
            false
        }
    };

    if expired {
        info!("fast mode expired");
        // No subscribers is fine; the state change already happened.
        let _ = events.send(ModeEvent::FastModeEnded);
    }
}
