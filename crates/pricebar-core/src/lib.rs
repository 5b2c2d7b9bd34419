//! # Pricebar Core
//!
//! Price acquisition and display-state control for the pricebar widget:
//! a BTC/USD or gold-per-gram figure, refreshed from public web APIs.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters and the fixed crypto/metal/exchange-rate chains |
//! | [`cache`] | Per-asset last-known price with age-based freshness |
//! | [`chain`] | Ordered provider chains with first-success semantics |
//! | [`config`] | Tunables and TOML loading |
//! | [`controller`] | Active asset, fast mode, cache policy |
//! | [`domain`] | [`AssetClass`], [`PriceRecord`], unit conversion |
//! | [`error`] | Validation and configuration errors |
//! | [`fx`] | USD → local exchange rate resolution |
//! | [`http_client`] | HTTP transport seam |
//! | [`provider`] | Provider contract and per-attempt errors |
//! | [`resolver`] | Chain resolver with synthetic fallback |
//! | [`synthetic`] | Locally generated fallback records |
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / Widget   │
//! └────────┬────────┘
//!          │ get_price / toggle_asset / toggle_fast_mode
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ PriceController │────▶│ PriceCache       │
//! └────────┬────────┘     └──────────────────┘
//!          │ miss
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ PriceResolver   │────▶│ Synthetic data   │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ SourceChain     │────▶│ HttpClient       │
//! │ (Provider list) │     │ (reqwest/offline)│
//! └─────────────────┘     └──────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use pricebar_core::{PriceController, PriceResolver, PricebarConfig, ReqwestHttpClient};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = PricebarConfig::default();
//!     let resolver = PriceResolver::new(Arc::new(ReqwestHttpClient::new()), &config);
//!     let controller = PriceController::new(Arc::new(resolver), config);
//!
//!     let record = controller.get_price(true).await;
//!     println!("{} {:.2} ({:+.2}%)", record.asset, record.unit_price, record.change_24h_percent);
//! }
//! ```
//!
//! ## Failure model
//!
//! Provider failures are classified as transport, parse or malformed-response
//! errors, logged, and answered by trying the next provider. Chains never
//! surface an error: when every provider fails, a synthetic record tagged
//! `synthetic: true` is returned instead.

pub mod adapters;
pub mod cache;
pub mod chain;
pub mod config;
pub mod controller;
pub mod domain;
pub mod error;
pub mod fx;
pub mod http_client;
pub mod provider;
pub mod resolver;
pub mod synthetic;

pub use cache::{CacheEntry, PriceCache};
pub use chain::{ChainFailure, ChainResult, ChainSuccess, ProviderAttempt, SourceChain};
pub use config::PricebarConfig;
pub use controller::{ModeEvent, PriceController};
pub use domain::{AssetClass, PriceRecord, UtcDateTime, SYNTHETIC_SOURCE};
pub use error::{ConfigError, ValidationError};
pub use fx::{ExchangeRateResolver, RateResolution};
pub use http_client::{
    HttpClient, HttpError, HttpFuture, HttpRequest, HttpResponse, OfflineHttpClient,
    ReqwestHttpClient,
};
pub use provider::{
    FetchContext, JsonProvider, Provider, ProviderError, ProviderErrorKind, ProviderFuture,
};
pub use resolver::{PriceFuture, PriceResolver, PriceSource, Resolution};
pub use synthetic::{synthetic_record, DEFAULT_USD_RATE};
