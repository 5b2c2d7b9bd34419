//! CLI argument definitions for pricebar.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `price` | Fetch one fresh price and print it |
//! | `watch` | Poll prices with interactive asset and fast-mode toggles |
//! | `fx` | Resolve the USD → CNY exchange rate |
//! | `sources` | Run a provider chain once and show every attempt |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--config` | none | TOML file with core tunables |
//! | `--offline` | `false` | Never touch the network; all chains fail over |
//! | `--timeout-ms` | config | Per-provider request timeout |
//! | `--fallback-rate` | config | USD → CNY rate when no rate provider answers |
//! | `--log-level` | `warn` | Default tracing filter when `RUST_LOG` is unset |
//!
//! # Examples
//!
//! ```bash
//! pricebar price
//! pricebar price --asset metal --json
//! pricebar watch --fast
//! pricebar sources --asset metal --offline
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pricebar_core::AssetClass;

/// Compact BTC and gold price ticker with provider fallback.
#[derive(Debug, Parser)]
#[command(name = "pricebar", author, version, about)]
pub struct Cli {
    /// Optional TOML configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable all network access; prices degrade to reference or synthetic data.
    #[arg(long, global = true, default_value_t = false)]
    pub offline: bool,

    /// Per-provider request timeout in milliseconds (overrides config).
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// USD → CNY rate used when every rate provider fails (overrides config).
    #[arg(long, global = true)]
    pub fallback_rate: Option<f64>,

    /// Log filter applied when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch a fresh price for one asset class.
    ///
    /// # Examples
    ///
    ///   pricebar price
    ///   pricebar price --asset metal --json
    Price(PriceArgs),

    /// Poll prices continuously.
    ///
    /// Reads single-letter commands from stdin:
    ///   t  toggle crypto/metal
    ///   f  toggle fast mode
    ///   r  refresh now
    ///   q  quit
    Watch(WatchArgs),

    /// Resolve the USD → CNY exchange rate.
    Fx,

    /// Run a provider chain once and print every attempt.
    Sources(SourcesArgs),
}

/// Arguments for the `price` command.
#[derive(Debug, Args)]
pub struct PriceArgs {
    /// Asset class: crypto (btc) or metal (gold). Defaults to config.
    #[arg(long)]
    pub asset: Option<AssetClass>,

    /// Print the full record as JSON.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// Arguments for the `watch` command.
#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Asset class to start on. Defaults to config.
    #[arg(long)]
    pub asset: Option<AssetClass>,

    /// Start in fast mode.
    #[arg(long, default_value_t = false)]
    pub fast: bool,
}

/// Arguments for the `sources` command.
#[derive(Debug, Args)]
pub struct SourcesArgs {
    /// Chain to run. Defaults to config.
    #[arg(long)]
    pub asset: Option<AssetClass>,
}
