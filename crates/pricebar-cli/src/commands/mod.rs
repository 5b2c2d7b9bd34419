mod fx;
mod price;
mod sources;
mod watch;

use std::sync::Arc;

use pricebar_core::{
    AssetClass, HttpClient, OfflineHttpClient, PriceResolver, PricebarConfig, ReqwestHttpClient,
};
use tracing::debug;

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Resolved configuration and the shared resolver every command runs against.
pub struct AppContext {
    pub config: PricebarConfig,
    pub resolver: Arc<PriceResolver>,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let config = load_config(cli)?;
        let http: Arc<dyn HttpClient> = if cli.offline {
            Arc::new(OfflineHttpClient)
        } else {
            Arc::new(ReqwestHttpClient::new())
        };

        debug!(offline = cli.offline, ?config, "configuration resolved");
        let resolver = Arc::new(PriceResolver::new(http, &config));
        Ok(Self { config, resolver })
    }

    /// Explicit `--asset`, else the configured initial asset.
    pub fn asset_or_default(&self, asset: Option<AssetClass>) -> AssetClass {
        asset.unwrap_or(self.config.initial_asset)
    }
}

/// Config file (if any) with command-line overrides applied on top.
fn load_config(cli: &Cli) -> Result<PricebarConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => PricebarConfig::load(path)?,
        None => PricebarConfig::default(),
    };

    if let Some(timeout_ms) = cli.timeout_ms {
        config.request_timeout_ms = timeout_ms;
    }
    if let Some(rate) = cli.fallback_rate {
        config.fallback_usd_rate = rate;
    }

    config.validate()?;
    Ok(config)
}

pub async fn run(command: &Command, context: &AppContext) -> Result<(), CliError> {
    match command {
        Command::Price(args) => price::run(args, context).await,
        Command::Watch(args) => watch::run(args, context).await,
        Command::Fx => fx::run(context).await,
        Command::Sources(args) => sources::run(args, context).await,
    }
}
