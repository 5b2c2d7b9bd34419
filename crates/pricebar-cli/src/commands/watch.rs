//! Interactive poll loop driving a [`PriceController`].
//!
//! Normal mode polls on the long interval and lets the cache answer; fast
//! mode polls on the short interval with forced refreshes.

use pricebar_core::{ModeEvent, PriceController, PricebarConfig};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info};

use crate::cli::WatchArgs;
use crate::error::CliError;
use crate::output::format_line;

use super::AppContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    ToggleAsset,
    ToggleFast,
    Refresh,
    Quit,
    Unknown,
}

fn parse_input(line: &str) -> Option<Input> {
    match line.trim() {
        "" => None,
        "t" => Some(Input::ToggleAsset),
        "f" => Some(Input::ToggleFast),
        "r" => Some(Input::Refresh),
        "q" => Some(Input::Quit),
        _ => Some(Input::Unknown),
    }
}

pub async fn run(args: &WatchArgs, context: &AppContext) -> Result<(), CliError> {
    let config = PricebarConfig {
        initial_asset: context.asset_or_default(args.asset),
        ..context.config.clone()
    };
    let controller = PriceController::new(context.resolver.clone(), config.clone());
    let mut events = controller.subscribe();
    if args.fast {
        controller.toggle_fast_mode();
    }

    println!("commands: t = toggle asset, f = toggle fast mode, r = refresh, q = quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut force = true;

    loop {
        let fast = controller.is_fast_mode();
        let record = controller.get_price(force || fast).await;
        println!("{}", format_line(&record, fast));
        force = false;

        let tick = tokio::time::sleep(config.poll_interval(fast));
        tokio::pin!(tick);

        // Wait for the next tick or for something that should re-render early.
        loop {
            tokio::select! {
                _ = &mut tick => break,
                line = lines.next_line(), if stdin_open => {
                    let Some(line) = line? else {
                        debug!("stdin closed; polling continues");
                        stdin_open = false;
                        continue;
                    };
                    match parse_input(&line) {
                        None => continue,
                        Some(Input::ToggleAsset) => {
                            controller.toggle_asset();
                            force = true;
                        }
                        Some(Input::ToggleFast) => {
                            controller.toggle_fast_mode();
                        }
                        Some(Input::Refresh) => force = true,
                        Some(Input::Quit) => return Ok(()),
                        Some(Input::Unknown) => {
                            eprintln!("unknown command '{}' (t, f, r, q)", line.trim());
                            continue;
                        }
                    }
                    break;
                }
                event = events.recv() => match event {
                    Ok(ModeEvent::FastModeEnded) => {
                        println!("fast mode ended");
                        break;
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        debug!(skipped, "mode events lagged");
                    }
                    Err(RecvError::Closed) => return Ok(()),
                },
                _ = tokio::signal::ctrl_c() => {
                    info!("interrupted");
                    return Ok(());
                }
            }
        }
    }
}
