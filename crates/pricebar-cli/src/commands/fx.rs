use crate::error::CliError;

use super::AppContext;

pub async fn run(context: &AppContext) -> Result<(), CliError> {
    let resolution = context
        .resolver
        .resolve_usd_to_local_rate(context.config.fallback_usd_rate)
        .await;

    for attempt in &resolution.failures {
        println!("  {:<14} {}", attempt.provider, attempt.error);
    }
    match resolution.provider {
        Some(provider) => println!("USD/CNY {:.4}  [{provider}]", resolution.rate),
        None => println!("USD/CNY {:.4}  [fallback]", resolution.rate),
    }
    Ok(())
}
