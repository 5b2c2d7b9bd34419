use crate::cli::SourcesArgs;
use crate::error::CliError;
use crate::output::format_line;

use super::AppContext;

pub async fn run(args: &SourcesArgs, context: &AppContext) -> Result<(), CliError> {
    let asset = context.asset_or_default(args.asset);
    let chain = context.resolver.chain(asset);
    println!("{} chain: {}", chain.label(), chain.provider_names().join(" -> "));

    let resolution = context.resolver.resolve(asset).await;
    for attempt in &resolution.failures {
        println!("  failed  {:<15} {}", attempt.provider, attempt.error);
    }
    println!(
        "  result  {}  ({} ms)",
        format_line(&resolution.record, false),
        resolution.latency_ms
    );
    Ok(())
}
