use pricebar_core::{PriceController, PricebarConfig};

use crate::cli::PriceArgs;
use crate::error::CliError;
use crate::output::format_line;

use super::AppContext;

pub async fn run(args: &PriceArgs, context: &AppContext) -> Result<(), CliError> {
    let config = PricebarConfig {
        initial_asset: context.asset_or_default(args.asset),
        ..context.config.clone()
    };
    let controller = PriceController::new(context.resolver.clone(), config);

    let record = controller.get_price(true).await;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!("{}", format_line(&record, false));
    }
    Ok(())
}
