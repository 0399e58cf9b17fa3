//! Implementation of the `waba show` command.

use serde_json::Value;
use tracing::instrument;

use crate::{
    cli::ShowArgs, commands::template_service, config::AppConfig, error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(name = %args.name))]
pub async fn execute(args: ShowArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = template_service(&config)?;

    let spinner = output.spinner(&format!("Fetching '{}'", args.name));
    let result = service.get_template_details(&args.name).await;
    spinner.finish_and_clear();
    let details = result?;

    if !output.is_json() {
        output.header(&format!("Template '{}'", args.name))?;
    }
    output.json(&Value::Object(details))?;
    Ok(())
}
