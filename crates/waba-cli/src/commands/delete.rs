//! Implementation of the `waba delete` command.

use std::io::IsTerminal;

use serde_json::json;
use tracing::instrument;

use crate::{
    cli::DeleteArgs,
    commands::template_service,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(name = %args.name))]
pub async fn execute(args: DeleteArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = template_service(&config)?;

    if !args.yes {
        if !std::io::stdin().is_terminal() {
            return Err(CliError::invalid_input(
                "Refusing to delete without confirmation; pass --yes",
            ));
        }
        let prompt = format!("Delete every language version of '{}'?", args.name);
        if !confirm(&prompt)? {
            return Err(CliError::Cancelled);
        }
    }

    let spinner = output.spinner(&format!("Deleting '{}'", args.name));
    let result = service.delete_template(&args.name).await;
    spinner.finish_and_clear();
    let deleted = result?;

    if output.is_json() {
        output.json(&json!({ "name": args.name, "deleted": deleted }))?;
    } else {
        output.success(&format!("Template '{}' deleted", args.name))?;
    }
    Ok(())
}

#[cfg(feature = "interactive")]
fn confirm(prompt: &str) -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: std::io::Error::other(e),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm(prompt: &str) -> CliResult<bool> {
    use std::io::{self, Write};

    print!("{prompt} [y/N] ");
    io::stdout().flush().map_err(|e| CliError::IoError {
        message: "failed to flush stdout".into(),
        source: e,
    })?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: e,
        })?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input == "y" || input == "yes")
}
