//! Implementation of the `waba create` command.

use std::io::Read;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, instrument};

use waba_core::{application::TemplateResponse, domain::TemplateCategory};

use crate::{
    cli::{Category, CreateArgs},
    commands::{language_or_default, template_service},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

#[instrument(skip_all, fields(name = %args.name, category = %args.category))]
pub async fn execute(args: CreateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let components = read_components(&args.components)?;
    let service = template_service(&config)?;
    let language = language_or_default(args.language, &config);
    debug!(count = components.len(), "Loaded component definitions");

    let spinner = output.spinner(&format!("Submitting '{}' for review", args.name));
    let response = service
        .create_template(&args.name, &language, category(args.category), &components)
        .await;
    spinner.finish_and_clear();

    match response {
        TemplateResponse::Success(created) => {
            if output.is_json() {
                output.json(&Value::Object(created.raw))?;
                return Ok(());
            }
            output.success(&format!("Template '{}' submitted", args.name))?;
            output.data(&format!("template id: {}", created.template_id))?;
            if let Some(status) = created.status {
                output.print(&format!("status: {status}"))?;
            }
            Ok(())
        }
        TemplateResponse::Failure(failure) => Err(CliError::Message(failure.into_error())),
    }
}

fn category(category: Category) -> TemplateCategory {
    match category {
        Category::Marketing => TemplateCategory::Marketing,
        Category::Utility => TemplateCategory::Utility,
        Category::Authentication => TemplateCategory::Authentication,
    }
}

/// Read the component definitions from `path`, or stdin for `-`.
fn read_components(path: &Path) -> CliResult<Vec<Value>> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .with_cli_context(|| "Failed to read components from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|e| CliError::InvalidInput {
            message: format!("Cannot read components file '{}'", path.display()),
            source: Some(Box::new(e)),
        })?
    };
    parse_components(&text)
}

fn parse_components(text: &str) -> CliResult<Vec<Value>> {
    let value: Value =
        serde_json::from_str(text).with_cli_context(|| "Components are not valid JSON")?;
    match value {
        Value::Array(items) => Ok(items),
        other => Err(CliError::invalid_input(format!(
            "Components must be a JSON array, got {}",
            kind(&other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
