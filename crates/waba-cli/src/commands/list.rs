//! Implementation of the `waba list` command.

use serde_json::Value;
use tracing::instrument;

use waba_core::domain::JsonObject;

use crate::{
    cli::{ListArgs, ListFormat},
    commands::template_service,
    config::AppConfig,
    error::CliResult,
    output::{OutputManager, table},
};

const COLUMNS: [&str; 5] = ["NAME", "LANGUAGE", "STATUS", "CATEGORY", "ID"];

#[instrument(skip_all, fields(limit = ?args.limit))]
pub async fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = template_service(&config)?;
    let limit = args.limit.unwrap_or(config.defaults.list_limit);

    let spinner = output.spinner("Fetching templates");
    let result = service.get_templates(Some(limit)).await;
    spinner.finish_and_clear();
    let templates = result?;

    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            if templates.is_empty() {
                output.info("No templates found")?;
                return Ok(());
            }
            output.header(&format!("Templates ({}):", templates.len()))?;
            let rows: Vec<Vec<String>> = templates.iter().map(row).collect();
            for line in table(&COLUMNS, &rows) {
                output.data(&line)?;
            }
        }

        ListFormat::List => {
            for t in &templates {
                output.data(&field(t, "name"))?;
            }
        }

        // Bypasses the quiet check: JSON must be parseable even in pipes.
        ListFormat::Json => {
            let array = Value::Array(templates.into_iter().map(Value::Object).collect());
            output.json(&array)?;
        }
    }

    Ok(())
}

fn row(template: &JsonObject) -> Vec<String> {
    ["name", "language", "status", "category", "id"]
        .iter()
        .map(|key| field(template, key))
        .collect()
}

/// String rendering of a top-level field; `-` when absent.
fn field(template: &JsonObject, key: &str) -> String {
    match template.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "-".into(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn row_follows_column_order() {
        let t = json!({"name": "hello_world", "language": "en_US", "status": "APPROVED", "category": "UTILITY", "id": "42"});
        let r = row(t.as_object().unwrap());
        assert_eq!(r, ["hello_world", "en_US", "APPROVED", "UTILITY", "42"]);
    }

    #[test]
    fn missing_fields_render_as_dash() {
        let t = json!({"name": "otp", "id": 7});
        let r = row(t.as_object().unwrap());
        assert_eq!(r, ["otp", "-", "-", "-", "7"]);
    }
}
