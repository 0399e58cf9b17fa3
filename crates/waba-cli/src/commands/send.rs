//! Implementation of the `waba send` command.

use tracing::instrument;

use waba_core::domain::{MessageResponse, Parameter, TemplateComponent};

use crate::{
    cli::SendArgs,
    commands::{language_or_default, template_service},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(to = %args.to, template = %args.template))]
pub async fn execute(args: SendArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = template_service(&config)?;
    let language = language_or_default(args.language, &config);
    let components = build_components(args.header_param, args.body_params);

    let spinner = output.spinner(&format!("Sending '{}' to {}", args.template, args.to));
    let result = service
        .send_template(&args.to, &args.template, &language, components)
        .await;
    spinner.finish_and_clear();
    let sent = result?;

    render(&sent, &args.to, &output)?;
    Ok(())
}

/// Header first, then body; empty groups are omitted.
fn build_components(header: Option<String>, body: Vec<String>) -> Vec<TemplateComponent> {
    let mut components = Vec::new();
    if let Some(text) = header {
        components.push(TemplateComponent::header(vec![Parameter::text(text)]));
    }
    if !body.is_empty() {
        components.push(TemplateComponent::body(
            body.into_iter().map(Parameter::text).collect(),
        ));
    }
    components
}

fn render(sent: &MessageResponse, to: &str, output: &OutputManager) -> std::io::Result<()> {
    if output.is_json() {
        return output.json(&serde_json::Value::Object(sent.raw.clone()));
    }

    let id = sent.message_id.as_deref().unwrap_or("unknown");
    output.success(&format!("Message sent to {to}"))?;
    output.data(&format!("message id: {id}"))?;
    if let Some(status) = &sent.message_status {
        output.print(&format!("status: {status}"))?;
    }
    Ok(())
}
