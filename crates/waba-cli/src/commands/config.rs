//! `waba config`: inspect the effective configuration.

use std::path::Path;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    config: AppConfig,
    path: &Path,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.data(&value)?;
        }

        ConfigCommands::List => {
            let redacted = config.redacted();
            if output.is_json() {
                let value = serde_json::to_value(&redacted).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
                output.json(&value)?;
            } else {
                output.header("Current Configuration:")?;
                let serialised =
                    toml::to_string_pretty(&redacted).map_err(|e| CliError::ConfigError {
                        message: format!("Failed to serialise config: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                output.data(serialised.trim_end())?;
            }
        }

        ConfigCommands::Path => {
            output.data(&path.display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

/// Secrets are never printed in full.
fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    let unset = || "(unset)".to_string();
    match key {
        "api.base_url" => Ok(config.api.base_url.clone()),
        "api.api_version" => Ok(config.api.api_version.clone()),
        "api.access_token" => Ok(config
            .redacted()
            .api
            .access_token
            .unwrap_or_else(unset)),
        "api.phone_number_id" => Ok(config.api.phone_number_id.clone().unwrap_or_else(unset)),
        "api.timeout_secs" => Ok(config.api.timeout_secs.to_string()),
        "api.max_retries" => Ok(config.api.max_retries.to_string()),
        "defaults.language" => Ok(config.defaults.language.clone()),
        "defaults.list_limit" => Ok(config.defaults.list_limit.to_string()),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.format" => Ok(config.output.format.clone()),
        _ => Err(CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        }),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_known_key() {
        let cfg = AppConfig::default();
        assert_eq!(get_config_value(&cfg, "defaults.language").unwrap(), "en_US");
        assert_eq!(get_config_value(&cfg, "api.api_version").unwrap(), "v21.0");
    }

    #[test]
    fn get_unknown_key_is_error() {
        let cfg = AppConfig::default();
        assert!(matches!(
            get_config_value(&cfg, "does.not.exist"),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn token_is_masked() {
        let mut cfg = AppConfig::default();
        assert_eq!(get_config_value(&cfg, "api.access_token").unwrap(), "(unset)");
        cfg.api.access_token = Some("EAAGsecretsecret9876".into());
        assert_eq!(get_config_value(&cfg, "api.access_token").unwrap(), "****9876");
    }

    #[test]
    fn get_no_color_default() {
        let cfg = AppConfig::default();
        assert_eq!(get_config_value(&cfg, "output.no_color").unwrap(), "false");
    }
}
