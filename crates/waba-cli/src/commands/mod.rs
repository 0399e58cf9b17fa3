//! Command handlers, one module per subcommand.
//!
//! Handlers translate arguments into service calls and render the result.
//! No business logic lives here.

pub mod completions;
pub mod config;
pub mod create;
pub mod delete;
pub mod init;
pub mod list;
pub mod send;
pub mod show;

use waba_adapters::{HttpApiClient, TracingLogger};
use waba_core::application::TemplateService;

use crate::{
    config::AppConfig,
    error::{CliError, CliResult},
};

/// Wire the template service from configuration.
///
/// A missing access token or phone number id is a configuration error.
pub(crate) fn template_service(config: &AppConfig) -> CliResult<TemplateService> {
    let http = config
        .http_client_config()
        .ok_or(CliError::MissingSetting {
            key: "api.access_token",
            env: "WABA_ACCESS_TOKEN",
            flag: "--access-token",
        })?;

    let phone_number_id = config
        .api
        .phone_number_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(CliError::MissingSetting {
            key: "api.phone_number_id",
            env: "WABA_PHONE_NUMBER_ID",
            flag: "--phone-number-id",
        })?;

    let client = HttpApiClient::new(http)?;
    Ok(TemplateService::new(
        Box::new(client),
        phone_number_id,
        Box::new(TracingLogger),
    ))
}

/// `--lang` when given, else `defaults.language`.
pub(crate) fn language_or_default(language: Option<String>, config: &AppConfig) -> String {
    language.unwrap_or_else(|| config.defaults.language.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> AppConfig {
        let mut cfg = AppConfig::default();
        cfg.api.access_token = Some("EAAG-test".into());
        cfg.api.phone_number_id = Some("1099".into());
        cfg
    }

    #[test]
    fn service_builds_with_token_and_phone() {
        let service = template_service(&configured()).unwrap();
        assert_eq!(service.phone_number_id(), "1099");
    }

    #[test]
    fn missing_token_is_configuration_error() {
        let mut cfg = configured();
        cfg.api.access_token = None;
        let err = template_service(&cfg).err().unwrap();
        assert!(matches!(err, CliError::MissingSetting { key: "api.access_token", .. }));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn blank_phone_id_is_configuration_error() {
        let mut cfg = configured();
        cfg.api.phone_number_id = Some("  ".into());
        let err = template_service(&cfg).err().unwrap();
        assert!(matches!(err, CliError::MissingSetting { key: "api.phone_number_id", .. }));
    }

    #[test]
    fn language_falls_back_to_config() {
        let cfg = AppConfig::default();
        assert_eq!(language_or_default(None, &cfg), "en_US");
        assert_eq!(language_or_default(Some("pt_BR".into()), &cfg), "pt_BR");
    }
}
