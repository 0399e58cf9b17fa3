//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (`--access-token`, `--phone-number-id`, `--no-color`)
//! 2. Environment variables (`WABA__API__ACCESS_TOKEN`, ...)
//! 3. Config file (`--config` / `WABA_CONFIG`, else the platform config dir)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use waba_adapters::{
    HttpClientConfig, RetryPolicy,
    http::{DEFAULT_API_VERSION, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS},
};
use waba_core::constants::DEFAULT_TEMPLATE_LIMIT;

use crate::cli::global::GlobalArgs;

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "WABA";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Graph API connection.
    pub api: ApiConfig,
    /// Fallbacks for omitted flags.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_version: String,
    pub access_token: Option<String>,
    pub phone_number_id: Option<String>,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub language: String,
    pub list_limit: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_version: DEFAULT_API_VERSION.into(),
            access_token: None,
            phone_number_id: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: 0,
        }
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            language: "en_US".into(),
            list_limit: DEFAULT_TEMPLATE_LIMIT,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "human".into(),
        }
    }
}

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("Failed to read configuration: {0}")]
    Source(#[from] config::ConfigError),

    #[error("Invalid api.timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    #[error("Invalid defaults.list_limit: {0}. Must be at least 1")]
    InvalidListLimit(u32),

    #[error("Invalid output.format '{0}'. Must be one of: human, plain, json")]
    InvalidOutputFormat(String),
}

impl AppConfig {
    /// Load configuration with layered merging and apply CLI overrides.
    ///
    /// An explicit `--config` file must exist; the default location is
    /// optional.
    pub fn load(args: &GlobalArgs) -> Result<Self, ConfigLoadError> {
        let (path, required) = match &args.config {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };

        let mut config = Self::from_sources(&path, required)?;
        config.apply_overrides(args);
        config.validate()?;
        Ok(config)
    }

    fn from_sources(path: &Path, required: bool) -> Result<Self, ConfigLoadError> {
        let config = Config::builder()
            // 1. Start with programmatic defaults
            .add_source(Config::try_from(&Self::default())?)
            // 2. Merge the config file
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            // 3. Merge environment variables (highest priority)
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Apply command-line flags on top of the merged sources.
    pub fn apply_overrides(&mut self, args: &GlobalArgs) {
        if let Some(token) = &args.access_token {
            self.api.access_token = Some(token.clone());
        }
        if let Some(id) = &args.phone_number_id {
            self.api.phone_number_id = Some(id.clone());
        }
        if args.no_color {
            self.output.no_color = true;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.api.timeout_secs == 0 {
            return Err(ConfigLoadError::InvalidTimeout(self.api.timeout_secs));
        }
        if self.defaults.list_limit == 0 {
            return Err(ConfigLoadError::InvalidListLimit(self.defaults.list_limit));
        }
        if !matches!(self.output.format.as_str(), "human" | "plain" | "json") {
            return Err(ConfigLoadError::InvalidOutputFormat(
                self.output.format.clone(),
            ));
        }
        Ok(())
    }

    /// HTTP client settings; `None` when no access token is configured.
    pub fn http_client_config(&self) -> Option<HttpClientConfig> {
        let token = self
            .api
            .access_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())?;

        Some(
            HttpClientConfig::new(token)
                .with_base_url(self.api.base_url.clone())
                .with_api_version(self.api.api_version.clone())
                .with_timeout_secs(self.api.timeout_secs)
                .with_retry(RetryPolicy {
                    max_retries: self.api.max_retries,
                    ..RetryPolicy::default()
                }),
        )
    }

    /// Copy safe to print: the access token is masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if let Some(token) = &copy.api.access_token {
            copy.api.access_token = Some(mask(token));
        }
        copy
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.waba.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "waba", "waba")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".waba.toml"))
    }

    /// The file `load` reads for these arguments.
    pub fn active_path(args: &GlobalArgs) -> PathBuf {
        args.config.clone().unwrap_or_else(Self::config_path)
    }
}

/// Keep the last four characters of a secret.
fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "****".into();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}
