//! Error handling for the waba CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Exit code mapping

use std::error::Error;

use owo_colors::OwoColorize;
use thiserror::Error;

use waba_adapters::AdapterError;
use waba_core::error::{ErrorCategory as CoreCategory, MessageError};

use crate::config::ConfigLoadError;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input (bad file, malformed JSON, ...).
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ── Config errors ──────────────────────────────────────────────────────
    /// A required setting has no value in any layer.
    #[error("Missing setting '{key}'")]
    MissingSetting {
        key: &'static str,
        env: &'static str,
        flag: &'static str,
    },

    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The HTTP client could not be built from the configuration.
    #[error("Cannot set up API client: {0}")]
    Client(#[from] AdapterError),

    // ── Core errors ────────────────────────────────────────────────────────
    /// A template operation failed.
    #[error("{0}")]
    Message(#[from] MessageError),

    // ── System errors ──────────────────────────────────────────────────────
    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Operation cancelled by user.
    #[error("Operation cancelled")]
    Cancelled,
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<ConfigLoadError> for CliError {
    fn from(err: ConfigLoadError) -> Self {
        CliError::ConfigError {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl CliError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            source: None,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { .. } => vec!["Use --help for usage information".into()],

            Self::MissingSetting { key, env, flag } => vec![
                format!("Pass {flag} <VALUE>"),
                format!("Or export {env}=<VALUE>"),
                format!("Or set {key} in the config file (waba config path)"),
            ],

            Self::ConfigError { .. } => vec![
                "Check the config file shown by: waba config path".into(),
                "Use 'waba init --force' to recreate a default config".into(),
            ],

            Self::Client(AdapterError::MissingAccessToken) => vec![
                "Set api.access_token or WABA_ACCESS_TOKEN".into(),
            ],
            Self::Client(AdapterError::InvalidBaseUrl { .. }) => vec![
                "api.base_url must be an http(s) URL, e.g. https://graph.facebook.com".into(),
            ],
            Self::Client(AdapterError::HttpClient(_)) => vec![
                "The TLS/HTTP stack could not be initialised".into(),
            ],

            Self::Message(err) => err.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {}", message),
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],

            Self::Cancelled => vec!["Nothing was changed".into()],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::UserError,
            Self::MissingSetting { .. } => ErrorCategory::Configuration,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Client(AdapterError::HttpClient(_)) => ErrorCategory::Internal,
            Self::Client(_) => ErrorCategory::Configuration,
            Self::Message(err) => match err.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Rejected => ErrorCategory::Rejected,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
            Self::Cancelled => ErrorCategory::UserError,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | Internal      |  1   |
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Rejected      |  5   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::Internal => 1,
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Rejected => 5,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n\n",
            "✗".red().bold(),
            "Error:".red().bold()
        ));

        output.push_str(&format!("  {}\n", self.to_string().red()));

        if let Some(code) = self.code() {
            output.push_str(&format!("  {}\n", format!("code: {code}").dimmed()));
        }

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "→".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {}\n", suggestion));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(), // ℹ
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`], no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nError: {}\n", self));

        if let Some(code) = self.code() {
            out.push_str(&format!("  code: {code}\n"));
        }

        if verbose {
            let mut src = std::error::Error::source(self);
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Machine-readable rendering for `--output-format json`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "message": self.to_string(),
                "code": self.code(),
                "exit_code": self.exit_code(),
                "suggestions": self.suggestions(),
            }
        })
    }

    /// Code of the underlying template error, if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Message(err) => Some(err.code()),
            _ => None,
        }
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Rejected => tracing::warn!("Rejected by API: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments).
    UserError,
    /// Resource not found.
    NotFound,
    /// Configuration error.
    Configuration,
    /// The API refused the request.
    Rejected,
    /// Internal/system error.
    Internal,
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Extension trait to convert foreign error types into [`CliError`] at
/// call-sites with a descriptive context message.
pub trait IntoCli<T> {
    /// Convert to `CliResult` attaching a human-readable context message.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

impl<T> IntoCli<T> for Result<T, serde_json::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::InvalidInput {
            message: format!("{}: {e}", f().into()),
            source: Some(Box::new(e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use waba_core::application::ApiError;
    use waba_core::domain::DomainError;

    // ── suggestions ───────────────────────────────────────────────────────

    #[test]
    fn missing_setting_names_every_source() {
        let err = CliError::MissingSetting {
            key: "api.access_token",
            env: "WABA_ACCESS_TOKEN",
            flag: "--access-token",
        };
        let s = err.suggestions().join("\n");
        assert!(s.contains("--access-token"));
        assert!(s.contains("WABA_ACCESS_TOKEN"));
        assert!(s.contains("api.access_token"));
    }

    #[test]
    fn not_found_suggests_list() {
        let err = CliError::from(MessageError::template_not_found("spring_sale"));
        assert!(err.suggestions().iter().any(|s| s.contains("waba list")));
    }

    // ── exit codes ────────────────────────────────────────────────────────

    #[test]
    fn exit_code_internal() {
        assert_eq!(
            CliError::IoError {
                message: "x".into(),
                source: io::Error::other("e"),
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn exit_code_user_error() {
        assert_eq!(CliError::invalid_input("x").exit_code(), 2);
        assert_eq!(
            CliError::from(MessageError::from(DomainError::EmptyTemplateName)).exit_code(),
            2
        );
    }

    #[test]
    fn exit_code_not_found() {
        assert_eq!(
            CliError::from(MessageError::template_not_found("x")).exit_code(),
            3
        );
    }

    #[test]
    fn exit_code_configuration() {
        let missing = CliError::MissingSetting {
            key: "api.phone_number_id",
            env: "WABA_PHONE_NUMBER_ID",
            flag: "--phone-number-id",
        };
        assert_eq!(missing.exit_code(), 4);

        let unauthorized = MessageError::from_api(ApiError::new("190", "bad token").with_status(401));
        assert_eq!(CliError::from(unauthorized).exit_code(), 4);
        assert_eq!(CliError::from(AdapterError::MissingAccessToken).exit_code(), 4);
    }

    #[test]
    fn exit_code_rejected() {
        let rejected = MessageError::from_api(ApiError::new("131009", "bad param").with_status(400));
        assert_eq!(CliError::from(rejected).exit_code(), 5);
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn format_plain_shows_code_and_suggestions() {
        let err = CliError::from(MessageError::template_not_found("promo"));
        let s = err.format_plain(false);
        assert!(s.contains("Error: Template 'promo' not found"));
        assert!(s.contains("code: template_not_found"));
        assert!(s.contains("Suggestions:"));
    }

    #[test]
    fn format_plain_verbose_shows_chain_and_omits_hint() {
        let err = CliError::from(MessageError::wrap(
            "send_template_error",
            io::Error::other("socket closed"),
        ));
        let s = err.format_plain(true);
        assert!(s.contains("Caused by: socket closed"));
        assert!(!s.contains("--verbose"));
    }

    #[test]
    fn json_rendering() {
        let err = CliError::from(MessageError::template_not_found("promo"));
        let v = err.to_json();
        assert_eq!(v["error"]["code"], "template_not_found");
        assert_eq!(v["error"]["exit_code"], 3);
    }

    // ── IntoCli ───────────────────────────────────────────────────────────

    #[test]
    fn into_cli_io_error() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let cli: CliResult<()> = result.with_cli_context(|| "reading components");
        assert!(matches!(cli, Err(CliError::IoError { .. })));
    }

    #[test]
    fn into_cli_json_error() {
        let result: Result<serde_json::Value, _> = serde_json::from_str("[");
        let cli = result.with_cli_context(|| "parsing components");
        match cli {
            Err(CliError::InvalidInput { message, .. }) => {
                assert!(message.starts_with("parsing components"))
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
