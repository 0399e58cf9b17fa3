//! Unified error handling for Waba Core.
//!
//! [`MessageError`] is the only error type that leaves `TemplateService`.
//! Every failure is one of four kinds:
//!
//! | Variant            | Origin                                      |
//! |--------------------|---------------------------------------------|
//! | `InvalidContent`   | local validation, before any network call   |
//! | `TemplateNotFound` | lookup miss, raised locally                 |
//! | `Api`              | structured API error, passed through as is  |
//! | `Failed`           | anything else, wrapped with an operation code |

use std::error::Error as StdError;
use std::sync::Arc;

use thiserror::Error;

use crate::application::ApiError;
use crate::constants::codes;
use crate::domain::{DomainError, ErrorCategory as DomainCategory};

/// Shared, cloneable error cause.
pub type Cause = Arc<dyn StdError + Send + Sync + 'static>;

/// Root error type for template operations.
#[derive(Debug, Error, Clone)]
pub enum MessageError {
    /// The template failed validation; nothing was sent.
    #[error("Invalid message content: {message}")]
    InvalidContent {
        message: String,
        #[source]
        source: Option<DomainError>,
    },

    /// No template with this name exists for the account.
    #[error("Template '{name}' not found")]
    TemplateNotFound { name: String },

    /// The API client reported a structured error.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Any other failure, tagged with the operation's error code.
    #[error("{message}")]
    Failed {
        code: String,
        message: String,
        #[source]
        source: Option<Cause>,
    },
}

impl MessageError {
    /// Direct construction with a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            code: code.into(),
            message: message.into(),
            source: None,
        }
    }

    pub fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidContent {
            message: message.into(),
            source: None,
        }
    }

    pub fn template_not_found(name: impl Into<String>) -> Self {
        Self::TemplateNotFound { name: name.into() }
    }

    /// Translate an API-layer error, keeping its code and message.
    pub fn from_api(err: ApiError) -> Self {
        Self::Api(err)
    }

    /// Wrap an unexpected failure under `code`, retaining it as the cause.
    pub fn wrap(code: impl Into<String>, cause: impl StdError + Send + Sync + 'static) -> Self {
        Self::wrap_shared(code, Arc::new(cause))
    }

    pub fn wrap_shared(code: impl Into<String>, cause: Cause) -> Self {
        Self::Failed {
            code: code.into(),
            message: cause.to_string(),
            source: Some(cause),
        }
    }

    /// Machine-readable code.
    pub fn code(&self) -> &str {
        match self {
            Self::InvalidContent { .. } => codes::INVALID_CONTENT,
            Self::TemplateNotFound { .. } => codes::TEMPLATE_NOT_FOUND,
            Self::Api(api) => &api.code,
            Self::Failed { code, .. } => code,
        }
    }

    /// Human-readable message, without the variant prefix of `Display`.
    pub fn message(&self) -> String {
        match self {
            Self::InvalidContent { message, .. } | Self::Failed { message, .. } => {
                message.clone()
            }
            Self::TemplateNotFound { name } => format!("Template '{name}' not found"),
            Self::Api(api) => api.message.clone(),
        }
    }

    /// The original error, if one was retained.
    pub fn cause(&self) -> Option<&(dyn StdError + 'static)> {
        self.source()
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidContent {
                source: Some(domain),
                ..
            } => domain.suggestions(),
            Self::InvalidContent { .. } => {
                vec!["Check the template name, language and parameters".into()]
            }
            Self::TemplateNotFound { name } => vec![
                format!("No template named '{}' exists for this account", name),
                "Try: waba list to see available templates".into(),
                "Template names are lowercase with underscores".into(),
            ],
            Self::Api(api) => api.suggestions(),
            Self::Failed { .. } => vec![
                "The request failed unexpectedly".into(),
                "Re-run with -vv for the full error chain".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidContent {
                source: Some(domain),
                ..
            } => match domain.category() {
                DomainCategory::Validation => ErrorCategory::Validation,
                DomainCategory::Internal => ErrorCategory::Internal,
            },
            Self::InvalidContent { .. } => ErrorCategory::Validation,
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::Api(api) => api.category(),
            Self::Failed { .. } => ErrorCategory::Internal,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Api(api) if api.is_retryable())
    }
}

impl From<DomainError> for MessageError {
    fn from(err: DomainError) -> Self {
        Self::InvalidContent {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    /// The API refused the request (4xx).
    Rejected,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type MessageResult<T> = Result<T, MessageError>;
