// ============================================================================
// domain/error.rs - TEMPLATE DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (carried inside `MessageError`)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Template name must not be empty")]
    EmptyTemplateName,

    #[error("Template language must not be empty")]
    EmptyLanguage,

    #[error("Duplicate {kind} component at position {index}")]
    DuplicateComponent { kind: &'static str, index: usize },

    #[error("Invalid {kind} component at position {index}: {reason}")]
    InvalidComponent {
        kind: &'static str,
        index: usize,
        reason: String,
    },

    #[error("Unknown template category '{0}'")]
    UnknownCategory(String),

    // ========================================================================
    // Response Shape Errors
    // ========================================================================
    #[error("Malformed response: expected {expected}, found {found}")]
    MalformedResponse {
        expected: &'static str,
        found: String,
    },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::EmptyTemplateName => vec![
                "Pass the template name exactly as approved in WhatsApp Manager".into(),
            ],
            Self::EmptyLanguage => vec![
                "Pass a language code such as en_US or pt_BR".into(),
            ],
            Self::DuplicateComponent { kind, .. } => vec![
                format!("A template message may carry only one {} component", kind),
                "Merge the parameters into a single component".into(),
            ],
            Self::InvalidComponent { kind, reason, .. } => vec![
                format!("Fix the {} component: {}", kind, reason),
                "Parameters must match the placeholders of the approved template".into(),
            ],
            Self::UnknownCategory(_) => vec![
                "Valid categories: MARKETING, UTILITY, AUTHENTICATION".into(),
            ],
            Self::MalformedResponse { .. } => vec![
                "The server answered with an unexpected payload".into(),
                "Check the configured API version and base URL".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedResponse { .. } => ErrorCategory::Internal,
            _ => ErrorCategory::Validation,
        }
    }

    /// Describe a JSON value's kind for `MalformedResponse`.
    pub(crate) fn malformed(expected: &'static str, found: &serde_json::Value) -> Self {
        let found = match found {
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "a boolean",
            serde_json::Value::Number(_) => "a number",
            serde_json::Value::String(_) => "a string",
            serde_json::Value::Array(_) => "an array",
            serde_json::Value::Object(_) => "an object",
        };
        Self::MalformedResponse {
            expected,
            found: found.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
