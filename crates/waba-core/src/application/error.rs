//! Errors raised through the `ApiClient` port.
//!
//! These describe failures of the remote call, not of template content.
//! Content errors are `DomainError` from `crate::domain`.

use thiserror::Error;

use crate::constants::codes;
use crate::error::ErrorCategory;

/// Structured error reported by the messaging API (or by the client on its
/// behalf when the request never completed).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message} (code {code})")]
pub struct ApiError {
    /// Provider error code, e.g. `"131026"`, or `http_<status>` when the
    /// body carried none.
    pub code: String,
    pub message: String,
    /// HTTP status if the server answered.
    pub http_status: Option<u16>,
    /// Sub-error detail from the upstream API.
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            http_status: None,
            details: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// The request failed before any response arrived.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(codes::NETWORK, message)
    }

    pub fn is_network(&self) -> bool {
        self.code == codes::NETWORK
    }

    /// Rate limiting, server faults and network failures may succeed later.
    pub fn is_retryable(&self) -> bool {
        self.is_network() || matches!(self.http_status, Some(429 | 500 | 502 | 503 | 504))
    }

    /// The token was rejected or lacks permissions.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.http_status, Some(401 | 403))
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        if self.is_auth_failure() {
            return ErrorCategory::Configuration;
        }
        match self.http_status {
            Some(404) => ErrorCategory::NotFound,
            Some(400..=499) => ErrorCategory::Rejected,
            // error body without a transport status, e.g. a refused creation
            None if !self.is_network() => ErrorCategory::Rejected,
            _ => ErrorCategory::Internal,
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        let mut out = Vec::new();
        match self.http_status {
            Some(401) => {
                out.push("The access token was rejected".into());
                out.push("Generate a new token and set WABA_ACCESS_TOKEN".into());
            }
            Some(403) => {
                out.push("The token lacks whatsapp_business_messaging permission".into());
            }
            Some(404) => {
                out.push("Check the configured phone number id".into());
            }
            Some(429) => {
                out.push("Rate limited by the API".into());
                out.push("Try again in a moment".into());
            }
            None if self.is_network() => {
                out.push("Could not reach the API".into());
                out.push("Check your network connection and api.base_url".into());
            }
            _ => out.push(format!("API error code {}", self.code)),
        }
        if let Some(details) = &self.details {
            out.push(format!("Details: {details}"));
        }
        out
    }
}

/// Failure returned by an `ApiClient` call.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The API (or the transport) reported a structured error.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The server answered 2xx but the body was not valid JSON.
    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}
