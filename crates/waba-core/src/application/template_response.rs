//! Outcome of a create-template call.
//!
//! A single tagged type covers every way creation can end: the API accepted
//! the template, the API answered with an error body, the API answered with
//! something unrecognisable, or the call itself failed.

use serde_json::Value;

use crate::application::ApiError;
use crate::constants::codes;
use crate::domain::{DomainError, JsonObject};
use crate::error::MessageError;

/// Message used when the response carries neither `id` nor `error`.
pub const INVALID_RESPONSE_MESSAGE: &str = "Invalid response from server";

/// Message used when `error.message` is absent.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

#[derive(Debug, Clone)]
pub enum TemplateResponse {
    Success(CreatedTemplate),
    Failure(TemplateFailure),
}

/// The API accepted the template for review.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedTemplate {
    /// `id` as sent; non-scalar ids keep their JSON rendering (`null`).
    pub template_id: String,
    /// Review status, e.g. `PENDING` or `APPROVED`.
    pub status: Option<String>,
    pub category: Option<String>,
    pub raw: JsonObject,
}

#[derive(Debug, Clone)]
pub struct TemplateFailure {
    pub error_message: String,
    pub error_code: Option<String>,
    pub origin: FailureOrigin,
    /// Response body, empty for transport failures.
    pub raw: JsonObject,
    /// The mapped error for transport failures.
    pub cause: Option<MessageError>,
}

/// Where a creation failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureOrigin {
    /// The response carried an `error` object.
    Rejected,
    /// The response carried neither `id` nor `error`.
    InvalidResponse,
    /// The call did not produce a usable response.
    Transport,
}

impl TemplateResponse {
    /// Interpret a response body: `id` wins, then `error`, else invalid.
    pub fn from_json(raw: JsonObject) -> Self {
        if let Some(id) = raw.get("id") {
            let template_id = scalar_to_string(id).unwrap_or_else(|| id.to_string());
            return Self::Success(CreatedTemplate {
                template_id,
                status: raw.get("status").and_then(scalar_to_string),
                category: raw.get("category").and_then(scalar_to_string),
                raw,
            });
        }

        if let Some(error) = raw.get("error") {
            let error_message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or(UNKNOWN_ERROR_MESSAGE)
                .to_string();
            let error_code = error.get("code").and_then(scalar_to_string);
            return Self::Failure(TemplateFailure {
                error_message,
                error_code,
                origin: FailureOrigin::Rejected,
                raw,
                cause: None,
            });
        }

        Self::Failure(TemplateFailure {
            error_message: INVALID_RESPONSE_MESSAGE.to_string(),
            error_code: None,
            origin: FailureOrigin::InvalidResponse,
            raw,
            cause: None,
        })
    }

    /// Fold a failed call into the same result type.
    pub fn from_error(err: MessageError) -> Self {
        Self::Failure(TemplateFailure {
            error_message: err.message(),
            error_code: Some(err.code().to_string()),
            origin: FailureOrigin::Transport,
            raw: JsonObject::new(),
            cause: Some(err),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn template_id(&self) -> Option<&str> {
        match self {
            Self::Success(created) => Some(&created.template_id),
            Self::Failure(_) => None,
        }
    }

    /// The response body as received (empty for transport failures).
    pub fn raw(&self) -> &JsonObject {
        match self {
            Self::Success(created) => &created.raw,
            Self::Failure(failure) => &failure.raw,
        }
    }

    /// Convert into a `Result` for callers that want `?`.
    pub fn into_result(self) -> Result<CreatedTemplate, MessageError> {
        match self {
            Self::Success(created) => Ok(created),
            Self::Failure(failure) => Err(failure.into_error()),
        }
    }
}

impl TemplateFailure {
    pub fn into_error(self) -> MessageError {
        if let Some(cause) = self.cause {
            return cause;
        }
        match self.origin {
            FailureOrigin::Rejected => MessageError::from_api(ApiError::new(
                self.error_code
                    .unwrap_or_else(|| codes::CREATE_TEMPLATE.to_string()),
                self.error_message,
            )),
            _ => MessageError::wrap(
                codes::CREATE_TEMPLATE,
                DomainError::malformed("an object with `id` or `error`", &Value::Object(self.raw)),
            ),
        }
    }
}

/// Strings pass through; numbers are stringified (`"code": 100`).
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
