//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `waba-adapters` crate provides implementations.

use async_trait::async_trait;
use serde_json::Value;

use crate::application::ClientError;
use crate::domain::{DomainError, DomainValidator, Template};

/// Port for the messaging API.
///
/// Paths are relative (`/{phone_number_id}/messages`); the implementation
/// owns the base URL, API version, authentication, timeouts and any retry
/// policy.
///
/// Implemented by:
/// - `waba_adapters::http::HttpApiClient` (production)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// GET `path` with query parameters.
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, ClientError>;

    /// POST a JSON body to `path`.
    async fn post(&self, path: &str, body: &Value) -> Result<Value, ClientError>;

    /// DELETE `path` with query parameters.
    async fn delete(&self, path: &str, query: &[(String, String)])
    -> Result<Value, ClientError>;
}

/// Port for operational logging.
///
/// Implemented by:
/// - `waba_adapters::logging::TracingLogger` (production)
pub trait Logger: Send + Sync {
    fn debug(&self, message: &str);

    fn info(&self, message: &str);

    /// Record a failure together with the error that caused it.
    fn error(&self, message: &str, cause: &(dyn std::error::Error + 'static));
}

/// Port for template content checks run before anything is sent.
pub trait TemplateValidator: Send + Sync {
    fn validate(&self, template: &Template) -> Result<(), DomainError>;
}

impl TemplateValidator for DomainValidator {
    fn validate(&self, template: &Template) -> Result<(), DomainError> {
        DomainValidator::validate_template(template)
    }
}
