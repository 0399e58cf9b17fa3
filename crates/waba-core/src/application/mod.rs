//! Application layer for Waba.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (TemplateService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Errors raised through the API client port
//!
//! The application layer coordinates the domain layer but contains no
//! business rules itself. Template rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;
pub mod template_response;

// Re-export main services
pub use services::{Operation, TemplateService};

// Re-export port traits (for adapter implementation)
pub use ports::{ApiClient, Logger, TemplateValidator};

pub use error::{ApiError, ClientError};

pub use template_response::{
    CreatedTemplate, FailureOrigin, INVALID_RESPONSE_MESSAGE, TemplateFailure, TemplateResponse,
    UNKNOWN_ERROR_MESSAGE,
};
