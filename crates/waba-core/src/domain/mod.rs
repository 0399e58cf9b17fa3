// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Waba.
//!
//! This module contains the template message model and the typed views over
//! API responses. All I/O is reached through ports defined in the
//! application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No network or filesystem calls
//! - **Few external crates**: std, thiserror, serde and serde_json (the wire format)
//! - **Immutable values**: All domain objects are Clone
//!
// Public API - what the world sees
pub mod entities;
pub mod error;

// Private implementation details - not visible outside domain
mod validation;

/// A JSON object as returned by the API.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

// Re-exports for convenience
pub use entities::{
    component::{
        ButtonSubType, Currency, DateTimeValue, MAX_BUTTON_INDEX, MediaRef, Parameter,
        TemplateComponent,
    },
    listing::{first_template, template_entries},
    message_response::{MessageContact, MessageResponse},
    template::{Template, TemplateCategory},
};

pub use error::{DomainError, ErrorCategory};

pub use validation::DomainValidator;
