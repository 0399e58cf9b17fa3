//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "send a template message".

pub mod template_service;

pub use template_service::{Operation, TemplateService};
