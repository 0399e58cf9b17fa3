use crate::domain::{entities::template::Template, error::DomainError};

/// Centralized domain validation.
///
/// The rules themselves live on the entities; this is the single entry
/// point the application layer plugs in as its default validator.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_template(template: &Template) -> Result<(), DomainError> {
        template.validate()
    }
}
