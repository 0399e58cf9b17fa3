//! The template message value type and template categories.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::domain::entities::component::{MAX_BUTTON_INDEX, TemplateComponent};
use crate::domain::error::DomainError;

// ── Template ─────────────────────────────────────────────────────────────────

/// A template message ready to be sent: approved template name, language
/// code and the components that fill its placeholders.
///
/// Built per call and discarded once serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub name: String,
    pub language: String,
    pub components: Vec<TemplateComponent>,
}

impl Template {
    pub fn new(name: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            language: language.into(),
            components: Vec::new(),
        }
    }

    pub fn with_components(mut self, components: Vec<TemplateComponent>) -> Self {
        self.components = components;
        self
    }

    pub fn add_component(mut self, component: TemplateComponent) -> Self {
        self.components.push(component);
        self
    }

    /// Validate name, language and component consistency.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::EmptyTemplateName);
        }
        if self.language.trim().is_empty() {
            return Err(DomainError::EmptyLanguage);
        }

        let mut seen_header = false;
        let mut seen_body = false;
        let mut button_slots = [false; MAX_BUTTON_INDEX as usize + 1];

        for (position, component) in self.components.iter().enumerate() {
            component.validate(position)?;

            match component {
                TemplateComponent::Header { .. } => {
                    if std::mem::replace(&mut seen_header, true) {
                        return Err(DomainError::DuplicateComponent {
                            kind: "header",
                            index: position,
                        });
                    }
                }
                TemplateComponent::Body { .. } => {
                    if std::mem::replace(&mut seen_body, true) {
                        return Err(DomainError::DuplicateComponent {
                            kind: "body",
                            index: position,
                        });
                    }
                }
                TemplateComponent::Button {
                    index, sub_type, ..
                } => {
                    // index <= 9 was checked by component.validate
                    let slot = &mut button_slots[usize::from(*index)];
                    if std::mem::replace(slot, true) {
                        return Err(DomainError::InvalidComponent {
                            kind: "button",
                            index: position,
                            reason: format!("{sub_type} button index {index} is already taken"),
                        });
                    }
                }
            }
        }

        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Wire shape: `{"name", "language": {"code"}, "components"?}`.
#[derive(Serialize)]
struct WireTemplate<'a> {
    name: &'a str,
    language: WireLanguage<'a>,
    #[serde(skip_serializing_if = "no_components")]
    components: &'a [TemplateComponent],
}

fn no_components(components: &&[TemplateComponent]) -> bool {
    components.is_empty()
}

#[derive(Serialize)]
struct WireLanguage<'a> {
    code: &'a str,
}

impl Serialize for Template {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WireTemplate {
            name: &self.name,
            language: WireLanguage {
                code: &self.language,
            },
            components: &self.components,
        }
        .serialize(serializer)
    }
}

// ── TemplateCategory ─────────────────────────────────────────────────────────

/// Category a new template is submitted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemplateCategory {
    Marketing,
    Utility,
    Authentication,
}

impl TemplateCategory {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Marketing => "MARKETING",
            Self::Utility => "UTILITY",
            Self::Authentication => "AUTHENTICATION",
        }
    }
}

impl fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "MARKETING" => Ok(Self::Marketing),
            "UTILITY" => Ok(Self::Utility),
            "AUTHENTICATION" | "AUTH" => Ok(Self::Authentication),
            other => Err(DomainError::UnknownCategory(other.to_string())),
        }
    }
}
