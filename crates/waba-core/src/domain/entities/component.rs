//! Template components and their parameters.
//!
//! These mirror the `components` array of a template message on the wire:
//!
//! ```json
//! { "type": "body", "parameters": [ { "type": "text", "text": "Ada" } ] }
//! { "type": "button", "sub_type": "quick_reply", "index": 0,
//!   "parameters": [ { "type": "payload", "payload": "YES" } ] }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::error::DomainError;

/// Highest button index the API accepts.
pub const MAX_BUTTON_INDEX: u8 = 9;

// ── TemplateComponent ────────────────────────────────────────────────────────

/// One structured fragment of a template message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TemplateComponent {
    Header {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        parameters: Vec<Parameter>,
    },
    Body {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        parameters: Vec<Parameter>,
    },
    Button {
        sub_type: ButtonSubType,
        index: u8,
        #[serde(default)]
        parameters: Vec<Parameter>,
    },
}

impl TemplateComponent {
    pub fn header(parameters: Vec<Parameter>) -> Self {
        Self::Header { parameters }
    }

    pub fn body(parameters: Vec<Parameter>) -> Self {
        Self::Body { parameters }
    }

    /// Quick-reply button returning `payload` in the webhook when tapped.
    pub fn quick_reply(index: u8, payload: impl Into<String>) -> Self {
        Self::Button {
            sub_type: ButtonSubType::QuickReply,
            index,
            parameters: vec![Parameter::payload(payload)],
        }
    }

    /// URL button whose dynamic suffix is `suffix`.
    pub fn url_button(index: u8, suffix: impl Into<String>) -> Self {
        Self::Button {
            sub_type: ButtonSubType::Url,
            index,
            parameters: vec![Parameter::text(suffix)],
        }
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Header { .. } => "header",
            Self::Body { .. } => "body",
            Self::Button { .. } => "button",
        }
    }

    pub fn parameters(&self) -> &[Parameter] {
        match self {
            Self::Header { parameters }
            | Self::Body { parameters }
            | Self::Button { parameters, .. } => parameters,
        }
    }

    /// Check the rules that apply to this component in isolation.
    ///
    /// `position` is the component's index in the template, used for error
    /// reporting only. Cross-component rules live in `Template::validate`.
    pub fn validate(&self, position: usize) -> Result<(), DomainError> {
        let invalid = |reason: String| DomainError::InvalidComponent {
            kind: self.kind(),
            index: position,
            reason,
        };

        for (i, parameter) in self.parameters().iter().enumerate() {
            parameter
                .validate()
                .map_err(|reason| invalid(format!("parameter {i}: {reason}")))?;
        }

        match self {
            Self::Header { parameters } => {
                if parameters.len() > 1 {
                    return Err(invalid(format!(
                        "a header takes at most one parameter, got {}",
                        parameters.len()
                    )));
                }
                if parameters.iter().any(|p| matches!(p, Parameter::Payload { .. })) {
                    return Err(invalid("payload parameters belong on buttons".into()));
                }
            }
            Self::Body { parameters } => {
                if let Some(p) = parameters.iter().find(|p| !p.is_text_like()) {
                    return Err(invalid(format!(
                        "body parameters must be text, currency or date_time, got {}",
                        p.kind()
                    )));
                }
            }
            Self::Button {
                sub_type,
                index,
                parameters,
            } => {
                if *index > MAX_BUTTON_INDEX {
                    return Err(invalid(format!(
                        "button index {index} exceeds {MAX_BUTTON_INDEX}"
                    )));
                }
                let expected = match sub_type {
                    ButtonSubType::QuickReply => "payload",
                    ButtonSubType::Url => "text",
                };
                if let Some(p) = parameters.iter().find(|p| p.kind() != expected) {
                    return Err(invalid(format!(
                        "{sub_type} buttons take {expected} parameters, got {}",
                        p.kind()
                    )));
                }
            }
        }

        Ok(())
    }
}

// ── ButtonSubType ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonSubType {
    QuickReply,
    Url,
}

impl ButtonSubType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::QuickReply => "quick_reply",
            Self::Url => "url",
        }
    }
}

impl fmt::Display for ButtonSubType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Parameter ────────────────────────────────────────────────────────────────

/// A value substituted into a template placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Parameter {
    Text { text: String },
    Currency { currency: Currency },
    DateTime { date_time: DateTimeValue },
    Image { image: MediaRef },
    Document { document: MediaRef },
    Video { video: MediaRef },
    Payload { payload: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub fallback_value: String,
    pub code: String,
    /// Amount multiplied by 1000.
    pub amount_1000: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeValue {
    pub fallback_value: String,
}

/// Reference to uploaded media (`id`) or a public URL (`link`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl MediaRef {
    pub fn link(url: impl Into<String>) -> Self {
        Self {
            link: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }
}

impl Parameter {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn payload(payload: impl Into<String>) -> Self {
        Self::Payload {
            payload: payload.into(),
        }
    }

    pub fn image(media: MediaRef) -> Self {
        Self::Image { image: media }
    }

    pub fn document(media: MediaRef) -> Self {
        Self::Document { document: media }
    }

    pub fn video(media: MediaRef) -> Self {
        Self::Video { video: media }
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Currency { .. } => "currency",
            Self::DateTime { .. } => "date_time",
            Self::Image { .. } => "image",
            Self::Document { .. } => "document",
            Self::Video { .. } => "video",
            Self::Payload { .. } => "payload",
        }
    }

    pub const fn is_text_like(&self) -> bool {
        matches!(
            self,
            Self::Text { .. } | Self::Currency { .. } | Self::DateTime { .. }
        )
    }

    pub fn media(&self) -> Option<&MediaRef> {
        match self {
            Self::Image { image: m } | Self::Document { document: m } | Self::Video { video: m } => {
                Some(m)
            }
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), String> {
        match self {
            Self::Text { text } if text.trim().is_empty() => Err("text is empty".into()),
            Self::Payload { payload } if payload.is_empty() => Err("payload is empty".into()),
            Self::Currency { currency } if currency.code.trim().is_empty() => {
                Err("currency code is empty".into())
            }
            _ => match self.media() {
                Some(m) if m.id.is_none() && m.link.is_none() => {
                    Err(format!("{} needs an id or a link", self.kind()))
                }
                _ => Ok(()),
            },
        }
    }
}
