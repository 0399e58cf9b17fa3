//! Typed view over the send-message response.
//!
//! ```json
//! {
//!   "messaging_product": "whatsapp",
//!   "contacts": [{ "input": "15551234567", "wa_id": "15551234567" }],
//!   "messages": [{ "id": "wamid.HBgL...", "message_status": "accepted" }]
//! }
//! ```

use serde::Deserialize;
use serde_json::Value;

use crate::domain::JsonObject;
use crate::domain::error::DomainError;

/// Result of a successful template send.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageResponse {
    pub messaging_product: Option<String>,
    pub contacts: Vec<MessageContact>,
    /// `messages[0].id`, the WhatsApp message id (`wamid.…`).
    pub message_id: Option<String>,
    /// `messages[0].message_status` when the API reports one.
    pub message_status: Option<String>,
    /// The response exactly as received.
    pub raw: JsonObject,
}

/// A recipient as resolved by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MessageContact {
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub wa_id: String,
}

impl MessageResponse {
    /// Build from the raw response. Only a non-object body is rejected;
    /// every attribute is optional.
    pub fn from_json(value: Value) -> Result<Self, DomainError> {
        let raw = match value {
            Value::Object(map) => map,
            other => return Err(DomainError::malformed("a JSON object", &other)),
        };

        let contacts = raw
            .get("contacts")
            .and_then(Value::as_array)
            .map(|arr| {
                arr.iter()
                    .filter_map(|c| serde_json::from_value(c.clone()).ok())
                    .collect()
            })
            .unwrap_or_default();

        let first_message = raw
            .get("messages")
            .and_then(Value::as_array)
            .and_then(|arr| arr.first());

        let field = |key: &str| {
            first_message
                .and_then(|m| m.get(key))
                .and_then(Value::as_str)
                .map(String::from)
        };

        Ok(Self {
            messaging_product: raw
                .get("messaging_product")
                .and_then(Value::as_str)
                .map(String::from),
            contacts,
            message_id: field("id"),
            message_status: field("message_status"),
            raw,
        })
    }
}
