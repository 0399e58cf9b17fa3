//! Graph API error envelope.
//!
//! Non-2xx responses carry
//! `{"error": {"message", "type", "code", "error_subcode", "fbtrace_id"}}`.

use serde::Deserialize;
use serde_json::Value;

use waba_core::application::ApiError;

/// Message used when the body carries no `error.message`.
pub const UNKNOWN_API_ERROR: &str = "Unknown API error";

#[derive(Debug, Deserialize)]
struct Envelope {
    error: GraphError,
}

#[derive(Debug, Default, Deserialize)]
struct GraphError {
    message: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    code: Option<Value>,
    error_subcode: Option<Value>,
    fbtrace_id: Option<String>,
}

/// Build an [`ApiError`] from a failed response.
pub fn api_error(status: u16, body: &[u8]) -> ApiError {
    let graph = serde_json::from_slice::<Envelope>(body)
        .map(|envelope| envelope.error)
        .unwrap_or_default();

    let code = graph
        .code
        .as_ref()
        .and_then(scalar)
        .unwrap_or_else(|| format!("http_{status}"));
    let message = graph
        .message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_API_ERROR.to_string());

    let mut details = Vec::new();
    if let Some(kind) = graph.kind {
        details.push(format!("type={kind}"));
    }
    if let Some(subcode) = graph.error_subcode.as_ref().and_then(scalar) {
        details.push(format!("subcode={subcode}"));
    }
    if let Some(trace) = graph.fbtrace_id {
        details.push(format!("fbtrace_id={trace}"));
    }

    let err = ApiError::new(code, message).with_status(status);
    if details.is_empty() {
        err
    } else {
        err.with_details(details.join(", "))
    }
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
