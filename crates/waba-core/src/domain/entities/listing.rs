//! Reading template listings (`{"data": [...], "paging": {...}}`).

use serde_json::Value;

use crate::domain::JsonObject;
use crate::domain::error::DomainError;

/// Entries of the `data` array.
///
/// A body without a `data` array (missing key, wrong type, or not an object
/// at all) is an empty listing. Entries that are not objects are a shape
/// error.
pub fn template_entries(raw: Value) -> Result<Vec<JsonObject>, DomainError> {
    match take_data(raw) {
        Some(entries) => entries.into_iter().map(into_object).collect(),
        None => Ok(Vec::new()),
    }
}

/// First entry of the `data` array, or `None` when it is missing or empty.
pub fn first_template(raw: Value) -> Result<Option<JsonObject>, DomainError> {
    match take_data(raw).and_then(|entries| entries.into_iter().next()) {
        Some(first) => into_object(first).map(Some),
        None => Ok(None),
    }
}

fn take_data(raw: Value) -> Option<Vec<Value>> {
    match raw {
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(entries)) => Some(entries),
            _ => None,
        },
        _ => None,
    }
}

fn into_object(entry: Value) -> Result<JsonObject, DomainError> {
    match entry {
        Value::Object(map) => Ok(map),
        other => Err(DomainError::malformed("template entries to be objects", &other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn data_array_is_returned_in_order() {
        let entries = template_entries(json!({
            "data": [{"name": "a"}, {"name": "b"}],
            "paging": {"cursors": {"after": "x"}}
        }))
        .unwrap();
        let names: Vec<_> = entries.iter().map(|e| e["name"].as_str().unwrap()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn missing_or_mistyped_data_is_empty() {
        assert!(template_entries(json!({})).unwrap().is_empty());
        assert!(template_entries(json!({"data": "not-a-list"})).unwrap().is_empty());
        assert!(template_entries(json!(null)).unwrap().is_empty());
    }

    #[test]
    fn non_object_entry_is_shape_error() {
        assert!(template_entries(json!({"data": [1]})).is_err());
    }

    #[test]
    fn first_template_picks_head() {
        let first = first_template(json!({"data": [{"id": "1"}, {"id": "2"}]})).unwrap();
        assert_eq!(first.unwrap()["id"], "1");
        assert!(first_template(json!({"data": []})).unwrap().is_none());
        assert!(first_template(json!({"error": {}})).unwrap().is_none());
    }
}
