//! Response body handling.
//!
//! The API wraps most payloads in `{ "data": ... }` but some endpoints answer
//! bare. Error bodies carry `{ "message" }` or `{ "error", "message" }`.

use formdesk_core::BackendError;
use formdesk_core::models::Step;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Parse a response body. An empty body is `null`.
pub(crate) fn parse_body(body: &str) -> Result<Value, BackendError> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|e| BackendError::Decode(format!("invalid JSON: {e}")))
}

/// Strip the `{ data }` envelope when present.
pub(crate) fn unwrap_data(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

pub(crate) fn decode<T: DeserializeOwned>(value: Value, what: &str) -> Result<T, BackendError> {
    serde_json::from_value(value).map_err(|e| BackendError::Decode(format!("{what}: {e}")))
}

/// Decode a listing; `null` is an empty list.
pub(crate) fn decode_list<T: DeserializeOwned>(
    value: Value,
    what: &str,
) -> Result<Vec<T>, BackendError> {
    match unwrap_data(value) {
        Value::Null => Ok(Vec::new()),
        other => decode(other, what),
    }
}

/// Steps of a form from `{ data: { steps } }`. A missing or `null` steps
/// document is an empty sequence; a bare array is accepted as well.
pub(crate) fn steps_from(value: Value) -> Result<Vec<Step>, BackendError> {
    match unwrap_data(value) {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => decode(Value::Array(items), "steps"),
        Value::Object(mut doc) => match doc.remove("steps") {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(steps) => decode(steps, "steps"),
        },
        other => Err(BackendError::Decode(format!(
            "steps: expected an object, got {other}"
        ))),
    }
}

/// The saved step from a create or update response. Some deployments answer
/// with the whole steps document; the last entry is then the saved step.
pub(crate) fn step_from(value: Value) -> Result<Step, BackendError> {
    match unwrap_data(value) {
        Value::Object(mut doc) if doc.get("steps").is_some_and(Value::is_array) => {
            let mut steps: Vec<Step> = decode(doc.remove("steps").unwrap_or(Value::Null), "steps")?;
            steps
                .pop()
                .ok_or_else(|| BackendError::Decode("step: empty steps document".into()))
        }
        other => decode(other, "step"),
    }
}

/// Message to surface from an error body, if the server sent one.
pub(crate) fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::trim)
        .find(|m| !m.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn data_envelope_is_optional() {
        assert_eq!(unwrap_data(json!({ "data": [1, 2] })), json!([1, 2]));
        assert_eq!(unwrap_data(json!([1, 2])), json!([1, 2]));
        assert_eq!(
            unwrap_data(json!({ "formId": "x" })),
            json!({ "formId": "x" })
        );
    }

    #[test]
    fn empty_body_is_null() {
        assert_eq!(parse_body("").unwrap(), Value::Null);
        assert!(matches!(parse_body("<html>"), Err(BackendError::Decode(_))));
    }

    #[test]
    fn missing_steps_document_is_empty() {
        assert!(steps_from(json!({ "data": null })).unwrap().is_empty());
        assert!(steps_from(json!({ "data": {} })).unwrap().is_empty());
        assert!(steps_from(json!({ "data": { "steps": null } })).unwrap().is_empty());
        assert!(steps_from(Value::Null).unwrap().is_empty());
    }

    #[test]
    fn steps_in_envelope_or_bare() {
        let step = json!({ "_id": "s1", "stepTitle": "Basic Info", "fields": [] });
        let wrapped = steps_from(json!({ "data": { "steps": [step.clone()] } })).unwrap();
        let bare = steps_from(json!([step])).unwrap();
        assert_eq!(wrapped, bare);
        assert_eq!(wrapped[0].id.as_deref(), Some("s1"));
    }

    #[test]
    fn saved_step_from_document_is_last() {
        let doc = json!({ "data": { "steps": [
            { "_id": "s1", "stepTitle": "One" },
            { "_id": "s2", "stepTitle": "Two" }
        ] } });
        assert_eq!(step_from(doc).unwrap().id.as_deref(), Some("s2"));
    }

    #[test]
    fn error_message_prefers_message() {
        assert_eq!(
            error_message(r#"{"error":"bad_request","message":"Step limit reached"}"#).as_deref(),
            Some("Step limit reached")
        );
        assert_eq!(
            error_message(r#"{"error":"Form not editable"}"#).as_deref(),
            Some("Form not editable")
        );
        assert_eq!(error_message(r#"{"message":"  "}"#), None);
        assert_eq!(error_message("Internal Server Error"), None);
    }
}
