//! Temple response envelope handling.
//!
//! A body is treated as an envelope only when it is a JSON object with a
//! `status` field. An envelope whose status is not `"success"`, or that
//! carries a top-level `error`, is a logical failure whatever the HTTP
//! status was. Bodies without a `status` field are validated as they are.

use serde_json::{Map, Value};

const SUCCESS: &str = "success";

/// Unwraps a 2xx body, returning the payload to validate.
///
/// `Err` carries the failure message of a logical error.
pub fn unwrap_envelope(body: Value) -> Result<Value, String> {
    let Value::Object(mut fields) = body else {
        return Ok(body);
    };

    let Some(status) = fields.get("status") else {
        return Ok(Value::Object(fields));
    };

    let succeeded = status.as_str() == Some(SUCCESS);
    let has_error = fields.get("error").is_some_and(|e| !e.is_null());

    if !succeeded || has_error {
        return Err(failure_message(&fields));
    }

    Ok(fields.remove("data").unwrap_or(Value::Null))
}

/// Extracts a message from a non-2xx Temple body.
///
/// Temple uses either `{"error": "text"}`, `{"error": {"Message": "text"}}`
/// or `{"message": "text"}`.
pub fn error_message(body: &str) -> Option<String> {
    let Value::Object(fields) = serde_json::from_str::<Value>(body).ok()? else {
        return None;
    };
    describe(fields.get("error")).or_else(|| describe(fields.get("message")))
}

fn failure_message(fields: &Map<String, Value>) -> String {
    describe(fields.get("error"))
        .or_else(|| describe(fields.get("message")))
        .unwrap_or_else(|| match fields.get("status") {
            Some(Value::String(status)) => format!("temple reported status '{status}'"),
            Some(other) => format!("temple reported status {other}"),
            None => "temple reported an error".to_string(),
        })
}

fn describe(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::String(text) => text.trim().to_string(),
        Value::Object(inner) => ["Message", "message"]
            .iter()
            .find_map(|k| inner.get(*k).and_then(Value::as_str))
            .map(|text| text.trim().to_string())?,
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}
