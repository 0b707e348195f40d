//! Response body conventions.
//!
//! A JSON array is the item list. A JSON object with an `error` key is the
//! service's "nothing found" answer and counts as an empty list. Anything
//! else is malformed.

use serde_json::Value;

use crate::error::FetchError;
use crate::transport::TransportResponse;

const MAX_ERROR_BODY: usize = 200;

/// Turns a sub-dictionary response into its ordered item list.
pub fn parse_items(response: &TransportResponse) -> Result<Vec<Value>, FetchError> {
    match parse_json(response)? {
        Value::Array(items) => Ok(items),
        Value::Object(map) if map.contains_key("error") => Ok(Vec::new()),
        other => Err(FetchError::Malformed(format!(
            "expected a JSON array, got {}",
            json_kind(&other)
        ))),
    }
}

/// Parses any successful JSON body.
pub fn parse_json(response: &TransportResponse) -> Result<Value, FetchError> {
    if !response.is_success() {
        return Err(FetchError::Remote {
            status: response.status,
            message: truncate(&response.body),
        });
    }
    Ok(serde_json::from_str(&response.body)?)
}

fn truncate(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}…", &body[..idx]),
        None => body.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
