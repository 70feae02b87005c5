//! HTTP API handlers.

pub mod health;
pub mod measurements;
pub mod predictions;
pub mod ui;

use serde_json::{Map, Value};

use crate::error::ApiError;

/// Parse a write-request body into a JSON object.
///
/// Callers have already rejected empty bodies; anything that is not a JSON
/// object is a bad request.
fn parse_object(body: &[u8]) -> Result<Map<String, Value>, ApiError> {
    match serde_json::from_slice(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ApiError::MalformedBody(format!(
            "expected a JSON object, got {}",
            type_name(&other)
        ))),
        Err(e) => Err(ApiError::MalformedBody(e.to_string())),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
