use serde_json::{Map, Value};

use crate::error::{ApiError, ApiResult};

pub type Payload = Map<String, Value>;

/// Decodes a write body into a flat JSON object. An empty body counts as `{}`.
pub fn parse_object(body: &[u8]) -> ApiResult<Payload> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ApiError::validation("Payload must be a JSON object")),
        Err(e) => Err(ApiError::validation(format!("Invalid JSON payload: {e}"))),
    }
}

/// Reads a required string key. `None` when the key is absent or null.
pub fn take_string(payload: &mut Payload, key: &str) -> ApiResult<Option<String>> {
    match payload.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(ApiError::validation(format!("{key} must be a string"))),
    }
}

/// Scalar value as stored in a TEXT column.
pub fn scalar_text(key: &str, value: Value) -> ApiResult<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Array(_) | Value::Object(_) => Err(ApiError::validation(format!(
            "{key} must be a scalar value"
        ))),
    }
}
