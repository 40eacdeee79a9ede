//! Response envelope handling
//!
//! The backend answers in one of three shapes:
//!
//! - `{ "success": true, "data": <payload> }` - unwrapped to `data`
//! - `{ "success": false, "error": "...", "status": 422 }` - an engine failure
//! - anything else - the payload itself, returned untouched
//!
//! Not every route wraps its response, so the decision is made per body and
//! never applied twice.

use super::transport::RawResponse;
use crate::error::ClientError;
use serde_json::Value;

const UNKNOWN_ERROR: &str = "Unknown error";
const DEFAULT_FAILURE_STATUS: u16 = 500;

/// Interpret a completed exchange: classify non-2xx statuses, then parse and
/// unwrap the envelope of a success body.
pub fn interpret(response: RawResponse) -> Result<Value, ClientError> {
    if !response.is_success() {
        return Err(classify_status(response.status, &response.body));
    }

    let parsed: Value = serde_json::from_str(&response.body).map_err(|e| {
        ClientError::parse_failure(format!("Failed to parse response body: {}", e))
    })?;

    unwrap_envelope(parsed)
}

/// Map a non-2xx status and its body text to a classified error
pub fn classify_status(status: u16, body: &str) -> ClientError {
    let message = error_message(status, body);

    match status {
        400..=499 => ClientError::validation(format!("Request failed ({}): {}", status, message))
            .with_status(status),
        500..=u16::MAX => ClientError::engine_failure(
            format!("Server error ({}): {}", status, message),
            status,
        ),
        _ => ClientError::network(format!("Request failed ({}): {}", status, message))
            .with_status(status),
    }
}

/// Best human-readable message from an error body: its `error` or `message`
/// field when it is JSON, the raw text otherwise.
pub fn error_message(status: u16, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        for field in ["error", "message"] {
            match json.get(field) {
                Some(Value::String(s)) if !s.is_empty() => return s.clone(),
                Some(Value::String(_)) | Some(Value::Null) | None => {}
                Some(other) => return other.to_string(),
            }
        }
    }

    if body.is_empty() {
        format!("HTTP {}", status)
    } else {
        body.to_string()
    }
}

/// Apply the three-way envelope decision to a parsed success body
pub fn unwrap_envelope(body: Value) -> Result<Value, ClientError> {
    let mut map = match body {
        Value::Object(map) => map,
        other => return Ok(other),
    };

    match map.get("success").and_then(Value::as_bool) {
        Some(true) if map.contains_key("data") => Ok(map.remove("data").unwrap_or(Value::Null)),
        Some(false) => {
            let message = map
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or(UNKNOWN_ERROR);
            let status = map
                .get("status")
                .and_then(Value::as_u64)
                .and_then(|s| u16::try_from(s).ok())
                .unwrap_or(DEFAULT_FAILURE_STATUS);
            Err(ClientError::engine_failure(message, status))
        }
        _ => Ok(Value::Object(map)),
    }
}
