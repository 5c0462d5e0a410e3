//! Required-field checks for incoming payloads.

use serde_json::{Map, Value};

/// Fields every record must carry, in the order they are reported
pub const REQUIRED_FIELDS: [&str; 5] = ["type", "amount", "sender", "receiver", "timestamp"];

/// True iff `payload` is an object holding every required field.
pub fn is_valid(payload: &Value) -> bool {
    payload
        .as_object()
        .map_or(false, |object| missing_fields(object).is_empty())
}

/// Required fields absent from `payload`.
pub fn missing_fields(payload: &Map<String, Value>) -> Vec<&'static str> {
    REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !payload.contains_key(*field))
        .collect()
}
