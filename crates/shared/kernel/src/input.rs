//! Serde helpers for loosely typed form payloads.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserializes a field that should be a string, mapping any other JSON type to `None`.
///
/// Landing-page forms post whatever the browser hands them; a number or `null` where a
/// string belongs is treated as "not provided" and left to the validation step.
///
/// # Errors
/// Only when the input is not valid JSON at all.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(value)) => Some(value),
        _ => None,
    })
}
