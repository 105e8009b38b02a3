//! Decoding helpers for loosely-typed stored columns.
//!
//! The platform tables keep list fields as JSON-encoded TEXT and boolean
//! flags as free-form text. Some seeded rows were written double-encoded
//! (a JSON string containing JSON), so decoding tolerates both layers and
//! falls back to an empty collection when nothing parses. This is a
//! workaround for inconsistent upstream encoding; the write path in this
//! crate always single-encodes.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decodes a JSON-encoded TEXT column into a typed list.
///
/// Accepts a plain JSON array, a double-encoded array (JSON string whose
/// content is the array), or an empty/garbage value (yields an empty list).
#[must_use]
pub fn decode_json_list<T: DeserializeOwned>(raw: &str) -> Vec<T> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::String(inner)) => serde_json::from_str(&inner).unwrap_or_default(),
        Ok(value) => serde_json::from_value(value).unwrap_or_default(),
        Err(_) => Vec::new(),
    }
}

/// Encodes a list for storage in a JSON TEXT column.
///
/// # Errors
///
/// Returns the underlying `serde_json` error if serialization fails.
pub fn encode_json_list<T: serde::Serialize>(items: &[T]) -> Result<String, serde_json::Error> {
    serde_json::to_string(items)
}

/// Coerces a loosely-typed boolean column (`"true"`, `"TRUE"`, `"1"`,
/// anything else false) to a strict boolean.
#[must_use]
pub fn coerce_bool(raw: &str) -> bool {
    matches!(raw.trim(), "true" | "TRUE" | "1")
}

/// Parses a loosely-typed integer column, falling back to `default`.
#[must_use]
pub fn coerce_i64(raw: &str, default: i64) -> i64 {
    raw.trim().parse().unwrap_or(default)
}
