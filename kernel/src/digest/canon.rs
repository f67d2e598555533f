//! Canonical JSON bytes.
//!
//! # Canonicalization rules
//!
//! 1. Object keys are sorted lexicographically (byte order).
//! 2. Compact form, no whitespace: `{"a":1,"b":[2,3]}`.
//! 3. Numbers must be integers (`i64` or `u64`). Floats are rejected because
//!    their textual form is not stable across producers. Callers that need to
//!    carry an `f64` (path costs) encode it as a string first.
//!
//! `serde_json::Map` is a `BTreeMap` unless the `preserve_order` feature is
//! enabled, which this workspace never does; key order therefore comes from
//! the map itself and only the number rule needs an explicit pass.

use std::fmt::Write;

/// Error type for canonical JSON serialization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CanonError {
    /// A JSON number was not an integer.
    #[error("non-integer number in canonical JSON at {path}: {raw}")]
    NonIntegerNumber { path: String, raw: String },

    /// The writer itself failed.
    #[error("canonical JSON encoding failed: {detail}")]
    Encode { detail: String },
}

/// Produce canonical JSON bytes from a `serde_json::Value`.
///
/// # Errors
///
/// Returns [`CanonError::NonIntegerNumber`] naming the JSON path of the first
/// float found.
pub fn canonical_json_bytes(value: &serde_json::Value) -> Result<Vec<u8>, CanonError> {
    reject_floats(value, &mut String::from("$"))?;
    serde_json::to_vec(value).map_err(|e| CanonError::Encode {
        detail: e.to_string(),
    })
}

fn reject_floats(value: &serde_json::Value, path: &mut String) -> Result<(), CanonError> {
    match value {
        serde_json::Value::Number(n) if n.as_i64().is_none() && n.as_u64().is_none() => {
            Err(CanonError::NonIntegerNumber {
                path: path.clone(),
                raw: n.to_string(),
            })
        }
        serde_json::Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                let len = path.len();
                let _ = write!(path, "[{i}]");
                reject_floats(item, path)?;
                path.truncate(len);
            }
            Ok(())
        }
        serde_json::Value::Object(map) => {
            for (key, item) in map {
                let len = path.len();
                path.push('.');
                path.push_str(key);
                reject_floats(item, path)?;
                path.truncate(len);
            }
            Ok(())
        }
        _ => Ok(()),
    }
}
