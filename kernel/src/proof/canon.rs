//! Canonical JSON bytes: the one encoder used for everything that gets hashed.
//!
//! # Rules
//!
//! 1. Object keys sorted by byte order, at every depth.
//! 2. Compact form, no whitespace.
//! 3. Strings escaped the way `serde_json` escapes them.
//! 4. Numbers must be integers (`i64` or `u64`); floats are rejected so that
//!    digests never depend on float formatting.
//! 5. Array order is preserved.

use serde_json::Value;

/// Canonicalization failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CanonError {
    /// A number was not representable as `i64` or `u64`.
    #[error("non-integer number in canonical JSON: {raw}")]
    NonIntegerNumber { raw: String },

    /// `serde_json` refused to encode a scalar or key.
    #[error("canonical JSON encoding failed: {detail}")]
    Encode { detail: String },
}

impl From<serde_json::Error> for CanonError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encode {
            detail: err.to_string(),
        }
    }
}

/// Render `value` as canonical JSON bytes.
///
/// # Errors
///
/// - [`CanonError::NonIntegerNumber`] if any number is a float.
/// - [`CanonError::Encode`] if `serde_json` fails on a scalar or key.
pub fn canonical_json_bytes(value: &Value) -> Result<Vec<u8>, CanonError> {
    let mut out = Vec::new();
    emit(&mut out, value)?;
    Ok(out)
}

fn emit(out: &mut Vec<u8>, value: &Value) -> Result<(), CanonError> {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => emit_scalar(out, value)?,
        Value::Number(n) => {
            if n.is_f64() {
                return Err(CanonError::NonIntegerNumber { raw: n.to_string() });
            }
            emit_scalar(out, value)?;
        }
        Value::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                emit(out, item)?;
            }
            out.push(b']');
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_unstable_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
            out.push(b'{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                emit_str(out, key)?;
                out.push(b':');
                emit(out, item)?;
            }
            out.push(b'}');
        }
    }
    Ok(())
}

fn emit_scalar(out: &mut Vec<u8>, value: &Value) -> Result<(), CanonError> {
    serde_json::to_writer(&mut *out, value)?;
    Ok(())
}

fn emit_str(out: &mut Vec<u8>, s: &str) -> Result<(), CanonError> {
    serde_json::to_writer(&mut *out, s)?;
    Ok(())
}

/// Canonical bytes followed by a single newline, for files meant to be read
/// by people as well as hashed.
///
/// # Errors
///
/// Same as [`canonical_json_bytes`].
pub fn canonical_json_line(value: &Value) -> Result<Vec<u8>, CanonError> {
    let mut out = canonical_json_bytes(value)?;
    out.push(b'\n');
    Ok(out)
}
