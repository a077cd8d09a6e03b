//! Literal encoding/decoding.
//!
//! Maps each [`LiteralKind`] to its JSON shape: strings for text, timestamps
//! and durations, numbers for floats and counts, booleans for flags.

use serde_json::{Number, Value};

use crate::error::{DecodeError, EncodeError};
use crate::model::{Literal, LiteralKind};
use crate::util::{Duration, Timestamp};

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a literal of the given kind.
///
/// Returns `Ok(None)` when the value has the wrong JSON shape for the kind;
/// the caller keeps such values as unrecognized. A value of the right shape
/// whose content does not parse is an error.
pub fn decode_literal(
    property: &'static str,
    kind: LiteralKind,
    value: &Value,
) -> Result<Option<Literal>, DecodeError> {
    let literal = match (kind, value) {
        (LiteralKind::String, Value::String(s)) => Literal::String(s.clone()),
        (LiteralKind::Float, Value::Number(n)) => match n.as_f64() {
            Some(f) => Literal::Float(f),
            None => return Ok(None),
        },
        (LiteralKind::Boolean, Value::Bool(b)) => Literal::Boolean(*b),
        (LiteralKind::DateTime, Value::String(s)) => decode_date_time(property, s)?,
        (LiteralKind::Duration, Value::String(s)) => decode_duration(property, s)?,
        (LiteralKind::NonNegativeInteger, Value::Number(n)) => decode_count(property, n)?,
        _ => return Ok(None),
    };
    Ok(Some(literal))
}

fn decode_date_time(property: &'static str, s: &str) -> Result<Literal, DecodeError> {
    Timestamp::parse(s)
        .map(Literal::DateTime)
        .map_err(|e| DecodeError::InvalidDateTime {
            property,
            value: s.to_string(),
            reason: e.to_string(),
        })
}

fn decode_duration(property: &'static str, s: &str) -> Result<Literal, DecodeError> {
    Duration::parse(s)
        .map(Literal::Duration)
        .map_err(|e| DecodeError::InvalidDuration {
            property,
            value: s.to_string(),
            reason: e.reason,
        })
}

fn decode_count(property: &'static str, n: &Number) -> Result<Literal, DecodeError> {
    n.as_u64()
        .map(Literal::NonNegativeInteger)
        .ok_or_else(|| DecodeError::InvalidNonNegativeInteger {
            property,
            value: n.to_string(),
        })
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a literal to its JSON form.
pub fn encode_literal(property: &'static str, literal: &Literal) -> Result<Value, EncodeError> {
    let value = match literal {
        Literal::String(s) => Value::String(s.clone()),
        Literal::Float(f) => Number::from_f64(*f)
            .map(Value::Number)
            .ok_or(EncodeError::NonFiniteFloat { property, value: *f })?,
        Literal::Boolean(b) => Value::Bool(*b),
        Literal::DateTime(ts) => Value::String(ts.to_string()),
        Literal::Duration(d) => Value::String(d.to_string()),
        Literal::NonNegativeInteger(n) => Value::Number(Number::from(*n)),
    };
    Ok(value)
}
