//! Literal scalar values.
//!
//! Each property that accepts literals fixes one [`LiteralKind`]; the
//! [`Literal`] payload must be of that kind.

use crate::util::{Duration, Timestamp};

/// XML Schema datatypes a literal may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    /// `xsd:string`
    String,
    /// `xsd:float`
    Float,
    /// `xsd:boolean`
    Boolean,
    /// `xsd:dateTime`
    DateTime,
    /// `xsd:duration`
    Duration,
    /// `xsd:nonNegativeInteger`
    NonNegativeInteger,
}

impl LiteralKind {
    /// Returns the XML Schema name of this kind.
    pub fn xsd_name(self) -> &'static str {
        match self {
            LiteralKind::String => "xsd:string",
            LiteralKind::Float => "xsd:float",
            LiteralKind::Boolean => "xsd:boolean",
            LiteralKind::DateTime => "xsd:dateTime",
            LiteralKind::Duration => "xsd:duration",
            LiteralKind::NonNegativeInteger => "xsd:nonNegativeInteger",
        }
    }

    /// Returns true if this kind is written as a JSON string on the wire.
    pub fn is_string_shaped(self) -> bool {
        matches!(self, LiteralKind::String | LiteralKind::DateTime | LiteralKind::Duration)
    }
}

/// A typed literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    /// Must be finite to be serialized.
    Float(f64),
    Boolean(bool),
    DateTime(Timestamp),
    Duration(Duration),
    NonNegativeInteger(u64),
}

impl Literal {
    /// Returns the kind of this literal.
    pub fn kind(&self) -> LiteralKind {
        match self {
            Literal::String(_) => LiteralKind::String,
            Literal::Float(_) => LiteralKind::Float,
            Literal::Boolean(_) => LiteralKind::Boolean,
            Literal::DateTime(_) => LiteralKind::DateTime,
            Literal::Duration(_) => LiteralKind::Duration,
            Literal::NonNegativeInteger(_) => LiteralKind::NonNegativeInteger,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Literal::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Literal::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_date_time(&self) -> Option<&Timestamp> {
        match self {
            Literal::DateTime(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_duration(&self) -> Option<&Duration> {
        match self {
            Literal::Duration(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_non_negative_integer(&self) -> Option<u64> {
        match self {
            Literal::NonNegativeInteger(v) => Some(*v),
            _ => None,
        }
    }

    /// Checks that the literal can be rendered to the wire form.
    ///
    /// Returns an error description if invalid, None if valid.
    pub fn validate(&self) -> Option<&'static str> {
        match self {
            Literal::Float(v) if v.is_nan() => Some("NaN is not representable in JSON"),
            Literal::Float(v) if v.is_infinite() => Some("infinity is not representable in JSON"),
            _ => None,
        }
    }
}

impl From<String> for Literal {
    fn from(v: String) -> Self {
        Literal::String(v)
    }
}

impl From<&str> for Literal {
    fn from(v: &str) -> Self {
        Literal::String(v.to_string())
    }
}

impl From<f64> for Literal {
    fn from(v: f64) -> Self {
        Literal::Float(v)
    }
}

impl From<bool> for Literal {
    fn from(v: bool) -> Self {
        Literal::Boolean(v)
    }
}

impl From<Timestamp> for Literal {
    fn from(v: Timestamp) -> Self {
        Literal::DateTime(v)
    }
}

impl From<Duration> for Literal {
    fn from(v: Duration) -> Self {
        Literal::Duration(v)
    }
}

impl From<u64> for Literal {
    fn from(v: u64) -> Self {
        Literal::NonNegativeInteger(v)
    }
}
