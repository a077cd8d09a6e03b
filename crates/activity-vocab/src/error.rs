//! Error types for serialization, deserialization and typed access.

use thiserror::Error;

use crate::model::{Cardinality, LiteralKind, VariantKind};

/// Broad error categories, stable across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// A000: Input is not JSON, or not a JSON object where one is required
    InvalidInput,
    /// A001: A value has the expected shape but its content does not parse
    MalformedContent,
    /// A002: A decoding limit was exceeded
    LimitExceeded,
    /// A003: A populated value cannot be rendered to the wire form
    RenderFailure,
    /// A004: An accessor was used against the cell's or list's contract
    ContractViolation,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "A001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InvalidInput => "A000",
            ErrorCode::MalformedContent => "A001",
            ErrorCode::LimitExceeded => "A002",
            ErrorCode::RenderFailure => "A003",
            ErrorCode::ContractViolation => "A004",
        }
    }
}

/// Error during deserialization from the wire form.
///
/// Values whose shape matches none of a property's variants are not errors;
/// they are kept as unrecognized payloads.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    // === A000: Invalid input ===
    #[error("[A000] invalid JSON: {0}")]
    Json(String),

    #[error("[A000] expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    // === A001: Malformed content ===
    #[error("[A001] id {value:?} is not an absolute IRI")]
    InvalidId { value: String },

    #[error("[A001] type entries must be strings, found {found}")]
    InvalidTypeName { found: &'static str },

    #[error("[A001] property {property}: {value:?} is not an absolute IRI")]
    InvalidReference { property: &'static str, value: String },

    #[error("[A001] property {property}: invalid xsd:dateTime {value:?}: {reason}")]
    InvalidDateTime {
        property: &'static str,
        value: String,
        reason: String,
    },

    #[error("[A001] property {property}: invalid xsd:duration {value:?}: {reason}")]
    InvalidDuration {
        property: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("[A001] property {property}: {value} is not a non-negative integer")]
    InvalidNonNegativeInteger { property: &'static str, value: String },

    // === A002: Limits ===
    #[error("[A002] nesting depth exceeds maximum {max}")]
    DepthExceeded { max: usize },
}

impl DecodeError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DecodeError::Json(_) | DecodeError::NotAnObject { .. } => ErrorCode::InvalidInput,
            DecodeError::DepthExceeded { .. } => ErrorCode::LimitExceeded,
            _ => ErrorCode::MalformedContent,
        }
    }
}

/// Error during serialization to the wire form.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("[A003] property {property}: float {value} has no JSON representation")]
    NonFiniteFloat { property: &'static str, value: f64 },

    #[error("[A003] unknown field {key:?} nests deeper than {max}")]
    UnknownTooDeep { key: String, max: usize },
}

impl EncodeError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        ErrorCode::RenderFailure
    }
}

/// Misuse of a typed accessor.
///
/// These never come from data; they mean the caller asked for a variant,
/// index or property that the value does not have.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AccessError {
    #[error("[A004] expected {expected:?} variant, cell holds {found:?}")]
    WrongVariant {
        expected: VariantKind,
        found: Option<VariantKind>,
    },

    #[error("[A004] expected {expected:?} literal, cell holds {found:?}")]
    WrongLiteral {
        expected: LiteralKind,
        found: Option<LiteralKind>,
    },

    #[error("[A004] index {index} out of bounds (length: {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("[A004] type {type_name} declares no property {property:?}")]
    UnknownProperty { type_name: &'static str, property: String },

    #[error("[A004] property {property} is {actual:?}")]
    CardinalityMismatch {
        property: &'static str,
        actual: Cardinality,
    },

    #[error("[A004] property {property} does not accept {variant:?} values")]
    VariantNotAccepted {
        property: &'static str,
        variant: VariantKind,
    },

    #[error("[A004] property {property} does not accept a {type_name} entity")]
    EntityNotAccepted {
        property: &'static str,
        type_name: &'static str,
    },

    #[error("[A004] property {property} takes {expected:?} literals, not {found:?}")]
    LiteralNotAccepted {
        property: &'static str,
        expected: Option<LiteralKind>,
        found: LiteralKind,
    },

    #[error("[A004] property {property} has no language map")]
    NoLanguageMap { property: &'static str },

    #[error("[A004] {key:?} is reserved and cannot be stored as an unknown field")]
    ReservedKey { key: String },

    #[error("[A004] entity of type {found} is not a {expected}")]
    WrongEntityType {
        expected: &'static str,
        found: &'static str,
    },
}

impl AccessError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        ErrorCode::ContractViolation
    }
}
