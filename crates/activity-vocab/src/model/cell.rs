//! Single-slot value cells.
//!
//! A [`ValueCell`] holds at most one [`CellValue`]. Which variants it may
//! hold is fixed by the [`PropertySpec`] it was created for; setters reject
//! anything else, and getters fail instead of guessing when the cell holds a
//! different variant.

use serde_json::Value;

use crate::error::AccessError;
use crate::model::{Entity, Iri, Literal, LiteralKind, PropertySpec};
use crate::util::{Duration, Timestamp};

/// The variant a cell holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantKind {
    /// A nested, owned entity.
    Entity,
    /// A bare IRI pointing at an entity that is not inlined.
    Reference,
    /// A scalar of the property's literal kind.
    Literal,
    /// A raw wire value none of the declared variants accepted.
    Unrecognized,
}

/// The payload of a populated cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Entity(Box<Entity>),
    Reference(Iri),
    Literal(Literal),
    Unrecognized(Value),
}

impl CellValue {
    /// Returns the variant of this value.
    pub fn kind(&self) -> VariantKind {
        match self {
            CellValue::Entity(_) => VariantKind::Entity,
            CellValue::Reference(_) => VariantKind::Reference,
            CellValue::Literal(_) => VariantKind::Literal,
            CellValue::Unrecognized(_) => VariantKind::Unrecognized,
        }
    }
}

/// A value slot belonging to one property.
#[derive(Debug, Clone)]
pub struct ValueCell {
    spec: &'static PropertySpec,
    value: Option<CellValue>,
}

impl PartialEq for ValueCell {
    fn eq(&self, other: &Self) -> bool {
        self.spec.name == other.spec.name && self.value == other.value
    }
}

impl ValueCell {
    /// Creates an empty cell for the given property.
    pub fn new(spec: &'static PropertySpec) -> Self {
        Self { spec, value: None }
    }

    /// Creates a cell holding `value`, checked against the property.
    pub fn with_value(spec: &'static PropertySpec, value: CellValue) -> Result<Self, AccessError> {
        let mut cell = Self::new(spec);
        cell.set(value)?;
        Ok(cell)
    }

    /// Creates a cell from a value the decoder already resolved against
    /// the property's variants.
    pub(crate) fn decoded(spec: &'static PropertySpec, value: CellValue) -> Self {
        Self {
            spec,
            value: Some(value),
        }
    }

    /// The property this cell belongs to.
    pub fn spec(&self) -> &'static PropertySpec {
        self.spec
    }

    /// The populated variant, if any.
    pub fn kind(&self) -> Option<VariantKind> {
        self.value.as_ref().map(CellValue::kind)
    }

    pub fn value(&self) -> Option<&CellValue> {
        self.value.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    pub fn clear(&mut self) {
        self.value = None;
    }

    /// Empties the cell, returning what it held.
    pub fn take(&mut self) -> Option<CellValue> {
        self.value.take()
    }

    /// Replaces the content with `value`, discarding the previous variant.
    pub fn set(&mut self, value: CellValue) -> Result<(), AccessError> {
        self.check(&value)?;
        self.value = Some(value);
        Ok(())
    }

    fn check(&self, value: &CellValue) -> Result<(), AccessError> {
        let variants = &self.spec.variants;
        let kind = value.kind();
        if !variants.accepts(kind) {
            return Err(AccessError::VariantNotAccepted {
                property: self.spec.name,
                variant: kind,
            });
        }
        match value {
            CellValue::Entity(entity) if !variants.accepts_type(entity.type_def()) => {
                Err(AccessError::EntityNotAccepted {
                    property: self.spec.name,
                    type_name: entity.type_name(),
                })
            }
            CellValue::Literal(literal) if variants.literal != Some(literal.kind()) => {
                Err(AccessError::LiteralNotAccepted {
                    property: self.spec.name,
                    expected: variants.literal,
                    found: literal.kind(),
                })
            }
            _ => Ok(()),
        }
    }

    fn wrong_variant(&self, expected: VariantKind) -> AccessError {
        AccessError::WrongVariant {
            expected,
            found: self.kind(),
        }
    }

    // =========================================================================
    // Nested entity
    // =========================================================================

    pub fn is_entity(&self) -> bool {
        matches!(self.value, Some(CellValue::Entity(_)))
    }

    pub fn get_entity(&self) -> Result<&Entity, AccessError> {
        match &self.value {
            Some(CellValue::Entity(entity)) => Ok(entity.as_ref()),
            _ => Err(self.wrong_variant(VariantKind::Entity)),
        }
    }

    pub fn get_entity_mut(&mut self) -> Result<&mut Entity, AccessError> {
        let found = self.kind();
        match &mut self.value {
            Some(CellValue::Entity(entity)) => Ok(entity.as_mut()),
            _ => Err(AccessError::WrongVariant {
                expected: VariantKind::Entity,
                found,
            }),
        }
    }

    pub fn set_entity(&mut self, entity: Entity) -> Result<(), AccessError> {
        self.set(CellValue::Entity(Box::new(entity)))
    }

    // =========================================================================
    // Reference
    // =========================================================================

    pub fn is_reference(&self) -> bool {
        matches!(self.value, Some(CellValue::Reference(_)))
    }

    pub fn get_reference(&self) -> Result<&Iri, AccessError> {
        match &self.value {
            Some(CellValue::Reference(iri)) => Ok(iri),
            _ => Err(self.wrong_variant(VariantKind::Reference)),
        }
    }

    pub fn set_reference(&mut self, iri: Iri) -> Result<(), AccessError> {
        self.set(CellValue::Reference(iri))
    }

    // =========================================================================
    // Literal
    // =========================================================================

    pub fn is_literal(&self) -> bool {
        matches!(self.value, Some(CellValue::Literal(_)))
    }

    pub fn get_literal(&self) -> Result<&Literal, AccessError> {
        match &self.value {
            Some(CellValue::Literal(literal)) => Ok(literal),
            _ => Err(self.wrong_variant(VariantKind::Literal)),
        }
    }

    pub fn set_literal(&mut self, literal: impl Into<Literal>) -> Result<(), AccessError> {
        self.set(CellValue::Literal(literal.into()))
    }

    fn is_literal_of(&self, kind: LiteralKind) -> bool {
        matches!(&self.value, Some(CellValue::Literal(l)) if l.kind() == kind)
    }

    fn literal_of(&self, expected: LiteralKind) -> Result<&Literal, AccessError> {
        let literal = self.get_literal()?;
        if literal.kind() != expected {
            return Err(AccessError::WrongLiteral {
                expected,
                found: Some(literal.kind()),
            });
        }
        Ok(literal)
    }

    pub fn is_string(&self) -> bool {
        self.is_literal_of(LiteralKind::String)
    }

    pub fn get_string(&self) -> Result<&str, AccessError> {
        let literal = self.literal_of(LiteralKind::String)?;
        literal.as_str().ok_or(AccessError::WrongLiteral {
            expected: LiteralKind::String,
            found: Some(literal.kind()),
        })
    }

    pub fn set_string(&mut self, value: impl Into<String>) -> Result<(), AccessError> {
        self.set_literal(Literal::String(value.into()))
    }

    pub fn is_float(&self) -> bool {
        self.is_literal_of(LiteralKind::Float)
    }

    pub fn get_float(&self) -> Result<f64, AccessError> {
        let literal = self.literal_of(LiteralKind::Float)?;
        literal.as_float().ok_or(AccessError::WrongLiteral {
            expected: LiteralKind::Float,
            found: Some(literal.kind()),
        })
    }

    pub fn set_float(&mut self, value: f64) -> Result<(), AccessError> {
        self.set_literal(Literal::Float(value))
    }

    pub fn is_boolean(&self) -> bool {
        self.is_literal_of(LiteralKind::Boolean)
    }

    pub fn get_boolean(&self) -> Result<bool, AccessError> {
        let literal = self.literal_of(LiteralKind::Boolean)?;
        literal.as_bool().ok_or(AccessError::WrongLiteral {
            expected: LiteralKind::Boolean,
            found: Some(literal.kind()),
        })
    }

    pub fn set_boolean(&mut self, value: bool) -> Result<(), AccessError> {
        self.set_literal(Literal::Boolean(value))
    }

    pub fn is_date_time(&self) -> bool {
        self.is_literal_of(LiteralKind::DateTime)
    }

    pub fn get_date_time(&self) -> Result<&Timestamp, AccessError> {
        let literal = self.literal_of(LiteralKind::DateTime)?;
        literal.as_date_time().ok_or(AccessError::WrongLiteral {
            expected: LiteralKind::DateTime,
            found: Some(literal.kind()),
        })
    }

    pub fn set_date_time(&mut self, value: Timestamp) -> Result<(), AccessError> {
        self.set_literal(Literal::DateTime(value))
    }

    pub fn is_duration(&self) -> bool {
        self.is_literal_of(LiteralKind::Duration)
    }

    pub fn get_duration(&self) -> Result<&Duration, AccessError> {
        let literal = self.literal_of(LiteralKind::Duration)?;
        literal.as_duration().ok_or(AccessError::WrongLiteral {
            expected: LiteralKind::Duration,
            found: Some(literal.kind()),
        })
    }

    pub fn set_duration(&mut self, value: Duration) -> Result<(), AccessError> {
        self.set_literal(Literal::Duration(value))
    }

    pub fn is_non_negative_integer(&self) -> bool {
        self.is_literal_of(LiteralKind::NonNegativeInteger)
    }

    pub fn get_non_negative_integer(&self) -> Result<u64, AccessError> {
        let literal = self.literal_of(LiteralKind::NonNegativeInteger)?;
        literal.as_non_negative_integer().ok_or(AccessError::WrongLiteral {
            expected: LiteralKind::NonNegativeInteger,
            found: Some(literal.kind()),
        })
    }

    pub fn set_non_negative_integer(&mut self, value: u64) -> Result<(), AccessError> {
        self.set_literal(Literal::NonNegativeInteger(value))
    }

    // =========================================================================
    // Unrecognized
    // =========================================================================

    pub fn has_unrecognized(&self) -> bool {
        matches!(self.value, Some(CellValue::Unrecognized(_)))
    }

    pub fn get_unrecognized(&self) -> Result<&Value, AccessError> {
        match &self.value {
            Some(CellValue::Unrecognized(raw)) => Ok(raw),
            _ => Err(self.wrong_variant(VariantKind::Unrecognized)),
        }
    }

    /// Stores a raw wire value. Every property accepts this variant.
    pub fn set_unrecognized(&mut self, raw: Value) {
        self.value = Some(CellValue::Unrecognized(raw));
    }
}
