//! Builder API for ergonomic entity construction.
//!
//! # Example
//!
//! ```rust
//! use activity_vocab::model::{EntityBuilder, Iri};
//! use activity_vocab::vocab;
//!
//! let note = EntityBuilder::new(&vocab::NOTE)
//!     .id(Iri::parse("https://example.com/notes/1").unwrap())
//!     .reference("attributedTo", Iri::parse("https://example.com/alice").unwrap())
//!     .reference("to", Iri::public_audience())
//!     .literal("content", "Hello, world")
//!     .text("content", "fr", "Bonjour")
//!     .build()
//!     .unwrap();
//!
//! assert!(note.is_public());
//! ```

use serde_json::Value;

use crate::error::AccessError;
use crate::model::{CellValue, Entity, Iri, Literal, TypeDef};

/// Fluent builder for an [`Entity`].
///
/// Each step is checked against the type's declarations. The first failure
/// is kept, later steps are skipped, and [`EntityBuilder::build`] reports it.
#[derive(Debug, Clone)]
pub struct EntityBuilder {
    entity: Entity,
    error: Option<AccessError>,
}

impl EntityBuilder {
    /// Starts an entity of the given type.
    pub fn new(def: &'static TypeDef) -> Self {
        Self {
            entity: Entity::new(def),
            error: None,
        }
    }

    /// Sets the identifier.
    pub fn id(mut self, id: Iri) -> Self {
        self.entity.set_id(id);
        self
    }

    /// Sets a freshly minted `urn:uuid:` identifier.
    pub fn minted_id(self) -> Self {
        self.id(Iri::mint_urn_uuid())
    }

    /// Adds an extra type name (e.g. an extension type).
    pub fn type_name(mut self, name: impl Into<String>) -> Self {
        self.entity.add_type(name);
        self
    }

    /// Stores a reference: replaces a functional property's value, appends
    /// to a non-functional one.
    pub fn reference(self, property: &str, iri: Iri) -> Self {
        self.put(property, CellValue::Reference(iri))
    }

    /// Stores a literal.
    pub fn literal(self, property: &str, literal: impl Into<Literal>) -> Self {
        self.put(property, CellValue::Literal(literal.into()))
    }

    /// Stores a nested entity.
    pub fn entity(self, property: &str, entity: Entity) -> Self {
        self.put(property, CellValue::Entity(Box::new(entity)))
    }

    /// Stores a raw value no declared variant covers.
    pub fn unrecognized(self, property: &str, raw: Value) -> Self {
        self.put(property, CellValue::Unrecognized(raw))
    }

    /// Sets one language's text in a property's language map.
    pub fn text(mut self, property: &str, language: &str, text: impl Into<String>) -> Self {
        if self.error.is_none() {
            match self.entity.language_map_mut(property) {
                Ok(map) => map.set(language, text),
                Err(e) => self.error = Some(e),
            }
        }
        self
    }

    /// Adds an undeclared property.
    pub fn unknown(mut self, key: impl Into<String>, value: Value) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.entity.add_unknown(key, value) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Builds the entity, or returns the first error any step hit.
    pub fn build(self) -> Result<Entity, AccessError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.entity),
        }
    }

    fn put(mut self, property: &str, value: CellValue) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.entity.put(property, value) {
                self.error = Some(e);
            }
        }
        self
    }
}
