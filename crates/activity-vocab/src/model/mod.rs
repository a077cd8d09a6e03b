//! Data model types.
//!
//! This module contains the building blocks every vocabulary type is made of:
//! - Identifiers (absolute IRIs)
//! - Literals (typed scalars)
//! - Value cells, property lists and language maps
//! - Unknown field storage
//! - Type and property declarations
//! - Entities and the builder for constructing them

pub mod builder;
pub mod cell;
pub mod entity;
pub mod iri;
pub mod language;
pub mod list;
pub mod literal;
pub mod schema;
pub mod unknown;

pub use builder::EntityBuilder;
pub use cell::{CellValue, ValueCell, VariantKind};
pub use entity::{Entity, Property, AUDIENCE_PROPERTIES, CONTEXT_KEY, ID_KEY, TYPE_KEY};
pub use iri::{Iri, ACTIVITYSTREAMS_CONTEXT, PUBLIC_AUDIENCE_IRI};
pub use language::LanguageMap;
pub use list::PropertyList;
pub use literal::{Literal, LiteralKind};
pub use schema::{Cardinality, PropertySpec, TypeDef, VariantSet, LANGUAGE_MAP_SUFFIX};
pub use unknown::{normalize_unknown, UnknownFields};
