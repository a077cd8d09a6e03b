//! ActivityStreams 2.0 vocabulary entities over a polymorphic property engine.
//!
//! This crate decodes and encodes ActivityStreams objects (the JSON documents
//! exchanged by ActivityPub servers) into typed entities without generated
//! per-type code. Each vocabulary type is a static declaration of its
//! properties; one generic engine routes wire keys, resolves each value to a
//! variant, and renders entities back out.
//!
//! # Overview
//!
//! - **Open world**: values no declared variant accepts are kept as
//!   unrecognized payloads, and undeclared keys are kept as unknown fields.
//!   Both are written back unchanged.
//! - **Polymorphic properties**: a property value is a nested entity, a bare
//!   IRI reference, a literal, or unrecognized raw data, never two at once.
//! - **Extensible**: applications register their own types in a
//!   [`TypeRegistry`].
//!
//! # Quick Start
//!
//! ```rust
//! use activity_vocab::codec::from_json_str;
//!
//! let json = r#"{
//!     "@context": "https://www.w3.org/ns/activitystreams",
//!     "type": "Create",
//!     "id": "https://example.com/activities/1",
//!     "actor": "https://example.com/alice",
//!     "to": "https://www.w3.org/ns/activitystreams#Public",
//!     "object": {"type": "Note", "content": "Hello, world"}
//! }"#;
//!
//! // Dispatch on "type" through the core registry
//! let create = from_json_str(json).unwrap().unwrap();
//! assert_eq!(create.type_name(), "Create");
//! assert!(create.is_public());
//!
//! let note = create.list("object").unwrap().get_entity_at(0).unwrap();
//! assert_eq!(note.list("content").unwrap().get_string_at(0).unwrap(), "Hello, world");
//!
//! // Encode back; "@context" is not emitted
//! let wire = create.serialize().unwrap();
//! assert!(!wire.contains_key("@context"));
//! ```
//!
//! # Modules
//!
//! - [`model`]: Entities, cells, property lists, literals and declarations
//! - [`vocab`]: Core vocabulary declarations and the [`vocab::Note`] facade
//! - [`registry`]: Type-name dispatch
//! - [`codec`]: JSON encoding/decoding
//! - [`error`]: Error types
//! - [`limits`]: Security limits for decoding
//!
//! # Security
//!
//! The decoder bounds nesting depth for entities and unknown values alike
//! ([`limits::MAX_NESTING_DEPTH`], adjustable per call with
//! [`DecodeOptions`]).

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;
pub mod registry;
pub mod util;
pub mod vocab;

// Re-export commonly used types at crate root
pub use codec::{attach_context, deserialize, from_json_str, DecodeOptions, SerializeOptions};
pub use error::{AccessError, DecodeError, EncodeError, ErrorCode};
pub use model::{
    CellValue, Entity, EntityBuilder, Iri, LanguageMap, Literal, LiteralKind, Property,
    PropertyList, TypeDef, ValueCell, VariantKind, PUBLIC_AUDIENCE_IRI,
};
pub use registry::{TypeRegistry, CORE_REGISTRY};
pub use util::{Duration, Timestamp};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
