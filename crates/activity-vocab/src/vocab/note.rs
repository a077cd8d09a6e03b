//! Typed access to `Note` entities.

use serde_json::{Map, Value};

use crate::codec::DecodeOptions;
use crate::error::{AccessError, DecodeError, EncodeError};
use crate::model::{Entity, Iri, LanguageMap, Literal, PropertyList};
use crate::registry::CORE_REGISTRY;
use crate::util::Timestamp;
use crate::vocab::NOTE;

/// A `Note`: a short written work, typically a post or a reply.
///
/// Wraps an [`Entity`] of type `Note` with named accessors for the commonly
/// used properties. Everything else stays reachable through
/// [`Note::entity`] and [`Note::entity_mut`].
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    entity: Entity,
}

impl Default for Note {
    fn default() -> Self {
        Self::new()
    }
}

impl Note {
    pub fn new() -> Self {
        Self {
            entity: Entity::new(&NOTE),
        }
    }

    /// Wraps an entity whose concrete type is `Note`.
    pub fn from_entity(entity: Entity) -> Result<Self, AccessError> {
        if entity.type_def() != &NOTE {
            return Err(AccessError::WrongEntityType {
                expected: NOTE.name,
                found: entity.type_name(),
            });
        }
        Ok(Self { entity })
    }

    /// Decodes a wire map as a `Note`, whatever its `type` says.
    pub fn deserialize(map: &Map<String, Value>) -> Result<Self, DecodeError> {
        let entity = Entity::deserialize_with(&NOTE, map, &CORE_REGISTRY, DecodeOptions::default())?;
        Ok(Self { entity })
    }

    pub fn serialize(&self) -> Result<Map<String, Value>, EncodeError> {
        self.entity.serialize()
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    pub fn into_entity(self) -> Entity {
        self.entity
    }

    // =========================================================================
    // Identifier
    // =========================================================================

    pub fn id(&self) -> Option<&Iri> {
        self.entity.id()
    }

    pub fn set_id(&mut self, id: Iri) {
        self.entity.set_id(id);
    }

    // =========================================================================
    // Natural-language text
    // =========================================================================

    /// The first `name` value, if it is a string.
    pub fn name(&self) -> Option<&str> {
        self.first_string("name")
    }

    pub fn append_name(&mut self, name: impl Into<String>) -> Result<(), AccessError> {
        self.append_text("name", name.into())
    }

    pub fn name_map(&self) -> Option<&LanguageMap> {
        self.entity.language_map("name")
    }

    pub fn set_name_in(&mut self, language: &str, text: impl Into<String>) -> Result<(), AccessError> {
        self.entity.language_map_mut("name")?.set(language, text);
        Ok(())
    }

    /// The first `content` value, if it is a string.
    pub fn content(&self) -> Option<&str> {
        self.first_string("content")
    }

    pub fn append_content(&mut self, content: impl Into<String>) -> Result<(), AccessError> {
        self.append_text("content", content.into())
    }

    pub fn content_map(&self) -> Option<&LanguageMap> {
        self.entity.language_map("content")
    }

    pub fn set_content_in(&mut self, language: &str, text: impl Into<String>) -> Result<(), AccessError> {
        self.entity.language_map_mut("content")?.set(language, text);
        Ok(())
    }

    /// The first `summary` value, if it is a string.
    pub fn summary(&self) -> Option<&str> {
        self.first_string("summary")
    }

    pub fn append_summary(&mut self, summary: impl Into<String>) -> Result<(), AccessError> {
        self.append_text("summary", summary.into())
    }

    // =========================================================================
    // Addressing and threading
    // =========================================================================

    pub fn to(&self) -> Option<&PropertyList> {
        self.entity.list("to")
    }

    pub fn add_to(&mut self, iri: Iri) -> Result<(), AccessError> {
        self.entity.list_mut("to")?.append_reference(iri)
    }

    pub fn cc(&self) -> Option<&PropertyList> {
        self.entity.list("cc")
    }

    pub fn add_cc(&mut self, iri: Iri) -> Result<(), AccessError> {
        self.entity.list_mut("cc")?.append_reference(iri)
    }

    pub fn bto(&self) -> Option<&PropertyList> {
        self.entity.list("bto")
    }

    pub fn add_bto(&mut self, iri: Iri) -> Result<(), AccessError> {
        self.entity.list_mut("bto")?.append_reference(iri)
    }

    pub fn bcc(&self) -> Option<&PropertyList> {
        self.entity.list("bcc")
    }

    pub fn add_bcc(&mut self, iri: Iri) -> Result<(), AccessError> {
        self.entity.list_mut("bcc")?.append_reference(iri)
    }

    pub fn attributed_to(&self) -> Option<&PropertyList> {
        self.entity.list("attributedTo")
    }

    pub fn add_attributed_to(&mut self, iri: Iri) -> Result<(), AccessError> {
        self.entity.list_mut("attributedTo")?.append_reference(iri)
    }

    pub fn in_reply_to(&self) -> Option<&PropertyList> {
        self.entity.list("inReplyTo")
    }

    pub fn add_in_reply_to(&mut self, iri: Iri) -> Result<(), AccessError> {
        self.entity.list_mut("inReplyTo")?.append_reference(iri)
    }

    /// The publication time, if set to a timestamp.
    pub fn published(&self) -> Option<Timestamp> {
        self.entity
            .cell("published")?
            .get_date_time()
            .ok()
            .copied()
    }

    pub fn set_published(&mut self, published: Timestamp) -> Result<(), AccessError> {
        self.entity.cell_mut("published")?.set_date_time(published)
    }

    /// Returns true if any audience property addresses the public.
    pub fn is_public(&self) -> bool {
        self.entity.is_public()
    }

    fn first_string(&self, property: &str) -> Option<&str> {
        self.entity.list(property)?.get_string_at(0).ok()
    }

    fn append_text(&mut self, property: &str, text: String) -> Result<(), AccessError> {
        self.entity.list_mut(property)?.append_literal(Literal::String(text))
    }
}

impl TryFrom<Entity> for Note {
    type Error = AccessError;

    fn try_from(entity: Entity) -> Result<Self, Self::Error> {
        Self::from_entity(entity)
    }
}

impl From<Note> for Entity {
    fn from(note: Note) -> Self {
        note.entity
    }
}
