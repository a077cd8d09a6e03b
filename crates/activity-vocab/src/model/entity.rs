//! Vocabulary entities.
//!
//! An [`Entity`] is an instance of a [`TypeDef`]: its declared type names,
//! identifier, the values of its declared properties, and whatever undeclared
//! wire properties it arrived with.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::AccessError;
use crate::model::{
    Cardinality, CellValue, Iri, LanguageMap, PropertyList, PropertySpec, TypeDef, UnknownFields,
    ValueCell,
};

/// Wire key of the declared type names.
pub const TYPE_KEY: &str = "type";
/// Wire key of the entity identifier.
pub const ID_KEY: &str = "id";
/// Wire key of the JSON-LD context, dropped on input and never emitted.
pub const CONTEXT_KEY: &str = "@context";

/// Audience properties scanned by [`Entity::is_public`], in scan order.
pub const AUDIENCE_PROPERTIES: [&str; 4] = ["to", "bto", "cc", "bcc"];

/// The stored value of one declared property.
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    Functional(ValueCell),
    NonFunctional(PropertyList),
}

impl Property {
    /// Creates an empty value of the right cardinality for `spec`.
    pub fn new(spec: &'static PropertySpec) -> Self {
        match spec.cardinality {
            Cardinality::Functional => Property::Functional(ValueCell::new(spec)),
            Cardinality::NonFunctional => Property::NonFunctional(PropertyList::new(spec)),
        }
    }

    pub fn spec(&self) -> &'static PropertySpec {
        match self {
            Property::Functional(cell) => cell.spec(),
            Property::NonFunctional(list) => list.spec(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Property::Functional(cell) => cell.is_empty(),
            Property::NonFunctional(list) => list.is_empty(),
        }
    }
}

/// One vocabulary object.
#[derive(Debug, Clone)]
pub struct Entity {
    def: &'static TypeDef,
    types: Vec<String>,
    id: Option<Iri>,
    properties: BTreeMap<&'static str, Property>,
    language_maps: BTreeMap<&'static str, LanguageMap>,
    unknown: UnknownFields,
}

impl Entity {
    /// Creates an entity of the given type, tagged with its canonical name.
    pub fn new(def: &'static TypeDef) -> Self {
        let mut entity = Self::untagged(def);
        entity.types.push(def.name.to_string());
        entity
    }

    /// Creates an entity with no declared type names. The decoder fills them
    /// from the wire.
    pub(crate) fn untagged(def: &'static TypeDef) -> Self {
        Self {
            def,
            types: Vec::new(),
            id: None,
            properties: BTreeMap::new(),
            language_maps: BTreeMap::new(),
            unknown: UnknownFields::new(),
        }
    }

    /// The concrete type this entity is an instance of.
    pub fn type_def(&self) -> &'static TypeDef {
        self.def
    }

    /// The canonical name of the concrete type.
    pub fn type_name(&self) -> &'static str {
        self.def.name
    }

    /// Returns true if the concrete type is `name` or inherits from it.
    pub fn is_a(&self, name: &str) -> bool {
        self.def.is_a(name)
    }

    // =========================================================================
    // Type names and identifier
    // =========================================================================

    /// Declared type names, in wire order.
    pub fn types(&self) -> &[String] {
        &self.types
    }

    pub fn has_type(&self, name: &str) -> bool {
        self.types.iter().any(|t| t == name)
    }

    /// Adds a type name (e.g. an extension type) unless already present.
    pub fn add_type(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.has_type(&name) {
            self.types.push(name);
        }
    }

    /// Replaces the declared type names.
    ///
    /// Serialization always writes the canonical name, appending it when the
    /// list lacks it. An entity whose list omits the canonical name therefore
    /// decodes back with the name appended and no longer compares equal.
    pub fn set_types(&mut self, types: Vec<String>) {
        self.types = types;
    }

    pub fn id(&self) -> Option<&Iri> {
        self.id.as_ref()
    }

    pub fn set_id(&mut self, id: Iri) {
        self.id = Some(id);
    }

    pub fn clear_id(&mut self) -> Option<Iri> {
        self.id.take()
    }

    // =========================================================================
    // Declared properties
    // =========================================================================

    /// Looks up a property declared by this entity's type.
    pub fn spec(&self, name: &str) -> Result<&'static PropertySpec, AccessError> {
        self.def.property(name).ok_or_else(|| AccessError::UnknownProperty {
            type_name: self.def.name,
            property: name.to_string(),
        })
    }

    /// The stored value of a property, if it has been set.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    /// The cell of a functional property, if it has been set.
    pub fn cell(&self, name: &str) -> Option<&ValueCell> {
        match self.properties.get(name)? {
            Property::Functional(cell) => Some(cell),
            Property::NonFunctional(_) => None,
        }
    }

    /// The cell of a functional property, created empty on first access.
    pub fn cell_mut(&mut self, name: &str) -> Result<&mut ValueCell, AccessError> {
        let spec = self.spec(name)?;
        match self.properties.entry(spec.name).or_insert_with(|| Property::new(spec)) {
            Property::Functional(cell) => Ok(cell),
            Property::NonFunctional(_) => Err(AccessError::CardinalityMismatch {
                property: spec.name,
                actual: Cardinality::NonFunctional,
            }),
        }
    }

    /// The list of a non-functional property, if it has been set.
    pub fn list(&self, name: &str) -> Option<&PropertyList> {
        match self.properties.get(name)? {
            Property::NonFunctional(list) => Some(list),
            Property::Functional(_) => None,
        }
    }

    /// The list of a non-functional property, created empty on first access.
    pub fn list_mut(&mut self, name: &str) -> Result<&mut PropertyList, AccessError> {
        let spec = self.spec(name)?;
        match self.properties.entry(spec.name).or_insert_with(|| Property::new(spec)) {
            Property::NonFunctional(list) => Ok(list),
            Property::Functional(_) => Err(AccessError::CardinalityMismatch {
                property: spec.name,
                actual: Cardinality::Functional,
            }),
        }
    }

    /// Stores a value in a property: replaces a functional property's value
    /// or appends to a non-functional one.
    pub fn put(&mut self, name: &str, value: CellValue) -> Result<(), AccessError> {
        let spec = self.spec(name)?;
        match spec.cardinality {
            Cardinality::Functional => self.cell_mut(name)?.set(value),
            Cardinality::NonFunctional => self.list_mut(name)?.append(value),
        }
    }

    /// Removes a property's value, returning it.
    pub fn remove_property(&mut self, name: &str) -> Option<Property> {
        self.properties.remove(name)
    }

    /// Set properties in declaration order, root type's first.
    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.def
            .properties()
            .filter_map(|spec| self.properties.get(spec.name))
    }

    pub(crate) fn insert_property(&mut self, property: Property) {
        self.properties.insert(property.spec().name, property);
    }

    // =========================================================================
    // Language maps
    // =========================================================================

    /// The language map paired with a property, if one has been written.
    pub fn language_map(&self, name: &str) -> Option<&LanguageMap> {
        self.language_maps.get(name)
    }

    /// The language map paired with a property, created on first access.
    pub fn language_map_mut(&mut self, name: &str) -> Result<&mut LanguageMap, AccessError> {
        let spec = self.spec(name)?;
        if !spec.variants.language_map {
            return Err(AccessError::NoLanguageMap { property: spec.name });
        }
        Ok(self.language_maps.entry(spec.name).or_insert_with(LanguageMap::created))
    }

    pub fn remove_language_map(&mut self, name: &str) -> Option<LanguageMap> {
        self.language_maps.remove(name)
    }

    /// Written language maps in declaration order, with their properties.
    pub fn language_maps(&self) -> impl Iterator<Item = (&'static PropertySpec, &LanguageMap)> {
        self.def
            .properties()
            .filter_map(|spec| self.language_maps.get(spec.name).map(|map| (spec, map)))
    }

    pub(crate) fn insert_language_map(&mut self, spec: &'static PropertySpec, map: LanguageMap) {
        self.language_maps.insert(spec.name, map);
    }

    // =========================================================================
    // Unknown fields
    // =========================================================================

    pub fn unknown(&self) -> &UnknownFields {
        &self.unknown
    }

    /// Returns true if `key` is routed somewhere other than the unknown bag.
    pub fn is_reserved_key(&self, key: &str) -> bool {
        key == TYPE_KEY
            || key == ID_KEY
            || key == CONTEXT_KEY
            || self.def.property(key).is_some()
            || self.def.property_for_map_key(key).is_some()
    }

    /// Stores an undeclared property to be written back on serialization.
    pub fn add_unknown(&mut self, key: impl Into<String>, value: Value) -> Result<(), AccessError> {
        let key = key.into();
        if self.is_reserved_key(&key) {
            return Err(AccessError::ReservedKey { key });
        }
        self.unknown.insert(key, value);
        Ok(())
    }

    pub fn remove_unknown(&mut self, key: &str) -> Option<Value> {
        self.unknown.remove(key)
    }

    pub(crate) fn unknown_mut(&mut self) -> &mut UnknownFields {
        &mut self.unknown
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns true if any of `to`, `bto`, `cc` or `bcc` holds a reference to
    /// the public-audience sentinel.
    pub fn is_public(&self) -> bool {
        AUDIENCE_PROPERTIES
            .iter()
            .filter_map(|name| self.list(name))
            .any(|list| list.references().any(Iri::is_public_audience))
    }
}

impl PartialEq for Entity {
    /// Unset properties and properties set to nothing compare equal, as do
    /// absent and empty language maps.
    fn eq(&self, other: &Self) -> bool {
        let same_properties = |a: &Self, b: &Self| {
            a.properties
                .iter()
                .filter(|(_, p)| !p.is_empty())
                .all(|(name, p)| b.properties.get(name) == Some(p))
        };
        let same_language_maps = |a: &Self, b: &Self| {
            a.language_maps
                .iter()
                .filter(|(_, map)| !map.is_empty())
                .all(|(name, map)| b.language_maps.get(name) == Some(map))
        };

        self.def == other.def
            && self.types == other.types
            && self.id == other.id
            && same_language_maps(self, other)
            && same_language_maps(other, self)
            && self.unknown == other.unknown
            && same_properties(self, other)
            && same_properties(other, self)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::{Literal, VariantKind};
    use crate::vocab;

    fn iri(s: &str) -> Iri {
        Iri::parse(s).unwrap()
    }

    #[test]
    fn test_new_entity_is_tagged() {
        let note = Entity::new(&vocab::NOTE);
        assert_eq!(note.types(), ["Note"]);
        assert_eq!(note.type_name(), "Note");
        assert!(note.is_a("Object"));
        assert!(!note.is_a("Link"));
        assert!(note.id().is_none());
    }

    #[test]
    fn test_add_type_dedupes() {
        let mut e = Entity::new(&vocab::ACTIVITY);
        e.add_type("http://example.org/Check");
        e.add_type("Activity");
        assert_eq!(e.types(), ["Activity", "http://example.org/Check"]);
    }

    #[test]
    fn test_cell_and_list_cardinality() {
        let mut note = Entity::new(&vocab::NOTE);

        note.cell_mut("published").unwrap().set_date_time(crate::util::Timestamp::from_epoch_micros(0)).unwrap();
        assert!(note.cell("published").unwrap().is_date_time());

        assert_eq!(
            note.list_mut("published").unwrap_err(),
            AccessError::CardinalityMismatch { property: "published", actual: Cardinality::Functional }
        );
        assert_eq!(
            note.cell_mut("to").unwrap_err(),
            AccessError::CardinalityMismatch { property: "to", actual: Cardinality::NonFunctional }
        );
        assert!(matches!(
            note.cell_mut("actor"),
            Err(AccessError::UnknownProperty { type_name: "Note", .. })
        ));
    }

    #[test]
    fn test_inherited_properties() {
        let mut create = Entity::new(&vocab::CREATE);
        create.list_mut("actor").unwrap().append_reference(iri("https://example.com/alice")).unwrap();
        create.list_mut("name").unwrap().append_literal("inherited from Object").unwrap();
        assert_eq!(create.list("actor").unwrap().len(), 1);
        assert_eq!(create.list("name").unwrap().get_string_at(0).unwrap(), "inherited from Object");
    }

    #[test]
    fn test_put_follows_cardinality() {
        let mut note = Entity::new(&vocab::NOTE);
        note.put("mediaType", CellValue::Literal(Literal::from("text/plain"))).unwrap();
        note.put("mediaType", CellValue::Literal(Literal::from("text/html"))).unwrap();
        assert_eq!(note.cell("mediaType").unwrap().get_string().unwrap(), "text/html");

        note.put("tag", CellValue::Reference(iri("https://example.com/t/1"))).unwrap();
        note.put("tag", CellValue::Reference(iri("https://example.com/t/2"))).unwrap();
        assert_eq!(note.list("tag").unwrap().len(), 2);

        assert_eq!(
            note.put("published", CellValue::Literal(Literal::from(true))),
            Err(AccessError::LiteralNotAccepted {
                property: "published",
                expected: Some(crate::model::LiteralKind::DateTime),
                found: crate::model::LiteralKind::Boolean,
            })
        );
    }

    #[test]
    fn test_language_map_only_for_text_properties() {
        let mut note = Entity::new(&vocab::NOTE);
        note.language_map_mut("content").unwrap().set("en", "hello");
        assert_eq!(note.language_map("content").unwrap().get("en"), "hello");
        assert_eq!(
            note.language_map_mut("to").unwrap_err(),
            AccessError::NoLanguageMap { property: "to" }
        );
    }

    #[test]
    fn test_add_unknown_rejects_reserved_keys() {
        let mut note = Entity::new(&vocab::NOTE);
        note.add_unknown("sensitive", json!(true)).unwrap();
        assert_eq!(note.unknown().get("sensitive"), Some(&json!(true)));

        for key in ["type", "id", "@context", "content", "contentMap", "to"] {
            assert_eq!(
                note.add_unknown(key, json!(1)),
                Err(AccessError::ReservedKey { key: key.to_string() })
            );
        }
        // Map key of a property without a language map is not reserved
        assert!(note.add_unknown("toMap", json!(1)).is_ok());
    }

    #[test]
    fn test_is_public_to() {
        let mut e1 = Entity::new(&vocab::NOTE);
        e1.list_mut("to").unwrap().append_reference(Iri::public_audience()).unwrap();
        assert!(e1.is_public());
    }

    #[test]
    fn test_is_public_any_audience_any_position() {
        let mut e = Entity::new(&vocab::NOTE);
        let bcc = e.list_mut("bcc").unwrap();
        bcc.append_reference(iri("https://example.com/a")).unwrap();
        bcc.append_reference(iri("https://example.com/b")).unwrap();
        bcc.append_reference(Iri::public_audience()).unwrap();
        assert!(e.is_public());
    }

    #[test]
    fn test_is_public_private_only() {
        let mut e2 = Entity::new(&vocab::NOTE);
        for name in AUDIENCE_PROPERTIES {
            e2.list_mut(name).unwrap().append_reference(iri("https://example.com/followers")).unwrap();
        }
        assert!(!e2.is_public());
    }

    #[test]
    fn test_is_public_empty_bcc() {
        let mut e3 = Entity::new(&vocab::NOTE);
        e3.list_mut("bcc").unwrap();
        assert!(e3.list("bcc").unwrap().is_empty());
        assert!(!e3.is_public());
    }

    #[test]
    fn test_is_public_ignores_nested_entity_ids() {
        let mut e = Entity::new(&vocab::NOTE);
        let mut nested = Entity::new(&vocab::PERSON);
        nested.set_id(Iri::public_audience());
        e.list_mut("to").unwrap().append_entity(nested).unwrap();
        assert_eq!(e.list("to").unwrap().get(0).unwrap().kind(), Some(VariantKind::Entity));
        assert!(!e.is_public());
    }

    #[test]
    fn test_equality_ignores_empty_properties() {
        let a = Entity::new(&vocab::NOTE);
        let mut b = Entity::new(&vocab::NOTE);
        b.list_mut("tag").unwrap();
        b.cell_mut("published").unwrap();
        assert_eq!(a, b);

        b.list_mut("tag").unwrap().append(CellValue::Reference(iri("https://example.com/t"))).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_equality_ignores_empty_language_maps() {
        let a = Entity::new(&vocab::NOTE);
        let mut b = Entity::new(&vocab::NOTE);
        b.language_map_mut("summary").unwrap();
        assert!(b.language_map("summary").unwrap().is_created());
        assert_eq!(a, b);
        assert_eq!(b, a);

        b.language_map_mut("summary").unwrap().set("en", "cw");
        assert_ne!(a, b);
    }

    #[test]
    fn test_properties_in_declaration_order() {
        let mut create = Entity::new(&vocab::CREATE);
        create.list_mut("object").unwrap().append_reference(iri("https://example.com/o")).unwrap();
        create.list_mut("attachment").unwrap().append_reference(iri("https://example.com/a")).unwrap();
        let names: Vec<_> = create.properties().map(|p| p.spec().name).collect();
        // Object's properties come before Activity's
        assert_eq!(names, vec!["attachment", "object"]);
    }
}
