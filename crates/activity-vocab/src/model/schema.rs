//! Property and type declarations.
//!
//! A [`TypeDef`] is plain static data: its name, its parent and the
//! properties it adds. Every concrete vocabulary type is one such
//! declaration; the engine reads them to route wire keys and to check what a
//! property is allowed to hold.

use crate::model::{LiteralKind, VariantKind};

/// Whether a property holds one value or an ordered list of values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// At most one value, stored in a single cell.
    Functional,
    /// Any number of values, stored in a property list.
    NonFunctional,
}

/// The variants a property may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantSet {
    /// Type names a nested entity must be (directly or by inheritance).
    /// Empty means nested entities are not accepted.
    pub entities: &'static [&'static str],
    /// Whether a bare IRI reference is accepted.
    pub reference: bool,
    /// The literal kind accepted, if any.
    pub literal: Option<LiteralKind>,
    /// Whether the property pairs with a `<name>Map` language map.
    pub language_map: bool,
}

impl VariantSet {
    /// Nested entities of the given capabilities, or references to them.
    pub const fn entities_or_reference(entities: &'static [&'static str]) -> Self {
        Self {
            entities,
            reference: true,
            literal: None,
            language_map: false,
        }
    }

    /// A bare reference only.
    pub const fn reference() -> Self {
        Self {
            entities: &[],
            reference: true,
            literal: None,
            language_map: false,
        }
    }

    /// A literal of one kind only.
    pub const fn literal(kind: LiteralKind) -> Self {
        Self {
            entities: &[],
            reference: false,
            literal: Some(kind),
            language_map: false,
        }
    }

    /// Natural-language text: a string literal plus a `<name>Map` language map.
    pub const fn text() -> Self {
        Self {
            entities: &[],
            reference: false,
            literal: Some(LiteralKind::String),
            language_map: true,
        }
    }

    /// The same set, also accepting a literal of the given kind.
    pub const fn or_literal(self, kind: LiteralKind) -> Self {
        Self {
            literal: Some(kind),
            ..self
        }
    }

    /// Returns true if cells of this property may hold the given variant.
    pub fn accepts(&self, kind: VariantKind) -> bool {
        match kind {
            VariantKind::Entity => !self.entities.is_empty(),
            VariantKind::Reference => self.reference,
            VariantKind::Literal => self.literal.is_some(),
            VariantKind::Unrecognized => true,
        }
    }

    /// Returns true if an entity of the given type satisfies one of the
    /// accepted capabilities.
    pub fn accepts_type(&self, def: &TypeDef) -> bool {
        self.entities.iter().any(|capability| def.is_a(capability))
    }
}

/// A declared property of a vocabulary type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertySpec {
    /// Wire name of the property.
    pub name: &'static str,
    pub cardinality: Cardinality,
    pub variants: VariantSet,
}

impl PropertySpec {
    pub const fn functional(name: &'static str, variants: VariantSet) -> Self {
        Self {
            name,
            cardinality: Cardinality::Functional,
            variants,
        }
    }

    pub const fn non_functional(name: &'static str, variants: VariantSet) -> Self {
        Self {
            name,
            cardinality: Cardinality::NonFunctional,
            variants,
        }
    }

    /// Wire name of the paired language map, if the property has one.
    pub fn map_key(&self) -> Option<String> {
        self.variants
            .language_map
            .then(|| format!("{}{}", self.name, LANGUAGE_MAP_SUFFIX))
    }
}

/// Suffix forming a language map's wire key from its property's name.
pub const LANGUAGE_MAP_SUFFIX: &str = "Map";

/// A vocabulary type: its canonical name, parent and own properties.
#[derive(Debug)]
pub struct TypeDef {
    pub name: &'static str,
    pub extends: Option<&'static TypeDef>,
    /// Properties introduced by this type, in declaration order.
    pub properties: &'static [PropertySpec],
}

impl TypeDef {
    /// Returns true if this type is `name` or inherits from it.
    pub fn is_a(&self, name: &str) -> bool {
        let mut current = Some(self);
        while let Some(def) = current {
            if def.name == name {
                return true;
            }
            current = def.extends;
        }
        false
    }

    /// Looks up a declared property, searching parents as well.
    pub fn property(&'static self, name: &str) -> Option<&'static PropertySpec> {
        let mut current = Some(self);
        while let Some(def) = current {
            if let Some(spec) = def.properties.iter().find(|p| p.name == name) {
                return Some(spec);
            }
            current = def.extends;
        }
        None
    }

    /// Looks up the property whose language map uses the given wire key.
    pub fn property_for_map_key(&'static self, key: &str) -> Option<&'static PropertySpec> {
        let base = key.strip_suffix(LANGUAGE_MAP_SUFFIX)?;
        self.property(base).filter(|spec| spec.variants.language_map)
    }

    /// All declared properties, root ancestor's first.
    pub fn properties(&'static self) -> impl Iterator<Item = &'static PropertySpec> {
        let mut chain = Vec::new();
        let mut current = Some(self);
        while let Some(def) = current {
            chain.push(def);
            current = def.extends;
        }
        chain.into_iter().rev().flat_map(|def| def.properties.iter())
    }
}

impl PartialEq for TypeDef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for TypeDef {}

#[cfg(test)]
mod tests {
    use super::*;

    static BASE: TypeDef = TypeDef {
        name: "Base",
        extends: None,
        properties: &[
            PropertySpec::non_functional("name", VariantSet::text()),
            PropertySpec::functional("icon", VariantSet::entities_or_reference(&["Picture"])),
        ],
    };

    static PICTURE: TypeDef = TypeDef {
        name: "Picture",
        extends: Some(&BASE),
        properties: &[PropertySpec::functional("width", VariantSet::literal(LiteralKind::NonNegativeInteger))],
    };

    #[test]
    fn test_is_a_walks_parents() {
        assert!(PICTURE.is_a("Picture"));
        assert!(PICTURE.is_a("Base"));
        assert!(!BASE.is_a("Picture"));
    }

    #[test]
    fn test_property_lookup_includes_inherited() {
        assert_eq!(PICTURE.property("width").map(|p| p.name), Some("width"));
        assert_eq!(PICTURE.property("name").map(|p| p.name), Some("name"));
        assert!(BASE.property("width").is_none());
    }

    #[test]
    fn test_properties_root_first() {
        let names: Vec<_> = PICTURE.properties().map(|p| p.name).collect();
        assert_eq!(names, vec!["name", "icon", "width"]);
    }

    #[test]
    fn test_map_key() {
        let name = BASE.property("name").unwrap();
        assert_eq!(name.map_key().as_deref(), Some("nameMap"));
        assert_eq!(PICTURE.property_for_map_key("nameMap").map(|p| p.name), Some("name"));
        assert!(PICTURE.property_for_map_key("iconMap").is_none());
        assert!(PICTURE.property_for_map_key("name").is_none());
    }

    #[test]
    fn test_accepts_capabilities() {
        let icon = BASE.property("icon").unwrap();
        assert!(icon.variants.accepts_type(&PICTURE));
        assert!(!icon.variants.accepts_type(&BASE));
        assert!(icon.variants.accepts(VariantKind::Reference));
        assert!(!icon.variants.accepts(VariantKind::Literal));
        assert!(icon.variants.accepts(VariantKind::Unrecognized));
    }
}
