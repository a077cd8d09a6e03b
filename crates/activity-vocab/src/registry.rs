//! Type-name registry.
//!
//! Maps wire type names to [`TypeDef`]s. The decoder consults it to pick the
//! concrete type of top-level values and of nested entities. Applications
//! extend a copy of the core registry with their own types.

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

use crate::model::{Entity, TypeDef, VariantSet};
use crate::vocab::CORE_TYPES;

lazy_static! {
    /// The core vocabulary, used when no registry is given.
    pub static ref CORE_REGISTRY: TypeRegistry = TypeRegistry::core();
}

/// A name → type table.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: FxHashMap<&'static str, &'static TypeDef>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the core vocabulary.
    pub fn core() -> Self {
        let mut registry = Self::new();
        for &def in CORE_TYPES {
            registry.register(def);
        }
        registry
    }

    /// Registers a type under its canonical name, returning the type it
    /// replaced.
    pub fn register(&mut self, def: &'static TypeDef) -> Option<&'static TypeDef> {
        self.types.insert(def.name, def)
    }

    pub fn get(&self, name: &str) -> Option<&'static TypeDef> {
        self.types.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.types.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Creates an empty entity of the named type.
    pub fn create(&self, name: &str) -> Option<Entity> {
        self.get(name).map(Entity::new)
    }

    /// The first name that is registered.
    pub fn resolve<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Option<&'static TypeDef> {
        names.into_iter().find_map(|name| self.get(name))
    }

    /// The first name that is registered and whose type a property with the
    /// given variants accepts as a nested entity.
    pub fn resolve_accepted<'a>(
        &self,
        names: impl IntoIterator<Item = &'a str>,
        variants: &VariantSet,
    ) -> Option<&'static TypeDef> {
        names
            .into_iter()
            .filter_map(|name| self.get(name))
            .find(|def| variants.accepts_type(def))
    }
}
