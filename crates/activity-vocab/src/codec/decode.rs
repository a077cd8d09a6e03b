//! Wire-map → entity decoding.
//!
//! Each wire key is routed, in order of preference, to `type`, `id`, a
//! declared property, a declared property's language map, or the entity's
//! unknown fields. `@context` is dropped.
//!
//! A value whose shape none of a property's variants accept is kept as an
//! unrecognized payload. Only malformed content of an accepted shape (a bad
//! timestamp, a reference-only property holding a non-IRI, a negative count)
//! fails decoding.

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::codec::literal::decode_literal;
use crate::error::DecodeError;
use crate::limits::MAX_NESTING_DEPTH;
use crate::model::{
    normalize_unknown, Cardinality, CellValue, Entity, Iri, LanguageMap, Property, PropertyList,
    PropertySpec, TypeDef, ValueCell, CONTEXT_KEY, ID_KEY, TYPE_KEY,
};
use crate::registry::{TypeRegistry, CORE_REGISTRY};

/// Options for decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum nesting of entities, arrays and maps below the top-level
    /// entity.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: MAX_NESTING_DEPTH,
        }
    }
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

// =============================================================================
// ENTRY POINTS
// =============================================================================

/// Parses JSON text into a wire value.
pub fn parse_json(text: &str) -> Result<Value, DecodeError> {
    serde_json::from_str(text).map_err(|e| DecodeError::Json(e.to_string()))
}

/// Decodes a wire value through the core registry.
///
/// Returns `Ok(None)` when none of the value's type names is registered; the
/// caller keeps the raw value.
pub fn deserialize(value: &Value) -> Result<Option<Entity>, DecodeError> {
    CORE_REGISTRY.deserialize(value)
}

/// Parses JSON text and decodes it through the core registry.
pub fn from_json_str(text: &str) -> Result<Option<Entity>, DecodeError> {
    CORE_REGISTRY.deserialize_str(text)
}

impl TypeRegistry {
    /// Decodes a wire value, picking the concrete type from the first
    /// registered name under `type`.
    pub fn deserialize(&self, value: &Value) -> Result<Option<Entity>, DecodeError> {
        self.deserialize_with_options(value, DecodeOptions::default())
    }

    pub fn deserialize_with_options(
        &self,
        value: &Value,
        options: DecodeOptions,
    ) -> Result<Option<Entity>, DecodeError> {
        let map = value.as_object().ok_or(DecodeError::NotAnObject {
            found: json_kind(value),
        })?;
        let Some(def) = self.resolve(wire_type_names(map)) else {
            debug!(types = ?map.get(TYPE_KEY), "no registered type for value");
            return Ok(None);
        };
        Decoder::new(self, options).entity(def, map, 0).map(Some)
    }

    /// Parses JSON text and decodes it.
    pub fn deserialize_str(&self, text: &str) -> Result<Option<Entity>, DecodeError> {
        self.deserialize(&parse_json(text)?)
    }
}

impl Entity {
    /// Decodes a wire map as an entity of the given type, resolving nested
    /// entities through the core registry.
    pub fn deserialize(def: &'static TypeDef, map: &Map<String, Value>) -> Result<Entity, DecodeError> {
        Self::deserialize_with(def, map, &CORE_REGISTRY, DecodeOptions::default())
    }

    /// Decodes a wire map as an entity of the given type.
    pub fn deserialize_with(
        def: &'static TypeDef,
        map: &Map<String, Value>,
        registry: &TypeRegistry,
        options: DecodeOptions,
    ) -> Result<Entity, DecodeError> {
        Decoder::new(registry, options).entity(def, map, 0)
    }
}

// =============================================================================
// DECODER
// =============================================================================

/// Decoding context shared by one top-level call.
struct Decoder<'r> {
    registry: &'r TypeRegistry,
    max_depth: usize,
}

impl<'r> Decoder<'r> {
    fn new(registry: &'r TypeRegistry, options: DecodeOptions) -> Self {
        Self {
            registry,
            max_depth: options.max_depth,
        }
    }

    fn entity(&self, def: &'static TypeDef, map: &Map<String, Value>, depth: usize) -> Result<Entity, DecodeError> {
        if depth > self.max_depth {
            return Err(DecodeError::DepthExceeded { max: self.max_depth });
        }

        let mut entity = Entity::untagged(def);
        for (key, value) in map {
            match key.as_str() {
                CONTEXT_KEY => trace!(type_name = def.name, "dropping context"),
                TYPE_KEY => entity.set_types(decode_type_names(value)?),
                ID_KEY => entity.set_id(decode_id(value)?),
                _ => self.route(&mut entity, key, value, depth)?,
            }
        }
        Ok(entity)
    }

    fn route(&self, entity: &mut Entity, key: &str, value: &Value, depth: usize) -> Result<(), DecodeError> {
        let def = entity.type_def();
        if let Some(spec) = def.property(key) {
            let property = self.property(spec, value, depth)?;
            entity.insert_property(property);
            return Ok(());
        }

        if let Some(spec) = def.property_for_map_key(key) {
            if let Some(map) = decode_language_map(value) {
                entity.insert_language_map(spec, map);
                return Ok(());
            }
            debug!(key, type_name = def.name, "language map is not an object of strings");
        } else {
            debug!(key, type_name = def.name, "undeclared property kept as unknown field");
        }
        let raw = self.unknown(value, depth)?;
        entity.unknown_mut().insert(key.to_string(), raw);
        Ok(())
    }

    fn property(&self, spec: &'static PropertySpec, value: &Value, depth: usize) -> Result<Property, DecodeError> {
        match (spec.cardinality, value) {
            (Cardinality::NonFunctional, Value::Array(items)) => {
                let cells = items
                    .iter()
                    .map(|item| Ok(ValueCell::decoded(spec, self.cell_value(spec, item, depth + 1)?)))
                    .collect::<Result<Vec<_>, DecodeError>>()?;
                Ok(Property::NonFunctional(PropertyList::from_cells(spec, cells)))
            }
            (Cardinality::NonFunctional, _) => {
                let cell = ValueCell::decoded(spec, self.cell_value(spec, value, depth)?);
                Ok(Property::NonFunctional(PropertyList::from_cells(spec, vec![cell])))
            }
            (Cardinality::Functional, _) => {
                Ok(Property::Functional(ValueCell::decoded(spec, self.cell_value(spec, value, depth)?)))
            }
        }
    }

    /// Resolves one wire value against a property's variants.
    fn cell_value(&self, spec: &'static PropertySpec, value: &Value, depth: usize) -> Result<CellValue, DecodeError> {
        let variants = &spec.variants;
        match value {
            Value::Object(map) if !variants.entities.is_empty() => {
                if let Some(def) = self.registry.resolve_accepted(wire_type_names(map), variants) {
                    let nested = self.entity(def, map, depth + 1)?;
                    return Ok(CellValue::Entity(Box::new(nested)));
                }
            }
            Value::String(s) => {
                if variants.reference {
                    if let Ok(iri) = Iri::parse(s) {
                        return Ok(CellValue::Reference(iri));
                    }
                }
                match variants.literal {
                    Some(kind) if kind.is_string_shaped() => {
                        if let Some(literal) = decode_literal(spec.name, kind, value)? {
                            return Ok(CellValue::Literal(literal));
                        }
                    }
                    _ if variants.reference && variants.entities.is_empty() => {
                        return Err(DecodeError::InvalidReference {
                            property: spec.name,
                            value: s.clone(),
                        });
                    }
                    _ => {}
                }
            }
            _ => {
                if let Some(kind) = variants.literal {
                    if let Some(literal) = decode_literal(spec.name, kind, value)? {
                        return Ok(CellValue::Literal(literal));
                    }
                }
            }
        }

        trace!(property = spec.name, "no declared variant accepts value; keeping it unrecognized");
        Ok(CellValue::Unrecognized(self.unknown(value, depth)?))
    }

    fn unknown(&self, value: &Value, depth: usize) -> Result<Value, DecodeError> {
        let remaining = self.max_depth.saturating_sub(depth);
        normalize_unknown(value, remaining).map_err(|_| DecodeError::DepthExceeded { max: self.max_depth })
    }
}

// =============================================================================
// ENVELOPE KEYS
// =============================================================================

/// String entries under `type`, skipping anything else.
fn wire_type_names(map: &Map<String, Value>) -> impl Iterator<Item = &str> {
    let entries: &[Value] = match map.get(TYPE_KEY) {
        Some(Value::Array(items)) => items,
        Some(single) => std::slice::from_ref(single),
        None => &[],
    };
    entries.iter().filter_map(Value::as_str)
}

fn decode_type_names(value: &Value) -> Result<Vec<String>, DecodeError> {
    let as_name = |v: &Value| {
        v.as_str()
            .map(str::to_string)
            .ok_or(DecodeError::InvalidTypeName { found: json_kind(v) })
    };
    match value {
        Value::Array(items) => items.iter().map(as_name).collect(),
        single => Ok(vec![as_name(single)?]),
    }
}

fn decode_id(value: &Value) -> Result<Iri, DecodeError> {
    match value {
        Value::String(s) => Iri::parse(s).map_err(|_| DecodeError::InvalidId { value: s.clone() }),
        other => Err(DecodeError::InvalidId {
            value: other.to_string(),
        }),
    }
}

fn decode_language_map(value: &Value) -> Option<LanguageMap> {
    let mut map = LanguageMap::created();
    for (tag, text) in value.as_object()? {
        map.set(tag.as_str(), text.as_str()?);
    }
    Some(map)
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
