//! Storage for wire properties the schema does not declare.

use serde_json::{Map, Value};

/// Raw wire values keyed by property name, kept for re-serialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnknownFields {
    fields: Map<String, Value>,
}

impl UnknownFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key)
    }

    /// Stores a value. Callers check the key against declared names first.
    pub(crate) fn insert(&mut self, key: String, value: Value) {
        self.fields.insert(key, value);
    }
}

/// Nesting deeper than the allowed depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TooDeep;

/// Copies a raw value into the engine's representation, recursing through
/// nested maps and arrays.
///
/// `depth` is how many more levels of nesting are allowed below this value.
pub fn normalize_unknown(value: &Value, depth: usize) -> Result<Value, TooDeep> {
    match value {
        Value::Array(items) => {
            let depth = depth.checked_sub(1).ok_or(TooDeep)?;
            items
                .iter()
                .map(|item| normalize_unknown(item, depth))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        }
        Value::Object(map) => {
            let depth = depth.checked_sub(1).ok_or(TooDeep)?;
            map.iter()
                .map(|(k, v)| Ok((k.clone(), normalize_unknown(v, depth)?)))
                .collect::<Result<Map<_, _>, _>>()
                .map(Value::Object)
        }
        scalar => Ok(scalar.clone()),
    }
}
