//! Entity → wire-map encoding.
//!
//! Output is assembled in a fixed order: unknown fields, then declared
//! properties in declaration order (root type's first), then language maps,
//! `id` and `type`. Keys set by later steps win over unknown fields of the
//! same name.

use serde_json::{Map, Value};
use tracing::trace;

use crate::codec::literal::encode_literal;
use crate::error::EncodeError;
use crate::limits::MAX_NESTING_DEPTH;
use crate::model::{
    normalize_unknown, CellValue, Entity, Property, PropertySpec, ACTIVITYSTREAMS_CONTEXT,
    CONTEXT_KEY, ID_KEY, TYPE_KEY,
};

/// Options for serialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Write language maps that were created but hold no entries as `{}`.
    /// By default they are omitted like unset ones.
    pub emit_empty_language_maps: bool,
}

impl SerializeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_empty_language_maps(mut self, emit: bool) -> Self {
        self.emit_empty_language_maps = emit;
        self
    }
}

impl Entity {
    /// Serializes to a wire map with default options.
    pub fn serialize(&self) -> Result<Map<String, Value>, EncodeError> {
        self.serialize_with_options(SerializeOptions::default())
    }

    /// Serializes to a wire map.
    ///
    /// Any property that fails to render aborts the whole call.
    pub fn serialize_with_options(&self, options: SerializeOptions) -> Result<Map<String, Value>, EncodeError> {
        encode_entity(self, options)
    }

    /// Serializes to a wire value.
    pub fn to_value(&self) -> Result<Value, EncodeError> {
        self.serialize().map(Value::Object)
    }

    /// Serializes to compact JSON text.
    pub fn to_json_string(&self) -> Result<String, EncodeError> {
        self.to_value().map(|value| value.to_string())
    }
}

/// Adds the default ActivityStreams `@context` to a serialized map unless
/// one is already present.
pub fn attach_context(map: &mut Map<String, Value>) {
    if !map.contains_key(CONTEXT_KEY) {
        map.insert(
            CONTEXT_KEY.to_string(),
            Value::String(ACTIVITYSTREAMS_CONTEXT.to_string()),
        );
    }
}

fn encode_entity(entity: &Entity, options: SerializeOptions) -> Result<Map<String, Value>, EncodeError> {
    let mut out = Map::new();

    for (key, value) in entity.unknown().iter() {
        let value = normalize_unknown(value, MAX_NESTING_DEPTH).map_err(|_| EncodeError::UnknownTooDeep {
            key: key.to_string(),
            max: MAX_NESTING_DEPTH,
        })?;
        out.insert(key.to_string(), value);
    }

    let def = entity.type_def();
    let mut types: Vec<&str> = entity.types().iter().map(String::as_str).collect();
    if !types.contains(&def.name) {
        trace!(type_name = def.name, "tagging output with canonical type name");
        types.push(def.name);
    }

    for property in entity.properties() {
        let spec = property.spec();
        if let Some(value) = encode_property(spec, property, options)? {
            out.insert(spec.name.to_string(), value);
        }
    }

    for (spec, map) in entity.language_maps() {
        if map.is_empty() && !options.emit_empty_language_maps {
            continue;
        }
        if let Some(key) = spec.map_key() {
            let entries = map
                .iter()
                .map(|(tag, text)| (tag.to_string(), Value::String(text.to_string())))
                .collect();
            out.insert(key, Value::Object(entries));
        }
    }

    if let Some(id) = entity.id() {
        out.insert(ID_KEY.to_string(), Value::String(id.as_str().to_string()));
    }

    let type_value = match types.as_slice() {
        [single] => Value::String(single.to_string()),
        many => Value::Array(many.iter().map(|t| Value::String(t.to_string())).collect()),
    };
    out.insert(TYPE_KEY.to_string(), type_value);

    Ok(out)
}

/// Renders a property, or `None` when it has nothing to write.
fn encode_property(
    spec: &'static PropertySpec,
    property: &Property,
    options: SerializeOptions,
) -> Result<Option<Value>, EncodeError> {
    match property {
        Property::Functional(cell) => cell
            .value()
            .map(|value| encode_cell_value(spec, value, options))
            .transpose(),
        Property::NonFunctional(list) => {
            let mut values = list
                .iter()
                .filter_map(|cell| cell.value())
                .map(|value| encode_cell_value(spec, value, options))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(match values.len() {
                0 => None,
                // A lone array payload keeps its wrapper so it decodes as one cell
                1 => match values.pop() {
                    Some(Value::Array(items)) => Some(Value::Array(vec![Value::Array(items)])),
                    single => single,
                },
                _ => Some(Value::Array(values)),
            })
        }
    }
}

fn encode_cell_value(
    spec: &'static PropertySpec,
    value: &CellValue,
    options: SerializeOptions,
) -> Result<Value, EncodeError> {
    match value {
        CellValue::Entity(entity) => encode_entity(entity, options).map(Value::Object),
        CellValue::Reference(iri) => Ok(Value::String(iri.as_str().to_string())),
        CellValue::Literal(literal) => encode_literal(spec.name, literal),
        CellValue::Unrecognized(raw) => normalize_unknown(raw, MAX_NESTING_DEPTH).map_err(|_| {
            EncodeError::UnknownTooDeep {
                key: spec.name.to_string(),
                max: MAX_NESTING_DEPTH,
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use proptest::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::codec::deserialize;
    use crate::model::{Iri, Literal};
    use crate::util::Timestamp;
    use crate::vocab;

    fn iri(s: &str) -> Iri {
        Iri::parse(s).unwrap()
    }

    #[test]
    fn test_object_fixture_round_trip() {
        let input = json!({"type": "Object", "id": "http://x/1", "name": "n"});
        let entity = deserialize(&input).unwrap().unwrap();
        assert_eq!(entity.to_value().unwrap(), input);
    }

    #[test]
    fn test_type_list_rendering() {
        let input = json!({"type": ["Activity", "http://example.org/Check"]});
        let entity = deserialize(&input).unwrap().unwrap();
        assert_eq!(entity.serialize().unwrap().get("type"), Some(&json!(["Activity", "http://example.org/Check"])));

        let single = Entity::new(&vocab::ACTIVITY);
        assert_eq!(single.serialize().unwrap().get("type"), Some(&json!("Activity")));
    }

    #[test]
    fn test_auto_tagging_leaves_entity_untouched() {
        let mut note = Entity::new(&vocab::NOTE);
        note.set_types(vec!["http://example.org/Draft".to_string()]);
        let out = note.serialize().unwrap();
        assert_eq!(out.get("type"), Some(&json!(["http://example.org/Draft", "Note"])));
        assert_eq!(note.types(), ["http://example.org/Draft"]);
    }

    #[test]
    fn test_types_without_canonical_name_gain_it_on_round_trip() {
        let mut note = Entity::new(&vocab::NOTE);
        note.set_types(vec!["http://example.org/Draft".to_string()]);
        let back = Entity::deserialize(&vocab::NOTE, &note.serialize().unwrap()).unwrap();
        assert_eq!(back.types(), ["http://example.org/Draft", "Note"]);
        assert_ne!(back, note);

        note.add_type("Note");
        assert_eq!(Entity::deserialize(&vocab::NOTE, &note.serialize().unwrap()).unwrap(), note);
    }

    #[test]
    fn test_empty_list_omitted() {
        let mut note = Entity::new(&vocab::NOTE);
        note.list_mut("tag").unwrap();
        note.cell_mut("published").unwrap();
        let out = note.serialize().unwrap();
        assert!(!out.contains_key("tag"));
        assert!(!out.contains_key("published"));
    }

    #[test]
    fn test_nested_and_literal_rendering() {
        let mut object = Entity::new(&vocab::NOTE);
        object.list_mut("content").unwrap().append_literal("hello").unwrap();
        object
            .cell_mut("published")
            .unwrap()
            .set_date_time(Timestamp::parse("2024-03-01T12:00:00+02:00").unwrap())
            .unwrap();

        let mut create = Entity::new(&vocab::CREATE);
        create.set_id(iri("https://example.com/activities/1"));
        create.list_mut("actor").unwrap().append_reference(iri("https://example.com/alice")).unwrap();
        create.list_mut("object").unwrap().append_entity(object).unwrap();

        assert_eq!(
            create.to_value().unwrap(),
            json!({
                "type": "Create",
                "id": "https://example.com/activities/1",
                "actor": "https://example.com/alice",
                "object": {
                    "type": "Note",
                    "content": "hello",
                    "published": "2024-03-01T12:00:00+02:00"
                }
            })
        );
    }

    #[test]
    fn test_language_map_emission() {
        let mut note = Entity::new(&vocab::NOTE);
        note.language_map_mut("name").unwrap().set("en", "Title");
        note.language_map_mut("summary").unwrap();

        let out = note.serialize().unwrap();
        assert_eq!(out.get("nameMap"), Some(&json!({"en": "Title"})));
        assert!(!out.contains_key("summaryMap"));

        let out = note
            .serialize_with_options(SerializeOptions::new().with_empty_language_maps(true))
            .unwrap();
        assert_eq!(out.get("summaryMap"), Some(&json!({})));
    }

    #[test]
    fn test_non_finite_float_aborts() {
        let mut place = Entity::new(&vocab::PLACE);
        place.cell_mut("latitude").unwrap().set_float(f64::NAN).unwrap();
        place.cell_mut("units").unwrap().set_string("m").unwrap();
        assert!(matches!(
            place.serialize(),
            Err(EncodeError::NonFiniteFloat { property: "latitude", .. })
        ));

        // Nested failures abort the parent too
        let mut create = Entity::new(&vocab::CREATE);
        create.list_mut("object").unwrap().append_entity(place).unwrap();
        assert!(create.serialize().is_err());
    }

    #[test]
    fn test_unknown_fields_written_back() {
        let mut note = Entity::new(&vocab::NOTE);
        note.add_unknown("sensitive", json!(false)).unwrap();
        note.add_unknown("quoteUrl", json!({"href": ["https://example.com/q"]})).unwrap();
        let out = note.serialize().unwrap();
        assert_eq!(out.get("sensitive"), Some(&json!(false)));
        assert_eq!(out.get("quoteUrl"), Some(&json!({"href": ["https://example.com/q"]})));
    }

    #[test]
    fn test_unrecognized_round_trips() {
        let input = json!({
            "type": "Note",
            "attachment": [{"no": "type"}, "https://example.com/a"],
            "published": 12,
            "source": {"content": "*hi*", "mediaType": "text/markdown"}
        });
        let note = deserialize(&input).unwrap().unwrap();
        assert_eq!(note.to_value().unwrap(), input);
    }

    #[test]
    fn test_attach_context() {
        let mut out = Entity::new(&vocab::NOTE).serialize().unwrap();
        attach_context(&mut out);
        assert_eq!(out.get("@context"), Some(&json!("https://www.w3.org/ns/activitystreams")));

        let mut custom = Map::new();
        custom.insert("@context".to_string(), json!(["a", "b"]));
        attach_context(&mut custom);
        assert_eq!(custom.get("@context"), Some(&json!(["a", "b"])));
    }

    #[test]
    fn test_to_json_string() {
        let mut note = Entity::new(&vocab::NOTE);
        note.list_mut("name").unwrap().append_literal(Literal::from("x")).unwrap();
        let text = note.to_json_string().unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, json!({"type": "Note", "name": "x"}));
    }

    #[test]
    fn test_lone_array_payload_keeps_wrapper() {
        let input = json!({"type": "Note", "to": [[1, 2]]});
        let note = deserialize(&input).unwrap().unwrap();
        assert_eq!(note.list("to").unwrap().len(), 1);
        assert_eq!(note.to_value().unwrap(), input);
        assert_eq!(deserialize(&note.to_value().unwrap()).unwrap().unwrap(), note);
    }

    #[test]
    fn test_unrecognized_array_set_through_accessor_round_trips() {
        let mut note = Entity::new(&vocab::NOTE);
        note.list_mut("tag").unwrap().set_unrecognized(json!(["a", "b"]));

        let out = note.to_value().unwrap();
        assert_eq!(out, json!({"type": "Note", "tag": [["a", "b"]]}));

        let back = deserialize(&out).unwrap().unwrap();
        assert_eq!(back.list("tag").unwrap().len(), 1);
        assert_eq!(back.list("tag").unwrap().get_unrecognized().unwrap(), &json!(["a", "b"]));
        assert_eq!(back, note);
    }

    #[test]
    fn test_created_empty_language_map_round_trips() {
        let mut note = Entity::new(&vocab::NOTE);
        note.language_map_mut("summary").unwrap();
        let back = deserialize(&note.to_value().unwrap()).unwrap().unwrap();
        assert_eq!(back, note);
    }

    /// Raw values no variant of `attachment` or `name` accepts.
    fn payload() -> impl Strategy<Value = Value> {
        prop_oneof![
            any::<i32>().prop_map(|n| json!(n)),
            any::<bool>().prop_map(Value::Bool),
            "[a-z]{1,6}".prop_map(|s| json!([s, 1])),
            "[a-z]{1,6}".prop_map(|s| json!({"k": s, "v": [s]})),
        ]
    }

    fn attachment_value() -> impl Strategy<Value = CellValue> {
        prop_oneof![
            "[a-z]{1,8}".prop_map(|s| {
                let mut image = Entity::new(&vocab::IMAGE);
                image.list_mut("name").unwrap().append_literal(s).unwrap();
                CellValue::Entity(Box::new(image))
            }),
            "[a-z]{1,8}".prop_map(|s| CellValue::Reference(iri(&format!("https://example.com/{s}")))),
            payload().prop_map(CellValue::Unrecognized),
        ]
    }

    fn name_value() -> impl Strategy<Value = CellValue> {
        prop_oneof![
            "[a-z]{1,8}".prop_map(|s| CellValue::Literal(Literal::String(s))),
            payload().prop_map(CellValue::Unrecognized),
        ]
    }

    fn language_entries() -> impl Strategy<Value = Option<BTreeMap<String, String>>> {
        proptest::option::of(proptest::collection::btree_map("[a-z]{2}", "[a-z]{1,8}", 0..3))
    }

    fn mixed_note() -> impl Strategy<Value = Entity> {
        (
            proptest::collection::vec(attachment_value(), 0..4),
            proptest::collection::vec(name_value(), 0..4),
            language_entries(),
            language_entries(),
        )
            .prop_map(|(attachment, name, content_map, summary_map)| {
                let mut note = Entity::new(&vocab::NOTE);
                for value in attachment {
                    note.list_mut("attachment").unwrap().append(value).unwrap();
                }
                for value in name {
                    note.list_mut("name").unwrap().append(value).unwrap();
                }
                for (property, entries) in [("content", content_map), ("summary", summary_map)] {
                    if let Some(entries) = entries {
                        let map = note.language_map_mut(property).unwrap();
                        for (tag, text) in entries {
                            map.set(tag, text);
                        }
                    }
                }
                note
            })
    }

    proptest! {
        #[test]
        fn test_mixed_variants_round_trip(note in mixed_note()) {
            let back = deserialize(&note.to_value().unwrap()).unwrap().unwrap();
            prop_assert_eq!(back, note);
        }

        #[test]
        fn test_collapsing_law(count in 0usize..5) {
            let mut note = Entity::new(&vocab::NOTE);
            let to = note.list_mut("to").unwrap();
            for i in 0..count {
                to.append_reference(iri(&format!("https://example.com/u/{i}"))).unwrap();
            }

            let out = note.serialize().unwrap();
            match count {
                0 => prop_assert!(!out.contains_key("to")),
                1 => prop_assert!(out.get("to").is_some_and(Value::is_string)),
                n => prop_assert_eq!(out.get("to").and_then(Value::as_array).map(Vec::len), Some(n)),
            }

            let back = deserialize(&Value::Object(out)).unwrap().unwrap();
            prop_assert_eq!(back, note);
        }
    }
}
