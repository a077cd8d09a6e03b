//! End-to-end decoding and encoding of realistic ActivityPub documents.

use activity_vocab::model::{PropertySpec, TypeDef, VariantSet};
use activity_vocab::{
    attach_context, deserialize, from_json_str, vocab, DecodeError, Entity, EntityBuilder,
    ErrorCode, Iri, LiteralKind, TypeRegistry, CORE_REGISTRY,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn round_trip(input: &Value) -> Value {
    let entity = deserialize(input).unwrap().expect("registered type");
    entity.to_value().unwrap()
}

fn without_context(mut value: Value) -> Value {
    if let Some(map) = value.as_object_mut() {
        map.remove("@context");
    }
    value
}

#[test]
fn test_mastodon_create_note_round_trips() {
    let input = json!({
        "@context": [
            "https://www.w3.org/ns/activitystreams",
            {"ostatus": "http://ostatus.org#", "sensitive": "as:sensitive"}
        ],
        "id": "https://mastodon.example/users/alice/statuses/1/activity",
        "type": "Create",
        "actor": "https://mastodon.example/users/alice",
        "published": "2024-02-12T09:30:00Z",
        "to": ["https://www.w3.org/ns/activitystreams#Public"],
        "cc": ["https://mastodon.example/users/alice/followers"],
        "object": {
            "id": "https://mastodon.example/users/alice/statuses/1",
            "type": "Note",
            "summary": null,
            "inReplyTo": null,
            "published": "2024-02-12T09:30:00Z",
            "url": "https://mastodon.example/@alice/1",
            "attributedTo": "https://mastodon.example/users/alice",
            "to": ["https://www.w3.org/ns/activitystreams#Public"],
            "cc": [
                "https://mastodon.example/users/alice/followers",
                "https://other.example/users/bob"
            ],
            "sensitive": false,
            "atomUri": "https://mastodon.example/users/alice/statuses/1",
            "conversation": "tag:mastodon.example,2024-02-12:objectId=1:objectType=Conversation",
            "content": "<p>Hello <span class=\"h-card\">@bob</span></p>",
            "contentMap": {"en": "<p>Hello <span class=\"h-card\">@bob</span></p>"},
            "attachment": [],
            "tag": [{
                "type": "Mention",
                "href": "https://other.example/users/bob",
                "name": "@bob@other.example"
            }],
            "replies": {
                "id": "https://mastodon.example/users/alice/statuses/1/replies",
                "type": "Collection",
                "first": {
                    "type": "CollectionPage",
                    "next": "https://mastodon.example/users/alice/statuses/1/replies?page=true",
                    "partOf": "https://mastodon.example/users/alice/statuses/1/replies",
                    "items": []
                }
            }
        }
    });

    let create = deserialize(&input).unwrap().unwrap();
    assert!(create.is_public());
    assert!(!create.unknown().contains("@context"));

    let note = create.list("object").unwrap().get_entity_at(0).unwrap();
    assert_eq!(note.type_name(), "Note");
    assert_eq!(note.unknown().keys().collect::<Vec<_>>(), vec!["atomUri", "conversation", "sensitive"]);
    let mention = note.list("tag").unwrap().get_entity_at(0).unwrap();
    assert_eq!(mention.type_name(), "Mention");
    assert_eq!(
        mention.cell("href").unwrap().get_reference().unwrap().as_str(),
        "https://other.example/users/bob"
    );
    let replies = note.cell("replies").unwrap().get_entity().unwrap();
    assert!(replies.cell("first").unwrap().get_entity().unwrap().is_a("CollectionPage"));

    // Empty arrays drop out, single-element arrays collapse; everything else
    // comes back as it went in.
    let mut expected = without_context(input);
    let object = expected["object"].as_object_mut().unwrap();
    object.remove("attachment");
    object["to"] = json!("https://www.w3.org/ns/activitystreams#Public");
    let mention = object["tag"][0].clone();
    object["tag"] = mention;
    object["replies"]["first"].as_object_mut().unwrap().remove("items");
    expected["to"] = json!("https://www.w3.org/ns/activitystreams#Public");
    expected["cc"] = json!("https://mastodon.example/users/alice/followers");

    assert_eq!(create.to_value().unwrap(), expected);
}

#[test]
fn test_person_actor_round_trips() {
    let input = json!({
        "type": "Person",
        "id": "https://social.example/users/carol",
        "preferredUsername": "carol",
        "name": "Carol",
        "summary": "<p>Gardening, mostly.</p>",
        "inbox": "https://social.example/users/carol/inbox",
        "outbox": "https://social.example/users/carol/outbox",
        "followers": "https://social.example/users/carol/followers",
        "following": "https://social.example/users/carol/following",
        "icon": {"type": "Image", "mediaType": "image/png", "url": "https://social.example/a.png"},
        "endpoints": {"sharedInbox": "https://social.example/inbox"},
        "publicKey": {
            "id": "https://social.example/users/carol#main-key",
            "owner": "https://social.example/users/carol",
            "publicKeyPem": "-----BEGIN PUBLIC KEY-----\n...\n-----END PUBLIC KEY-----"
        }
    });

    let person = deserialize(&input).unwrap().unwrap();
    assert_eq!(person.unknown().len(), 2);
    assert_eq!(
        person.cell("inbox").unwrap().get_reference().unwrap().as_str(),
        "https://social.example/users/carol/inbox"
    );
    assert_eq!(person.to_value().unwrap(), input);
}

#[test]
fn test_ordered_collection_page_round_trips() {
    let input = json!({
        "type": "OrderedCollectionPage",
        "id": "https://social.example/users/carol/outbox?page=2",
        "partOf": "https://social.example/users/carol/outbox",
        "totalItems": 42,
        "startIndex": 20,
        "prev": "https://social.example/users/carol/outbox?page=1",
        "orderedItems": [
            {"type": "Announce", "actor": "https://social.example/users/carol", "object": "https://a.example/n/1"},
            {"type": "Like", "actor": "https://social.example/users/carol", "object": "https://b.example/n/2"},
            "https://social.example/activities/99"
        ]
    });

    let page = deserialize(&input).unwrap().unwrap();
    let items = page.list("orderedItems").unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items.get_entity_at(1).unwrap().type_name(), "Like");
    assert!(items.is_reference_at(2).unwrap());
    assert_eq!(page.cell("totalItems").unwrap().get_non_negative_integer().unwrap(), 42);
    assert_eq!(round_trip(&input), input);
}

#[test]
fn test_object_fixture() {
    let input = json!({"type": "Object", "id": "http://x/1", "name": "n"});
    let object = deserialize(&input).unwrap().unwrap();
    assert_eq!(object.types(), ["Object"]);
    assert_eq!(object.id().unwrap().as_str(), "http://x/1");
    assert_eq!(object.list("name").unwrap().get_string_at(0).unwrap(), "n");
    assert_eq!(object.to_value().unwrap(), input);
}

#[test]
fn test_multi_type_fixture() {
    let input = json!({"type": ["Activity", "http://example.org/Check"], "id": "http://x/2"});
    let activity = deserialize(&input).unwrap().unwrap();
    assert_eq!(activity.types(), ["Activity", "http://example.org/Check"]);
    assert_eq!(activity.to_value().unwrap(), input);
}

#[test]
fn test_open_world_shapes_are_preserved() {
    let input = json!({
        "type": "Event",
        "startTime": {"@value": "2024-06-01", "@type": "xsd:date"},
        "location": [{"type": "Place", "name": "Park", "latitude": 51.5}, {"geo": [1, 2]}],
        "duration": false,
        "x-extension": {"deeply": {"nested": [null, true, 1.25]}}
    });
    assert_eq!(round_trip(&input), input);
}

#[test]
fn test_tombstone_former_type_string_is_kept() {
    let input = json!({
        "type": "Tombstone",
        "id": "https://social.example/notes/9",
        "formerType": "Note",
        "deleted": "2024-01-01T00:00:00.5-05:00"
    });
    let tombstone = deserialize(&input).unwrap().unwrap();
    assert!(tombstone.list("formerType").unwrap().has_unrecognized());
    assert_eq!(round_trip(&input), input);
}

#[test]
fn test_context_is_dropped_and_reattachable() {
    let input = json!({"@context": "https://www.w3.org/ns/activitystreams", "type": "Like"});
    let like = deserialize(&input).unwrap().unwrap();
    let mut wire = like.serialize().unwrap();
    assert!(!wire.contains_key("@context"));
    attach_context(&mut wire);
    assert_eq!(Value::Object(wire), input);
}

#[test]
fn test_malformed_content_reports_error_code() {
    let err = from_json_str(r#"{"type": "Note", "updated": "2024-13-45T99:00:00Z"}"#).unwrap_err();
    assert!(matches!(err, DecodeError::InvalidDateTime { property: "updated", .. }));
    assert_eq!(err.code(), ErrorCode::MalformedContent);
    assert!(err.to_string().starts_with("[A001]"));

    let err = from_json_str("[]").unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidInput);
}

#[test]
fn test_unregistered_top_level_type_returns_none() {
    assert_eq!(from_json_str(r#"{"type": "ChatMessage", "content": "hi"}"#).unwrap(), None);
}

static CHAT_MESSAGE: TypeDef = TypeDef {
    name: "ChatMessage",
    extends: Some(&vocab::NOTE),
    properties: &[PropertySpec::functional(
        "editedCount",
        VariantSet::literal(LiteralKind::NonNegativeInteger),
    )],
};

#[test]
fn test_application_types_extend_the_registry() {
    let mut registry = TypeRegistry::core();
    registry.register(&CHAT_MESSAGE);

    let input = json!({
        "type": "Create",
        "object": {"type": "ChatMessage", "content": "hi", "editedCount": 2}
    });
    let create = registry.deserialize(&input).unwrap().unwrap();
    let message = create.list("object").unwrap().get_entity_at(0).unwrap();
    assert_eq!(message.type_name(), "ChatMessage");
    assert!(message.is_a("Note"));
    assert_eq!(message.cell("editedCount").unwrap().get_non_negative_integer().unwrap(), 2);
    assert_eq!(create.to_value().unwrap(), input);

    // The core registry keeps the nested value as unrecognized data
    let plain = CORE_REGISTRY.deserialize(&input).unwrap().unwrap();
    assert!(plain.list("object").unwrap().has_unrecognized());
    assert_eq!(plain.to_value().unwrap(), input);
}

#[test]
fn test_built_entities_round_trip() {
    let note = EntityBuilder::new(&vocab::NOTE)
        .minted_id()
        .reference("to", Iri::public_audience())
        .reference("cc", Iri::parse("https://example.com/followers").unwrap())
        .reference("cc", Iri::parse("https://example.com/bob").unwrap())
        .literal("content", "hello")
        .text("content", "en", "hello")
        .literal("duration", "PT1H30M".parse::<activity_vocab::Duration>().unwrap())
        .unknown("sensitive", json!(true))
        .build()
        .unwrap();

    let wire = note.to_value().unwrap();
    let back = deserialize(&wire).unwrap().unwrap();
    assert_eq!(back, note);
    assert_eq!(back.cell("duration").unwrap().get_duration().unwrap().to_string(), "PT1H30M");

    let entity: Entity = vocab::Note::try_from(back).unwrap().into();
    assert!(entity.is_public());
}
