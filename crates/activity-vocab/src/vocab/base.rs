//! The two root types, `Object` and `Link`.

use crate::model::{LiteralKind, PropertySpec, TypeDef, VariantSet};

/// Anything that is an `Object` or a `Link`, or a reference to one.
pub const OBJECT_OR_LINK: VariantSet = VariantSet::entities_or_reference(&["Object", "Link"]);

const IMAGE_OR_LINK: VariantSet = VariantSet::entities_or_reference(&["Image", "Link"]);
const COLLECTION: VariantSet = VariantSet::entities_or_reference(&["Collection"]);
const TEXT: VariantSet = VariantSet::text();
const STRING: VariantSet = VariantSet::literal(LiteralKind::String);
const DATE_TIME: VariantSet = VariantSet::literal(LiteralKind::DateTime);

pub static OBJECT: TypeDef = TypeDef {
    name: "Object",
    extends: None,
    properties: &[
        PropertySpec::non_functional("attachment", OBJECT_OR_LINK),
        PropertySpec::non_functional("attributedTo", OBJECT_OR_LINK),
        PropertySpec::non_functional("audience", OBJECT_OR_LINK),
        PropertySpec::non_functional("bcc", OBJECT_OR_LINK),
        PropertySpec::non_functional("bto", OBJECT_OR_LINK),
        PropertySpec::non_functional("cc", OBJECT_OR_LINK),
        PropertySpec::non_functional("content", TEXT),
        PropertySpec::non_functional("context", OBJECT_OR_LINK),
        PropertySpec::functional("duration", VariantSet::literal(LiteralKind::Duration)),
        PropertySpec::functional("endTime", DATE_TIME),
        PropertySpec::non_functional("generator", OBJECT_OR_LINK),
        PropertySpec::non_functional("icon", IMAGE_OR_LINK),
        PropertySpec::non_functional("image", IMAGE_OR_LINK),
        PropertySpec::non_functional("inReplyTo", OBJECT_OR_LINK),
        PropertySpec::functional("likes", COLLECTION),
        PropertySpec::non_functional("location", OBJECT_OR_LINK),
        PropertySpec::functional("mediaType", STRING),
        PropertySpec::non_functional("name", TEXT),
        PropertySpec::non_functional("preview", OBJECT_OR_LINK),
        PropertySpec::functional("published", DATE_TIME),
        PropertySpec::functional("replies", COLLECTION),
        PropertySpec::functional("shares", COLLECTION),
        PropertySpec::functional("source", VariantSet::entities_or_reference(&["Object"])),
        PropertySpec::functional("startTime", DATE_TIME),
        PropertySpec::non_functional("summary", TEXT),
        PropertySpec::non_functional("tag", OBJECT_OR_LINK),
        PropertySpec::non_functional("to", OBJECT_OR_LINK),
        PropertySpec::functional("updated", DATE_TIME),
        PropertySpec::non_functional("url", VariantSet::entities_or_reference(&["Link"])),
    ],
};

pub static LINK: TypeDef = TypeDef {
    name: "Link",
    extends: None,
    properties: &[
        PropertySpec::non_functional("attributedTo", OBJECT_OR_LINK),
        PropertySpec::functional("height", VariantSet::literal(LiteralKind::NonNegativeInteger)),
        PropertySpec::functional("href", VariantSet::reference()),
        PropertySpec::functional("hreflang", STRING),
        PropertySpec::functional("mediaType", STRING),
        PropertySpec::non_functional("name", TEXT),
        PropertySpec::non_functional("preview", OBJECT_OR_LINK),
        PropertySpec::non_functional("rel", STRING),
        PropertySpec::functional("width", VariantSet::literal(LiteralKind::NonNegativeInteger)),
    ],
};

pub static MENTION: TypeDef = TypeDef {
    name: "Mention",
    extends: Some(&LINK),
    properties: &[],
};
