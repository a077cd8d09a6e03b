//! Object types other than actors, activities and collections.

use crate::model::{LiteralKind, PropertySpec, TypeDef, VariantSet};
use crate::vocab::base::{OBJECT, OBJECT_OR_LINK};

const FLOAT: VariantSet = VariantSet::literal(LiteralKind::Float);

pub static ARTICLE: TypeDef = TypeDef {
    name: "Article",
    extends: Some(&OBJECT),
    properties: &[],
};

pub static DOCUMENT: TypeDef = TypeDef {
    name: "Document",
    extends: Some(&OBJECT),
    properties: &[],
};

pub static AUDIO: TypeDef = TypeDef {
    name: "Audio",
    extends: Some(&DOCUMENT),
    properties: &[],
};

pub static IMAGE: TypeDef = TypeDef {
    name: "Image",
    extends: Some(&DOCUMENT),
    properties: &[],
};

pub static PAGE: TypeDef = TypeDef {
    name: "Page",
    extends: Some(&DOCUMENT),
    properties: &[],
};

pub static VIDEO: TypeDef = TypeDef {
    name: "Video",
    extends: Some(&DOCUMENT),
    properties: &[],
};

pub static EVENT: TypeDef = TypeDef {
    name: "Event",
    extends: Some(&OBJECT),
    properties: &[],
};

pub static NOTE: TypeDef = TypeDef {
    name: "Note",
    extends: Some(&OBJECT),
    properties: &[],
};

pub static PLACE: TypeDef = TypeDef {
    name: "Place",
    extends: Some(&OBJECT),
    properties: &[
        PropertySpec::functional("accuracy", FLOAT),
        PropertySpec::functional("altitude", FLOAT),
        PropertySpec::functional("latitude", FLOAT),
        PropertySpec::functional("longitude", FLOAT),
        PropertySpec::functional("radius", FLOAT),
        PropertySpec::functional("units", VariantSet::literal(LiteralKind::String)),
    ],
};

pub static PROFILE: TypeDef = TypeDef {
    name: "Profile",
    extends: Some(&OBJECT),
    properties: &[PropertySpec::functional(
        "describes",
        VariantSet::entities_or_reference(&["Object"]),
    )],
};

pub static RELATIONSHIP: TypeDef = TypeDef {
    name: "Relationship",
    extends: Some(&OBJECT),
    properties: &[
        PropertySpec::non_functional("object", OBJECT_OR_LINK),
        PropertySpec::non_functional("relationship", VariantSet::entities_or_reference(&["Object"])),
        PropertySpec::functional("subject", OBJECT_OR_LINK),
    ],
};

pub static TOMBSTONE: TypeDef = TypeDef {
    name: "Tombstone",
    extends: Some(&OBJECT),
    properties: &[
        PropertySpec::functional("deleted", VariantSet::literal(LiteralKind::DateTime)),
        PropertySpec::non_functional("formerType", VariantSet::entities_or_reference(&["Object"])),
    ],
};
