//! Collections and collection pages.

use crate::model::{LiteralKind, PropertySpec, TypeDef, VariantSet};
use crate::vocab::base::{OBJECT, OBJECT_OR_LINK};

const PAGE_OR_LINK: VariantSet = VariantSet::entities_or_reference(&["CollectionPage", "Link"]);
const COUNT: VariantSet = VariantSet::literal(LiteralKind::NonNegativeInteger);

pub static COLLECTION: TypeDef = TypeDef {
    name: "Collection",
    extends: Some(&OBJECT),
    properties: &[
        PropertySpec::functional("current", PAGE_OR_LINK),
        PropertySpec::functional("first", PAGE_OR_LINK),
        PropertySpec::non_functional("items", OBJECT_OR_LINK),
        PropertySpec::functional("last", PAGE_OR_LINK),
        PropertySpec::functional("totalItems", COUNT),
    ],
};

pub static ORDERED_COLLECTION: TypeDef = TypeDef {
    name: "OrderedCollection",
    extends: Some(&COLLECTION),
    properties: &[PropertySpec::non_functional("orderedItems", OBJECT_OR_LINK)],
};

pub static COLLECTION_PAGE: TypeDef = TypeDef {
    name: "CollectionPage",
    extends: Some(&COLLECTION),
    properties: &[
        PropertySpec::functional("next", PAGE_OR_LINK),
        PropertySpec::functional(
            "partOf",
            VariantSet::entities_or_reference(&["Collection", "Link"]),
        ),
        PropertySpec::functional("prev", PAGE_OR_LINK),
    ],
};

pub static ORDERED_COLLECTION_PAGE: TypeDef = TypeDef {
    name: "OrderedCollectionPage",
    extends: Some(&COLLECTION_PAGE),
    properties: &[
        PropertySpec::non_functional("orderedItems", OBJECT_OR_LINK),
        PropertySpec::functional("startIndex", COUNT),
    ],
};
