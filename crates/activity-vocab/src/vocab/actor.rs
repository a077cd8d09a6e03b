//! Actor types.
//!
//! The five actor types share one property list: the collections an
//! ActivityPub server exposes for an actor, and its preferred username.

use crate::model::{PropertySpec, TypeDef, VariantSet};
use crate::vocab::base::OBJECT;

const ORDERED_COLLECTION: VariantSet = VariantSet::entities_or_reference(&["OrderedCollection"]);
const COLLECTION: VariantSet = VariantSet::entities_or_reference(&["Collection"]);

static ACTOR_PROPERTIES: [PropertySpec; 6] = [
    PropertySpec::functional("followers", COLLECTION),
    PropertySpec::functional("following", COLLECTION),
    PropertySpec::functional("inbox", ORDERED_COLLECTION),
    PropertySpec::functional("liked", COLLECTION),
    PropertySpec::functional("outbox", ORDERED_COLLECTION),
    PropertySpec::functional("preferredUsername", VariantSet::text()),
];

macro_rules! actors {
    ($($ident:ident = $name:literal),* $(,)?) => {
        $(
            pub static $ident: TypeDef = TypeDef {
                name: $name,
                extends: Some(&OBJECT),
                properties: &ACTOR_PROPERTIES,
            };
        )*
    };
}

actors! {
    APPLICATION = "Application",
    GROUP = "Group",
    ORGANIZATION = "Organization",
    PERSON = "Person",
    SERVICE = "Service",
}
