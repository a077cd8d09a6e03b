//! Core ActivityStreams vocabulary declarations.
//!
//! Every type is a static [`TypeDef`]. [`CORE_TYPES`] lists them all and seeds
//! the default [`TypeRegistry`](crate::registry::TypeRegistry).

mod activity;
mod actor;
mod base;
mod collection;
mod note;
mod object;

pub use activity::{
    ACCEPT, ACTIVITY, ADD, ANNOUNCE, ARRIVE, BLOCK, CREATE, DELETE, DISLIKE, FLAG, FOLLOW, IGNORE,
    INTRANSITIVE_ACTIVITY, INVITE, JOIN, LEAVE, LIKE, LISTEN, MOVE, OFFER, QUESTION, READ, REJECT,
    REMOVE, TENTATIVE_ACCEPT, TENTATIVE_REJECT, TRAVEL, UNDO, UPDATE, VIEW,
};
pub use actor::{APPLICATION, GROUP, ORGANIZATION, PERSON, SERVICE};
pub use base::{LINK, MENTION, OBJECT, OBJECT_OR_LINK};
pub use collection::{COLLECTION, COLLECTION_PAGE, ORDERED_COLLECTION, ORDERED_COLLECTION_PAGE};
pub use note::Note;
pub use object::{
    ARTICLE, AUDIO, DOCUMENT, EVENT, IMAGE, NOTE, PAGE, PLACE, PROFILE, RELATIONSHIP, TOMBSTONE,
    VIDEO,
};

use crate::model::TypeDef;

/// Every core type, in registration order.
pub static CORE_TYPES: &[&TypeDef] = &[
    &OBJECT,
    &LINK,
    &MENTION,
    // Activities
    &ACTIVITY,
    &INTRANSITIVE_ACTIVITY,
    &ACCEPT,
    &ADD,
    &ANNOUNCE,
    &ARRIVE,
    &BLOCK,
    &CREATE,
    &DELETE,
    &DISLIKE,
    &FLAG,
    &FOLLOW,
    &IGNORE,
    &INVITE,
    &JOIN,
    &LEAVE,
    &LIKE,
    &LISTEN,
    &MOVE,
    &OFFER,
    &QUESTION,
    &READ,
    &REJECT,
    &REMOVE,
    &TENTATIVE_ACCEPT,
    &TENTATIVE_REJECT,
    &TRAVEL,
    &UNDO,
    &UPDATE,
    &VIEW,
    // Actors
    &APPLICATION,
    &GROUP,
    &ORGANIZATION,
    &PERSON,
    &SERVICE,
    // Objects
    &ARTICLE,
    &AUDIO,
    &DOCUMENT,
    &EVENT,
    &IMAGE,
    &NOTE,
    &PAGE,
    &PLACE,
    &PROFILE,
    &RELATIONSHIP,
    &TOMBSTONE,
    &VIDEO,
    // Collections
    &COLLECTION,
    &ORDERED_COLLECTION,
    &COLLECTION_PAGE,
    &ORDERED_COLLECTION_PAGE,
];

#[cfg(test)]
mod tests {
    use rustc_hash::FxHashSet;

    use super::*;

    #[test]
    fn test_core_type_names_unique() {
        let mut seen = FxHashSet::default();
        for def in CORE_TYPES {
            assert!(seen.insert(def.name), "duplicate type {}", def.name);
        }
    }

    #[test]
    fn test_capabilities_name_core_types() {
        let names: FxHashSet<_> = CORE_TYPES.iter().map(|def| def.name).collect();
        for def in CORE_TYPES {
            for spec in def.properties {
                for capability in spec.variants.entities {
                    assert!(
                        names.contains(capability),
                        "{}.{} accepts unknown type {}",
                        def.name,
                        spec.name,
                        capability
                    );
                }
            }
        }
    }

    #[test]
    fn test_every_type_is_object_or_link() {
        for def in CORE_TYPES {
            assert!(def.is_a("Object") || def.is_a("Link"), "{} has no root", def.name);
        }
    }
}
