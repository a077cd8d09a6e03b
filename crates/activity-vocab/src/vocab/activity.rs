//! `Activity` and its extended activity types.

use crate::model::{LiteralKind, PropertySpec, TypeDef};
use crate::vocab::base::{OBJECT, OBJECT_OR_LINK};

pub static ACTIVITY: TypeDef = TypeDef {
    name: "Activity",
    extends: Some(&OBJECT),
    properties: &[
        PropertySpec::non_functional("actor", OBJECT_OR_LINK),
        PropertySpec::non_functional("instrument", OBJECT_OR_LINK),
        PropertySpec::non_functional("object", OBJECT_OR_LINK),
        PropertySpec::non_functional("origin", OBJECT_OR_LINK),
        PropertySpec::non_functional("result", OBJECT_OR_LINK),
        PropertySpec::non_functional("target", OBJECT_OR_LINK),
    ],
};

/// An activity without an `object`. Modelled as a plain subtype: the
/// inherited `object` property simply stays empty.
pub static INTRANSITIVE_ACTIVITY: TypeDef = TypeDef {
    name: "IntransitiveActivity",
    extends: Some(&ACTIVITY),
    properties: &[],
};

/// `closed` may also be a timestamp on the wire; such values are kept as
/// unrecognized data since a property holds one literal kind.
pub static QUESTION: TypeDef = TypeDef {
    name: "Question",
    extends: Some(&INTRANSITIVE_ACTIVITY),
    properties: &[
        PropertySpec::non_functional("anyOf", OBJECT_OR_LINK),
        PropertySpec::non_functional("closed", OBJECT_OR_LINK.or_literal(LiteralKind::Boolean)),
        PropertySpec::non_functional("oneOf", OBJECT_OR_LINK),
    ],
};

/// Declares property-less subtypes of a parent type.
macro_rules! subtypes {
    ($parent:expr => $($ident:ident = $name:literal),* $(,)?) => {
        $(
            pub static $ident: TypeDef = TypeDef {
                name: $name,
                extends: Some(&$parent),
                properties: &[],
            };
        )*
    };
}

subtypes! { ACTIVITY =>
    ACCEPT = "Accept",
    ADD = "Add",
    ANNOUNCE = "Announce",
    CREATE = "Create",
    DELETE = "Delete",
    DISLIKE = "Dislike",
    FLAG = "Flag",
    FOLLOW = "Follow",
    IGNORE = "Ignore",
    JOIN = "Join",
    LEAVE = "Leave",
    LIKE = "Like",
    LISTEN = "Listen",
    MOVE = "Move",
    OFFER = "Offer",
    READ = "Read",
    REJECT = "Reject",
    REMOVE = "Remove",
    UNDO = "Undo",
    UPDATE = "Update",
    VIEW = "View",
}

subtypes! { INTRANSITIVE_ACTIVITY =>
    ARRIVE = "Arrive",
    TRAVEL = "Travel",
}

subtypes! { IGNORE => BLOCK = "Block" }
subtypes! { OFFER => INVITE = "Invite" }
subtypes! { ACCEPT => TENTATIVE_ACCEPT = "TentativeAccept" }
subtypes! { REJECT => TENTATIVE_REJECT = "TentativeReject" }
