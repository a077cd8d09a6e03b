//! JSON wire encoding/decoding.
//!
//! The wire form is a `serde_json` value tree: each entity is a JSON object
//! keyed by property name.

pub mod decode;
pub mod encode;
pub mod literal;

pub use decode::{deserialize, from_json_str, parse_json, DecodeOptions};
pub use encode::{attach_context, SerializeOptions};
pub use literal::{decode_literal, encode_literal};
