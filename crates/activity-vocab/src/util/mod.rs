//! Lexical forms for the XML Schema literal types used by the vocabulary.

pub mod datetime;
pub mod duration;

pub use datetime::{format_datetime_rfc3339, parse_datetime_rfc3339, DateTimeParseError, Timestamp, Zone};
pub use duration::{Duration, DurationParseError};
