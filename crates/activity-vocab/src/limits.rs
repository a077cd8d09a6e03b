//! Security limits for decoding untrusted input.
//!
//! Nested entities and unknown values are walked recursively, so their depth
//! is bounded to keep stack use predictable.

/// Maximum nesting depth of entities and unknown values within one document.
pub const MAX_NESTING_DEPTH: usize = 64;
