//! Protocol modules (protobuf wire format + field paths).
//!
//! The request payload is plain protobuf wire data. There is no schema here:
//! messages decode into ordered field lists and only the fields a path points
//! at are ever inspected or rewritten. Unknown fields survive untouched.
//!
//! All parsers are panic-free: malformed input is reported as
//! `AdsieveError::Malformed` instead of panicking or indexing raw buffers.

pub mod path;
pub mod wire;

pub use path::FieldPath;
pub use wire::{decode_message, encode_message, Field, Message, WireValue};
