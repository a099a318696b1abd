//! Response decoding.
//!
//! The API serves the same resources as XML (records as element attributes)
//! or JSON (an array of objects). Each format has its own [`Decode`]
//! implementation; which one runs is decided by the request, never by
//! inspecting the payload.

mod json;
mod scalar;
mod xml;

pub use json::JsonDocument;
pub use scalar::{deserialize_tags, parse_created_at, split_tags, CREATED_AT_FORMAT};
pub use xml::{Attributes, FromAttributes, XmlElements};

use crate::error::DecodeError;

/// Decode a raw payload into a list of records.
pub trait Decode<T> {
    fn decode(&self, bytes: &[u8]) -> Result<Vec<T>, DecodeError>;
}
