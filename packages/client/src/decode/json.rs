//! Whole-document decoding of JSON payloads.

use serde::de::DeserializeOwned;

use super::Decode;
use crate::error::DecodeError;

/// Decoder reading the whole payload as one JSON array of records.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDocument;

impl<T: DeserializeOwned> Decode<T> for JsonDocument {
    fn decode(&self, bytes: &[u8]) -> Result<Vec<T>, DecodeError> {
        // The API answers an empty search with an empty body rather than `[]`.
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let records: Vec<T> = serde_json::from_slice(bytes)?;
        tracing::trace!(count = records.len(), "Decoded JSON document");
        Ok(records)
    }
}
