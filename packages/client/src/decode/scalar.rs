//! Decoders for the two irregular scalar encodings used by the API.
//!
//! Both the XML and the JSON path go through these functions, so a tag list
//! or a timestamp decodes identically whichever format was requested.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer};

use crate::error::DecodeError;

/// Layout of `created_at` values, e.g. `Sat Oct 12 21:08:24 +0200 2024`.
pub const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Split a space-joined tag list.
///
/// Surrounding spaces are trimmed, then the rest is split on single spaces.
/// Runs of spaces therefore produce empty entries, and an empty input yields
/// a list holding one empty string.
///
/// # Examples
/// ```
/// use rule34_client::decode::split_tags;
///
/// assert_eq!(split_tags(" cat_ears solo "), vec!["cat_ears", "solo"]);
/// assert_eq!(split_tags(""), vec![""]);
/// ```
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.trim_matches(' ').split(' ').map(str::to_string).collect()
}

/// Parse a `created_at` value with [`CREATED_AT_FORMAT`].
///
/// There is no fallback layout: anything else is a decode error.
pub fn parse_created_at(raw: &str) -> Result<DateTime<FixedOffset>, DecodeError> {
    DateTime::parse_from_str(raw, CREATED_AT_FORMAT).map_err(|source| DecodeError::Timestamp {
        value: raw.to_string(),
        source,
    })
}

/// Serde adapter reading a JSON string into a tag list via [`split_tags`].
pub fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(split_tags(raw.trim()))
}
