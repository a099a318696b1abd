//! Records returned by the API.
//!
//! Field names follow the API's own attribute and key names. Posts come in
//! two shapes because the JSON and XML representations expose slightly
//! different fields.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::decode::{deserialize_tags, Attributes, FromAttributes};
use crate::error::DecodeError;

/// A post as returned by the JSON variant of the posts endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    pub preview_url: String,
    pub sample_url: String,
    pub file_url: String,
    pub directory: u64,
    pub hash: String,
    pub width: u32,
    pub height: u32,
    pub id: u64,
    pub image: String,
    pub change: u64,
    pub owner: String,
    pub parent_id: u64,
    pub rating: String,
    pub sample: bool,
    pub sample_height: u32,
    pub sample_width: u32,
    pub score: i64,
    #[serde(deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    pub source: String,
    pub status: String,
    pub has_notes: bool,
    pub comment_count: u32,
}

/// A post as returned by the XML variant of the posts endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct XmlPost {
    pub id: u64,
    pub height: u32,
    pub width: u32,
    pub score: i64,
    pub file_url: String,
    pub parent_id: u64,
    pub sample_url: String,
    pub sample_width: u32,
    pub sample_height: u32,
    pub preview_url: String,
    pub preview_width: u32,
    pub preview_height: u32,
    pub rating: String,
    pub tags: Vec<String>,
    pub change: u64,
    pub md5: String,
    pub creator_id: u64,
    pub has_children: bool,
    pub created_at: Option<DateTime<FixedOffset>>,
    pub status: String,
    pub source: String,
    pub has_notes: bool,
    pub has_comments: bool,
}

impl FromAttributes for XmlPost {
    const ELEMENT: &'static str = "post";

    fn from_attributes(attrs: &Attributes) -> Result<Self, DecodeError> {
        Ok(Self {
            id: attrs.number("id")?,
            height: attrs.number("height")?,
            width: attrs.number("width")?,
            score: attrs.number("score")?,
            file_url: attrs.string("file_url"),
            parent_id: attrs.number("parent_id")?,
            sample_url: attrs.string("sample_url"),
            sample_width: attrs.number("sample_width")?,
            sample_height: attrs.number("sample_height")?,
            preview_url: attrs.string("preview_url"),
            preview_width: attrs.number("preview_width")?,
            preview_height: attrs.number("preview_height")?,
            rating: attrs.string("rating"),
            tags: attrs.tags("tags"),
            change: attrs.number("change")?,
            md5: attrs.string("md5"),
            creator_id: attrs.number("creator_id")?,
            has_children: attrs.boolean("has_children")?,
            created_at: attrs.timestamp("created_at")?,
            status: attrs.string("status"),
            source: attrs.string("source"),
            has_notes: attrs.boolean("has_notes")?,
            has_comments: attrs.boolean("has_comments")?,
        })
    }
}

/// A comment on a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub id: u64,
    pub post_id: u64,
    pub body: String,
    pub creator: String,
    pub creator_id: u64,
    pub created_at: Option<DateTime<FixedOffset>>,
}

impl FromAttributes for Comment {
    const ELEMENT: &'static str = "comment";

    fn from_attributes(attrs: &Attributes) -> Result<Self, DecodeError> {
        Ok(Self {
            id: attrs.number("id")?,
            post_id: attrs.number("post_id")?,
            body: attrs.string("body"),
            creator: attrs.string("creator"),
            creator_id: attrs.number("creator_id")?,
            created_at: attrs.timestamp("created_at")?,
        })
    }
}

/// A tag with its usage count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub id: u64,
    pub name: String,
    pub count: u64,
    /// Numeric tag category (general, artist, copyright, ...).
    #[serde(rename = "type")]
    pub kind: u32,
    pub ambiguous: bool,
}

impl FromAttributes for Tag {
    const ELEMENT: &'static str = "tag";

    fn from_attributes(attrs: &Attributes) -> Result<Self, DecodeError> {
        Ok(Self {
            id: attrs.number("id")?,
            name: attrs.string("name"),
            count: attrs.number("count")?,
            kind: attrs.number("type")?,
            ambiguous: attrs.boolean("ambiguous")?,
        })
    }
}
