//! Element-stream decoding of XML payloads.
//!
//! The payload is read token by token. Each element whose local name matches
//! the record's element name is decoded from its attributes; everything else
//! in the stream is skipped.

use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::scalar::{parse_created_at, split_tags};
use super::Decode;
use crate::error::DecodeError;

/// A record that can be built from the attributes of a single XML element.
pub trait FromAttributes: Sized {
    /// Local name of the element holding one record (e.g. `post`).
    const ELEMENT: &'static str;

    /// Build the record from the element's attributes.
    fn from_attributes(attrs: &Attributes) -> Result<Self, DecodeError>;
}

/// Decoder scanning an XML stream for `T::ELEMENT` elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlElements;

impl<T: FromAttributes> Decode<T> for XmlElements {
    fn decode(&self, bytes: &[u8]) -> Result<Vec<T>, DecodeError> {
        let mut reader = Reader::from_reader(bytes);
        let mut records = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Start(start) if is_element(&start, T::ELEMENT) => {
                    records.push(T::from_attributes(&Attributes::from_start(&start)?)?);
                    // Children of a record element are not part of the record.
                    reader.read_to_end(start.name())?;
                }
                Event::Empty(start) if is_element(&start, T::ELEMENT) => {
                    records.push(T::from_attributes(&Attributes::from_start(&start)?)?);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        tracing::trace!(element = T::ELEMENT, count = records.len(), "Decoded XML elements");
        Ok(records)
    }
}

fn is_element(start: &BytesStart<'_>, name: &str) -> bool {
    start.local_name().as_ref() == name.as_bytes()
}

/// Unescaped attributes of one element, keyed by local name.
#[derive(Debug, Clone, Default)]
pub struct Attributes {
    element: String,
    values: HashMap<String, String>,
}

impl Attributes {
    /// Collect the attributes of a start (or empty) tag.
    pub fn from_start(start: &BytesStart<'_>) -> Result<Self, DecodeError> {
        let element = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        let mut values = HashMap::new();

        for attr in start.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            values.insert(key, value);
        }

        Ok(Self { element, values })
    }

    /// Raw attribute value, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// String attribute; missing attributes decode to an empty string.
    pub fn string(&self, name: &str) -> String {
        self.get(name).unwrap_or_default().to_string()
    }

    /// Numeric attribute; missing or empty values decode to zero.
    pub fn number<T>(&self, name: &str) -> Result<T, DecodeError>
    where
        T: FromStr + Default,
        T::Err: Display,
    {
        let raw = self.get(name).unwrap_or_default();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(T::default());
        }
        trimmed
            .parse()
            .map_err(|e: T::Err| self.invalid(name, raw, e.to_string()))
    }

    /// Boolean attribute; missing or empty values decode to `false`.
    pub fn boolean(&self, name: &str) -> Result<bool, DecodeError> {
        let raw = self.get(name).unwrap_or_default();
        match raw.trim() {
            "" | "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
            "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
            _ => Err(self.invalid(name, raw, "expected a boolean".to_string())),
        }
    }

    /// Space-joined tag list; a missing attribute decodes to no tags.
    pub fn tags(&self, name: &str) -> Vec<String> {
        self.get(name).map(split_tags).unwrap_or_default()
    }

    /// `created_at`-style timestamp; `None` when the attribute is missing.
    pub fn timestamp(&self, name: &str) -> Result<Option<DateTime<FixedOffset>>, DecodeError> {
        self.get(name).map(parse_created_at).transpose()
    }

    fn invalid(&self, attribute: &str, value: &str, reason: String) -> DecodeError {
        DecodeError::InvalidAttribute {
            element: self.element.clone(),
            attribute: attribute.to_string(),
            value: value.to_string(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item {
        id: u64,
        name: String,
        hidden: bool,
    }

    impl FromAttributes for Item {
        const ELEMENT: &'static str = "item";

        fn from_attributes(attrs: &Attributes) -> Result<Self, DecodeError> {
            Ok(Self {
                id: attrs.number("id")?,
                name: attrs.string("name"),
                hidden: attrs.boolean("hidden")?,
            })
        }
    }

    fn decode(xml: &str) -> Result<Vec<Item>, DecodeError> {
        XmlElements.decode(xml.as_bytes())
    }

    #[test]
    fn test_decodes_matching_elements_only() {
        let items = decode(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<items count="2">
  <other id="9"/>
  <item id="1" name="first" hidden="true"/>
  <item id="2" name="second &amp; last"></item>
</items>"#,
        )
        .unwrap();

        assert_eq!(
            items,
            vec![
                Item {
                    id: 1,
                    name: "first".to_string(),
                    hidden: true,
                },
                Item {
                    id: 2,
                    name: "second & last".to_string(),
                    hidden: false,
                },
            ]
        );
    }

    #[test]
    fn test_children_of_record_are_skipped() {
        let items = decode(r#"<items><item id="1"><item id="2"/></item></items>"#).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 1);
    }

    #[test]
    fn test_empty_payload_is_empty_list() {
        assert!(decode("").unwrap().is_empty());
        assert!(decode("  \n").unwrap().is_empty());
        assert!(decode(r#"<items count="0"></items>"#).unwrap().is_empty());
    }

    #[test]
    fn test_empty_numeric_attribute_is_zero() {
        let items = decode(r#"<items><item id="" hidden=""/></items>"#).unwrap();
        assert_eq!(items[0].id, 0);
        assert!(!items[0].hidden);
    }

    #[test]
    fn test_bad_attribute_aborts_decode() {
        let err = decode(r#"<items><item id="1"/><item id="two"/></items>"#).unwrap_err();
        match err {
            DecodeError::InvalidAttribute {
                element,
                attribute,
                value,
                ..
            } => {
                assert_eq!(element, "item");
                assert_eq!(attribute, "id");
                assert_eq!(value, "two");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_boolean_aborts_decode() {
        let err = decode(r#"<item id="1" hidden="maybe"/>"#).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidAttribute { .. }));
    }

    #[test]
    fn test_mismatched_end_tag_is_error() {
        let err = decode(r#"<items><item id="1"/></other>"#).unwrap_err();
        assert!(matches!(err, DecodeError::Xml(_)));
    }

    #[test]
    fn test_duplicate_attribute_is_error() {
        let err = decode(r#"<items><item id="1" id="2"/></items>"#).unwrap_err();
        assert!(matches!(err, DecodeError::Xml(_)));
    }

    #[test]
    fn test_attribute_helpers() {
        let mut values = HashMap::new();
        values.insert("tags".to_string(), " a b ".to_string());
        values.insert("created_at".to_string(), "Sat Oct 12 21:08:24 +0200 2024".to_string());
        values.insert("score".to_string(), " -3 ".to_string());
        let attrs = Attributes {
            element: "post".to_string(),
            values,
        };

        assert_eq!(attrs.tags("tags"), vec!["a", "b"]);
        assert!(attrs.tags("missing").is_empty());
        assert!(attrs.timestamp("created_at").unwrap().is_some());
        assert!(attrs.timestamp("missing").unwrap().is_none());
        assert_eq!(attrs.number::<i64>("score").unwrap(), -3);
    }

    #[test]
    fn test_bad_timestamp_attribute_is_error() {
        let mut values = HashMap::new();
        values.insert("created_at".to_string(), "2024-10-12".to_string());
        let attrs = Attributes {
            element: "comment".to_string(),
            values,
        };

        assert!(matches!(
            attrs.timestamp("created_at"),
            Err(DecodeError::Timestamp { .. })
        ));
    }
}
