//! Error types for the client.
//!
//! Failures are grouped by the stage they come from: argument validation,
//! URL construction, transport, and response decoding. `ClientError` wraps
//! each of them so callers can tell where a request went wrong without
//! looking inside.

use std::convert::Infallible;
use std::fmt;

use thiserror::Error;

/// A single rejected setter call on a request builder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("post id must be positive, got {0}")]
    NonPositivePostId(i64),

    #[error("limit must be positive, got {0}")]
    NonPositiveLimit(i64),

    #[error("page number must be positive, got {0}")]
    NonPositivePage(i64),

    #[error("parent post id must be positive, got {0}")]
    NonPositiveParentId(i64),

    #[error("tag id must be positive, got {0}")]
    NonPositiveTagId(i64),

    #[error("unknown rating '{0}', expected one of: safe, questionable, explicit")]
    UnknownRating(String),

    #[error("unknown filter field '{0}'")]
    UnknownFilterField(String),

    #[error("unknown operator '{0}'")]
    UnknownOperator(String),

    #[error("unknown sort field '{0}'")]
    UnknownSortField(String),

    #[error("unknown sort order '{0}', expected asc or desc")]
    UnknownSortOrder(String),

    #[error("sort field was not selected before requesting a sort order")]
    SortFieldNotSelected,

    #[error("sort field was selected twice or more")]
    SortFieldSelectedTwice,

    #[error("sort order was requested twice or more")]
    SortOrderRequestedTwice,

    #[error("tag name must not be empty")]
    EmptyTagName,

    #[error("tag name pattern must not be empty")]
    EmptyNamePattern,
}

// Typed arguments go through the same `TryInto` path as raw strings.
impl From<Infallible> for ValidationFailure {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

/// Every validation failure recorded by a builder, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationFailure>);

impl ValidationErrors {
    /// Wrap recorded failures; returns `None` when there are none.
    pub fn from_failures(failures: &[ValidationFailure]) -> Option<Self> {
        if failures.is_empty() {
            None
        } else {
            Some(Self(failures.to_vec()))
        }
    }

    pub fn failures(&self) -> &[ValidationFailure] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{failure}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Errors raised while fetching a URL.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network failure, timeout or unreadable body.
    #[error("can't do request: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("unexpected status {status} for {url}")]
    Status { status: u16, url: String },

    /// Failure reported by a custom transport.
    #[error("{0}")]
    Other(String),
}

/// Errors raised while turning a payload into records.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid value '{value}' for attribute '{attribute}' of <{element}>: {reason}")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
        reason: String,
    },

    #[error("can't parse date '{value}': {source}")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Main error type for the client library.
#[derive(Debug, Error)]
pub enum ClientError {
    /// One or more setter calls were rejected. No request was sent.
    #[error("invalid arguments: {0}")]
    Validation(ValidationErrors),

    /// The request URL could not be assembled.
    #[error("failed to build url: {0}")]
    UrlBuild(#[from] url::ParseError),

    /// The transport failed or the server returned a non-success status.
    #[error("request failed: {0}")]
    Transport(#[from] TransportError),

    /// The payload did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] DecodeError),

    /// Missing or invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Records could not be written as JSON.
    #[error("failed to write output: {0}")]
    Output(#[source] serde_json::Error),
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
