//! rule34-client - Typed client for the rule34 dapi endpoint.
//!
//! Requests are assembled through chained builders that validate each
//! option as it is set. Rejected options are collected and reported all at
//! once when the request is executed, before anything is sent. Responses
//! are decoded from either the XML or the JSON variant of the endpoint.
//!
//! # Example
//!
//! ```
//! use rule34_client::types::{FilterField, Operator, SortField};
//! use rule34_client::Client;
//!
//! let client = Client::new("user-id", "api-key").unwrap();
//! let mut request = client.posts();
//! request
//!     .tags(["cat_ears"])
//!     .filter(FilterField::Score, Operator::GreaterEqual, 10)
//!     .sort_by(SortField::Score)
//!     .asc();
//!
//! assert_eq!(request.tag_string(), "cat_ears score:>=10 sort:score:asc ");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants and client settings
//! - [`types`]: Symbolic option values (ratings, operators, sort fields)
//! - [`error`]: Error types and Result alias
//! - [`posts`], [`comments`], [`tags`]: Request builders
//! - [`query`]: Tag-string and URL compilation
//! - [`http`]: Transport trait and the HTTP implementation
//! - [`decode`]: XML and JSON response decoding
//! - [`models`]: Decoded records
//! - [`client`]: The client tying it together
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod client;
pub mod comments;
pub mod config;
pub mod decode;
pub mod error;
pub mod http;
pub mod models;
pub mod posts;
pub mod query;
mod request;
pub mod tags;
pub mod types;

pub use client::Client;
pub use config::ClientConfig;
pub use error::{ClientError, Result, ValidationErrors, ValidationFailure};
pub use models::{Comment, Post, Tag, XmlPost};
pub use types::{Condition, FilterField, Operator, Rating, SortField, SortOrder};
