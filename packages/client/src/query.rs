//! Translation of accumulated request options into a query string.
//!
//! Compilation is pure: the same options always produce byte-identical
//! tag-strings and URLs.

use std::collections::BTreeMap;

use url::Url;

use crate::config::AI_GENERATED_TAG;
use crate::posts::PostsOptions;

/// Compile post search options into the API's space-separated tag-string.
///
/// Segments are written in a fixed order, each followed by one space:
/// include tags, `-`excluded tags, the AI exclusion tag, `rating:`,
/// `parent:`, filter conditions in insertion order, and finally the
/// `sort:<field>:<order>` directive.
///
/// # Examples
/// ```
/// use rule34_client::posts::PostsOptions;
/// use rule34_client::query::compile_tags;
/// use rule34_client::types::Rating;
///
/// let options = PostsOptions {
///     tags: vec!["a".into(), "b".into()],
///     exclude: vec!["c".into()],
///     rating: Some(Rating::Safe),
///     parent_id: Some(7),
///     ..PostsOptions::default()
/// };
/// assert_eq!(compile_tags(&options), "a b -c rating:safe parent:7 ");
/// ```
pub fn compile_tags(options: &PostsOptions) -> String {
    let mut out = String::new();

    for tag in &options.tags {
        out.push_str(&format!("{tag} "));
    }

    for tag in &options.exclude {
        out.push_str(&format!("-{tag} "));
    }

    if options.filter_ai {
        out.push_str(&format!("-{AI_GENERATED_TAG} "));
    }

    if let Some(rating) = options.rating {
        out.push_str(&format!("rating:{rating} "));
    }

    if let Some(parent_id) = options.parent_id {
        out.push_str(&format!("parent:{parent_id} "));
    }

    for condition in &options.conditions {
        out.push_str(&format!("{condition} "));
    }

    if let Some(field) = options.sort_field {
        let order = options.sort_order.unwrap_or_default();
        out.push_str(&format!("sort:{field}:{order} "));
    }

    out
}

/// Query parameters of one request, kept sorted by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    /// Start a parameter set for the given `s` selector (e.g. `post`).
    pub fn for_selector(selector: &str) -> Self {
        let mut params = Self::default();
        params.set("s", selector);
        params
    }

    /// Set a parameter, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Set a numeric parameter only when a value is present.
    pub fn set_opt(&mut self, key: &str, value: Option<u64>) -> &mut Self {
        if let Some(value) = value {
            self.set(key, value.to_string());
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Build the full request URL.
///
/// The base URL's own query pairs (`page=dapi&q=index`) are merged with
/// `params`, request parameters winning on conflict, and written back sorted
/// by key.
///
/// # Examples
/// ```
/// use rule34_client::query::{build_url, QueryParams};
///
/// let mut params = QueryParams::for_selector("post");
/// params.set("tags", "cat ");
/// let url = build_url("https://api.example.test/index.php?page=dapi&q=index", &params).unwrap();
/// assert_eq!(
///     url.as_str(),
///     "https://api.example.test/index.php?page=dapi&q=index&s=post&tags=cat+"
/// );
/// ```
pub fn build_url(base_url: &str, params: &QueryParams) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(base_url)?;

    let mut merged: BTreeMap<String, String> = url.query_pairs().into_owned().collect();
    for (key, value) in params.iter() {
        merged.insert(key.to_string(), value.to_string());
    }

    url.query_pairs_mut().clear().extend_pairs(merged.iter());
    Ok(url)
}
