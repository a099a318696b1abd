//! Tag listing requests.

use url::Url;

use crate::client::Client;
use crate::decode::XmlElements;
use crate::error::{Result, ValidationFailure};
use crate::models::Tag;
use crate::query::QueryParams;
use crate::request::{ensure_valid, positive, record};

/// Options of a tag listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagsOptions {
    pub id: Option<u64>,
    pub limit: Option<u64>,
    pub page: Option<u64>,
    pub name: Option<String>,
    /// SQL `LIKE` pattern, `%` matching any run of characters.
    pub name_pattern: Option<String>,
}

/// Builder for listing tags.
///
/// ```no_run
/// # fn main() -> rule34_client::Result<()> {
/// let client = rule34_client::Client::new("user-id", "api-key")?;
/// let tags = client.tags().name_pattern("cat%").limit(10).find()?;
/// # Ok(()) }
/// ```
#[derive(Debug)]
pub struct TagsRequest<'a> {
    client: &'a Client,
    options: TagsOptions,
    failures: Vec<ValidationFailure>,
}

impl<'a> TagsRequest<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self {
            client,
            options: TagsOptions::default(),
            failures: Vec::new(),
        }
    }

    pub fn id(&mut self, id: i64) -> &mut Self {
        let outcome = positive(id, ValidationFailure::NonPositiveTagId);
        if let Some(id) = record(&mut self.failures, outcome) {
            self.options.id = Some(id);
        }
        self
    }

    pub fn limit(&mut self, limit: i64) -> &mut Self {
        let outcome = positive(limit, ValidationFailure::NonPositiveLimit);
        if let Some(limit) = record(&mut self.failures, outcome) {
            self.options.limit = Some(limit);
        }
        self
    }

    pub fn page(&mut self, page: i64) -> &mut Self {
        let outcome = positive(page, ValidationFailure::NonPositivePage);
        if let Some(page) = record(&mut self.failures, outcome) {
            self.options.page = Some(page);
        }
        self
    }

    /// Look up a tag by its exact name.
    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        let outcome = non_empty(name.into(), ValidationFailure::EmptyTagName);
        if let Some(name) = record(&mut self.failures, outcome) {
            self.options.name = Some(name);
        }
        self
    }

    /// Look up tags whose name matches a `LIKE` pattern.
    pub fn name_pattern(&mut self, pattern: impl Into<String>) -> &mut Self {
        let outcome = non_empty(pattern.into(), ValidationFailure::EmptyNamePattern);
        if let Some(pattern) = record(&mut self.failures, outcome) {
            self.options.name_pattern = Some(pattern);
        }
        self
    }

    pub fn options(&self) -> &TagsOptions {
        &self.options
    }

    pub fn failures(&self) -> &[ValidationFailure] {
        &self.failures
    }

    pub fn url(&self) -> Result<Url> {
        ensure_valid(&self.failures)?;
        self.client.url_for(self.params())
    }

    /// Execute the request and decode the `<tag>` elements.
    pub fn find(&self) -> Result<Vec<Tag>> {
        ensure_valid(&self.failures)?;
        self.client.execute(self.params(), &XmlElements)
    }

    fn params(&self) -> QueryParams {
        let mut params = QueryParams::for_selector("tag");
        params
            .set_opt("id", self.options.id)
            .set_opt("limit", self.options.limit)
            .set_opt("pid", self.options.page);
        if let Some(name) = &self.options.name {
            params.set("name", name.as_str());
        }
        if let Some(pattern) = &self.options.name_pattern {
            params.set("name_pattern", pattern.as_str());
        }
        params
    }
}

fn non_empty(
    value: String,
    failure: ValidationFailure,
) -> std::result::Result<String, ValidationFailure> {
    if value.trim().is_empty() {
        Err(failure)
    } else {
        Ok(value)
    }
}
