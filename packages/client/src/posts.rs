//! Post search requests.
//!
//! A [`PostsRequest`] accumulates options through chained setter calls. Each
//! setter validates its own argument and either stores it or records a
//! [`ValidationFailure`]; no call ever breaks the chain. Recorded failures
//! are reported together when the request is executed, and in that case
//! nothing is sent.

use url::Url;

use crate::client::Client;
use crate::decode::{JsonDocument, XmlElements};
use crate::error::{Result, ValidationFailure};
use crate::models::{Post, XmlPost};
use crate::query::{compile_tags, QueryParams};
use crate::request::{ensure_valid, positive, record};
use crate::types::{Condition, FilterField, Operator, Rating, SortField, SortOrder};

/// Everything a post search has been configured with so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostsOptions {
    pub post_id: Option<u64>,
    pub limit: Option<u64>,
    pub page: Option<u64>,
    pub tags: Vec<String>,
    pub exclude: Vec<String>,
    pub filter_ai: bool,
    pub rating: Option<Rating>,
    pub parent_id: Option<u64>,
    /// Filter conditions in insertion order.
    pub conditions: Vec<Condition>,
    /// Set once sorting has been requested.
    pub sort_field: Option<SortField>,
    /// Explicit sort order; descending when unset.
    pub sort_order: Option<SortOrder>,
}

impl PostsOptions {
    /// Whether a sort directive will be emitted.
    pub fn is_sorted(&self) -> bool {
        self.sort_field.is_some()
    }
}

/// Builder for a post search.
///
/// # Example
/// ```no_run
/// use rule34_client::types::{FilterField, Operator, SortField};
/// use rule34_client::Client;
///
/// # fn main() -> rule34_client::Result<()> {
/// let client = Client::new("user-id", "api-key")?;
/// let posts = client
///     .posts()
///     .tags(["cat_ears", "solo"])
///     .exclude(["sketch"])
///     .filter(FilterField::Score, Operator::GreaterEqual, 10)
///     .sort_by(SortField::Score)
///     .limit(20)
///     .find()?;
/// # Ok(()) }
/// ```
#[derive(Debug)]
pub struct PostsRequest<'a> {
    client: &'a Client,
    options: PostsOptions,
    failures: Vec<ValidationFailure>,
}

impl<'a> PostsRequest<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self {
            client,
            options: PostsOptions::default(),
            failures: Vec::new(),
        }
    }

    /// Fetch a single post by id.
    pub fn post_id(&mut self, post_id: i64) -> &mut Self {
        let outcome = positive(post_id, ValidationFailure::NonPositivePostId);
        if let Some(id) = record(&mut self.failures, outcome) {
            self.options.post_id = Some(id);
        }
        self
    }

    /// Maximum number of posts to return. The API caps this at 1000.
    pub fn limit(&mut self, limit: i64) -> &mut Self {
        let outcome = positive(limit, ValidationFailure::NonPositiveLimit);
        if let Some(limit) = record(&mut self.failures, outcome) {
            self.options.limit = Some(limit);
        }
        self
    }

    /// Page number for pagination.
    pub fn page(&mut self, page: i64) -> &mut Self {
        let outcome = positive(page, ValidationFailure::NonPositivePage);
        if let Some(page) = record(&mut self.failures, outcome) {
            self.options.page = Some(page);
        }
        self
    }

    /// Add tags every result must carry. Repeated calls accumulate.
    pub fn tags<I, S>(&mut self, tags: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Add tags no result may carry. Repeated calls accumulate.
    pub fn exclude<I, S>(&mut self, tags: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.exclude.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Exclude AI-generated posts.
    pub fn filter_ai(&mut self) -> &mut Self {
        self.options.filter_ai = true;
        self
    }

    /// Restrict results to one content rating.
    ///
    /// Accepts a [`Rating`] or its name (`"safe"`, `"questionable"`, `"explicit"`).
    pub fn rating<R>(&mut self, rating: R) -> &mut Self
    where
        R: TryInto<Rating>,
        R::Error: Into<ValidationFailure>,
    {
        let outcome = rating.try_into().map_err(Into::into);
        if let Some(rating) = record(&mut self.failures, outcome) {
            self.options.rating = Some(rating);
        }
        self
    }

    /// Only return children of the given post.
    pub fn parent_id(&mut self, parent_id: i64) -> &mut Self {
        let outcome = positive(parent_id, ValidationFailure::NonPositiveParentId);
        if let Some(id) = record(&mut self.failures, outcome) {
            self.options.parent_id = Some(id);
        }
        self
    }

    /// Add a `field:<op>argument` condition, e.g. `score:>=10`.
    ///
    /// Field and operator are checked independently, so a call with both
    /// invalid records two failures.
    pub fn filter<F, O>(&mut self, field: F, operator: O, argument: i64) -> &mut Self
    where
        F: TryInto<FilterField>,
        F::Error: Into<ValidationFailure>,
        O: TryInto<Operator>,
        O::Error: Into<ValidationFailure>,
    {
        let field = record(&mut self.failures, field.try_into().map_err(Into::into));
        let operator = record(&mut self.failures, operator.try_into().map_err(Into::into));

        if let (Some(field), Some(operator)) = (field, operator) {
            self.options
                .conditions
                .push(Condition::new(field, operator, argument));
        }
        self
    }

    /// Sort results by `field`. Can only be selected once per request.
    pub fn sort_by<S>(&mut self, field: S) -> &mut Self
    where
        S: TryInto<SortField>,
        S::Error: Into<ValidationFailure>,
    {
        if self.options.sort_field.is_some() {
            record::<()>(
                &mut self.failures,
                Err(ValidationFailure::SortFieldSelectedTwice),
            );
            return self;
        }

        let outcome = field.try_into().map_err(Into::into);
        if let Some(field) = record(&mut self.failures, outcome) {
            self.options.sort_field = Some(field);
        }
        self
    }

    /// Sort ascending. Requires a prior [`sort_by`](Self::sort_by).
    pub fn asc(&mut self) -> &mut Self {
        self.order(SortOrder::Asc)
    }

    /// Sort descending. Requires a prior [`sort_by`](Self::sort_by).
    pub fn desc(&mut self) -> &mut Self {
        self.order(SortOrder::Desc)
    }

    /// Set the sort order from a [`SortOrder`] or its name (`"asc"`, `"desc"`).
    pub fn order<O>(&mut self, order: O) -> &mut Self
    where
        O: TryInto<SortOrder>,
        O::Error: Into<ValidationFailure>,
    {
        let outcome = if self.options.sort_field.is_none() {
            Err(ValidationFailure::SortFieldNotSelected)
        } else if self.options.sort_order.is_some() {
            Err(ValidationFailure::SortOrderRequestedTwice)
        } else {
            order.try_into().map_err(Into::into)
        };

        if let Some(order) = record(&mut self.failures, outcome) {
            self.options.sort_order = Some(order);
        }
        self
    }

    /// Options accumulated so far.
    pub fn options(&self) -> &PostsOptions {
        &self.options
    }

    /// Failures recorded so far, in call order.
    pub fn failures(&self) -> &[ValidationFailure] {
        &self.failures
    }

    /// The compiled tag-string.
    pub fn tag_string(&self) -> String {
        compile_tags(&self.options)
    }

    /// URL the JSON variant of this search would request.
    pub fn url(&self) -> Result<Url> {
        ensure_valid(&self.failures)?;
        self.client.url_for(self.params(true))
    }

    /// Execute the search and decode the JSON response.
    pub fn find(&self) -> Result<Vec<Post>> {
        ensure_valid(&self.failures)?;
        self.client.execute(self.params(true), &JsonDocument)
    }

    /// Execute the search and decode the XML response.
    pub fn find_xml(&self) -> Result<Vec<XmlPost>> {
        ensure_valid(&self.failures)?;
        self.client.execute(self.params(false), &XmlElements)
    }

    fn params(&self, json: bool) -> QueryParams {
        let mut params = QueryParams::for_selector("post");
        params
            .set_opt("id", self.options.post_id)
            .set_opt("limit", self.options.limit)
            .set_opt("pid", self.options.page)
            .set("tags", compile_tags(&self.options));
        if json {
            params.set("json", "1");
        }
        params
    }
}
