//! Comment listing requests.

use url::Url;

use crate::client::Client;
use crate::decode::XmlElements;
use crate::error::{Result, ValidationFailure};
use crate::models::Comment;
use crate::query::QueryParams;
use crate::request::{ensure_valid, positive, record};

/// Builder for listing comments, optionally restricted to one post.
#[derive(Debug)]
pub struct CommentsRequest<'a> {
    client: &'a Client,
    post_id: Option<u64>,
    failures: Vec<ValidationFailure>,
}

impl<'a> CommentsRequest<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self {
            client,
            post_id: None,
            failures: Vec::new(),
        }
    }

    /// Only list comments on the given post.
    pub fn post_id(&mut self, post_id: i64) -> &mut Self {
        let outcome = positive(post_id, ValidationFailure::NonPositivePostId);
        if let Some(id) = record(&mut self.failures, outcome) {
            self.post_id = Some(id);
        }
        self
    }

    pub fn failures(&self) -> &[ValidationFailure] {
        &self.failures
    }

    pub fn url(&self) -> Result<Url> {
        ensure_valid(&self.failures)?;
        self.client.url_for(self.params())
    }

    /// Execute the request and decode the `<comment>` elements.
    pub fn find(&self) -> Result<Vec<Comment>> {
        ensure_valid(&self.failures)?;
        self.client.execute(self.params(), &XmlElements)
    }

    fn params(&self) -> QueryParams {
        let mut params = QueryParams::for_selector("comment");
        params.set_opt("post_id", self.post_id);
        params
    }
}
