//! The API client and request execution.

use std::fmt;
use std::sync::Arc;

use url::Url;

use crate::comments::CommentsRequest;
use crate::config::ClientConfig;
use crate::decode::Decode;
use crate::error::Result;
use crate::http::{HttpTransport, Transport};
use crate::models::Post;
use crate::posts::PostsRequest;
use crate::query::{build_url, QueryParams};
use crate::tags::TagsRequest;

/// Client for the dapi endpoint.
///
/// Holds the account credentials and a shared transport. Cloning is cheap,
/// and a client can be used from several threads at once.
#[derive(Clone)]
pub struct Client {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a client for the default endpoint.
    pub fn new(user_id: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        Self::from_config(&ClientConfig::builder(user_id, api_key).build())
    }

    /// Create a client using the HTTP transport configured by `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.timeout_secs)?;
        Ok(Self::with_transport(config.clone(), Arc::new(transport)))
    }

    /// Create a client that sends requests through a custom transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Start a post search.
    pub fn posts(&self) -> PostsRequest<'_> {
        PostsRequest::new(self)
    }

    /// Start a comment listing.
    pub fn comments(&self) -> CommentsRequest<'_> {
        CommentsRequest::new(self)
    }

    /// Start a tag listing.
    pub fn tags(&self) -> TagsRequest<'_> {
        TagsRequest::new(self)
    }

    /// Fetch a single post by id, or `None` when it doesn't exist.
    pub fn get_post(&self, post_id: i64) -> Result<Option<Post>> {
        let posts = self.posts().post_id(post_id).find()?;
        Ok(posts.into_iter().next())
    }

    /// Build the request URL with the account credentials attached.
    pub(crate) fn url_for(&self, mut params: QueryParams) -> Result<Url> {
        params
            .set("user_id", self.config.user_id.as_str())
            .set("api_key", self.config.api_key.as_str());
        Ok(build_url(&self.config.base_url, &params)?)
    }

    /// Send a request and decode the response with `decoder`.
    pub(crate) fn execute<T, D>(&self, params: QueryParams, decoder: &D) -> Result<Vec<T>>
    where
        D: Decode<T>,
    {
        let selector = params.get("s").unwrap_or_default().to_string();
        tracing::debug!(
            selector = %selector,
            tags = params.get("tags").unwrap_or_default(),
            "Sending request"
        );

        let url = self.url_for(params)?;
        let body = self.transport.get(url.as_str()).map_err(|e| {
            tracing::warn!(selector = %selector, error = %e, "Request failed");
            e
        })?;

        let records = decoder.decode(&body)?;
        tracing::debug!(selector = %selector, count = records.len(), "Decoded response");
        Ok(records)
    }
}
