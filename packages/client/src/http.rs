//! HTTP transport for talking to the dapi endpoint.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::USER_AGENT;
use crate::error::TransportError;

/// Fetches the raw body of a URL.
///
/// The client only ever needs a GET returning bytes, so this is the seam
/// where tests plug in canned payloads.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> Result<Vec<u8>, TransportError>;
}

/// Create a configured HTTP client.
///
/// # Arguments
/// * `timeout_secs` - Overall request timeout in seconds
///
/// # Returns
/// A `reqwest::blocking::Client` configured with the timeout and user agent.
pub fn create_client(timeout_secs: u64) -> Result<Client, TransportError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// [`Transport`] backed by a blocking `reqwest` client.
///
/// Requests are sent once. Non-success statuses become
/// [`TransportError::Status`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout_secs: u64) -> Result<Self, TransportError> {
        Ok(Self {
            client: create_client(timeout_secs)?,
        })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        // reqwest errors print the request URL, which carries the API key.
        let response = self.client.get(url).send().map_err(reqwest::Error::without_url)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                url: redact_api_key(url),
            });
        }

        let bytes = response.bytes().map_err(reqwest::Error::without_url)?;
        tracing::trace!(size = bytes.len(), "Received response body");
        Ok(bytes.to_vec())
    }
}

/// Replace the `api_key` query value so URLs can be shown in errors and logs.
pub(crate) fn redact_api_key(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(mut parsed) => {
            let pairs: Vec<(String, String)> = parsed
                .query_pairs()
                .into_owned()
                .map(|(k, v)| {
                    if k == "api_key" {
                        (k, "REDACTED".to_string())
                    } else {
                        (k, v)
                    }
                })
                .collect();
            if !pairs.is_empty() {
                parsed.query_pairs_mut().clear().extend_pairs(pairs);
            }
            parsed.to_string()
        }
        Err(_) => url.to_string(),
    }
}
