//! Configuration constants and client settings.

use crate::error::{ClientError, Result};

/// Base URL of the dapi endpoint, including the fixed `page` and `q` selectors.
pub const DEFAULT_BASE_URL: &str = "https://api.rule34.xxx/index.php?page=dapi&q=index";

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 5;

/// User agent string identifying this client.
pub const USER_AGENT: &str = concat!("rule34-client/", env!("CARGO_PKG_VERSION"));

/// Tag excluded when AI-generated content is filtered out.
pub const AI_GENERATED_TAG: &str = "ai_generated";

/// Environment variable holding the account user id.
pub const ENV_USER_ID: &str = "RULE34_USER_ID";

/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "RULE34_API_KEY";

/// Environment variable overriding [`DEFAULT_BASE_URL`].
pub const ENV_BASE_URL: &str = "RULE34_BASE_URL";

/// Environment variable overriding [`HTTP_TIMEOUT_SECS`].
pub const ENV_TIMEOUT_SECS: &str = "RULE34_TIMEOUT_SECS";

/// Credentials and endpoint settings shared by every request of a client.
///
/// NOTE: `Debug` is implemented by hand so the API key never ends up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub user_id: String,
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("user_id", &self.user_id)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// `RULE34_USER_ID` and `RULE34_API_KEY` are required; the base URL and
    /// timeout fall back to their defaults. A timeout that is set but not a
    /// number is an error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let user_id = lookup(ENV_USER_ID)
            .ok_or_else(|| ClientError::Config(format!("{ENV_USER_ID} not set")))?;

        let api_key = lookup(ENV_API_KEY)
            .ok_or_else(|| ClientError::Config(format!("{ENV_API_KEY} not set")))?;

        let base_url = lookup(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.into());

        let timeout_secs = match lookup(ENV_TIMEOUT_SECS) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                ClientError::Config(format!("invalid {ENV_TIMEOUT_SECS} '{raw}': {e}"))
            })?,
            None => HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            user_id,
            api_key,
            base_url,
            timeout_secs,
        })
    }

    /// Create a config builder with default endpoint settings.
    pub fn builder(
        user_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> ClientConfigBuilder {
        ClientConfigBuilder {
            user_id: user_id.into(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.into(),
            timeout_secs: HTTP_TIMEOUT_SECS,
        }
    }
}

/// Builder for constructing a `ClientConfig`.
pub struct ClientConfigBuilder {
    user_id: String,
    api_key: String,
    base_url: String,
    timeout_secs: u64,
}

impl ClientConfigBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn build(self) -> ClientConfig {
        ClientConfig {
            user_id: self.user_id,
            api_key: self.api_key,
            base_url: self.base_url,
            timeout_secs: self.timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = ClientConfig::builder("42", "secret").build();
        assert_eq!(config.user_id, "42");
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, HTTP_TIMEOUT_SECS);
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::builder("42", "secret")
            .base_url("http://localhost:8080/index.php?page=dapi&q=index")
            .timeout_secs(30)
            .build();
        assert_eq!(
            config.base_url,
            "http://localhost:8080/index.php?page=dapi&q=index"
        );
        assert_eq!(config.timeout_secs, 30);
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config =
            ClientConfig::from_lookup(vars(&[(ENV_USER_ID, "42"), (ENV_API_KEY, "secret")]))
                .unwrap();
        assert_eq!(config, ClientConfig::builder("42", "secret").build());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = ClientConfig::from_lookup(vars(&[
            (ENV_USER_ID, "42"),
            (ENV_API_KEY, "secret"),
            (ENV_BASE_URL, "http://localhost:8080/index.php?page=dapi&q=index"),
            (ENV_TIMEOUT_SECS, "30"),
        ]))
        .unwrap();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(
            config.base_url,
            "http://localhost:8080/index.php?page=dapi&q=index"
        );
    }

    #[test]
    fn test_from_lookup_missing_credential() {
        let err = ClientConfig::from_lookup(vars(&[(ENV_USER_ID, "42")])).unwrap_err();
        assert!(matches!(&err, ClientError::Config(msg) if msg.contains(ENV_API_KEY)));
    }

    #[test]
    fn test_from_lookup_rejects_bad_timeout() {
        let err = ClientConfig::from_lookup(vars(&[
            (ENV_USER_ID, "42"),
            (ENV_API_KEY, "secret"),
            (ENV_TIMEOUT_SECS, "ten"),
        ]))
        .unwrap_err();
        assert!(matches!(
            &err,
            ClientError::Config(msg) if msg.contains("invalid RULE34_TIMEOUT_SECS 'ten'")
        ));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ClientConfig::builder("42", "very-secret-key").build();
        let debug = format!("{config:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("very-secret-key"));
    }
}
