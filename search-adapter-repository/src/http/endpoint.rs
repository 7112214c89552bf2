//! Endpoint configuration for the search service.

use std::env;

use url::Url;

use crate::errors::SearchError;
use crate::interfaces::validate_path_segment;

/// Default environment variable holding the service base URL.
pub const DEFAULT_URL_VAR: &str = "SEARCH_URL";

/// Default environment variable holding the bearer token.
pub const DEFAULT_TOKEN_VAR: &str = "SEARCH_TOKEN";

/// Where the search service lives and how to authenticate against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    pub base_url: Url,
    pub token: Option<String>,
}

impl EndpointConfig {
    /// Parse a base URL such as `http://localhost:7700` or
    /// `https://search.example.com/api/`.
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, SearchError> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|e| SearchError::configuration(format!("Invalid search URL: {}", e)))?;

        if base_url.cannot_be_a_base() {
            return Err(SearchError::configuration(format!(
                "Search URL cannot be used as a base: {}",
                base_url
            )));
        }

        Ok(Self {
            base_url,
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    /// Resolve path segments against the base URL.
    ///
    /// Any path prefix on the base URL is kept and each segment is
    /// percent-encoded, so index names and ids cannot escape their segment.
    /// Empty and dot segments are rejected.
    pub fn url_for(&self, segments: &[String]) -> Result<Url, SearchError> {
        for segment in segments {
            validate_path_segment(segment)?;
        }

        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                SearchError::configuration(format!(
                    "Search URL cannot be used as a base: {}",
                    self.base_url
                ))
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }
}

/// Supplies the endpoint configuration at request time.
///
/// The transport asks for the configuration on every request, so a source
/// backed by mutable settings takes effect on the next call without a
/// restart.
pub trait ConfigSource: Send + Sync {
    fn endpoint(&self) -> Result<EndpointConfig, SearchError>;
}

/// Reads the endpoint from environment variables on every call.
#[derive(Debug, Clone)]
pub struct EnvConfigSource {
    url_var: String,
    token_var: String,
}

impl Default for EnvConfigSource {
    fn default() -> Self {
        Self::new(DEFAULT_URL_VAR, DEFAULT_TOKEN_VAR)
    }
}

impl EnvConfigSource {
    pub fn new(url_var: impl Into<String>, token_var: impl Into<String>) -> Self {
        Self {
            url_var: url_var.into(),
            token_var: token_var.into(),
        }
    }
}

impl ConfigSource for EnvConfigSource {
    fn endpoint(&self) -> Result<EndpointConfig, SearchError> {
        let url = env::var(&self.url_var)
            .map_err(|_| SearchError::configuration(format!("{} is not set", self.url_var)))?;
        let token = env::var(&self.token_var).ok();

        EndpointConfig::new(&url, token)
    }
}

/// A fixed endpoint, for tests and for callers that manage settings themselves.
#[derive(Debug, Clone)]
pub struct StaticConfigSource {
    endpoint: EndpointConfig,
}

impl StaticConfigSource {
    pub fn new(endpoint: EndpointConfig) -> Self {
        Self { endpoint }
    }
}

impl ConfigSource for StaticConfigSource {
    fn endpoint(&self) -> Result<EndpointConfig, SearchError> {
        Ok(self.endpoint.clone())
    }
}
