//! HTTP transport implementation.
//!
//! This module provides the concrete implementation of `SearchTransport`
//! using the reqwest client.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, Request};
use serde_json::Value;
use tracing::{debug, error, instrument};

use crate::errors::SearchError;
use crate::http::endpoint::ConfigSource;
use crate::interfaces::{HttpMethod, SearchTransport, TransportRequest};

/// Timeouts applied to every request.
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// Time allowed to establish a connection.
    pub connect_timeout: Duration,
    /// Time allowed for the whole request, from connect to the last body byte.
    pub request_timeout: Duration,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// reqwest-backed transport to the search service.
///
/// The endpoint and bearer token are read from the `ConfigSource` on every
/// request. Connection pooling is left to reqwest.
///
/// # Example
///
/// ```ignore
/// let source = Arc::new(EnvConfigSource::default());
/// let transport = HttpTransport::new(source)?;
/// let adapter = SearchAdapter::new(Arc::new(transport));
/// ```
pub struct HttpTransport {
    client: Client,
    config_source: Arc<dyn ConfigSource>,
}

impl HttpTransport {
    /// Create a transport with default timeouts.
    pub fn new(config_source: Arc<dyn ConfigSource>) -> Result<Self, SearchError> {
        Self::with_config(config_source, HttpTransportConfig::default())
    }

    /// Create a transport with custom timeouts.
    pub fn with_config(
        config_source: Arc<dyn ConfigSource>,
        config: HttpTransportConfig,
    ) -> Result<Self, SearchError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| SearchError::configuration(e.to_string()))?;

        debug!(
            connect_timeout_ms = config.connect_timeout.as_millis() as u64,
            request_timeout_ms = config.request_timeout.as_millis() as u64,
            "Created HTTP search transport"
        );

        Ok(Self {
            client,
            config_source,
        })
    }

    fn method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Build the outgoing request against the current endpoint configuration.
    fn build_request(&self, request: &TransportRequest) -> Result<Request, SearchError> {
        let endpoint = self.config_source.endpoint()?;
        let url = endpoint.url_for(&request.segments)?;

        let mut builder = self
            .client
            .request(Self::method(request.method), url)
            .header(ACCEPT, "application/json");

        if let Some(token) = endpoint.token.as_deref() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        builder
            .build()
            .map_err(|e| SearchError::serialization(e.to_string()))
    }

    /// Interpret a response status and body.
    fn parse_response(status: u16, body: &str) -> Result<Value, SearchError> {
        if !(200..300).contains(&status) {
            return Err(SearchError::remote_status(status, body));
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(body)
            .map_err(|e| SearchError::malformed_response(status, e.to_string(), body))
    }
}

#[async_trait]
impl SearchTransport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path()))]
    async fn send(&self, request: &TransportRequest) -> Result<Value, SearchError> {
        let http_request = self.build_request(request)?;

        let response = self.client.execute(http_request).await.map_err(|e| {
            error!(error = %e, "Search request failed to complete");
            SearchError::transport(e.to_string())
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| SearchError::transport(e.to_string()))?;

        let result = Self::parse_response(status, &body);
        match &result {
            Ok(_) => debug!(status = status, "Search request succeeded"),
            Err(e) => error!(status = status, body = %body, error = %e, "Search request rejected"),
        }
        result
    }
}
