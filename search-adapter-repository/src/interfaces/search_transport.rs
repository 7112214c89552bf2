//! Search transport trait definition.
//!
//! The adapter never builds HTTP requests itself. It describes each call as a
//! `TransportRequest` and hands it to a `SearchTransport`, which owns the
//! endpoint, credentials and timeouts.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::SearchError;

/// HTTP verbs used by the search service API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// Reject path segments that a URL parser would collapse or drop.
///
/// Empty, `.` and `..` segments would shorten the path, turning a
/// single-document delete into a request on the parent collection.
pub fn validate_path_segment(segment: &str) -> Result<(), SearchError> {
    if segment.is_empty() || segment == "." || segment == ".." {
        return Err(SearchError::validation(format!(
            "invalid path segment {:?}",
            segment
        )));
    }
    Ok(())
}

/// A request to the search service, relative to the configured base URL.
///
/// The path is kept as unencoded segments; the transport percent-encodes
/// each segment when it builds the final URL.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub method: HttpMethod,
    pub segments: Vec<String>,
    pub body: Option<Value>,
}

impl TransportRequest {
    pub fn new<I, S>(method: HttpMethod, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            body: None,
        }
    }

    /// Attach a JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// The unencoded path, for logging and assertions.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

/// Abstract interface for sending requests to the search service.
///
/// Implementations must map failures onto the two remote error kinds:
///
/// * `SearchError::TransportError` when no response was received
///   (connection refused, DNS failure, timeout)
/// * `SearchError::RemoteServiceError` when the status is not 2xx or the
///   body is not valid JSON, with the status and raw body attached
///
/// A successful response with an empty body yields `Value::Null`.
#[async_trait]
pub trait SearchTransport: Send + Sync {
    /// Send one request and return the decoded JSON body.
    async fn send(&self, request: &TransportRequest) -> Result<Value, SearchError>;
}
