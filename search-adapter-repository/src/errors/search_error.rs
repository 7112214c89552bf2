//! Search error types.
//!
//! This module defines the error types that can occur while talking to the
//! remote search service or mapping its responses.

use thiserror::Error;

use super::LoaderError;

/// Errors that can occur during search adapter operations.
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    /// The request never produced a response (connection, DNS, timeout).
    #[error("Transport error: {0}")]
    TransportError(String),

    /// The service answered with a non-2xx status or an unreadable body.
    #[error("Remote service error (status {status}): {message}")]
    RemoteServiceError {
        status: u16,
        message: String,
        body: String,
    },

    /// Endpoint or client configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The caller broke an operation's contract (e.g. page 0).
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Failed to serialize a request body.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The backing store failed while materializing hits.
    #[error("Loader error: {0}")]
    LoaderError(String),

    /// Batch size exceeds configured maximum.
    #[error("Batch size {provided} exceeds maximum {max}")]
    BatchSizeExceeded { provided: usize, max: usize },
}

impl SearchError {
    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::TransportError(msg.into())
    }

    /// Create a remote service error for a non-2xx response.
    pub fn remote_status(status: u16, body: impl Into<String>) -> Self {
        Self::RemoteServiceError {
            status,
            message: "request failed".to_string(),
            body: body.into(),
        }
    }

    /// Create a remote service error for a 2xx response whose body could not be used.
    pub fn malformed_response(
        status: u16,
        reason: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self::RemoteServiceError {
            status,
            message: format!("malformed response: {}", reason.into()),
            body: body.into(),
        }
    }

    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    /// Create a batch size exceeded error.
    pub fn batch_size_exceeded(provided: usize, max: usize) -> Self {
        Self::BatchSizeExceeded { provided, max }
    }

    /// HTTP status attached to a remote service error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteServiceError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the failure is transient and the request may be sent again.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::TransportError(_) => true,
            Self::RemoteServiceError { status, .. } => matches!(status, 429 | 502 | 503 | 504),
            Self::ConfigurationError(_)
            | Self::ValidationError(_)
            | Self::SerializationError(_)
            | Self::LoaderError(_)
            | Self::BatchSizeExceeded { .. } => false,
        }
    }
}

impl From<LoaderError> for SearchError {
    fn from(err: LoaderError) -> Self {
        Self::LoaderError(err.message().to_string())
    }
}
