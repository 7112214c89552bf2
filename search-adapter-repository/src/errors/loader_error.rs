//! Errors raised by backing-store loaders.

use thiserror::Error;

/// A failure reported by a `ModelLoader` or `StreamingModelLoader`.
///
/// Loaders wrap their store's own error (database driver, cache, ...) into
/// this type so the adapter does not depend on any particular store.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct LoaderError {
    message: String,
}

impl LoaderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
