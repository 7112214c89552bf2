//! # Search Adapter
//!
//! Composition layer for the search adapter.
//!
//! This crate wires the HTTP transport and `SearchAdapter` together from the
//! environment, keeps the named engine registry, and hosts the operator CLI.

pub mod config;
pub mod logging;
pub mod registry;
pub mod source;

pub use config::Dependencies;
pub use registry::{EngineFactory, EngineRegistry};
pub use source::{get_source, SourceMapper};

use thiserror::Error;

/// Errors that can occur while wiring or running the search adapter.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// No engine registered under the requested name.
    #[error("Unknown search engine: {0}")]
    UnknownEngine(String),

    /// Search error.
    #[error("Search error: {0}")]
    SearchError(#[from] search_adapter_repository::SearchError),

    /// JSON error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
