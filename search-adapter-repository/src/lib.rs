//! # Search Adapter Repository
//!
//! This crate connects application models to a remote search service over
//! its REST API. It includes error types, the capability traits models and
//! stores implement, an HTTP transport, the `SearchAdapter` itself and the
//! mapping of raw hits back into ordered models.

pub mod adapter;
pub mod builder;
pub mod config;
pub mod errors;
pub mod http;
pub mod interfaces;
pub mod mapping;
pub mod types;

#[cfg(test)]
mod test_support;

pub use adapter::SearchAdapter;
pub use builder::{QueryTransform, SearchBuilder};
pub use config::{AdapterConfig, RetryPolicy};
pub use errors::{LoaderError, SearchError};
pub use http::{
    ConfigSource, EndpointConfig, EnvConfigSource, HttpTransport, HttpTransportConfig,
    StaticConfigSource,
};
pub use interfaces::{
    HttpMethod, ModelLoader, SearchMetadata, SearchTransport, Searchable, StreamingModelLoader,
    TransportRequest,
};
pub use types::{BatchOperationResult, BatchOperationSummary};
