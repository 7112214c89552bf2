//! HTTP implementation of the search transport.
//!
//! This module provides `HttpTransport`, a `SearchTransport` backed by
//! `reqwest`, and the endpoint configuration it reads on every request.

mod client;
mod endpoint;

pub use client::{HttpTransport, HttpTransportConfig};
pub use endpoint::{
    ConfigSource, EndpointConfig, EnvConfigSource, StaticConfigSource, DEFAULT_TOKEN_VAR,
    DEFAULT_URL_VAR,
};
