//! Interface definitions for the search adapter.
//!
//! These traits are the seams between the adapter and its collaborators:
//! the HTTP transport that reaches the search service, the models being
//! indexed, and the backing store that turns hits back into models.

mod model_loader;
mod search_transport;
mod searchable;

pub use model_loader::{ModelLoader, StreamingModelLoader};
pub use search_transport::{validate_path_segment, HttpMethod, SearchTransport, TransportRequest};
pub use searchable::{SearchMetadata, Searchable};
