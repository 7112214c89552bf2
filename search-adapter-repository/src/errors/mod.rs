//! Error types for the search adapter repository.

mod loader_error;
mod search_error;

pub use loader_error::LoaderError;
pub use search_error::SearchError;
