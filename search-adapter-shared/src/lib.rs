//! # Search Adapter Shared
//!
//! Wire-level types shared by the search adapter crates: index names,
//! document identifiers, searchable documents, queries and raw search
//! responses.

mod document;
mod identifiers;
mod query;
mod response;

pub use document::Document;
pub use identifiers::{DocumentId, IndexName};
pub use query::Query;
pub use response::{SearchHit, SearchResponse, METADATA_PREFIX};
