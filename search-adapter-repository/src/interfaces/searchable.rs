//! Model capability traits.

use serde_json::Value;

use search_adapter_shared::{Document, DocumentId, IndexName};

/// A model that can be stored in the search index.
///
/// The index name and searchable fields are associated functions rather than
/// methods, so they are fixed per model type.
pub trait Searchable {
    /// The index this model type is stored in.
    fn index_name() -> IndexName
    where
        Self: Sized;

    /// The model's key, used as the document id in delete requests and to
    /// match models coming back from the backing store.
    fn search_key(&self) -> DocumentId;

    /// The JSON document sent to the search service.
    ///
    /// The document must contain an `id` field; hits are resolved back to
    /// models through `_source.id`.
    fn to_searchable_document(&self) -> Document;

    /// Fields queried by a `multi_match` search over this model.
    fn searchable_fields() -> Vec<String>
    where
        Self: Sized,
    {
        vec![Document::ID_FIELD.to_string()]
    }
}

/// A model that can carry per-hit metadata (`_score`, `_id`, ...) after lazy
/// materialization.
pub trait SearchMetadata {
    fn with_search_metadata(&mut self, key: &str, value: Value);
}
