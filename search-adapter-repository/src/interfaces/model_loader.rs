//! Backing-store loader traits used to materialize search hits.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::errors::LoaderError;
use search_adapter_shared::DocumentId;

/// Loads models by id in a single batch.
///
/// Implementations should issue one "fetch where key in (...)" query for the
/// whole id set. The returned order does not matter; the adapter restores
/// relevance order itself. Ids with no matching model are simply absent.
#[async_trait]
pub trait ModelLoader<M>: Send + Sync
where
    M: Send,
{
    async fn fetch_by_ids(&self, ids: &[DocumentId]) -> Result<Vec<M>, LoaderError>;
}

/// Streams models by id, for result sets too large to load eagerly.
pub trait StreamingModelLoader<M>: Send + Sync {
    fn query_by_ids<'a>(&'a self, ids: &'a [DocumentId]) -> BoxStream<'a, Result<M, LoaderError>>;
}
