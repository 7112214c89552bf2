//! Mapping of raw search responses back to ids and models.
//!
//! The backing store answers an id-set query in whatever order it likes.
//! Relevance order is rebuilt here from the position of each id in the hit
//! list.

use std::collections::HashMap;

use futures::StreamExt;
use tracing::debug;

use crate::errors::SearchError;
use crate::interfaces::{ModelLoader, SearchMetadata, Searchable, StreamingModelLoader};
use search_adapter_shared::{DocumentId, SearchHit, SearchResponse};

/// Hit `_id`s in relevance order. Hits without a usable `_id` are skipped.
pub fn map_ids(response: &SearchResponse) -> Vec<DocumentId> {
    response.hits().filter_map(|hit| hit.id()).collect()
}

/// The declared total hit count, or 0 when the response has none.
pub fn total_count(response: &SearchResponse) -> u64 {
    response.total().unwrap_or(0)
}

/// Position of the first occurrence of each id.
fn position_index(ids: &[DocumentId]) -> HashMap<&DocumentId, usize> {
    let mut positions = HashMap::with_capacity(ids.len());
    for (position, id) in ids.iter().enumerate() {
        positions.entry(id).or_insert(position);
    }
    positions
}

/// Resolve hits to models with one batch lookup.
///
/// Ids come from each hit's `_source.id`. Models are returned in hit order;
/// ids the store does not know are dropped. The loader is not called when
/// there is nothing to look up.
pub async fn materialize<M, L>(response: &SearchResponse, loader: &L) -> Result<Vec<M>, SearchError>
where
    M: Searchable + Send,
    L: ModelLoader<M> + ?Sized,
{
    let keys: Vec<DocumentId> = response.hits().filter_map(|hit| hit.source_id()).collect();
    if keys.is_empty() {
        return Ok(Vec::new());
    }

    let models = loader.fetch_by_ids(&keys).await?;
    let loaded = models.len();

    let mut by_key: HashMap<DocumentId, M> = models
        .into_iter()
        .map(|model| (model.search_key(), model))
        .collect();

    let ordered: Vec<M> = keys.iter().filter_map(|key| by_key.remove(key)).collect();

    debug!(
        hits = keys.len(),
        loaded = loaded,
        materialized = ordered.len(),
        "Materialized search hits"
    );

    Ok(ordered)
}

/// Resolve hits to models from a streaming source.
///
/// Ids come from each hit's `_id`. Streamed models whose key is not among
/// the hits are discarded. Each kept model receives every `_`-prefixed field
/// of its hit through `SearchMetadata`, and the result is returned in hit
/// order.
pub async fn materialize_lazy<M, L>(
    response: &SearchResponse,
    loader: &L,
) -> Result<Vec<M>, SearchError>
where
    M: Searchable + SearchMetadata,
    L: StreamingModelLoader<M> + ?Sized,
{
    if response.is_empty() {
        return Ok(Vec::new());
    }

    let ids = map_ids(response);
    let positions = position_index(&ids);

    let mut hits_by_id: HashMap<DocumentId, SearchHit<'_>> = HashMap::with_capacity(ids.len());
    for hit in response.hits() {
        if let Some(id) = hit.id() {
            hits_by_id.entry(id).or_insert(hit);
        }
    }

    let mut matched: Vec<(usize, M)> = Vec::new();
    let mut stream = loader.query_by_ids(&ids);

    while let Some(model) = stream.next().await {
        let mut model = model?;
        let key = model.search_key();

        let Some(&position) = positions.get(&key) else {
            continue;
        };

        if let Some(hit) = hits_by_id.get(&key) {
            for (field, value) in hit.metadata() {
                model.with_search_metadata(field, value.clone());
            }
        }

        matched.push((position, model));
    }

    matched.sort_by_key(|(position, _)| *position);

    Ok(matched.into_iter().map(|(_, model)| model).collect())
}
