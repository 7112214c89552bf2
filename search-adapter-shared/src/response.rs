//! Raw search responses and hit accessors.
//!
//! The remote service answers `_search` with a payload shaped like
//! `{"hits": {"total": {"value": N}, "hits": [{"_id": .., "_source": {..}}]}}`.
//! `SearchResponse` keeps that JSON untouched and offers read-only views over
//! it. Missing pieces read as empty or zero rather than as errors.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::DocumentId;

/// Key prefix marking per-hit metadata such as `_id`, `_score` or `_index`.
pub const METADATA_PREFIX: char = '_';

/// Raw JSON payload returned by a search request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchResponse(Value);

impl SearchResponse {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// A response with no hits and a total of zero.
    pub fn empty() -> Self {
        Self(json!({
            "hits": {
                "total": { "value": 0 },
                "hits": []
            }
        }))
    }

    /// The raw hit objects, in relevance order.
    pub fn raw_hits(&self) -> &[Value] {
        self.0
            .pointer("/hits/hits")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn hits(&self) -> impl Iterator<Item = SearchHit<'_>> {
        self.raw_hits().iter().map(SearchHit)
    }

    pub fn is_empty(&self) -> bool {
        self.raw_hits().is_empty()
    }

    /// The declared total, accepting both `{"value": N}` and a bare number.
    pub fn total(&self) -> Option<u64> {
        let total = self.0.pointer("/hits/total")?;
        total
            .get("value")
            .and_then(Value::as_u64)
            .or_else(|| total.as_u64())
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for SearchResponse {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Borrowed view over one hit of a `SearchResponse`.
#[derive(Debug, Clone, Copy)]
pub struct SearchHit<'a>(&'a Value);

impl<'a> SearchHit<'a> {
    /// The hit's `_id`.
    pub fn id(&self) -> Option<DocumentId> {
        self.0.get("_id").and_then(DocumentId::from_json)
    }

    /// The `id` field of the hit's `_source` document.
    pub fn source_id(&self) -> Option<DocumentId> {
        self.0.pointer("/_source/id").and_then(DocumentId::from_json)
    }

    pub fn source(&self) -> Option<&'a Value> {
        self.0.get("_source")
    }

    pub fn score(&self) -> Option<f64> {
        self.0.get("_score").and_then(Value::as_f64)
    }

    /// Every top-level field whose key starts with [`METADATA_PREFIX`].
    pub fn metadata(&self) -> impl Iterator<Item = (&'a str, &'a Value)> {
        self.0
            .as_object()
            .into_iter()
            .flat_map(|map| map.iter())
            .filter(|(key, _)| key.starts_with(METADATA_PREFIX))
            .map(|(key, value)| (key.as_str(), value))
    }
}
