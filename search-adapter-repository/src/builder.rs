//! Per-call search request construction.

use std::fmt;
use std::sync::Arc;

use serde_json::{json, Value};

use crate::errors::SearchError;
use crate::interfaces::Searchable;
use search_adapter_shared::{Document, IndexName, Query};

/// Caller-supplied rewrite of the generated query.
///
/// Receives the `multi_match` query and the builder that produced it, and
/// returns the query to send. It must be a pure function: the adapter may
/// call it once per request.
pub type QueryTransform = Arc<dyn Fn(Query, &SearchBuilder) -> Query + Send + Sync>;

/// Describes one search: target index, query text, fields and an optional
/// query transform.
///
/// # Example
///
/// ```ignore
/// let builder = SearchBuilder::for_model::<Post>("rust async")
///     .transform(|query, _| json!({"bool": {"must": [query.into_value()]}}).into());
/// let response = adapter.search(&builder).await?;
/// ```
#[derive(Clone)]
pub struct SearchBuilder {
    index: IndexName,
    query: String,
    fields: Vec<String>,
    transform: Option<QueryTransform>,
}

impl SearchBuilder {
    /// Search `index` for `query` over the default `id` field.
    pub fn new(index: impl Into<IndexName>, query: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            query: query.into(),
            fields: vec![Document::ID_FIELD.to_string()],
            transform: None,
        }
    }

    /// Search a model's index over the model's searchable fields.
    pub fn for_model<M: Searchable>(query: impl Into<String>) -> Self {
        Self {
            index: M::index_name(),
            query: query.into(),
            fields: M::searchable_fields(),
            transform: None,
        }
    }

    /// Replace the searched fields.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Install a query transform.
    pub fn transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(Query, &SearchBuilder) -> Query + Send + Sync + 'static,
    {
        self.transform = Some(Arc::new(transform));
        self
    }

    pub fn index(&self) -> &IndexName {
        &self.index
    }

    pub fn query_text(&self) -> &str {
        &self.query
    }

    pub fn search_fields(&self) -> &[String] {
        &self.fields
    }

    pub fn has_transform(&self) -> bool {
        self.transform.is_some()
    }

    /// The query to send: `multi_match` over the fields, passed through the
    /// transform if one is set.
    pub fn build_query(&self) -> Query {
        let query = Query::multi_match(&self.query, &self.fields);
        match &self.transform {
            Some(transform) => transform(query, self),
            None => query,
        }
    }

    /// Body of an unpaginated `_search` request.
    pub fn search_body(&self) -> Value {
        json!({ "query": self.build_query() })
    }

    /// Body of a paginated `_search` request. Pages are 1-based.
    pub fn paginated_body(&self, per_page: u32, page: u32) -> Result<Value, SearchError> {
        if page == 0 {
            return Err(SearchError::validation("page numbers start at 1"));
        }

        let from = u64::from(page - 1) * u64::from(per_page);
        Ok(json!({
            "from": from,
            "size": per_page,
            "query": self.build_query(),
        }))
    }
}

impl fmt::Debug for SearchBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchBuilder")
            .field("index", &self.index)
            .field("query", &self.query)
            .field("fields", &self.fields)
            .field("transform", &self.transform.is_some())
            .finish()
    }
}
