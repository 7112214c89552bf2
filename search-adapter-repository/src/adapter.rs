//! Search adapter implementation.
//!
//! This module provides the main entry point for application code: it turns
//! model indexing, removal, searching and index administration into requests
//! against the remote search service, and maps responses back.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};

use crate::builder::SearchBuilder;
use crate::config::AdapterConfig;
use crate::errors::SearchError;
use crate::interfaces::{
    validate_path_segment, HttpMethod, ModelLoader, SearchMetadata, SearchTransport, Searchable, StreamingModelLoader,
    TransportRequest,
};
use crate::mapping;
use crate::types::BatchOperationSummary;
use search_adapter_shared::{DocumentId, IndexName, SearchResponse};

const INDEXES: &str = "indexes";
const DOCUMENTS: &str = "documents";
const SEARCH: &str = "_search";

/// The main adapter between models and the remote search service.
pub struct SearchAdapter {
    transport: Arc<dyn SearchTransport>,
    config: AdapterConfig,
}

impl SearchAdapter {
    /// Create a new SearchAdapter with default configuration.
    pub fn new(transport: Arc<dyn SearchTransport>) -> Self {
        Self {
            transport,
            config: AdapterConfig::default(),
        }
    }

    /// Create a new SearchAdapter with custom configuration.
    pub fn with_config(transport: Arc<dyn SearchTransport>, config: AdapterConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Check if batch size exceeds the configured limit.
    fn validate_batch_size(&self, size: usize) -> Result<(), SearchError> {
        if let Some(max) = self.config.max_batch_size {
            if size > max {
                return Err(SearchError::batch_size_exceeded(size, max));
            }
        }
        Ok(())
    }

    fn validate_index(index: &IndexName) -> Result<(), SearchError> {
        if index.is_empty() {
            return Err(SearchError::validation("index name is required"));
        }
        validate_path_segment(index.as_str())
    }

    /// Send a request, retrying transient failures per the retry policy.
    async fn send(&self, request: TransportRequest) -> Result<Value, SearchError> {
        let policy = &self.config.retry;
        let mut attempt = 0;

        loop {
            match self.transport.send(&request).await {
                Ok(body) => {
                    if attempt > 0 {
                        info!(
                            attempt = attempt,
                            path = %request.path(),
                            "Request succeeded after retry"
                        );
                    }
                    return Ok(body);
                }
                Err(e) if e.is_retryable() && attempt < policy.max_retries => {
                    let delay = policy.delay_for(attempt);
                    attempt += 1;
                    warn!(
                        attempt = attempt,
                        max_retries = policy.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        path = %request.path(),
                        error = %e,
                        "Request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Index (upsert) the given models.
    ///
    /// One request is sent per model, in order. This is best effort and not
    /// atomic: a failure is recorded in the summary and the remaining models
    /// are still sent. Models whose document has no `id` field are reported
    /// as failed without being sent.
    #[instrument(skip_all, fields(count = models.len()))]
    pub async fn index<M>(&self, models: &[M]) -> Result<BatchOperationSummary, SearchError>
    where
        M: Searchable + Sync,
    {
        if models.is_empty() {
            return Ok(BatchOperationSummary::empty());
        }

        self.validate_batch_size(models.len())?;
        let index = M::index_name();
        Self::validate_index(&index)?;

        let mut summary = BatchOperationSummary::empty();
        for model in models {
            let document_id = model.search_key();
            let document = model.to_searchable_document();

            let outcome = if document.id().is_none() {
                Err(SearchError::validation(format!(
                    "document for {} has no `id` field",
                    document_id
                )))
            } else {
                let request =
                    TransportRequest::new(HttpMethod::Post, Self::documents_path(&index))
                        .with_body(document.into_value());
                self.send(request).await.map(|_| ())
            };

            if let Err(e) = &outcome {
                warn!(index = %index, document_id = %document_id, error = %e, "Failed to index document");
            }
            summary.record(document_id, outcome);
        }

        info!(
            index = %index,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Indexed documents"
        );
        Ok(summary)
    }

    /// Remove the given models from their index.
    ///
    /// One delete request per model; same non-atomic, per-item reporting as
    /// [`SearchAdapter::index`]. Models whose key is empty, `.` or `..` are
    /// reported as failed without being sent.
    #[instrument(skip_all, fields(count = models.len()))]
    pub async fn remove<M>(&self, models: &[M]) -> Result<BatchOperationSummary, SearchError>
    where
        M: Searchable + Sync,
    {
        if models.is_empty() {
            return Ok(BatchOperationSummary::empty());
        }

        self.validate_batch_size(models.len())?;
        let index = M::index_name();
        Self::validate_index(&index)?;

        let mut summary = BatchOperationSummary::empty();
        for model in models {
            let document_id = model.search_key();

            let outcome = match validate_path_segment(document_id.as_str()) {
                Ok(()) => {
                    let request = TransportRequest::new(
                        HttpMethod::Delete,
                        Self::document_path(&index, &document_id),
                    );
                    self.send(request).await.map(|_| ())
                }
                Err(e) => Err(e),
            };
            if let Err(e) = &outcome {
                warn!(index = %index, document_id = %document_id, error = %e, "Failed to delete document");
            }
            summary.record(document_id, outcome);
        }

        info!(
            index = %index,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Removed documents"
        );
        Ok(summary)
    }

    /// Run a search and return the raw response.
    #[instrument(skip(self, builder), fields(index = %builder.index()))]
    pub async fn search(&self, builder: &SearchBuilder) -> Result<SearchResponse, SearchError> {
        Self::validate_index(builder.index())?;
        self.run_search(builder.index(), builder.search_body()).await
    }

    /// Run one page of a search. Pages are 1-based; page 0 is rejected.
    #[instrument(skip(self, builder), fields(index = %builder.index()))]
    pub async fn paginate(
        &self,
        builder: &SearchBuilder,
        per_page: u32,
        page: u32,
    ) -> Result<SearchResponse, SearchError> {
        Self::validate_index(builder.index())?;
        let body = builder.paginated_body(per_page, page)?;
        self.run_search(builder.index(), body).await
    }

    async fn run_search(&self, index: &IndexName, body: Value) -> Result<SearchResponse, SearchError> {
        let request = TransportRequest::new(HttpMethod::Post, [INDEXES, index.as_str(), SEARCH])
            .with_body(body);

        let value = self.send(request).await?;
        if !value.is_object() {
            return Err(SearchError::malformed_response(
                200,
                "expected a JSON object",
                value.to_string(),
            ));
        }

        let response = SearchResponse::new(value);
        debug!(
            hits = response.raw_hits().len(),
            total = mapping::total_count(&response),
            "Search completed"
        );
        Ok(response)
    }

    /// Hit ids of a response, in relevance order.
    pub fn map_ids(&self, response: &SearchResponse) -> Vec<DocumentId> {
        mapping::map_ids(response)
    }

    /// Resolve hits to models with one batch lookup, in hit order.
    pub async fn materialize<M, L>(
        &self,
        response: &SearchResponse,
        loader: &L,
    ) -> Result<Vec<M>, SearchError>
    where
        M: Searchable + Send,
        L: ModelLoader<M> + ?Sized,
    {
        mapping::materialize(response, loader).await
    }

    /// Resolve hits to models from a streaming source, attaching hit metadata.
    pub async fn materialize_lazy<M, L>(
        &self,
        response: &SearchResponse,
        loader: &L,
    ) -> Result<Vec<M>, SearchError>
    where
        M: Searchable + SearchMetadata,
        L: StreamingModelLoader<M> + ?Sized,
    {
        mapping::materialize_lazy(response, loader).await
    }

    /// Declared total of a response, 0 when absent.
    pub fn total_count(&self, response: &SearchResponse) -> u64 {
        mapping::total_count(response)
    }

    /// Delete every document in an index, keeping the index itself.
    #[instrument(skip(self))]
    pub async fn flush(&self, index: &IndexName) -> Result<(), SearchError> {
        Self::validate_index(index)?;
        self.send(TransportRequest::new(HttpMethod::Delete, Self::documents_path(index)))
            .await?;
        info!(index = %index, "Flushed index");
        Ok(())
    }

    /// Delete every document in a model's index.
    pub async fn flush_model<M: Searchable>(&self) -> Result<(), SearchError> {
        self.flush(&M::index_name()).await
    }

    /// Create an index with the given settings.
    #[instrument(skip(self, options))]
    pub async fn create_index(
        &self,
        name: &IndexName,
        options: Map<String, Value>,
    ) -> Result<(), SearchError> {
        Self::validate_index(name)?;
        let request = TransportRequest::new(HttpMethod::Put, [INDEXES, name.as_str()])
            .with_body(Value::Object(options));
        self.send(request).await?;
        info!(index = %name, "Created index");
        Ok(())
    }

    /// Delete an index and all its documents.
    #[instrument(skip(self))]
    pub async fn delete_index(&self, name: &IndexName) -> Result<(), SearchError> {
        Self::validate_index(name)?;
        self.send(TransportRequest::new(HttpMethod::Delete, [INDEXES, name.as_str()]))
            .await?;
        info!(index = %name, "Deleted index");
        Ok(())
    }

    fn documents_path(index: &IndexName) -> [&str; 3] {
        [INDEXES, index.as_str(), DOCUMENTS]
    }

    fn document_path<'a>(index: &'a IndexName, id: &'a DocumentId) -> [&'a str; 4] {
        [INDEXES, index.as_str(), DOCUMENTS, id.as_str()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetryPolicy;
    use crate::test_support::{Keyed, MockTransport, Post, StreamLoader, Tag, VecLoader};
    use serde_json::json;

    fn adapter(transport: &Arc<MockTransport>) -> SearchAdapter {
        SearchAdapter::new(transport.clone())
    }

    #[tokio::test]
    async fn test_index_posts_each_document() {
        let transport = Arc::new(MockTransport::new());
        let adapter = adapter(&transport);

        let summary = adapter
            .index(&[Post::new(1, "first"), Post::new(2, "second")])
            .await
            .unwrap();

        assert_eq!(summary.total, 2);
        assert_eq!(summary.succeeded, 2);

        let requests = transport.requests().await;
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert_eq!(requests[0].path(), "/indexes/posts/documents");
        assert_eq!(requests[0].body, Some(json!({"id": 1, "title": "first"})));
        assert_eq!(requests[1].body, Some(json!({"id": 2, "title": "second"})));
    }

    #[tokio::test]
    async fn test_index_empty_sends_nothing() {
        let transport = Arc::new(MockTransport::new());
        let adapter = adapter(&transport);

        let summary = adapter.index::<Post>(&[]).await.unwrap();

        assert_eq!(summary.total, 0);
        assert!(summary.results.is_empty());
        assert!(transport.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_index_continues_after_failure() {
        let transport = Arc::new(MockTransport::new());
        transport.push_response(Ok(json!({}))).await;
        transport
            .push_response(Err(SearchError::remote_status(400, "bad document")))
            .await;
        transport.push_response(Ok(json!({}))).await;
        let adapter = adapter(&transport);

        let summary = adapter
            .index(&[Post::new(1, "a"), Post::new(2, "b"), Post::new(3, "c")])
            .await
            .unwrap();

        assert_eq!(summary.total, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert!(!summary.results[1].success);
        assert_eq!(summary.results[1].document_id, DocumentId::from(2u64));
        assert_eq!(summary.results[1].error.as_ref().unwrap().status(), Some(400));
        assert_eq!(transport.requests().await.len(), 3);
    }

    #[tokio::test]
    async fn test_index_rejects_document_without_id() {
        let transport = Arc::new(MockTransport::new());
        let adapter = adapter(&transport);

        let summary = adapter
            .index(&[Post::without_document_id(1, "a"), Post::new(2, "b")])
            .await
            .unwrap();

        assert_eq!(summary.failed, 1);
        assert!(matches!(
            summary.results[0].error,
            Some(SearchError::ValidationError(_))
        ));
        assert_eq!(transport.requests().await.len(), 1);
    }

    #[tokio::test]
    async fn test_index_batch_size_exceeded() {
        let transport = Arc::new(MockTransport::new());
        let adapter =
            SearchAdapter::with_config(transport.clone(), AdapterConfig::with_max_batch_size(2));

        let posts: Vec<Post> = (0..3).map(|i| Post::new(i, "p")).collect();
        let result = adapter.index(&posts).await;

        assert!(matches!(
            result,
            Err(SearchError::BatchSizeExceeded {
                provided: 3,
                max: 2
            })
        ));
        assert!(transport.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_index_unlimited_batch() {
        let transport = Arc::new(MockTransport::new());
        let adapter = SearchAdapter::with_config(transport.clone(), AdapterConfig::unlimited());

        let posts: Vec<Post> = (0..1500).map(|i| Post::new(i, "p")).collect();
        let summary = adapter.index(&posts).await.unwrap();

        assert_eq!(summary.succeeded, 1500);
    }

    #[tokio::test]
    async fn test_remove_deletes_by_key() {
        let transport = Arc::new(MockTransport::new());
        transport
            .push_response(Err(SearchError::transport("connection reset")))
            .await;
        let adapter = adapter(&transport);

        let summary = adapter
            .remove(&[Post::new(7, "a"), Post::new(8, "b")])
            .await
            .unwrap();

        assert_eq!(summary.failed, 1);
        assert_eq!(summary.succeeded, 1);
        assert!(matches!(
            summary.results[0].error,
            Some(SearchError::TransportError(_))
        ));

        let requests = transport.requests().await;
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, HttpMethod::Delete);
        assert_eq!(requests[0].path(), "/indexes/posts/documents/7");
        assert_eq!(requests[1].path(), "/indexes/posts/documents/8");
        assert!(requests[0].body.is_none());
    }

    #[tokio::test]
    async fn test_remove_rejects_dot_and_empty_keys() {
        let transport = Arc::new(MockTransport::new());
        let adapter = adapter(&transport);

        let keys = vec![
            Keyed::new(".."),
            Keyed::new("."),
            Keyed::new(""),
            Keyed::new("a.b"),
        ];
        let summary = adapter.remove(&keys).await.unwrap();

        assert_eq!(summary.failed, 3);
        assert_eq!(summary.succeeded, 1);
        for result in &summary.results[..3] {
            assert!(matches!(result.error, Some(SearchError::ValidationError(_))));
        }

        let requests = transport.requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path(), "/indexes/keyed/documents/a.b");
    }

    #[tokio::test]
    async fn test_dot_index_names_are_rejected() {
        let transport = Arc::new(MockTransport::new());
        let adapter = adapter(&transport);

        for name in ["..", "."] {
            let name = IndexName::new(name);
            assert!(matches!(
                adapter.delete_index(&name).await,
                Err(SearchError::ValidationError(_))
            ));
            assert!(matches!(
                adapter.flush(&name).await,
                Err(SearchError::ValidationError(_))
            ));
            assert!(matches!(
                adapter.search(&SearchBuilder::new(name.clone(), "q")).await,
                Err(SearchError::ValidationError(_))
            ));
        }

        assert!(transport.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_search_request_body() {
        let transport = Arc::new(MockTransport::new());
        transport
            .push_response(Ok(json!({"hits": {"total": {"value": 1}, "hits": []}})))
            .await;
        let adapter = adapter(&transport);

        let response = adapter
            .search(&SearchBuilder::for_model::<Post>("rust"))
            .await
            .unwrap();
        assert_eq!(adapter.total_count(&response), 1);

        let requests = transport.requests().await;
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert_eq!(requests[0].path(), "/indexes/posts/_search");
        assert_eq!(
            requests[0].body,
            Some(json!({"query": {"multi_match": {"query": "rust", "fields": ["title", "body"]}}}))
        );
    }

    #[tokio::test]
    async fn test_search_default_fields() {
        let transport = Arc::new(MockTransport::new());
        let adapter = adapter(&transport);

        adapter
            .search(&SearchBuilder::for_model::<Tag>("42"))
            .await
            .unwrap();

        let requests = transport.requests().await;
        assert_eq!(requests[0].path(), "/indexes/tags/_search");
        assert_eq!(
            requests[0].body.as_ref().unwrap()["query"]["multi_match"]["fields"],
            json!(["id"])
        );
    }

    #[tokio::test]
    async fn test_search_rejects_non_object_response() {
        let transport = Arc::new(MockTransport::new());
        transport.push_response(Ok(Value::Null)).await;
        let adapter = adapter(&transport);

        let err = adapter
            .search(&SearchBuilder::new("posts", "rust"))
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::RemoteServiceError { .. }));
    }

    #[tokio::test]
    async fn test_search_surfaces_remote_error() {
        let transport = Arc::new(MockTransport::new());
        transport
            .push_response(Err(SearchError::remote_status(500, "{\"error\":\"shard failure\"}")))
            .await;
        let adapter = adapter(&transport);

        let err = adapter
            .search(&SearchBuilder::new("posts", "rust"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_search_rejects_empty_index() {
        let transport = Arc::new(MockTransport::new());
        let adapter = adapter(&transport);

        let err = adapter
            .search(&SearchBuilder::new("", "rust"))
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::ValidationError(_)));
        assert!(transport.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_paginate_sends_from_and_size() {
        let transport = Arc::new(MockTransport::new());
        let adapter = adapter(&transport);

        adapter
            .paginate(&SearchBuilder::for_model::<Post>("rust"), 10, 2)
            .await
            .unwrap();

        let requests = transport.requests().await;
        let body = requests[0].body.as_ref().unwrap();
        assert_eq!(requests[0].path(), "/indexes/posts/_search");
        assert_eq!(body["from"], 10);
        assert_eq!(body["size"], 10);
        assert_eq!(body["query"]["multi_match"]["query"], "rust");
    }

    #[tokio::test]
    async fn test_paginate_page_zero_sends_nothing() {
        let transport = Arc::new(MockTransport::new());
        let adapter = adapter(&transport);

        let err = adapter
            .paginate(&SearchBuilder::for_model::<Post>("rust"), 10, 0)
            .await
            .unwrap_err();

        assert!(matches!(err, SearchError::ValidationError(_)));
        assert!(transport.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_identity_transform_sends_same_requests() {
        let transport = Arc::new(MockTransport::new());
        let adapter = adapter(&transport);
        let plain = SearchBuilder::for_model::<Post>("rust");
        let identity = plain.clone().transform(|query, _| query);

        adapter.search(&plain).await.unwrap();
        adapter.search(&identity).await.unwrap();
        adapter.paginate(&plain, 5, 3).await.unwrap();
        adapter.paginate(&identity, 5, 3).await.unwrap();

        let requests = transport.requests().await;
        assert_eq!(requests[0], requests[1]);
        assert_eq!(requests[2], requests[3]);
    }

    #[tokio::test]
    async fn test_transform_applies_to_paginate() {
        let transport = Arc::new(MockTransport::new());
        let adapter = adapter(&transport);
        let builder = SearchBuilder::for_model::<Post>("rust")
            .transform(|_, builder| json!({"match": {"title": builder.query_text()}}).into());

        adapter.paginate(&builder, 20, 1).await.unwrap();

        let requests = transport.requests().await;
        assert_eq!(
            requests[0].body,
            Some(json!({"from": 0, "size": 20, "query": {"match": {"title": "rust"}}}))
        );
    }

    #[tokio::test]
    async fn test_index_administration_requests() {
        let transport = Arc::new(MockTransport::new());
        let adapter = adapter(&transport);
        let name = IndexName::new("posts");

        let mut options = Map::new();
        options.insert("primaryKey".to_string(), json!("id"));

        adapter.create_index(&name, options).await.unwrap();
        adapter.flush(&name).await.unwrap();
        adapter.flush_model::<Tag>().await.unwrap();
        adapter.delete_index(&name).await.unwrap();

        let requests = transport.requests().await;
        assert_eq!(requests[0].method, HttpMethod::Put);
        assert_eq!(requests[0].path(), "/indexes/posts");
        assert_eq!(requests[0].body, Some(json!({"primaryKey": "id"})));

        assert_eq!(requests[1].method, HttpMethod::Delete);
        assert_eq!(requests[1].path(), "/indexes/posts/documents");

        assert_eq!(requests[2].path(), "/indexes/tags/documents");

        assert_eq!(requests[3].method, HttpMethod::Delete);
        assert_eq!(requests[3].path(), "/indexes/posts");
        assert!(requests[3].body.is_none());
    }

    #[tokio::test]
    async fn test_create_index_without_options_sends_empty_object() {
        let transport = Arc::new(MockTransport::new());
        let adapter = adapter(&transport);

        adapter
            .create_index(&IndexName::new("posts"), Map::new())
            .await
            .unwrap();

        assert_eq!(transport.requests().await[0].body, Some(json!({})));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_on_transient_error() {
        let transport = Arc::new(MockTransport::new());
        transport
            .push_response(Err(SearchError::remote_status(503, "unavailable")))
            .await;
        transport
            .push_response(Err(SearchError::transport("timed out")))
            .await;
        let adapter = SearchAdapter::with_config(
            transport.clone(),
            AdapterConfig::new().retry(RetryPolicy::with_max_retries(3)),
        );

        adapter.flush(&IndexName::new("posts")).await.unwrap();

        assert_eq!(transport.requests().await.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_gives_up_after_max_retries() {
        let transport = Arc::new(MockTransport::new());
        for _ in 0..3 {
            transport
                .push_response(Err(SearchError::remote_status(503, "unavailable")))
                .await;
        }
        let adapter = SearchAdapter::with_config(
            transport.clone(),
            AdapterConfig::new().retry(RetryPolicy::with_max_retries(2)),
        );

        let err = adapter.flush(&IndexName::new("posts")).await.unwrap_err();

        assert_eq!(err.status(), Some(503));
        assert_eq!(transport.requests().await.len(), 3);
    }

    #[tokio::test]
    async fn test_no_retry_by_default_or_on_client_errors() {
        let transport = Arc::new(MockTransport::new());
        transport
            .push_response(Err(SearchError::remote_status(503, "unavailable")))
            .await;
        let adapter = adapter(&transport);

        assert!(adapter.flush(&IndexName::new("posts")).await.is_err());
        assert_eq!(transport.requests().await.len(), 1);

        let transport = Arc::new(MockTransport::new());
        transport
            .push_response(Err(SearchError::remote_status(404, "no such index")))
            .await;
        let adapter = SearchAdapter::with_config(
            transport.clone(),
            AdapterConfig::new().retry(RetryPolicy::with_max_retries(3)),
        );

        assert!(adapter.flush(&IndexName::new("posts")).await.is_err());
        assert_eq!(transport.requests().await.len(), 1);
    }

    #[tokio::test]
    async fn test_index_search_materialize_end_to_end() {
        let transport = Arc::new(MockTransport::new());
        let adapter = adapter(&transport);
        let posts = vec![
            Post::new(1, "rust ownership"),
            Post::new(2, "gardening"),
            Post::new(3, "rust lifetimes"),
        ];

        let summary = adapter.index(&posts).await.unwrap();
        assert_eq!(summary.succeeded, 3);

        // The service ranks post 3 above post 1.
        transport
            .push_response(Ok(json!({
                "hits": {
                    "total": { "value": 2 },
                    "hits": [
                        { "_id": "3", "_score": 2.0, "_source": { "id": 3, "title": "rust lifetimes" } },
                        { "_id": "1", "_score": 1.0, "_source": { "id": 1, "title": "rust ownership" } }
                    ]
                }
            })))
            .await;

        let response = adapter
            .search(&SearchBuilder::for_model::<Post>("rust"))
            .await
            .unwrap();

        assert_eq!(adapter.total_count(&response), 2);
        assert_eq!(
            adapter.map_ids(&response),
            vec![DocumentId::new("3"), DocumentId::new("1")]
        );

        // The store returns rows in primary key order.
        let loader = VecLoader::new(posts.clone());
        let models: Vec<Post> = adapter.materialize(&response, &loader).await.unwrap();
        let ids: Vec<u64> = models.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1]);

        let lazy_loader = StreamLoader::new(posts);
        let lazy: Vec<Post> = adapter
            .materialize_lazy(&response, &lazy_loader)
            .await
            .unwrap();
        let ids: Vec<u64> = lazy.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(lazy[0].metadata_value("_score"), Some(&json!(2.0)));
    }
}
