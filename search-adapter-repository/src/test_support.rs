//! Shared fixtures for unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use serde_json::{json, Value};
use tokio::sync::Mutex;

use crate::errors::{LoaderError, SearchError};
use crate::interfaces::{
    ModelLoader, SearchMetadata, SearchTransport, Searchable, StreamingModelLoader,
    TransportRequest,
};
use search_adapter_shared::{Document, DocumentId, IndexName, SearchResponse};

/// Test model stored in the `posts` index.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub metadata: Vec<(String, Value)>,
    omit_document_id: bool,
}

impl Post {
    pub fn new(id: u64, title: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            metadata: Vec::new(),
            omit_document_id: false,
        }
    }

    /// A post whose searchable document lacks the `id` field.
    pub fn without_document_id(id: u64, title: &str) -> Self {
        Self {
            omit_document_id: true,
            ..Self::new(id, title)
        }
    }

    pub fn metadata_value(&self, key: &str) -> Option<&Value> {
        self.metadata
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

impl Searchable for Post {
    fn index_name() -> IndexName {
        IndexName::new("posts")
    }

    fn search_key(&self) -> DocumentId {
        DocumentId::from(self.id)
    }

    fn to_searchable_document(&self) -> Document {
        let doc = Document::new().with("title", self.title.clone());
        if self.omit_document_id {
            doc
        } else {
            doc.with(Document::ID_FIELD, self.id)
        }
    }

    fn searchable_fields() -> Vec<String> {
        vec!["title".to_string(), "body".to_string()]
    }
}

impl SearchMetadata for Post {
    fn with_search_metadata(&mut self, key: &str, value: Value) {
        self.metadata.push((key.to_string(), value));
    }
}

/// A model relying on the default searchable fields.
#[derive(Debug, Clone)]
pub struct Tag {
    pub id: u64,
}

impl Searchable for Tag {
    fn index_name() -> IndexName {
        IndexName::new("tags")
    }

    fn search_key(&self) -> DocumentId {
        DocumentId::from(self.id)
    }

    fn to_searchable_document(&self) -> Document {
        Document::with_id(self.id)
    }
}

/// A model with an arbitrary string key, stored in the `keyed` index.
#[derive(Debug, Clone)]
pub struct Keyed {
    pub key: String,
}

impl Keyed {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
        }
    }
}

impl Searchable for Keyed {
    fn index_name() -> IndexName {
        IndexName::new("keyed")
    }

    fn search_key(&self) -> DocumentId {
        DocumentId::new(self.key.as_str())
    }

    fn to_searchable_document(&self) -> Document {
        Document::with_id(self.key.as_str())
    }
}

/// Build a response from `(hit _id, _source.id)` pairs.
pub fn hits_response(hits: &[(u64, u64)]) -> SearchResponse {
    let hits: Vec<Value> = hits
        .iter()
        .map(|(hit_id, source_id)| {
            json!({
                "_id": hit_id.to_string(),
                "_score": 1.0,
                "_source": { "id": source_id }
            })
        })
        .collect();

    SearchResponse::new(json!({
        "hits": {
            "total": { "value": hits.len() },
            "hits": hits
        }
    }))
}

/// Transport that records requests and replays queued responses.
///
/// When the queue is empty every request succeeds with `{}`.
pub struct MockTransport {
    requests: Mutex<Vec<TransportRequest>>,
    responses: Mutex<VecDeque<Result<Value, SearchError>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            responses: Mutex::new(VecDeque::new()),
        }
    }

    pub async fn push_response(&self, response: Result<Value, SearchError>) {
        self.responses.lock().await.push_back(response);
    }

    pub async fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl SearchTransport for MockTransport {
    async fn send(&self, request: &TransportRequest) -> Result<Value, SearchError> {
        self.requests.lock().await.push(request.clone());
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(json!({})))
    }
}

/// Batch loader over an in-memory store, returning matches in store order.
pub struct VecLoader {
    store: Vec<Post>,
    calls: Mutex<Vec<Vec<DocumentId>>>,
    failure: Option<String>,
}

impl VecLoader {
    pub fn new(store: Vec<Post>) -> Self {
        Self {
            store,
            calls: Mutex::new(Vec::new()),
            failure: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new(Vec::new())
        }
    }

    pub async fn calls(&self) -> Vec<Vec<DocumentId>> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl ModelLoader<Post> for VecLoader {
    async fn fetch_by_ids(&self, ids: &[DocumentId]) -> Result<Vec<Post>, LoaderError> {
        self.calls.lock().await.push(ids.to_vec());

        if let Some(message) = &self.failure {
            return Err(LoaderError::new(message.clone()));
        }

        Ok(self
            .store
            .iter()
            .filter(|post| ids.contains(&post.search_key()))
            .cloned()
            .collect())
    }
}

/// Streaming loader that yields its whole store regardless of the ids asked
/// for, optionally ending with an error.
pub struct StreamLoader {
    store: Vec<Post>,
    calls: AtomicUsize,
    trailing_error: Option<String>,
}

impl StreamLoader {
    pub fn new(store: Vec<Post>) -> Self {
        Self {
            store,
            calls: AtomicUsize::new(0),
            trailing_error: None,
        }
    }

    pub fn failing_after(store: Vec<Post>, message: &str) -> Self {
        Self {
            trailing_error: Some(message.to_string()),
            ..Self::new(store)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl StreamingModelLoader<Post> for StreamLoader {
    fn query_by_ids<'a>(&'a self, _ids: &'a [DocumentId]) -> BoxStream<'a, Result<Post, LoaderError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let mut items: Vec<Result<Post, LoaderError>> = self.store.iter().cloned().map(Ok).collect();
        if let Some(message) = &self.trailing_error {
            items.push(Err(LoaderError::new(message.clone())));
        }

        stream::iter(items).boxed()
    }
}
