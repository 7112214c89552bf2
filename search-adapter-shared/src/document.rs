//! Searchable document representation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::DocumentId;

/// The searchable JSON representation of one model instance.
///
/// A document is always a JSON object. It must carry an `id` field so that
/// search hits can be resolved back to the model they came from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    /// Field holding the identifier used to round-trip hits to models.
    pub const ID_FIELD: &'static str = "id";

    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Create a document with the `id` field already set.
    pub fn with_id(id: impl Into<Value>) -> Self {
        Self::new().with(Self::ID_FIELD, id)
    }

    /// Set a field, returning the document for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The document's identifier, if it has a usable `id` field.
    pub fn id(&self) -> Option<DocumentId> {
        self.0.get(Self::ID_FIELD).and_then(DocumentId::from_json)
    }

    /// Build a document from an arbitrary JSON value.
    ///
    /// Returns `None` when the value is not an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Document {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
