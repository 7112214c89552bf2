//! Search query bodies.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A query object sent under the `query` key of a `_search` request.
///
/// The adapter builds a `multi_match` query; callers may replace it with
/// any other JSON query through a transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query(Value);

impl Query {
    /// Build a `multi_match` query of `text` over `fields`.
    pub fn multi_match(text: &str, fields: &[String]) -> Self {
        Self(json!({
            "multi_match": {
                "query": text,
                "fields": fields,
            }
        }))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for Query {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
