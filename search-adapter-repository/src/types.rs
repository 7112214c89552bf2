//! Result types for per-model batch operations.

use crate::errors::SearchError;
use search_adapter_shared::DocumentId;

/// Result of a batch operation for a single model.
///
/// Indicates whether the request for one document succeeded and includes
/// the error if it failed.
#[derive(Debug, Clone)]
pub struct BatchOperationResult {
    /// The document the request was about.
    pub document_id: DocumentId,
    /// Whether the operation succeeded.
    pub success: bool,
    /// Error if the operation failed.
    pub error: Option<SearchError>,
}

/// Summary of a batch operation containing aggregate statistics and individual results.
///
/// `index` and `remove` send one request per model and keep going after a
/// failure. Nothing is rolled back, so callers inspect `results` to find the
/// models that still need attention.
#[derive(Debug, Clone, Default)]
pub struct BatchOperationSummary {
    /// Total number of models in the batch.
    pub total: usize,
    /// Number of successful operations.
    pub succeeded: usize,
    /// Number of failed operations.
    pub failed: usize,
    /// Individual results, in input order.
    pub results: Vec<BatchOperationResult>,
}

impl BatchOperationSummary {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Record the outcome for one document.
    pub fn record(&mut self, document_id: DocumentId, outcome: Result<(), SearchError>) {
        self.total += 1;
        match outcome {
            Ok(()) => {
                self.succeeded += 1;
                self.results.push(BatchOperationResult {
                    document_id,
                    success: true,
                    error: None,
                });
            }
            Err(e) => {
                self.failed += 1;
                self.results.push(BatchOperationResult {
                    document_id,
                    success: false,
                    error: Some(e),
                });
            }
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Results of the failed operations only.
    pub fn failures(&self) -> impl Iterator<Item = &BatchOperationResult> {
        self.results.iter().filter(|r| !r.success)
    }
}
