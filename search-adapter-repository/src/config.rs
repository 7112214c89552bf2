//! Configuration types for the SearchAdapter.

use std::time::Duration;

/// Configuration for the SearchAdapter.
#[derive(Debug, Clone)]
pub struct AdapterConfig {
    /// Maximum number of models accepted by a single `index` or `remove` call.
    /// Set to None to disable the limit.
    pub max_batch_size: Option<usize>,
    /// Retry behaviour for requests sent to the search service.
    pub retry: RetryPolicy,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AdapterConfig {
    /// Default batch limit applied by [`AdapterConfig::new`].
    pub const DEFAULT_MAX_BATCH_SIZE: usize = 1000;

    /// Create a config with the default batch limit and retries disabled.
    pub fn new() -> Self {
        Self {
            max_batch_size: Some(Self::DEFAULT_MAX_BATCH_SIZE),
            retry: RetryPolicy::disabled(),
        }
    }

    /// Create a config with no batch size limit (use with caution).
    pub fn unlimited() -> Self {
        Self {
            max_batch_size: None,
            ..Self::new()
        }
    }

    /// Create a config with a custom batch size limit.
    pub fn with_max_batch_size(max_batch_size: usize) -> Self {
        Self {
            max_batch_size: Some(max_batch_size),
            ..Self::new()
        }
    }

    /// Replace the retry policy.
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// Retry policy for requests to the search service.
///
/// Every request the adapter sends is idempotent (document upsert, delete by
/// id, search, index PUT/DELETE), so any of them may be retried. Only errors
/// reported as retryable by `SearchError::is_retryable` are retried.
/// Retries are off unless `max_retries` is raised above zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts after the first try.
    pub max_retries: u32,
    /// Initial retry delay in milliseconds.
    pub initial_delay_ms: u64,
    /// Maximum retry delay in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::disabled()
    }
}

impl RetryPolicy {
    /// A policy that sends every request exactly once.
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            initial_delay_ms: 100,
            max_delay_ms: 5000,
        }
    }

    /// Retry up to `max_retries` times with the default backoff bounds.
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::disabled()
        }
    }

    /// Delay before retry number `attempt` (0-based), doubling up to the cap.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
        let delay_ms = self
            .initial_delay_ms
            .saturating_mul(factor)
            .min(self.max_delay_ms);
        Duration::from_millis(delay_ms)
    }
}
