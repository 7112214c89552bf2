//! Named search engines.
//!
//! Application code asks for an adapter by engine name instead of building
//! one itself. The registry is an ordinary value built once at startup and
//! handed to whoever needs it.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::AppError;
use search_adapter_repository::SearchAdapter;

/// Builds an adapter for one engine.
pub type EngineFactory = Arc<dyn Fn() -> Result<Arc<SearchAdapter>, AppError> + Send + Sync>;

/// Map from engine name to the factory that builds its adapter.
#[derive(Clone, Default)]
pub struct EngineRegistry {
    engines: BTreeMap<String, EngineFactory>,
}

impl EngineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` under `name`, replacing any earlier registration.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Result<Arc<SearchAdapter>, AppError> + Send + Sync + 'static,
    {
        let name = name.into();
        debug!(engine = %name, "Registered search engine");
        self.engines.insert(name, Arc::new(factory));
    }

    /// Build the adapter registered under `name`.
    pub fn resolve(&self, name: &str) -> Result<Arc<SearchAdapter>, AppError> {
        let factory = self
            .engines
            .get(name)
            .ok_or_else(|| AppError::UnknownEngine(name.to_string()))?;
        factory()
    }

    /// Registered engine names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.engines.keys().map(String::as_str).collect()
    }
}
