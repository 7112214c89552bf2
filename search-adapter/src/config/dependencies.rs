//! Dependency initialization and wiring for the search adapter.

use std::env;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::registry::EngineRegistry;
use crate::AppError;
use search_adapter_repository::http::DEFAULT_URL_VAR;
use search_adapter_repository::{
    AdapterConfig, EnvConfigSource, HttpTransport, HttpTransportConfig, RetryPolicy, SearchAdapter,
};

/// Name of the engine backed by the REST transport.
pub const REST_ENGINE: &str = "rest";

const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_MAX_RETRIES: u32 = 0;

/// Settings read from the environment at startup.
///
/// The endpoint URL and token are not part of this: the transport reads them
/// on every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_retries: u32,
    pub engine: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            max_retries: DEFAULT_MAX_RETRIES,
            engine: REST_ENGINE.to_string(),
        }
    }
}

impl Settings {
    /// Read settings from process environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SEARCH_CONNECT_TIMEOUT_MS`: connect timeout (default: 5000)
    /// - `SEARCH_REQUEST_TIMEOUT_MS`: total request timeout (default: 30000)
    /// - `SEARCH_MAX_RETRIES`: retries for transient failures (default: 0)
    /// - `SEARCH_ENGINE`: registered engine to use (default: rest)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            connect_timeout_ms: parse_or(
                &lookup,
                "SEARCH_CONNECT_TIMEOUT_MS",
                defaults.connect_timeout_ms,
            )?,
            request_timeout_ms: parse_or(
                &lookup,
                "SEARCH_REQUEST_TIMEOUT_MS",
                defaults.request_timeout_ms,
            )?,
            max_retries: parse_or(&lookup, "SEARCH_MAX_RETRIES", defaults.max_retries)?,
            engine: lookup("SEARCH_ENGINE")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.engine),
        })
    }

    fn transport_config(&self) -> HttpTransportConfig {
        HttpTransportConfig {
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
        }
    }

    fn adapter_config(&self) -> AdapterConfig {
        AdapterConfig::new().retry(RetryPolicy::with_max_retries(self.max_retries))
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| AppError::config(format!("{} must be a non-negative integer, got {:?}", key, raw))),
        _ => Ok(default),
    }
}

/// Container for all initialized dependencies.
pub struct Dependencies {
    pub settings: Settings,
    pub registry: EngineRegistry,
}

impl Dependencies {
    /// Initialize all dependencies from `.env` and environment variables.
    pub fn new() -> Result<Self, AppError> {
        dotenv::dotenv().ok();

        let settings = Settings::from_env()?;
        if env::var(DEFAULT_URL_VAR).is_err() {
            warn!(
                var = DEFAULT_URL_VAR,
                "Search endpoint is not set; requests will fail until it is"
            );
        }

        Ok(Self::with_settings(settings))
    }

    /// Build the registry from explicit settings.
    pub fn with_settings(settings: Settings) -> Self {
        info!(
            engine = %settings.engine,
            connect_timeout_ms = settings.connect_timeout_ms,
            request_timeout_ms = settings.request_timeout_ms,
            max_retries = settings.max_retries,
            "Initializing dependencies"
        );

        let mut registry = EngineRegistry::new();

        let transport_config = settings.transport_config();
        let adapter_config = settings.adapter_config();
        registry.register(REST_ENGINE, move || {
            let transport = HttpTransport::with_config(
                Arc::new(EnvConfigSource::default()),
                transport_config.clone(),
            )?;
            Ok(Arc::new(SearchAdapter::with_config(
                Arc::new(transport),
                adapter_config.clone(),
            )))
        });

        Self { settings, registry }
    }

    /// The adapter for the configured engine.
    pub fn adapter(&self) -> Result<Arc<SearchAdapter>, AppError> {
        self.registry.resolve(&self.settings.engine)
    }
}
