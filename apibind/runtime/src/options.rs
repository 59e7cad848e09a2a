//! Per-invocation call options.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::cache::{Cache, CacheOptions};

/// Control settings for one invocation, kept apart from the parameter values.
///
/// ## Examples
///
/// ```
/// use std::time::Duration;
/// use apibind_runtime::CallOptions;
///
/// let options = CallOptions::new()
///     .refresh(true)
///     .timeout(Duration::from_secs(5))
///     .extra_query("debug", "1");
///
/// assert!(options.refresh);
/// assert_eq!(options.extra_query.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// Skip the cache lookup and always hit the transport.
    pub refresh: bool,
    /// Timeout handed to the transport.
    pub timeout: Option<Duration>,
    /// Cache for this call, overriding the client-level cache.
    pub cache: Option<Arc<dyn Cache>>,
    /// Options forwarded to [`Cache::put`].
    pub cache_options: CacheOptions,
    /// Query pairs applied last; each key replaces every existing pair of the
    /// same name.
    pub extra_query: Vec<(String, Value)>,
}

impl CallOptions {
    /// Default options: use the cache if any, no timeout, no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces a transport call even when a cached entry exists.
    pub fn refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    /// Sets the transport timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Uses `cache` for this call.
    pub fn cache(mut self, cache: Arc<dyn Cache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Sets the options used when the result is stored.
    pub fn cache_options(mut self, options: CacheOptions) -> Self {
        self.cache_options = options;
        self
    }

    /// Adds an explicit query override.
    pub fn extra_query(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra_query.push((name.into(), value.into()));
        self
    }
}
