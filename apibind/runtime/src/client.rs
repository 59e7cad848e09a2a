//! The binding set for a whole catalog.
//!
//! [`ApiClient`] turns an [`OperationCatalog`] into one [`ClientBinding`]
//! per operation and dispatches calls by operation name.

use std::collections::HashMap;
use std::sync::Arc;

use apibind_define::OperationCatalog;
use apibind_define::validation::validate_catalog;
use tracing::debug;
use url::Url;

use crate::args::Args;
use crate::binding::ClientBinding;
use crate::cache::Cache;
use crate::error::{CallError, ConfigError};
use crate::options::CallOptions;
use crate::pending::PendingCall;
use crate::transport::{ReqwestTransport, Transport};

/// Builder for configuring an [`ApiClient`].
#[derive(Debug)]
pub struct ApiClientBuilder {
    catalog: OperationCatalog,
    base_url: Option<String>,
    transport: Option<Arc<dyn Transport>>,
    cache: Option<Arc<dyn Cache>>,
}

impl ApiClientBuilder {
    fn new(catalog: OperationCatalog) -> Self {
        Self {
            catalog,
            base_url: None,
            transport: None,
            cache: None,
        }
    }

    /// Overrides the catalog's default base address.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the transport. Defaults to a [`ReqwestTransport`].
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets the client-level cache used by calls that bring none.
    pub fn cache(mut self, cache: Arc<dyn Cache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Validates the catalog and creates the bindings.
    ///
    /// ## Errors
    ///
    /// Returns an error if:
    /// - No base address was configured and the catalog has none
    /// - The base address is not an absolute URL
    /// - The catalog is inconsistent (duplicate names, unresolved placeholders)
    /// - The default transport cannot be constructed
    pub fn build(self) -> Result<ApiClient, ConfigError> {
        let base_url = self
            .base_url
            .or_else(|| self.catalog.base_url.clone())
            .ok_or_else(|| ConfigError::MissingBaseUrl {
                title: self.catalog.title.clone(),
            })?;
        Url::parse(&base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base_url.clone(),
            message: e.to_string(),
        })?;
        let base_url: Arc<str> = Arc::from(base_url.trim_end_matches('/'));

        validate_catalog(&self.catalog)?;

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new()?),
        };

        let mut bindings = Vec::with_capacity(self.catalog.operations.len());
        let mut index = HashMap::with_capacity(self.catalog.operations.len());
        for op in &self.catalog.operations {
            index.insert(op.name.clone(), bindings.len());
            bindings.push(
                ClientBinding::new(op.clone(), Arc::clone(&base_url), Arc::clone(&transport))?
                    .with_cache(self.cache.clone()),
            );
        }

        debug!(
            api = %self.catalog.title,
            base_url = %base_url,
            operations = bindings.len(),
            "bindings generated"
        );

        Ok(ApiClient {
            catalog: Arc::new(self.catalog),
            base_url,
            bindings,
            index,
            cache: self.cache,
        })
    }
}

/// One binding per catalog operation, sharing a base address, transport and
/// optional cache.
///
/// ## Examples
///
/// ```no_run
/// use apibind_runtime::{ApiClient, Args, CallOptions};
/// use apibind_definitions::define_rules_api;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ApiClient::builder(define_rules_api()?).build()?;
///
/// let partner = client
///     .call("getDemandPartnersByDpId", &Args::new().with("dpId", "abc"), CallOptions::new())
///     .await?;
/// println!("{partner}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    catalog: Arc<OperationCatalog>,
    base_url: Arc<str>,
    bindings: Vec<ClientBinding>,
    index: HashMap<String, usize>,
    cache: Option<Arc<dyn Cache>>,
}

impl ApiClient {
    /// Creates a new builder for `catalog`.
    pub fn builder(catalog: OperationCatalog) -> ApiClientBuilder {
        ApiClientBuilder::new(catalog)
    }

    /// The catalog the bindings were generated from.
    pub fn catalog(&self) -> &OperationCatalog {
        &self.catalog
    }

    /// Base address every path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Bindings in catalog order.
    pub fn bindings(&self) -> &[ClientBinding] {
        &self.bindings
    }

    /// Looks up the binding for `operation`.
    pub fn binding(&self, operation: &str) -> Option<&ClientBinding> {
        self.index.get(operation).map(|&i| &self.bindings[i])
    }

    /// Replaces the client-level cache on every binding.
    pub fn with_cache(mut self, cache: Arc<dyn Cache>) -> Self {
        for binding in &mut self.bindings {
            *binding = binding.clone().with_cache(Some(Arc::clone(&cache)));
        }
        self.cache = Some(cache);
        self
    }

    /// Invokes `operation` by name.
    ///
    /// An unknown name yields an already-rejected call.
    pub fn call(&self, operation: &str, args: &Args, options: CallOptions) -> PendingCall {
        match self.binding(operation) {
            Some(binding) => binding.call(args, options),
            None => {
                debug!(operation, "unknown operation");
                PendingCall::rejected(
                    operation,
                    CallError::UnknownOperation(operation.to_string()),
                )
            }
        }
    }

    /// Removes the client-level cache entry stored under `key` (a composed
    /// URL, query string included).
    pub fn invalidate(&self, key: &str) {
        if let Some(cache) = &self.cache {
            debug!(key, "invalidating cache entry");
            cache.remove(key);
        }
    }
}
