//! apibind runtime.
//!
//! Turns an [`OperationCatalog`] into callable bindings: one
//! [`ClientBinding`] per operation, collected in an [`ApiClient`]. Each call
//! validates its arguments, composes the URL, consults an optional
//! [`Cache`], and delegates the HTTP exchange to an injected [`Transport`].
//! Results are delivered through a [`PendingCall`] future.
//!
//! ## Core Types
//!
//! - [`ApiClient`] - Binding set built from a catalog
//! - [`ClientBinding`] - The callable for one operation
//! - [`Args`] - Parameter values keyed by declared name
//! - [`CallOptions`] - Refresh, timeout, cache and query overrides
//! - [`PendingCall`] - Single-settlement result handle
//! - [`Transport`] / [`ReqwestTransport`] - HTTP collaborator
//! - [`Cache`] / [`MemoryCache`] - Response cache collaborator
//!
//! ## Examples
//!
//! ```
//! use std::sync::Arc;
//! use apibind_runtime::define::{HttpVerb, OperationCatalog, OperationDescriptor, ParameterDescriptor, Placement};
//! use apibind_runtime::{ApiClient, Args, CallError, CallOptions, ReqwestTransport};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = OperationCatalog::new("Rules API")
//!     .base_url("https://api.example.com/v1")
//!     .operation(OperationDescriptor::new(
//!         "getDemandPartnersByDpId",
//!         HttpVerb::Get,
//!         "/demand-partners/{dpId}",
//!         vec![ParameterDescriptor::new("dpId", Placement::Path)],
//!     ));
//!
//! let client = ApiClient::builder(catalog)
//!     .transport(Arc::new(ReqwestTransport::new()?))
//!     .build()?;
//!
//! // Missing path parameter: rejected locally, nothing is sent.
//! let err = client
//!     .call("getDemandPartnersByDpId", &Args::new(), CallOptions::new())
//!     .await
//!     .unwrap_err();
//! assert!(matches!(err, CallError::MissingParameter { .. }));
//! # Ok(())
//! # }
//! ```

pub mod args;
pub mod binding;
pub mod cache;
pub mod client;
pub mod error;
pub mod options;
pub mod pending;
pub mod transport;

pub use apibind_define as define;

pub use args::Args;
pub use binding::{ClientBinding, PreparedCall};
pub use cache::{Cache, CacheOptions, MemoryCache};
pub use client::{ApiClient, ApiClientBuilder};
pub use error::{CallError, ConfigError, TransportError};
pub use options::CallOptions;
pub use pending::{CallState, PendingCall};
pub use transport::{
    BoxFuture, ReqwestTransport, ReqwestTransportBuilder, RequestBody, Transport,
    TransportRequest, TransportResponse,
};
