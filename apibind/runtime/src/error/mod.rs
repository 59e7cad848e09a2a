//! Error types for catalog bindings.
//!
//! - [`CallError`] - Why a single invocation was rejected
//! - [`TransportError`] - Failures reported by a [`Transport`](crate::Transport)
//! - [`ConfigError`] - Invalid client or transport configuration

mod call_error;
mod config_error;
mod transport_error;

pub use call_error::CallError;
pub use config_error::ConfigError;
pub use transport_error::TransportError;
