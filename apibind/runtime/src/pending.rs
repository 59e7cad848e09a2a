//! The per-invocation result handle.
//!
//! A [`PendingCall`] settles exactly once. Calls rejected during validation
//! and calls served from the cache are already settled when they are
//! returned; everything else waits on the transport.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future::FusedFuture;
use serde::de::DeserializeOwned;
use serde_json::Value;
use strum::Display;
use tracing::debug;

use crate::error::CallError;
use crate::transport::BoxFuture;

/// Where an invocation is in its lifecycle.
///
/// ```text
/// Created -> ValidationFailed ----------------> Rejected
///         -> CacheHit --------------------------> Resolved
///         -> AwaitingTransport -> Resolved | Rejected
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CallState {
    /// A required parameter was missing; no transport attempt was made.
    ValidationFailed,
    /// The payload came from the cache; no transport attempt was made.
    CacheHit,
    /// Waiting for the transport.
    AwaitingTransport,
    /// Settled with a payload.
    Resolved,
    /// Settled with an error.
    Rejected,
}

impl CallState {
    /// Returns `true` for [`CallState::Resolved`] and [`CallState::Rejected`].
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved | Self::Rejected)
    }
}

enum Outcome {
    Ready(Result<Value, CallError>),
    Waiting(BoxFuture<'static, Result<Value, CallError>>),
    Taken,
}

/// The asynchronous result of one binding invocation.
///
/// Awaiting it yields the decoded payload or the [`CallError`] the call was
/// rejected with. It is a fused future: once settled it never yields again.
///
/// ## Examples
///
/// ```
/// use apibind_runtime::{CallState, PendingCall};
/// use serde_json::json;
///
/// let call = PendingCall::resolved("getItems", json!([1, 2]));
/// assert_eq!(call.state(), CallState::CacheHit);
/// ```
pub struct PendingCall {
    operation: String,
    state: CallState,
    outcome: Outcome,
}

impl PendingCall {
    /// A call already rejected by local validation.
    pub fn rejected(operation: impl Into<String>, error: CallError) -> Self {
        Self {
            operation: operation.into(),
            state: CallState::ValidationFailed,
            outcome: Outcome::Ready(Err(error)),
        }
    }

    /// A call already resolved from the cache.
    pub fn resolved(operation: impl Into<String>, value: Value) -> Self {
        Self {
            operation: operation.into(),
            state: CallState::CacheHit,
            outcome: Outcome::Ready(Ok(value)),
        }
    }

    /// A call waiting on `future`.
    pub fn awaiting(
        operation: impl Into<String>,
        future: BoxFuture<'static, Result<Value, CallError>>,
    ) -> Self {
        Self {
            operation: operation.into(),
            state: CallState::AwaitingTransport,
            outcome: Outcome::Waiting(future),
        }
    }

    /// Name of the invoked operation.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Current lifecycle state.
    pub fn state(&self) -> CallState {
        self.state
    }

    /// Awaits the payload and deserializes it into `T`.
    ///
    /// ## Errors
    ///
    /// Returns the rejection error, or [`CallError::Decode`] if the payload
    /// does not match `T`.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T, CallError> {
        let operation = self.operation.clone();
        let value = self.await?;
        serde_json::from_value(value).map_err(|source| CallError::Decode { operation, source })
    }

    fn settle(&mut self, result: Result<Value, CallError>) -> Poll<Result<Value, CallError>> {
        self.state = if result.is_ok() {
            CallState::Resolved
        } else {
            CallState::Rejected
        };
        self.outcome = Outcome::Taken;
        debug!(operation = %self.operation, state = %self.state, "call settled");
        Poll::Ready(result)
    }
}

impl Future for PendingCall {
    type Output = Result<Value, CallError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match std::mem::replace(&mut this.outcome, Outcome::Taken) {
            Outcome::Ready(result) => this.settle(result),
            Outcome::Waiting(mut future) => match future.as_mut().poll(cx) {
                Poll::Ready(result) => this.settle(result),
                Poll::Pending => {
                    this.outcome = Outcome::Waiting(future);
                    Poll::Pending
                }
            },
            Outcome::Taken => Poll::Pending,
        }
    }
}

impl FusedFuture for PendingCall {
    fn is_terminated(&self) -> bool {
        self.state.is_terminal()
    }
}

impl fmt::Debug for PendingCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingCall")
            .field("operation", &self.operation)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
