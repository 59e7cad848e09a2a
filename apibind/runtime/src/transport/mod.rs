//! HTTP transport collaborator.
//!
//! Bindings never perform network I/O themselves: they describe the request
//! as a [`TransportRequest`] and hand it to an injected [`Transport`].
//! [`ReqwestTransport`] is the default implementation.

mod http;

use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;

use apibind_define::HttpVerb;
use bytes::Bytes;
use serde_json::Value;
use url::form_urlencoded;

use crate::error::TransportError;

pub use http::{ReqwestTransport, ReqwestTransportBuilder};

/// A boxed future used for the object-safe transport interface.
pub type BoxFuture<'a, T> = std::pin::Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Request payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// JSON body (`application/json`).
    Json(Value),
    /// Form fields (`application/x-www-form-urlencoded`), in order.
    Form(Vec<(String, String)>),
}

/// Everything a transport needs to perform one HTTP exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    /// HTTP method.
    pub verb: HttpVerb,
    /// Base address plus substituted path, without query string.
    pub url: String,
    /// Query pairs in send order; repeated keys are allowed.
    pub query: Vec<(String, String)>,
    /// Optional payload.
    pub body: Option<RequestBody>,
    /// Header pairs.
    pub headers: Vec<(String, String)>,
    /// Caller-supplied timeout.
    pub timeout: Option<Duration>,
}

impl TransportRequest {
    /// Creates a request with no query, body, headers or timeout.
    pub fn new(verb: HttpVerb, url: impl Into<String>) -> Self {
        Self {
            verb,
            url: url.into(),
            query: Vec::new(),
            body: None,
            headers: Vec::new(),
            timeout: None,
        }
    }

    /// Returns the URL-encoded query string, or `None` if there are no
    /// query pairs.
    pub fn query_string(&self) -> Option<String> {
        if self.query.is_empty() {
            return None;
        }
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.query {
            serializer.append_pair(key, value);
        }
        Some(serializer.finish())
    }

    /// Returns the URL with its encoded query string appended.
    ///
    /// ## Examples
    ///
    /// ```
    /// use apibind_define::HttpVerb;
    /// use apibind_runtime::TransportRequest;
    ///
    /// let mut request = TransportRequest::new(HttpVerb::Get, "https://api.example.com/items");
    /// request.query.push(("tags".into(), "a".into()));
    /// request.query.push(("tags".into(), "b c".into()));
    ///
    /// assert_eq!(request.full_url(), "https://api.example.com/items?tags=a&tags=b+c");
    /// ```
    pub fn full_url(&self) -> String {
        match self.query_string() {
            Some(query) => format!("{}?{query}", self.url),
            None => self.url.clone(),
        }
    }
}

/// What a transport got back from the server.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers in received order.
    pub headers: Vec<(String, String)>,
    /// Raw response body.
    pub body: Bytes,
}

impl TransportResponse {
    /// A response with the given status and a JSON body.
    pub fn json(status: u16, body: &Value) -> Self {
        Self {
            status,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Bytes::from(body.to_string()),
        }
    }

    /// Returns `true` for statuses in 200..=299.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs HTTP exchanges on behalf of bindings.
///
/// Implementations own connection handling, TLS and timeouts. They must not
/// interpret status codes: any response, whatever its status, is `Ok`.
pub trait Transport: Send + Sync + Debug {
    /// Sends one request.
    fn send(
        &self,
        request: TransportRequest,
    ) -> BoxFuture<'_, Result<TransportResponse, TransportError>>;
}
