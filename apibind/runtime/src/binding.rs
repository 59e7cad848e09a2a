//! Callable bindings, one per catalog operation.
//!
//! A [`ClientBinding`] owns nothing mutable: an immutable operation
//! descriptor, the shared base address, the transport and an optional
//! default cache. Every invocation follows the same steps:
//!
//! 1. Check required parameters in declared order. A missing one rejects the
//!    call before any cache lookup or transport attempt.
//! 2. Substitute path parameters into the template verbatim.
//! 3. Place the remaining arguments by their declared placement: query
//!    pairs, JSON body, form fields, headers. Extra query overrides from
//!    [`CallOptions`] are applied last.
//! 4. For cacheable operations (GET/HEAD without body), serve a cached
//!    payload unless a refresh was requested.
//! 5. Otherwise hand the request to the transport. A 2xx response resolves
//!    the call and is stored in the cache, anything else rejects it.

use std::sync::Arc;

use apibind_define::template::substitute_path_params;
use apibind_define::validation::validate_operation;
use apibind_define::{CollectionFormat, OperationDescriptor, Placement, SchemaError};
use serde_json::Value;
use tracing::{Span, debug, instrument, warn};

use crate::args::{Args, expand_pairs, render_joined};
use crate::cache::{Cache, CacheOptions};
use crate::error::CallError;
use crate::options::CallOptions;
use crate::pending::PendingCall;
use crate::transport::{RequestBody, Transport, TransportRequest};

/// Separator for list values in path segments and headers.
const LIST_SEPARATOR: &str = ",";

/// A fully placed request plus the key it is cached under.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedCall {
    /// The request handed to the transport.
    pub request: TransportRequest,
    /// Composed URL including the encoded query string.
    pub cache_key: String,
}

/// The callable for one operation.
///
/// Created once per catalog load by [`ApiClient`](crate::ApiClient) and
/// reused for every call. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct ClientBinding {
    operation: Arc<OperationDescriptor>,
    base_url: Arc<str>,
    transport: Arc<dyn Transport>,
    cache: Option<Arc<dyn Cache>>,
}

impl ClientBinding {
    /// Binds `operation` to a base address and transport.
    ///
    /// ## Errors
    ///
    /// Returns a [`SchemaError`] if the operation is inconsistent, for
    /// example a path placeholder with no declared path parameter.
    pub fn new(
        operation: OperationDescriptor,
        base_url: impl Into<Arc<str>>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, SchemaError> {
        validate_operation(&operation)?;
        Ok(Self {
            operation: Arc::new(operation),
            base_url: base_url.into(),
            transport,
            cache: None,
        })
    }

    /// Sets the cache used when a call does not bring its own.
    pub fn with_cache(mut self, cache: Option<Arc<dyn Cache>>) -> Self {
        self.cache = cache;
        self
    }

    /// Operation name.
    pub fn name(&self) -> &str {
        &self.operation.name
    }

    /// The bound operation.
    pub fn operation(&self) -> &OperationDescriptor {
        &self.operation
    }

    /// Base address the path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Validates arguments and composes the request without sending it.
    ///
    /// ## Errors
    ///
    /// Returns [`CallError::MissingParameter`] for the first absent required
    /// parameter in declared order.
    pub fn prepare(&self, args: &Args, options: &CallOptions) -> Result<PreparedCall, CallError> {
        let op = self.operation.as_ref();

        if let Some(missing) = op
            .parameters
            .iter()
            .find(|p| p.required && !args.contains(&p.name))
        {
            return Err(CallError::MissingParameter {
                operation: op.name.clone(),
                parameter: missing.name.clone(),
            });
        }

        let path_values: Vec<(&str, String)> = op
            .parameters_in(Placement::Path)
            .filter_map(|p| {
                args.get(&p.name)
                    .map(|v| (p.name.as_str(), render_joined(v, LIST_SEPARATOR)))
            })
            .collect();
        let substitutions: Vec<(&str, &str)> = path_values
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
            .collect();
        let path = substitute_path_params(&op.path, &substitutions);

        let mut request = TransportRequest::new(op.verb, format!("{}{path}", self.base_url));
        request.timeout = options.timeout;

        for p in op.parameters_in(Placement::Query) {
            if let Some(value) = args.get(&p.name) {
                request
                    .query
                    .extend(expand_pairs(&p.name, value, p.collection_format));
            }
        }
        apply_overrides(&mut request.query, &options.extra_query);

        for p in op.parameters_in(Placement::Header) {
            if let Some(value) = args.get(&p.name) {
                request
                    .headers
                    .push((p.name.clone(), render_joined(value, LIST_SEPARATOR)));
            }
        }

        if let Some(value) = op.body_parameter().and_then(|p| args.get(&p.name)) {
            request.body = Some(RequestBody::Json(value.clone()));
        }

        let fields: Vec<(String, String)> = op
            .parameters_in(Placement::FormData)
            .filter_map(|p| {
                args.get(&p.name)
                    .map(|v| expand_pairs(&p.name, v, p.collection_format))
            })
            .flatten()
            .collect();
        if !fields.is_empty() {
            request.body = Some(RequestBody::Form(fields));
        }

        let cache_key = request.full_url();
        Ok(PreparedCall { request, cache_key })
    }

    /// Invokes the operation.
    ///
    /// Never fails synchronously: validation failures come back as an
    /// already-rejected [`PendingCall`].
    pub fn call(&self, args: &Args, options: CallOptions) -> PendingCall {
        let name = self.name();
        let prepared = match self.prepare(args, &options) {
            Ok(prepared) => prepared,
            Err(err) => {
                debug!(operation = name, error = %err, "call rejected before dispatch");
                return PendingCall::rejected(name, err);
            }
        };

        let cache = options.cache.or_else(|| self.cache.clone());
        if self.operation.is_cacheable()
            && !options.refresh
            && let Some(cache) = &cache
            && let Some(value) = cache.get(&prepared.cache_key)
        {
            debug!(operation = name, key = %prepared.cache_key, "served from cache");
            return PendingCall::resolved(name, value);
        }

        debug!(
            operation = name,
            url = %prepared.request.url,
            refresh = options.refresh,
            "dispatching to transport"
        );
        let future = dispatch(
            name.to_string(),
            Arc::clone(&self.transport),
            prepared,
            cache,
            options.cache_options,
        );
        PendingCall::awaiting(name, Box::pin(future))
    }
}

/// Removes every pair whose key is overridden, then appends the overrides.
/// A `null` override only removes.
fn apply_overrides(query: &mut Vec<(String, String)>, overrides: &[(String, Value)]) {
    if overrides.is_empty() {
        return;
    }
    query.retain(|(key, _)| !overrides.iter().any(|(name, _)| name == key));
    for (name, value) in overrides.iter().filter(|(_, v)| !v.is_null()) {
        query.extend(expand_pairs(name, value, CollectionFormat::Multi));
    }
}

/// Decodes a response body: empty is `null`, JSON is parsed, anything else
/// becomes a JSON string.
pub(crate) fn decode_body(body: &[u8]) -> Value {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}

#[instrument(
    name = "api_request",
    skip_all,
    fields(
        apibind.operation = %operation,
        http.method = tracing::field::Empty,
        http.url = tracing::field::Empty,
        http.status_code = tracing::field::Empty,
        otel.kind = "client",
        otel.status_code = tracing::field::Empty,
    )
)]
async fn dispatch(
    operation: String,
    transport: Arc<dyn Transport>,
    prepared: PreparedCall,
    cache: Option<Arc<dyn Cache>>,
    cache_options: CacheOptions,
) -> Result<Value, CallError> {
    let PreparedCall { request, cache_key } = prepared;
    let span = Span::current();
    span.record("http.method", request.verb.to_string().as_str());
    span.record("http.url", cache_key.as_str());

    let response = match transport.send(request).await {
        Ok(response) => response,
        Err(err) => {
            span.record("otel.status_code", "ERROR");
            warn!(operation = %operation, error = %err, "transport failed");
            return Err(CallError::Transport(err));
        }
    };

    span.record("http.status_code", response.status);
    let body = decode_body(&response.body);

    if !response.is_success() {
        let otel_status = if response.status >= 500 { "ERROR" } else { "UNSET" };
        span.record("otel.status_code", otel_status);
        warn!(operation = %operation, status = response.status, "non-success status");
        return Err(CallError::HttpStatus {
            status: response.status,
            headers: response.headers,
            body,
        });
    }

    span.record("otel.status_code", "OK");
    if let Some(cache) = cache {
        debug!(operation = %operation, key = %cache_key, "caching response");
        cache.put(&cache_key, body.clone(), &cache_options);
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::transport::{BoxFuture, TransportResponse};
    use apibind_define::{HttpVerb, ParameterDescriptor, ValueKind};
    use serde_json::json;

    #[derive(Debug)]
    struct Unreachable;

    impl Transport for Unreachable {
        fn send(
            &self,
            _request: TransportRequest,
        ) -> BoxFuture<'_, Result<TransportResponse, TransportError>> {
            Box::pin(async { Err(TransportError::Connection("unreachable".to_string())) })
        }
    }

    #[derive(Debug)]
    struct Fixed;

    impl Transport for Fixed {
        fn send(
            &self,
            _request: TransportRequest,
        ) -> BoxFuture<'_, Result<TransportResponse, TransportError>> {
            Box::pin(async { Ok(TransportResponse::json(200, &json!({"id": "abc"}))) })
        }
    }

    fn bind(op: OperationDescriptor) -> ClientBinding {
        ClientBinding::new(op, "https://api.example.com/v1", Arc::new(Unreachable)).unwrap()
    }

    fn versions() -> OperationDescriptor {
        OperationDescriptor::new(
            "getVersions",
            HttpVerb::Get,
            "/versions",
            vec![
                ParameterDescriptor::new("dpId", Placement::Query),
                ParameterDescriptor::new("limit", Placement::Query)
                    .required(true)
                    .kind(ValueKind::Integer),
                ParameterDescriptor::new("tags", Placement::Query)
                    .kind(ValueKind::Array(Box::new(ValueKind::String))),
            ],
        )
    }

    #[test]
    fn test_first_missing_parameter_in_declared_order() {
        let binding = bind(OperationDescriptor::new(
            "getRule",
            HttpVerb::Get,
            "/dp/{dpId}/rules/{ruleId}",
            vec![
                ParameterDescriptor::new("dpId", Placement::Path),
                ParameterDescriptor::new("ruleId", Placement::Path),
            ],
        ));

        let err = binding
            .prepare(&Args::new().with("ruleId", "r1"), &CallOptions::new())
            .unwrap_err();
        match err {
            CallError::MissingParameter { parameter, .. } => assert_eq!(parameter, "dpId"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_path_substitution_is_verbatim() {
        let binding = bind(OperationDescriptor::new(
            "getDemandPartnersByDpId",
            HttpVerb::Get,
            "/demand-partners/{dpId}",
            vec![ParameterDescriptor::new("dpId", Placement::Path)],
        ));

        let prepared = binding
            .prepare(&Args::new().with("dpId", "a b"), &CallOptions::new())
            .unwrap();
        assert_eq!(
            prepared.request.url,
            "https://api.example.com/v1/demand-partners/a b"
        );
        assert_eq!(prepared.cache_key, prepared.request.url);
    }

    #[test]
    fn test_query_placement_and_cache_key() {
        let binding = bind(versions());
        let args = Args::new()
            .with("limit", 10)
            .with("tags", json!(["a", "b"]))
            .with("dpId", Value::Null);

        let prepared = binding.prepare(&args, &CallOptions::new()).unwrap();
        assert_eq!(
            prepared.request.query,
            vec![
                ("limit".to_string(), "10".to_string()),
                ("tags".to_string(), "a".to_string()),
                ("tags".to_string(), "b".to_string()),
            ]
        );
        assert_eq!(
            prepared.cache_key,
            "https://api.example.com/v1/versions?limit=10&tags=a&tags=b"
        );
    }

    #[test]
    fn test_extra_query_wins() {
        let binding = bind(versions());
        let args = Args::new().with("limit", 10).with("tags", json!(["a", "b"]));
        let options = CallOptions::new()
            .extra_query("tags", "z")
            .extra_query("debug", true);

        let prepared = binding.prepare(&args, &options).unwrap();
        assert_eq!(
            prepared.request.query,
            vec![
                ("limit".to_string(), "10".to_string()),
                ("tags".to_string(), "z".to_string()),
                ("debug".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_null_override_removes_pair() {
        let mut query = vec![("limit".to_string(), "10".to_string())];
        apply_overrides(&mut query, &[("limit".to_string(), Value::Null)]);
        assert!(query.is_empty());
    }

    #[test]
    fn test_body_headers_and_timeout() {
        let binding = bind(OperationDescriptor::new(
            "postVersionsByVersionQps",
            HttpVerb::Post,
            "/versions/{version}/qps",
            vec![
                ParameterDescriptor::new("version", Placement::Path),
                ParameterDescriptor::new("qpsUpdate", Placement::Body).required(true),
                ParameterDescriptor::new("X-Trace", Placement::Header),
            ],
        ));
        let args = Args::new()
            .with("version", 7)
            .with("qpsUpdate", json!({"qps": 100}))
            .with("X-Trace", "t1");
        let options = CallOptions::new().timeout(std::time::Duration::from_secs(2));

        let prepared = binding.prepare(&args, &options).unwrap();
        assert_eq!(prepared.request.url, "https://api.example.com/v1/versions/7/qps");
        assert_eq!(
            prepared.request.body,
            Some(RequestBody::Json(json!({"qps": 100})))
        );
        assert_eq!(
            prepared.request.headers,
            vec![("X-Trace".to_string(), "t1".to_string())]
        );
        assert_eq!(
            prepared.request.timeout,
            Some(std::time::Duration::from_secs(2))
        );
    }

    #[test]
    fn test_form_fields() {
        let binding = bind(OperationDescriptor::new(
            "postLogin",
            HttpVerb::Post,
            "/login",
            vec![
                ParameterDescriptor::new("user", Placement::FormData).required(true),
                ParameterDescriptor::new("scopes", Placement::FormData)
                    .kind(ValueKind::Array(Box::new(ValueKind::String))),
            ],
        ));
        let args = Args::new()
            .with("user", "ann")
            .with("scopes", json!(["read", "write"]));

        let prepared = binding.prepare(&args, &CallOptions::new()).unwrap();
        assert_eq!(
            prepared.request.body,
            Some(RequestBody::Form(vec![
                ("user".to_string(), "ann".to_string()),
                ("scopes".to_string(), "read".to_string()),
                ("scopes".to_string(), "write".to_string()),
            ]))
        );
    }

    #[test]
    fn test_unresolved_placeholder_fails_binding() {
        let op = OperationDescriptor::new("getThing", HttpVerb::Get, "/things/{id}", vec![]);
        let result = ClientBinding::new(op, "https://x.test", Arc::new(Unreachable));
        assert!(matches!(
            result,
            Err(SchemaError::UnresolvedPlaceholder { .. })
        ));
    }

    #[test]
    fn test_decode_body() {
        assert_eq!(decode_body(b""), Value::Null);
        assert_eq!(decode_body(b"{\"id\":\"abc\"}"), json!({"id": "abc"}));
        assert_eq!(decode_body(b"plain text"), json!("plain text"));
    }

    #[tokio::test]
    async fn test_transport_failure_rejects() {
        let binding = bind(versions());
        let err = binding
            .call(&Args::new().with("limit", 1), CallOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CallError::Transport(TransportError::Connection(_))));
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn test_logs_dispatch_and_cache_hit() {
        let op = OperationDescriptor::new(
            "getDemandPartnersByDpId",
            HttpVerb::Get,
            "/demand-partners/{dpId}",
            vec![ParameterDescriptor::new("dpId", Placement::Path)],
        );
        let binding = ClientBinding::new(op, "https://x.test", Arc::new(Fixed))
            .unwrap()
            .with_cache(Some(Arc::new(crate::cache::MemoryCache::new())));
        let args = Args::new().with("dpId", "abc");

        binding.call(&args, CallOptions::new()).await.unwrap();
        let second = binding.call(&args, CallOptions::new());
        assert_eq!(second.state(), crate::pending::CallState::CacheHit);
        second.await.unwrap();

        assert!(logs_contain("dispatching to transport"));
        assert!(logs_contain("served from cache"));
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn test_logs_validation_failure() {
        let binding = bind(versions());
        let result = binding.call(&Args::new(), CallOptions::new()).await;
        assert!(result.is_err());
        assert!(logs_contain("call rejected before dispatch"));
    }
}
