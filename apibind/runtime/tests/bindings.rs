//! Call behaviour of generated bindings, observed through a spy transport.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use apibind_runtime::define::{SchemaFormat, load_catalog};
use apibind_runtime::{
    ApiClient, Args, BoxFuture, Cache, CacheOptions, CallError, CallOptions, CallState,
    MemoryCache, Transport, TransportError, TransportRequest, TransportResponse,
};
use serde_json::{Value, json};

const SCHEMA: &str = r#"{
    "swagger": "2.0",
    "info": { "title": "Rules API", "version": "1.0.0" },
    "host": "api.example.com",
    "basePath": "/v1",
    "schemes": ["https"],
    "paths": {
        "/demand-partners/{dpId}": {
            "get": {
                "parameters": [
                    { "name": "dpId", "in": "path", "required": true, "type": "string" }
                ]
            }
        },
        "/items": {
            "get": {
                "parameters": [
                    { "name": "tags", "in": "query", "type": "array", "items": { "type": "string" } },
                    { "name": "page", "in": "query", "type": "integer" }
                ]
            },
            "post": {
                "parameters": [
                    { "name": "item", "in": "body", "required": true, "schema": { "type": "object" } }
                ]
            }
        }
    }
}"#;

/// Records every request and answers with a fixed response.
#[derive(Debug)]
struct SpyTransport {
    calls: Mutex<Vec<TransportRequest>>,
    status: u16,
    body: Value,
}

impl SpyTransport {
    fn new(status: u16, body: Value) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            status,
            body,
        })
    }

    fn calls(&self) -> Vec<TransportRequest> {
        self.calls.lock().unwrap().clone()
    }
}

impl Transport for SpyTransport {
    fn send(
        &self,
        request: TransportRequest,
    ) -> BoxFuture<'_, Result<TransportResponse, TransportError>> {
        self.calls.lock().unwrap().push(request);
        let response = TransportResponse::json(self.status, &self.body);
        Box::pin(async move { Ok(response) })
    }
}

/// Counts cache reads and writes on top of a [`MemoryCache`].
#[derive(Debug, Default)]
struct RecordingCache {
    inner: MemoryCache,
    gets: Mutex<Vec<String>>,
    puts: Mutex<Vec<String>>,
    put_options: Mutex<Vec<CacheOptions>>,
}

impl Cache for RecordingCache {
    fn get(&self, key: &str) -> Option<Value> {
        self.gets.lock().unwrap().push(key.to_string());
        self.inner.get(key)
    }

    fn put(&self, key: &str, value: Value, options: &CacheOptions) {
        self.puts.lock().unwrap().push(key.to_string());
        self.put_options.lock().unwrap().push(*options);
        self.inner.put(key, value, options);
    }

    fn remove(&self, key: &str) {
        self.inner.remove(key);
    }
}

fn client(transport: Arc<SpyTransport>) -> ApiClient {
    let catalog = load_catalog(SCHEMA, SchemaFormat::Json).unwrap();
    ApiClient::builder(catalog).transport(transport).build().unwrap()
}

#[tokio::test]
async fn resolves_with_decoded_payload() {
    let transport = SpyTransport::new(200, json!({"id": "abc"}));
    let client = client(transport.clone());

    let result = client
        .call(
            "getDemandPartnersByDpId",
            &Args::new().with("dpId", "abc"),
            CallOptions::new(),
        )
        .await
        .unwrap();

    assert_eq!(result, json!({"id": "abc"}));
    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].url, "https://api.example.com/v1/demand-partners/abc");
}

#[tokio::test]
async fn missing_path_parameter_never_reaches_transport() {
    let transport = SpyTransport::new(200, json!({"id": "abc"}));
    let cache = Arc::new(RecordingCache::default());
    let client = client(transport.clone());

    let call = client.call(
        "getDemandPartnersByDpId",
        &Args::new(),
        CallOptions::new().cache(cache.clone()),
    );
    assert_eq!(call.state(), CallState::ValidationFailed);

    let err = call.await.unwrap_err();
    assert!(err.to_string().contains("dpId"), "error was: {err}");
    assert!(matches!(
        err,
        CallError::MissingParameter { ref parameter, .. } if parameter == "dpId"
    ));
    assert!(transport.calls().is_empty());
    assert!(cache.gets.lock().unwrap().is_empty());
}

#[tokio::test]
async fn null_argument_counts_as_missing() {
    let transport = SpyTransport::new(200, json!({}));
    let client = client(transport.clone());

    let result = client
        .call(
            "getDemandPartnersByDpId",
            &Args::new().with("dpId", Value::Null),
            CallOptions::new(),
        )
        .await;

    assert!(matches!(result, Err(CallError::MissingParameter { .. })));
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn cache_round_trip() {
    let transport = SpyTransport::new(200, json!({"id": "abc"}));
    let cache = Arc::new(RecordingCache::default());
    let client = client(transport.clone());
    let args = Args::new().with("dpId", "abc");
    let options = CallOptions::new().cache(cache.clone());

    let first = client
        .call("getDemandPartnersByDpId", &args, options.clone())
        .await
        .unwrap();
    assert_eq!(transport.calls().len(), 1);
    assert_eq!(
        cache.puts.lock().unwrap().as_slice(),
        ["https://api.example.com/v1/demand-partners/abc"]
    );

    let second = client.call("getDemandPartnersByDpId", &args, options);
    assert_eq!(second.state(), CallState::CacheHit);
    assert_eq!(second.await.unwrap(), first);
    assert_eq!(transport.calls().len(), 1);
}

#[tokio::test]
async fn refresh_bypasses_populated_cache() {
    let transport = SpyTransport::new(200, json!({"id": "fresh"}));
    let cache = Arc::new(MemoryCache::new());
    cache.put(
        "https://api.example.com/v1/demand-partners/abc",
        json!({"id": "stale"}),
        &CacheOptions::default(),
    );
    let client = client(transport.clone());
    let args = Args::new().with("dpId", "abc");

    let result = client
        .call(
            "getDemandPartnersByDpId",
            &args,
            CallOptions::new().cache(cache.clone()).refresh(true),
        )
        .await
        .unwrap();

    assert_eq!(result, json!({"id": "fresh"}));
    assert_eq!(transport.calls().len(), 1);
    assert_eq!(
        cache.get("https://api.example.com/v1/demand-partners/abc"),
        Some(json!({"id": "fresh"}))
    );
}

#[tokio::test]
async fn client_level_cache_is_used_by_default() {
    let transport = SpyTransport::new(200, json!([1, 2]));
    let cache = Arc::new(MemoryCache::new());
    let client = client(transport.clone()).with_cache(cache.clone());
    let args = Args::new().with("page", 2);

    client.call("getItems", &args, CallOptions::new()).await.unwrap();
    client.call("getItems", &args, CallOptions::new()).await.unwrap();

    assert_eq!(transport.calls().len(), 1);
    assert_eq!(
        cache.get("https://api.example.com/v1/items?page=2"),
        Some(json!([1, 2]))
    );
}

#[tokio::test]
async fn cache_options_are_passed_to_put() {
    let transport = SpyTransport::new(200, json!({"id": "abc"}));
    let cache = Arc::new(RecordingCache::default());
    let client = client(transport.clone());
    let ttl = CacheOptions::ttl(Duration::from_secs(60));

    client
        .call(
            "getDemandPartnersByDpId",
            &Args::new().with("dpId", "abc"),
            CallOptions::new().cache(cache.clone()).cache_options(ttl),
        )
        .await
        .unwrap();
    client
        .call(
            "postItems",
            &Args::new().with("item", json!({"name": "x"})),
            CallOptions::new().cache(cache.clone()).cache_options(ttl),
        )
        .await
        .unwrap();

    assert_eq!(cache.put_options.lock().unwrap().as_slice(), [ttl, ttl]);
}

#[tokio::test]
async fn per_call_cache_takes_precedence_over_client_cache() {
    let transport = SpyTransport::new(200, json!({"id": "abc"}));
    let client_cache = Arc::new(RecordingCache::default());
    let call_cache = Arc::new(RecordingCache::default());
    let client = client(transport.clone()).with_cache(client_cache.clone());
    let args = Args::new().with("dpId", "abc");
    let options = CallOptions::new().cache(call_cache.clone());

    client
        .call("getDemandPartnersByDpId", &args, options.clone())
        .await
        .unwrap();
    let second = client.call("getDemandPartnersByDpId", &args, options);
    assert_eq!(second.state(), CallState::CacheHit);
    second.await.unwrap();

    assert_eq!(transport.calls().len(), 1);
    assert_eq!(call_cache.gets.lock().unwrap().len(), 2);
    assert_eq!(call_cache.puts.lock().unwrap().len(), 1);
    assert!(client_cache.gets.lock().unwrap().is_empty());
    assert!(client_cache.puts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn different_queries_do_not_share_cache_entries() {
    let transport = SpyTransport::new(200, json!([]));
    let cache: Arc<dyn Cache> = Arc::new(MemoryCache::new());
    let client = client(transport.clone());
    let options = CallOptions::new().cache(cache);

    for page in [1, 2] {
        client
            .call("getItems", &Args::new().with("page", page), options.clone())
            .await
            .unwrap();
    }

    assert_eq!(transport.calls().len(), 2);
}

#[tokio::test]
async fn list_query_expands_in_order() {
    let transport = SpyTransport::new(200, json!([]));
    let client = client(transport.clone());

    client
        .call(
            "getItems",
            &Args::new().with("tags", json!(["a", "b"])),
            CallOptions::new(),
        )
        .await
        .unwrap();

    let calls = transport.calls();
    assert_eq!(calls[0].query_string().as_deref(), Some("tags=a&tags=b"));
}

#[tokio::test]
async fn writes_send_body_and_skip_cache_lookup() {
    let transport = SpyTransport::new(201, json!({"id": 9}));
    let cache = Arc::new(RecordingCache::default());
    let client = client(transport.clone());
    let options = CallOptions::new().cache(cache.clone());
    let args = Args::new().with("item", json!({"name": "x"}));

    client.call("postItems", &args, options.clone()).await.unwrap();
    client.call("postItems", &args, options).await.unwrap();

    assert_eq!(transport.calls().len(), 2);
    assert!(cache.gets.lock().unwrap().is_empty());
    assert_eq!(cache.puts.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn non_success_rejects_without_caching() {
    let transport = SpyTransport::new(404, json!({"message": "no such partner"}));
    let cache = Arc::new(MemoryCache::new());
    let client = client(transport.clone());

    let err = client
        .call(
            "getDemandPartnersByDpId",
            &Args::new().with("dpId", "zzz"),
            CallOptions::new().cache(cache.clone()),
        )
        .await
        .unwrap_err();

    match err {
        CallError::HttpStatus {
            status,
            headers,
            body,
        } => {
            assert_eq!(status, 404);
            assert!(headers.iter().any(|(k, _)| k == "content-type"));
            assert_eq!(body, json!({"message": "no such partner"}));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(cache.is_empty());
}

#[tokio::test]
async fn redirect_status_is_a_rejection() {
    let transport = SpyTransport::new(302, Value::Null);
    let client = client(transport);

    let err = client
        .call("getItems", &Args::new(), CallOptions::new())
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(302));
}
