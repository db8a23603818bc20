//! Integration tests for the generic API client pipeline.

use gielinor_core::{ApiError, ErrorKind, ProviderKind};
use gielinor_fetch::{
    ApiCall, ApiClient, Cache, CacheMode, CancellationToken, ClientConfig, MemoryCache,
    ProviderHooks, RetryStrategy,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Thing {
    id: u32,
    name: String,
}

fn fast_retry() -> RetryStrategy {
    RetryStrategy::default().with_base_delay(Duration::ZERO)
}

fn client(server: &MockServer, cache: Option<Arc<dyn Cache>>) -> ApiClient {
    let mut config = ClientConfig::for_provider(ProviderKind::Osrsbox)
        .with_base_url(server.uri())
        .with_retry(fast_retry());
    config.cache = cache;
    ApiClient::new(ProviderKind::Osrsbox, config, ProviderHooks::default())
}

fn thing_call(client: &ApiClient) -> ApiCall {
    let url = client.url(&["things", "1"]).unwrap();
    ApiCall::get("thing", url, client.cache_key("thing", [Some("1")]))
}

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.unwrap().len()
}

#[tokio::test]
async fn test_second_call_served_from_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/things/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "name": "Abyssal whip"})))
        .mount(&server)
        .await;

    let cache: Arc<dyn Cache> = Arc::new(MemoryCache::new());
    let client = client(&server, Some(cache.clone()));

    let first: Thing = client.execute(thing_call(&client)).await.unwrap();
    let second: Thing = client.execute(thing_call(&client)).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(request_count(&server).await, 1);
    assert!(cache.get("osrsbox:thing:1").await.is_some());
}

#[tokio::test]
async fn test_without_cache_every_call_hits_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "name": "x"})))
        .mount(&server)
        .await;

    let client = client(&server, None);
    let _: Thing = client.execute(thing_call(&client)).await.unwrap();
    let _: Thing = client.execute(thing_call(&client)).await.unwrap();

    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn test_write_only_bypasses_lookup_but_stores() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "name": "fresh"})))
        .mount(&server)
        .await;

    let cache: Arc<dyn Cache> = Arc::new(MemoryCache::new());
    cache
        .set("osrsbox:thing:1", json!({"id": 1, "name": "stale"}), Duration::from_secs(60))
        .await;
    let client = client(&server, Some(cache.clone()));

    let call = thing_call(&client)
        .method(gielinor_fetch::Method::POST)
        .cache_mode(CacheMode::WriteOnly);
    let thing: Thing = client.execute(call).await.unwrap();

    assert_eq!(thing.name, "fresh");
    assert_eq!(request_count(&server).await, 1);
    assert_eq!(
        cache.get("osrsbox:thing:1").await,
        Some(json!({"id": 1, "name": "fresh"}))
    );
}

#[tokio::test]
async fn test_cached_value_that_no_longer_validates_is_refetched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "name": "x"})))
        .mount(&server)
        .await;

    let cache: Arc<dyn Cache> = Arc::new(MemoryCache::new());
    cache
        .set("osrsbox:thing:1", json!({"unexpected": true}), Duration::from_secs(60))
        .await;
    let client = client(&server, Some(cache));

    let thing: Thing = client.execute(thing_call(&client)).await.unwrap();
    assert_eq!(thing.id, 1);
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn test_failures_are_not_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let cache: Arc<dyn Cache> = Arc::new(MemoryCache::new());
    let client = client(&server, Some(cache.clone()));

    let err = client.execute::<Thing>(thing_call(&client)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(cache.get("osrsbox:thing:1").await.is_none());
}

#[tokio::test]
async fn test_sustained_rate_limit_spends_budget() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = client(&server, None);
    let err = client.execute::<Thing>(thing_call(&client)).await.unwrap_err();

    assert!(matches!(err, ApiError::RateLimited { provider: ProviderKind::Osrsbox, .. }));
    assert_eq!(request_count(&server).await, 3);
}

#[tokio::test]
async fn test_client_error_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"message": "bad id"})))
        .mount(&server)
        .await;

    let client = client(&server, None);
    let err = client.execute::<Thing>(thing_call(&client)).await.unwrap_err();

    match err {
        ApiError::Server { status, message, .. } => {
            assert_eq!(status, 400);
            assert_eq!(message, "bad id");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn test_recovers_after_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "name": "x"})))
        .mount(&server)
        .await;

    let client = client(&server, None);
    let thing: Thing = client.execute(thing_call(&client)).await.unwrap();

    assert_eq!(thing.name, "x");
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn test_timeouts_are_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": 1, "name": "x"}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = ClientConfig::for_provider(ProviderKind::Osrsbox)
        .with_base_url(server.uri())
        .with_timeout(Duration::from_millis(30))
        .with_retry(fast_retry());
    let client = ApiClient::new(ProviderKind::Osrsbox, config, ProviderHooks::default());

    let err = client.execute::<Thing>(thing_call(&client)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert_eq!(request_count(&server).await, 3);
}

#[tokio::test]
async fn test_cancelled_call_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "name": "x"})))
        .expect(0)
        .mount(&server)
        .await;

    let token = CancellationToken::new();
    token.cancel();
    let client = client(&server, None).with_cancellation(token);

    let err = client.execute::<Thing>(thing_call(&client)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Cancelled);
}

#[tokio::test]
async fn test_cancel_during_backoff_stops_retrying() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::for_provider(ProviderKind::Osrsbox)
        .with_base_url(server.uri())
        .with_retry(
            RetryStrategy::default()
                .with_base_delay(Duration::from_secs(30))
                .with_max_delay(Duration::from_secs(30)),
        );
    let token = CancellationToken::new();
    let client = ApiClient::new(ProviderKind::Osrsbox, config, ProviderHooks::default())
        .with_cancellation(token.clone());

    let trigger = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        trigger.cancel();
    });

    let started = std::time::Instant::now();
    let err = client.execute::<Thing>(thing_call(&client)).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Cancelled);
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn test_user_agent_sent_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("user-agent", "gielinor/test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "name": "x"})))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::for_provider(ProviderKind::Osrsbox)
        .with_base_url(server.uri())
        .with_user_agent("gielinor/test");
    let client = ApiClient::new(ProviderKind::Osrsbox, config, ProviderHooks::default());

    let _: Thing = client.execute(thing_call(&client)).await.unwrap();
}

#[tokio::test]
async fn test_unwrap_hook_failure_is_server_error_with_transport_status() {
    fn unwrap_data(value: Value) -> Result<Value, String> {
        match value.get("ok").and_then(Value::as_bool) {
            Some(true) => Ok(value.get("data").cloned().unwrap_or(Value::Null)),
            _ => Err("logical failure".to_string()),
        }
    }

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": false})))
        .mount(&server)
        .await;

    let hooks = ProviderHooks {
        unwrap_payload: unwrap_data,
        ..ProviderHooks::default()
    };
    let config = ClientConfig::for_provider(ProviderKind::Temple)
        .with_base_url(server.uri())
        .with_retry(fast_retry());
    let client = ApiClient::new(ProviderKind::Temple, config, hooks);

    let err = client.execute::<Thing>(thing_call(&client)).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Server {
            provider: ProviderKind::Temple,
            status: 200,
            message: "logical failure".to_string(),
        }
    );
    assert_eq!(request_count(&server).await, 1);
}
