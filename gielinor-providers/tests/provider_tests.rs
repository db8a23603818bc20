//! End-to-end tests of every provider client against a mock upstream.

use gielinor_core::{ApiError, ErrorKind, ProviderKind};
use gielinor_fetch::{Cache, ClientConfig, MemoryCache, RetryStrategy};
use gielinor_providers::{
    CollectionLogClient, OsrsboxClient, Period, SnapshotQuery, TempleClient, WiseOldManClient,
};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Fixtures
// ============================================================================

fn config(kind: ProviderKind, server: &MockServer, cache: Option<Arc<dyn Cache>>) -> ClientConfig {
    let mut config = ClientConfig::for_provider(kind)
        .with_base_url(server.uri())
        .with_retry(RetryStrategy::default().with_base_delay(Duration::ZERO));
    config.cache = cache;
    config
}

fn route(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::CollectionLog => "/user/Zezima",
        ProviderKind::Osrsbox => "/items-json/4151.json",
        ProviderKind::Temple => "/player_info.php",
        ProviderKind::WiseOldMan => "/players/zezima",
    }
}

fn valid_body(kind: ProviderKind) -> Value {
    match kind {
        ProviderKind::CollectionLog => json!({
            "collectionLogId": 7,
            "userId": 3,
            "collectionLog": {
                "username": "Zezima",
                "accountType": "NORMAL",
                "uniqueObtained": 1,
                "uniqueItems": 2,
                "tabs": {
                    "Bosses": {
                        "Zulrah": {
                            "items": [
                                {"id": 12921, "name": "Pet snakeling", "quantity": 1, "obtained": true, "sequence": 0},
                                {"id": 12922, "name": "Tanzanite fang", "quantity": 0, "obtained": false, "sequence": 1}
                            ],
                            "killCount": [{"name": "Zulrah kills", "amount": 500}]
                        }
                    }
                }
            }
        }),
        ProviderKind::Osrsbox => json!({"id": 4151, "name": "Abyssal whip", "members": true}),
        ProviderKind::Temple => json!({"Username": "Zezima", "Overall_level": 2277}),
        ProviderKind::WiseOldMan => json!({
            "id": 1135,
            "username": "zezima",
            "displayName": "Zezima",
            "type": "regular",
            "build": "main",
            "exp": 4_600_000_000_i64,
            "ehp": 1.5,
            "ehb": 0.5,
            "registeredAt": "2020-04-18T08:57:35.233Z",
            "updatedAt": "2024-02-01T12:00:00.000Z"
        }),
    }
}

fn invalid_body(kind: ProviderKind) -> Value {
    match kind {
        // Any object validates as temple data.
        ProviderKind::Temple => json!(42),
        _ => json!({"unexpected": true}),
    }
}

/// Runs the representative operation of `kind`.
async fn call(kind: ProviderKind, config: ClientConfig) -> Result<Value, ApiError> {
    let value = match kind {
        ProviderKind::CollectionLog => {
            let log = CollectionLogClient::new(config).get_user_collection_log("Zezima").await?;
            serde_json::to_value(log)
        }
        ProviderKind::Osrsbox => serde_json::to_value(OsrsboxClient::new(config).get_item(4151).await?),
        ProviderKind::Temple => serde_json::to_value(TempleClient::new(config).get_player_info("Zezima").await?),
        ProviderKind::WiseOldMan => {
            serde_json::to_value(WiseOldManClient::new(config).get_player("zezima").await?)
        }
    };
    Ok(value.unwrap())
}

async fn mount(server: &MockServer, kind: ProviderKind, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route(kind)))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.unwrap().len()
}

// ============================================================================
// Shared pipeline properties, per provider
// ============================================================================

#[tokio::test]
async fn test_cache_hit_makes_one_call() {
    for &kind in ProviderKind::all() {
        let server = MockServer::start().await;
        mount(&server, kind, ResponseTemplate::new(200).set_body_json(valid_body(kind))).await;

        let cache: Arc<dyn Cache> = Arc::new(MemoryCache::new());
        let first = call(kind, config(kind, &server, Some(cache.clone()))).await.unwrap();
        let second = call(kind, config(kind, &server, Some(cache.clone()))).await.unwrap();

        assert_eq!(first, second, "{kind}");
        assert_eq!(request_count(&server).await, 1, "{kind}");
    }
}

#[tokio::test]
async fn test_not_found_is_not_retried() {
    for &kind in ProviderKind::all() {
        let server = MockServer::start().await;
        mount(&server, kind, ResponseTemplate::new(404).set_body_json(json!({"message": "gone"}))).await;

        let err = call(kind, config(kind, &server, None)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound, "{kind}");
        assert_eq!(err.provider(), kind);
        assert_eq!(request_count(&server).await, 1, "{kind}");
    }
}

#[tokio::test]
async fn test_rate_limit_uses_whole_budget() {
    for &kind in ProviderKind::all() {
        let server = MockServer::start().await;
        mount(&server, kind, ResponseTemplate::new(429)).await;

        let err = call(kind, config(kind, &server, None)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RateLimit, "{kind}");
        assert_eq!(request_count(&server).await, 3, "{kind}");
    }
}

#[tokio::test]
async fn test_server_error_uses_whole_budget() {
    for &kind in ProviderKind::all() {
        let server = MockServer::start().await;
        mount(&server, kind, ResponseTemplate::new(500).set_body_string("upstream broke")).await;

        let err = call(kind, config(kind, &server, None)).await.unwrap_err();
        assert_eq!(err.status(), Some(500), "{kind}");
        assert_eq!(err.kind(), ErrorKind::ServerError);
        assert_eq!(request_count(&server).await, 3, "{kind}");
    }
}

#[tokio::test]
async fn test_schema_mismatch_is_parse_error() {
    for &kind in ProviderKind::all() {
        let server = MockServer::start().await;
        mount(&server, kind, ResponseTemplate::new(200).set_body_json(invalid_body(kind))).await;

        let cache: Arc<dyn Cache> = Arc::new(MemoryCache::new());
        let err = call(kind, config(kind, &server, Some(cache.clone()))).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseError, "{kind}");
        assert_eq!(request_count(&server).await, 1, "{kind}");

        // Nothing invalid was cached.
        let _ = call(kind, config(kind, &server, Some(cache))).await;
        assert_eq!(request_count(&server).await, 2, "{kind}");
    }
}

#[tokio::test]
async fn test_expired_entry_is_refetched() {
    let kind = ProviderKind::WiseOldMan;
    let server = MockServer::start().await;
    mount(&server, kind, ResponseTemplate::new(200).set_body_json(valid_body(kind))).await;

    let cache: Arc<dyn Cache> = Arc::new(MemoryCache::new());
    let zero_ttl = || config(kind, &server, Some(cache.clone())).with_cache_ttl(Duration::ZERO);
    call(kind, zero_ttl()).await.unwrap();
    call(kind, zero_ttl()).await.unwrap();

    assert_eq!(request_count(&server).await, 2);
}

// ============================================================================
// Collection log
// ============================================================================

#[tokio::test]
async fn test_collection_log_summary() {
    let kind = ProviderKind::CollectionLog;
    let server = MockServer::start().await;
    mount(&server, kind, ResponseTemplate::new(200).set_body_json(valid_body(kind))).await;

    let response = CollectionLogClient::new(config(kind, &server, None))
        .get_user_collection_log(" Zezima ")
        .await
        .unwrap();
    let page = response.collection_log.page("Zulrah").unwrap();
    assert_eq!(page.obtained_count(), 1);
    assert_eq!(page.kill_count[0].amount, 500);
}

#[tokio::test]
async fn test_collection_log_error_envelope_message() {
    let kind = ProviderKind::CollectionLog;
    let server = MockServer::start().await;
    mount(
        &server,
        kind,
        ResponseTemplate::new(404).set_body_json(json!({"error": "Unable to find collection log for user zezima"})),
    )
    .await;

    let err = call(kind, config(kind, &server, None)).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::NotFound {
            provider: kind,
            message: "Unable to find collection log for user zezima".to_string(),
        }
    );
}

#[tokio::test]
async fn test_blank_username_makes_no_request() {
    let kind = ProviderKind::CollectionLog;
    let server = MockServer::start().await;

    let err = CollectionLogClient::new(config(kind, &server, None))
        .get_user_collection_log("  ")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    assert_eq!(request_count(&server).await, 0);
}

// ============================================================================
// OSRSBox
// ============================================================================

#[tokio::test]
async fn test_osrsbox_batch_preserves_order() {
    let kind = ProviderKind::Osrsbox;
    let server = MockServer::start().await;
    for (id, name) in [(4151, "Abyssal whip"), (11840, "Dragon boots")] {
        Mock::given(method("GET"))
            .and(path(format!("/items-json/{id}.json")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": id, "name": name})))
            .mount(&server)
            .await;
    }

    let items = OsrsboxClient::new(config(kind, &server, None))
        .get_items(&[11840, 4151])
        .await
        .unwrap();
    let names: Vec<_> = items.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, ["Dragon boots", "Abyssal whip"]);
}

#[tokio::test]
async fn test_osrsbox_batch_aborts_on_first_failure() {
    let kind = ProviderKind::Osrsbox;
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/monsters-json/415.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 415, "name": "Abyssal demon"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/monsters-json/999999.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/monsters-json/2.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 2, "name": "Aberrant spectre"})))
        .expect(0)
        .mount(&server)
        .await;

    let err = OsrsboxClient::new(config(kind, &server, None))
        .get_monsters(&[415, 999_999, 2])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(request_count(&server).await, 2);
}

// ============================================================================
// Temple
// ============================================================================

#[tokio::test]
async fn test_temple_envelope_error_on_http_200() {
    let kind = ProviderKind::Temple;
    let server = MockServer::start().await;
    mount(
        &server,
        kind,
        ResponseTemplate::new(200).set_body_json(json!({"status": "error", "error": "X"})),
    )
    .await;

    let err = call(kind, config(kind, &server, None)).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Server {
            provider: kind,
            status: 200,
            message: "X".to_string(),
        }
    );
    // A 200 status is below the retry threshold.
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn test_temple_gains_query_and_envelope_data() {
    let kind = ProviderKind::Temple;
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/player_gains.php"))
        .and(query_param("player", "Zezima"))
        .and(query_param("period", "week"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {"Overall": 1_000_000}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cache: Arc<dyn Cache> = Arc::new(MemoryCache::new());
    let client = TempleClient::new(config(kind, &server, Some(cache.clone())));
    let gains = client.get_player_gains("Zezima", Some("week")).await.unwrap();

    assert_eq!(gains.get("Overall"), Some(&json!(1_000_000)));
    assert!(cache.get("temple:player_gains:zezima:week").await.is_some());
}

#[tokio::test]
async fn test_temple_datapoints_array_without_interval() {
    let kind = ProviderKind::Temple;
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/player_datapoints.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": [{"date": 1}, {"date": 2}]
        })))
        .mount(&server)
        .await;

    let points = TempleClient::new(config(kind, &server, None))
        .get_player_datapoints("Zezima", None)
        .await
        .unwrap();
    assert_eq!(points.as_array().map(<[Value]>::len), Some(2));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("player=Zezima"));
}

// ============================================================================
// Wise Old Man
// ============================================================================

#[tokio::test]
async fn test_wom_update_writes_through_to_player_cache() {
    let kind = ProviderKind::WiseOldMan;
    let server = MockServer::start().await;
    let mut updated = valid_body(kind);
    updated["exp"] = json!(4_700_000_000_i64);
    Mock::given(method("POST"))
        .and(path("/players/zezima"))
        .respond_with(ResponseTemplate::new(200).set_body_json(updated))
        .expect(1)
        .mount(&server)
        .await;
    mount(&server, kind, ResponseTemplate::new(200).set_body_json(valid_body(kind))).await;

    let cache: Arc<dyn Cache> = Arc::new(MemoryCache::new());
    let client = WiseOldManClient::new(config(kind, &server, Some(cache)));

    let before = client.get_player("zezima").await.unwrap();
    assert_eq!(before.exp, 4_600_000_000);

    let after = client.update_player("zezima").await.unwrap();
    assert_eq!(after.exp, 4_700_000_000);

    // Served from the refreshed cache entry.
    let cached = client.get_player("zezima").await.unwrap();
    assert_eq!(cached, after);
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn test_wom_snapshots_query_params() {
    let kind = ProviderKind::WiseOldMan;
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/players/zezima/snapshots"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1,
            "playerId": 1135,
            "createdAt": "2024-02-01T12:00:00.000Z",
            "importedAt": null,
            "data": {"skills": {}, "bosses": {}, "activities": {}, "computed": {}}
        }])))
        .mount(&server)
        .await;

    let snapshots = WiseOldManClient::new(config(kind, &server, None))
        .get_player_snapshots("zezima", &SnapshotQuery::period(Period::Week))
        .await
        .unwrap();
    assert_eq!(snapshots.len(), 1);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("period=week"));
}

fn snapshot_body(id: i64) -> Value {
    json!([{
        "id": id,
        "playerId": 1135,
        "createdAt": "2024-02-01T12:00:00.000Z",
        "data": {}
    }])
}

#[tokio::test]
async fn test_wom_start_only_and_end_only_ranges_are_cached_apart() {
    let kind = ProviderKind::WiseOldMan;
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/players/zezima/snapshots"))
        .and(query_param("startDate", "2024-01-01T00:00:00.000Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(snapshot_body(1)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/players/zezima/snapshots"))
        .and(query_param("endDate", "2024-01-01T00:00:00.000Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(snapshot_body(2)))
        .expect(1)
        .mount(&server)
        .await;

    let cache: Arc<dyn Cache> = Arc::new(MemoryCache::new());
    let client = WiseOldManClient::new(config(kind, &server, Some(cache)));
    let at = "2024-01-01T00:00:00Z".parse().unwrap();

    let since = SnapshotQuery {
        start_date: Some(at),
        ..SnapshotQuery::default()
    };
    let until = SnapshotQuery {
        end_date: Some(at),
        ..SnapshotQuery::default()
    };

    let first = client.get_player_snapshots("zezima", &since).await.unwrap();
    let second = client.get_player_snapshots("zezima", &until).await.unwrap();
    assert_eq!(first[0].id, 1);
    assert_eq!(second[0].id, 2);

    // Repeating either query is a cache hit.
    let again = client.get_player_snapshots("zezima", &until).await.unwrap();
    assert_eq!(again[0].id, 2);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_wom_message_envelope_on_bad_request() {
    let kind = ProviderKind::WiseOldMan;
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/players/zezima/snapshots"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Invalid period: fortnight."})),
        )
        .mount(&server)
        .await;

    let err = WiseOldManClient::new(config(kind, &server, None))
        .get_player_snapshots("zezima", &SnapshotQuery::default())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert!(err.to_string().contains("Invalid period: fortnight."));
    assert_eq!(request_count(&server).await, 1);
}
