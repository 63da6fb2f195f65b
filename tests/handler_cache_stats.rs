mod common;

use axum::Router;
use axum_test::TestServer;
use serde_json::{Value, json};

use passenger_registry::api::routes::routes;
use passenger_registry::domain::entities::UserType;

fn make_server(ctx: &common::TestContext) -> TestServer {
    let app = Router::new()
        .nest("/api", routes())
        .with_state(ctx.state.clone());
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_cache_stats_empty() {
    let ctx = common::create_test_state();
    let server = make_server(&ctx);

    let response = server.get("/api/cache-stats").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["total_keys"], 0);
    assert_eq!(body["cache_keys"], json!([]));
    assert_eq!(body["cache_timeout"], 300);
}

#[tokio::test]
async fn test_cache_stats_reports_populated_keys() {
    let ctx = common::create_test_state();
    let user = ctx.users.seed("jane@example.com", UserType::Passenger);
    let server = make_server(&ctx);

    server.get("/api/users").await.assert_status_ok();
    server
        .get(&format!("/api/users/{}", user.id))
        .await
        .assert_status_ok();

    let body: Value = server.get("/api/cache-stats").await.json();
    assert_eq!(body["total_keys"], 2);

    let keys: Vec<String> = serde_json::from_value(body["cache_keys"].clone()).unwrap();
    assert!(keys.contains(&"user_list".to_string()));
    assert!(keys.contains(&format!("user_{}", user.id)));

    // Fresh entries report a TTL at or below the configured timeout.
    let ttl = body["key_ttls"]["user_list"].as_i64().unwrap();
    assert!(ttl > 0 && ttl <= 300);
}

#[tokio::test]
async fn test_cache_stats_is_read_only() {
    let ctx = common::create_test_state();
    ctx.users.seed("jane@example.com", UserType::Passenger);
    let server = make_server(&ctx);

    server.get("/api/users").await.assert_status_ok();

    // Repeated introspection neither adds nor evicts entries.
    let first: Value = server.get("/api/cache-stats").await.json();
    let second: Value = server.get("/api/cache-stats").await.json();
    assert_eq!(first["total_keys"], second["total_keys"]);
    assert_eq!(first["cache_keys"], second["cache_keys"]);
}

#[tokio::test(start_paused = true)]
async fn test_cached_entry_expires_after_ttl() {
    let ctx = common::create_test_state_with_ttl(60, 3600);
    ctx.users.seed("jane@example.com", UserType::Passenger);
    let server = make_server(&ctx);

    server.get("/api/users").await.assert_status_ok();
    assert_eq!(ctx.users.list_calls(), 1);

    tokio::time::advance(std::time::Duration::from_secs(61)).await;

    // The entry has lapsed; the read falls through to the repository.
    server.get("/api/users").await.assert_status_ok();
    assert_eq!(ctx.users.list_calls(), 2);
}
