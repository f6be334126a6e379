//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use lru_ttl_cache::{api::create_router, spawn_expiry_task, AppState, Cache};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app(capacity: usize) -> (Router, Cache) {
    let cache = Cache::new(capacity);
    let app = create_router(AppState::new(cache.clone()));
    (app, cache)
}

async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// == SET Endpoint Tests ==

#[tokio::test]
async fn test_set_endpoint_success() {
    let (app, cache) = create_test_app(100);

    let (status, json) = send(&app, "GET", "/set?key=test_key&value=test_value&exp=5000").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "key set");
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn test_set_endpoint_non_numeric_exp() {
    let (app, cache) = create_test_app(100);

    let (status, json) = send(&app, "GET", "/set?key=k&value=v&exp=soon").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "exp must be a number");
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_set_endpoint_missing_exp() {
    let (app, _) = create_test_app(100);

    let (status, json) = send(&app, "GET", "/set?key=k&value=v").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "exp must be a number");
}

#[tokio::test]
async fn test_set_endpoint_missing_value() {
    let (app, _) = create_test_app(100);

    let (status, json) = send(&app, "PUT", "/set?key=k&exp=100").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "key and value are required");
}

#[tokio::test]
async fn test_set_endpoint_negative_exp_is_not_admitted() {
    let (app, cache) = create_test_app(100);

    let (status, _) = send(&app, "GET", "/set?key=k&value=v&exp=-5").await;
    assert_eq!(status, StatusCode::OK);
    assert!(cache.is_empty());

    let (status, _) = send(&app, "GET", "/get?key=k").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// == GET Endpoint Tests ==

#[tokio::test]
async fn test_get_endpoint_success() {
    let (app, _) = create_test_app(100);

    let (status, _) = send(&app, "POST", "/set?key=get_key&value=get%20value&exp=60000").await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = send(&app, "GET", "/get?key=get_key").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "get value");
}

#[tokio::test]
async fn test_get_endpoint_not_found() {
    let (app, _) = create_test_app(100);

    let (status, json) = send(&app, "GET", "/get?key=nonexistent_key").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "key not found");
}

#[tokio::test]
async fn test_get_endpoint_missing_key() {
    let (app, _) = create_test_app(100);

    let (status, json) = send(&app, "GET", "/get").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "key is required");

    let (status, _) = send(&app, "GET", "/get?key=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// == Eviction and Expiration Through the API ==

#[tokio::test]
async fn test_lru_eviction_through_api() {
    let (app, _) = create_test_app(3);

    for key in ["A", "B", "C"] {
        let uri = format!("/set?key={key}&value=v{key}&exp=60000");
        assert_eq!(send(&app, "GET", &uri).await.0, StatusCode::OK);
    }
    assert_eq!(send(&app, "GET", "/get?key=A").await.0, StatusCode::OK);
    assert_eq!(send(&app, "GET", "/set?key=D&value=vD&exp=60000").await.0, StatusCode::OK);

    assert_eq!(send(&app, "GET", "/get?key=B").await.0, StatusCode::NOT_FOUND);
    assert_eq!(send(&app, "GET", "/get?key=A").await.0, StatusCode::OK);
    assert_eq!(send(&app, "GET", "/get?key=D").await.0, StatusCode::OK);
}

#[tokio::test(start_paused = true)]
async fn test_expiration_through_api() {
    let (app, cache) = create_test_app(100);
    let handle = spawn_expiry_task(cache.clone());

    assert_eq!(send(&app, "GET", "/set?key=k&value=v&exp=10").await.0, StatusCode::OK);
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert!(cache.is_empty());
    let (status, _) = send(&app, "GET", "/get?key=k").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    handle.abort();
}

// == STATS Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint() {
    let (app, _) = create_test_app(100);

    send(&app, "GET", "/set?key=stats_key&value=stats_value&exp=60000").await;
    send(&app, "GET", "/get?key=stats_key").await; // hit
    send(&app, "GET", "/get?key=nonexistent").await; // miss

    let (status, json) = send(&app, "GET", "/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["total_entries"], 1);
    assert_eq!(json["capacity"], 100);
    assert_eq!(json["hit_rate"], 0.5);
}

// == HEALTH Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = create_test_app(100);

    let (status, json) = send(&app, "GET", "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json["timestamp"].is_string());
}

// == End-to-end over a real socket ==

#[tokio::test]
async fn test_server_round_trip_with_cors() {
    let (app, _) = create_test_app(100);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = reqwest::Client::new();
    let base = format!("http://{addr}");

    let response = client
        .get(format!("{base}/set"))
        .query(&[("key", "greeting"), ("value", "hello world"), ("exp", "60000")])
        .header("origin", "http://localhost:3000")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );

    let body: Value = client
        .get(format!("{base}/get"))
        .query(&[("key", "greeting")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["message"], "hello world");

    server.abort();
}
