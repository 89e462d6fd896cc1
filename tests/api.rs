// HTTP contract tests for the catalog backend.
// Drive the router in-process and check status codes and JSON bodies.

use std::path::Path;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use catalog::config::ServerConfig;
use catalog::model::Item;
use catalog::server::Backend;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

/// The seed catalog shipped in `data/items.json`.
fn mock_items() -> Value {
    serde_json::from_str(include_str!("../data/items.json")).expect("seed file should parse")
}

fn write_items(path: &Path, items: &Value) {
    std::fs::write(path, serde_json::to_vec_pretty(items).unwrap()).unwrap();
}

async fn backend(dir: &TempDir, items: &Value) -> (Backend, Router) {
    let config = ServerConfig {
        data_path: dir.path().join("items.json"),
        watch_interval: Duration::from_millis(20),
        ..ServerConfig::default()
    };
    write_items(&config.data_path, items);

    let backend = Backend::start(&config).await.expect("backend should start");
    let router = backend.router(&config).expect("router should build");
    (backend, router)
}

async fn request_json(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .oneshot(request)
        .await
        .expect("router should serve request");

    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();

    if body.is_empty() {
        return (status, Value::Null);
    }

    let value = serde_json::from_slice(&body).expect("body should be valid json");
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    request_json(
        app.clone(),
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("valid GET request"),
    )
    .await
}

async fn post_raw(app: &Router, body: String) -> (StatusCode, Value) {
    request_json(
        app.clone(),
        Request::builder()
            .method("POST")
            .uri("/api/items")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .expect("valid POST request"),
    )
    .await
}

fn message(body: &Value) -> Option<&str> {
    body.get("message").and_then(Value::as_str)
}

fn names(body: &Value) -> Vec<&str> {
    body.as_array()
        .expect("array body")
        .iter()
        .filter_map(|item| item.get("name").and_then(Value::as_str))
        .collect()
}

#[tokio::test]
async fn test_list_defaults_to_first_page() {
    let dir = TempDir::new().unwrap();
    let (_backend, app) = backend(&dir, &mock_items()).await;

    let (status, body) = get(&app, "/api/items").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(5));
}

#[tokio::test]
async fn test_list_filters_by_name_case_insensitively() {
    let dir = TempDir::new().unwrap();
    let (_backend, app) = backend(&dir, &mock_items()).await;

    let (status, body) = get(&app, "/api/items?q=laptop").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Laptop Pro"]);

    // Category is not searched
    let (_, body) = get(&app, "/api/items?q=furniture").await;
    assert!(names(&body).is_empty());
}

#[tokio::test]
async fn test_list_paginates() {
    let dir = TempDir::new().unwrap();
    let (_backend, app) = backend(&dir, &mock_items()).await;

    let (status, body) = get(&app, "/api/items?limit=2&page=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Ultra-Wide Monitor", "Ergonomic Chair"]);

    let (status, body) = get(&app, "/api/items?limit=2&page=9").await;
    assert_eq!(status, StatusCode::OK);
    assert!(names(&body).is_empty());

    let (status, body) = get(&app, "/api/items?limit=4294967296").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body).len(), 5);

    let (status, body) = get(&app, "/api/items?limit=99999999999999999999&page=2").await;
    assert_eq!(status, StatusCode::OK);
    assert!(names(&body).is_empty());
}

#[tokio::test]
async fn test_list_rejects_bad_pagination() {
    let dir = TempDir::new().unwrap();
    let (_backend, app) = backend(&dir, &mock_items()).await;

    for uri in [
        "/api/items?limit=0",
        "/api/items?page=-1",
        "/api/items?limit=abc",
        "/api/items?limit=1&limit=2",
    ] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(message(&body), Some("Invalid limit or page parameter"));
    }
}

#[tokio::test]
async fn test_count_matches_search() {
    let dir = TempDir::new().unwrap();
    let (_backend, app) = backend(&dir, &mock_items()).await;

    let (status, body) = get(&app, "/api/items/count").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "total": 5 }));

    let (_, body) = get(&app, "/api/items/count?q=DESK").await;
    assert_eq!(body, json!({ "total": 1 }));
}

#[tokio::test]
async fn test_get_item_by_id() {
    let dir = TempDir::new().unwrap();
    let (_backend, app) = backend(&dir, &mock_items()).await;

    let (status, body) = get(&app, "/api/items/1").await;
    assert_eq!(status, StatusCode::OK);
    let item: Item = serde_json::from_value(body).unwrap();
    assert_eq!(item.name, "Laptop Pro");
    assert_eq!(item.price, 2499.0);

    let (status, body) = get(&app, "/api/items/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(message(&body), Some("Item not found"));

    for uri in ["/api/items/-1", "/api/items/99999999999999999999"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(message(&body), Some("Item not found"));
    }

    let (status, body) = get(&app, "/api/items/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message(&body), Some("Invalid item ID"));
}

#[tokio::test]
async fn test_create_item_persists() {
    let dir = TempDir::new().unwrap();
    let (_backend, app) = backend(&dir, &mock_items()).await;

    let (status, created) = post_raw(
        &app,
        json!({ "name": "Test Item", "category": "Test", "price": 49 }).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created.get("name").and_then(Value::as_str), Some("Test Item"));
    assert_eq!(created.get("category").and_then(Value::as_str), Some("Test"));
    assert_eq!(created.get("price").and_then(Value::as_f64), Some(49.0));
    let id = created.get("id").and_then(Value::as_u64).expect("numeric id");
    assert!(id > 5);

    let (status, fetched) = get(&app, &format!("/api/items/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let on_disk: Vec<Item> =
        serde_json::from_slice(&std::fs::read(dir.path().join("items.json")).unwrap()).unwrap();
    assert_eq!(on_disk.len(), 6);
}

#[tokio::test]
async fn test_create_rejects_invalid_payloads() {
    let dir = TempDir::new().unwrap();
    let (_backend, app) = backend(&dir, &mock_items()).await;
    let expected =
        Some("Invalid payload: name, category, and price (number, non-negative) are required");

    for body in [
        json!({ "name": "Test Item" }).to_string(),
        json!({ "name": "Test Item", "category": "Test", "price": -10 }).to_string(),
        json!({ "name": "", "category": "Test", "price": 1 }).to_string(),
        json!({ "name": "Test Item", "category": "Test", "price": "49" }).to_string(),
        "not json".to_string(),
    ] {
        let (status, response) = post_raw(&app, body.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(message(&response), expected);
    }
}

#[tokio::test]
async fn test_stats_report_mean_price() {
    let dir = TempDir::new().unwrap();
    let items = json!([
        { "id": 1, "name": "Laptop Pro", "category": "Electronics", "price": 2499 },
        { "id": 2, "name": "Noise Cancelling Headphones", "category": "Electronics", "price": 399 }
    ]);
    let (_backend, app) = backend(&dir, &items).await;

    let (status, body) = get(&app, "/api/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.get("total").and_then(Value::as_u64), Some(2));
    assert_eq!(body.get("averagePrice").and_then(Value::as_f64), Some(1449.0));
}

#[tokio::test]
async fn test_stats_follow_external_file_changes() {
    let dir = TempDir::new().unwrap();
    let (_backend, app) = backend(&dir, &mock_items()).await;

    let (_, body) = get(&app, "/api/stats").await;
    assert_eq!(body.get("total").and_then(Value::as_u64), Some(5));

    // Let the watcher record its baseline first
    tokio::time::sleep(Duration::from_millis(60)).await;
    // Different length guarantees a new fingerprint even on coarse mtime clocks
    write_items(
        &dir.path().join("items.json"),
        &json!([{ "id": 7, "name": "Lamp", "category": "Home", "price": 30 }]),
    );

    let mut total = None;
    for _ in 0..100 {
        tokio::time::sleep(Duration::from_millis(20)).await;
        let (_, body) = get(&app, "/api/stats").await;
        total = body.get("total").and_then(Value::as_u64);
        if total == Some(1) {
            break;
        }
    }
    assert_eq!(total, Some(1));
    let (_, body) = get(&app, "/api/stats").await;
    assert_eq!(body.get("averagePrice").and_then(Value::as_f64), Some(30.0));
}

#[tokio::test]
async fn test_unknown_route() {
    let dir = TempDir::new().unwrap();
    let (_backend, app) = backend(&dir, &mock_items()).await;

    let (status, body) = get(&app, "/api/unknown").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(message(&body), Some("Route not found"));
}

#[tokio::test]
async fn test_unreadable_data_file_is_server_error() {
    let dir = TempDir::new().unwrap();
    let (_backend, app) = backend(&dir, &mock_items()).await;
    std::fs::write(dir.path().join("items.json"), "{ not an array").unwrap();

    let (status, body) = get(&app, "/api/items").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(message(&body), Some("Unable to read data file"));
}
