//! HTTP API Tests
//!
//! Drives the full router (auth layer, routes, fallback) over a file-backed
//! store without binding a socket.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use momo_ledger::auth::crypto::encode_basic;
use momo_ledger::auth::BasicCredentials;
use momo_ledger::http_server::build_router;
use momo_ledger::persistence::{JsonFileGateway, PersistenceGateway};
use momo_ledger::store::TransactionStore;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

// =============================================================================
// Test Utilities
// =============================================================================

struct TestApp {
    _dir: TempDir,
    data_file: std::path::PathBuf,
    router: Router,
}

fn test_app() -> TestApp {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let data_file = dir.path().join("transactions.json");
    let store = TransactionStore::open(JsonFileGateway::new(&data_file)).unwrap();
    let router = build_router(
        Arc::new(store),
        Arc::new(BasicCredentials::new("admin", "secret")),
        "MoMo API",
    );
    TestApp {
        _dir: dir,
        data_file,
        router,
    }
}

fn auth_header() -> String {
    format!("Basic {}", encode_basic("admin", "secret"))
}

async fn send(
    app: &TestApp,
    method: Method,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, auth_header());
    if body.is_some() {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
    }
    let request = builder
        .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &TestApp, body: &str) -> (StatusCode, Value) {
    send(app, Method::POST, "/transactions", Some(body)).await
}

fn transfer(amount: u64, timestamp: &str) -> String {
    json!({
        "type": "transfer",
        "amount": amount,
        "sender": "A",
        "receiver": "B",
        "timestamp": timestamp
    })
    .to_string()
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_missing_authorization_is_challenged() {
    let app = test_app();
    let request = Request::builder()
        .uri("/transactions")
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers()[header::WWW_AUTHENTICATE],
        "Basic realm=\"MoMo API\""
    );

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value, json!({"error": "Unauthorized"}));
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let app = test_app();
    let request = Request::builder()
        .uri("/transactions")
        .header(header::AUTHORIZATION, format!("Basic {}", encode_basic("admin", "guess")))
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));
}

#[tokio::test]
async fn test_unknown_path_requires_auth_first() {
    let app = test_app();
    let request = Request::builder()
        .uri("/nowhere")
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_rejected_create_does_not_write() {
    let app = test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/transactions")
        .body(Body::from(transfer(1, "t")))
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(!app.data_file.exists());
}

// =============================================================================
// CRUD
// =============================================================================

#[tokio::test]
async fn test_create_delete_create_sequence() {
    let app = test_app();

    let (status, first) = create(&app, &transfer(100, "2023-01-01T00:00:00")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["id"], 1);
    assert_eq!(first["amount"], 100);

    let (status, second) = create(&app, &transfer(50, "2023-01-01T00:00:00")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(second["id"], 2);

    let (status, body) = send(&app, Method::DELETE, "/transactions/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, list) = send(&app, Method::GET, "/transactions", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<u64> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![2]);

    let (_, third) = create(&app, &transfer(10, "2023-01-02")).await;
    assert_eq!(third["id"], 3);
}

#[tokio::test]
async fn test_get_existing_and_missing() {
    let app = test_app();
    create(&app, &transfer(100, "t")).await;

    let (status, record) = send(&app, Method::GET, "/transactions/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["sender"], "A");

    let (status, body) = send(&app, Method::GET, "/transactions/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Transaction not found"}));
}

#[tokio::test]
async fn test_client_supplied_id_is_ignored() {
    let app = test_app();
    let body = json!({
        "id": 500,
        "type": "deposit",
        "amount": 12.5,
        "sender": "bank",
        "receiver": "me",
        "timestamp": "2023-02-01",
        "reference": "X-1"
    })
    .to_string();

    let (status, record) = create(&app, &body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(record["id"], 1);
    assert_eq!(record["reference"], "X-1");
}

#[tokio::test]
async fn test_create_validation_errors() {
    let app = test_app();

    let (status, body) = create(&app, r#"{"type": "transfer"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Missing fields"}));

    let (status, body) = create(&app, "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid JSON"}));

    let (status, body) = create(&app, "[1, 2]").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid JSON"}));

    let (_, list) = send(&app, Method::GET, "/transactions", None).await;
    assert_eq!(list, json!([]));
    assert!(!app.data_file.exists());
}

#[tokio::test]
async fn test_update_merges_fields() {
    let app = test_app();
    create(&app, &transfer(100, "t")).await;

    let (status, record) = send(
        &app,
        Method::PUT,
        "/transactions/1",
        Some(r#"{"id": 7, "amount": 150, "note": "corrected"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["id"], 1);
    assert_eq!(record["amount"], 150);
    assert_eq!(record["note"], "corrected");
    assert_eq!(record["receiver"], "B");

    let (_, fetched) = send(&app, Method::GET, "/transactions/1", None).await;
    assert_eq!(fetched, record);
}

#[tokio::test]
async fn test_update_errors() {
    let app = test_app();
    create(&app, &transfer(100, "t")).await;

    let (status, _) = send(&app, Method::PUT, "/transactions/2", Some(r#"{"amount": 1}"#)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::PUT, "/transactions/1", Some("nope")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid JSON"}));

    let (status, body) = send(&app, Method::PUT, "/transactions/1", Some("[1]")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid JSON"}));

    let (status, body) = send(&app, Method::PUT, "/transactions/1", Some(r#"{"amount": "lots"}"#))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid field: amount"}));
}

#[tokio::test]
async fn test_update_unknown_id_is_reported_before_body() {
    let app = test_app();

    let (status, body) = send(&app, Method::PUT, "/transactions/42", Some("nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Transaction not found"}));

    let (status, _) = send(&app, Method::PUT, "/transactions/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(!app.data_file.exists());
}

#[tokio::test]
async fn test_delete_missing() {
    let app = test_app();
    let (status, body) = send(&app, Method::DELETE, "/transactions/4", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Transaction not found"}));
}

// =============================================================================
// Routing
// =============================================================================

#[tokio::test]
async fn test_invalid_ids() {
    let app = test_app();
    for method in [Method::GET, Method::PUT, Method::DELETE] {
        let body = (method == Method::PUT).then_some("{}");
        let (status, value) = send(&app, method, "/transactions/abc", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value, json!({"error": "Invalid ID"}));
    }
}

#[tokio::test]
async fn test_unknown_endpoints() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/accounts", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Endpoint not found"}));

    let (status, body) = send(&app, Method::POST, "/transactions/1", Some("{}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Endpoint not found"}));

    let (status, _) = send(&app, Method::DELETE, "/transactions", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Range queries
// =============================================================================

#[tokio::test]
async fn test_timestamp_range_is_inclusive_and_lexical() {
    let app = test_app();
    for day in 1..=6 {
        let ts = format!("2023-01-0{}", day);
        create(&app, &transfer(day, &ts)).await;
    }
    create(&app, &transfer(7, "2023-01-05T10:00:00")).await;

    let uri = "/transactions?start=2023-01-02&end=2023-01-05";
    let (status, list) = send(&app, Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let stamps: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["timestamp"].as_str().unwrap())
        .collect();
    assert_eq!(stamps, vec!["2023-01-02", "2023-01-03", "2023-01-04", "2023-01-05"]);

    let (_, list) = send(&app, Method::GET, "/transactions?start=2023-01-05", None).await;
    assert_eq!(list.as_array().unwrap().len(), 3);
}

// =============================================================================
// Durability
// =============================================================================

#[tokio::test]
async fn test_every_mutation_reaches_disk() {
    let app = test_app();
    let gateway = JsonFileGateway::new(&app.data_file);

    create(&app, &transfer(1, "t1")).await;
    create(&app, &transfer(2, "t2")).await;
    assert_eq!(gateway.load().unwrap().len(), 2);

    send(&app, Method::PUT, "/transactions/2", Some(r#"{"sender": "Z"}"#)).await;
    assert_eq!(gateway.load().unwrap()[1].sender, "Z");

    send(&app, Method::DELETE, "/transactions/1", None).await;
    let on_disk = gateway.load().unwrap();
    assert_eq!(on_disk.len(), 1);
    assert_eq!(on_disk[0].id, 2);
}
