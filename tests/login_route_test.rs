//! End-to-end checks of `POST /auth/login` against an on-disk SQLite store

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use credential_gate::{
    auth::{Account, Argon2Hasher, AuthState, SecretHasher, SqliteAccountStore},
    CredentialVerifier, HttpConfig, HttpServer,
};

fn fast_hasher() -> Argon2Hasher {
    Argon2Hasher::with_params(8, 1, 1).unwrap()
}

/// Database file with one account: a@b.com / abcdef
fn seeded_db(dir: &TempDir) -> (String, Account) {
    let path = dir.path().join("accounts.db").to_string_lossy().into_owned();
    let store = SqliteAccountStore::open_or_create(&path).unwrap();
    store.init_schema().unwrap();

    let account = Account::new("Ada", "a@b.com", fast_hasher().hash("abcdef").unwrap());
    store.insert_account(&account).unwrap();
    (path, account)
}

fn app(db_path: &str) -> Router {
    let store = SqliteAccountStore::open(db_path).unwrap();
    let verifier = CredentialVerifier::new(store, fast_hasher()).unwrap();
    HttpServer::new(HttpConfig::default(), Arc::new(AuthState::new(verifier))).router()
}

async fn post_login(app: Router, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_login_success_returns_account_without_hash() {
    let dir = TempDir::new().unwrap();
    let (path, account) = seeded_db(&dir);

    let (status, body) = post_login(
        app(&path),
        &json!({"email": "a@b.com", "password": "abcdef"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["account"]["id"], account.id);
    assert_eq!(body["account"]["email"], "a@b.com");
    assert_eq!(body["account"]["name"], "Ada");
    assert!(body["account"].get("password_hash").is_none());
    assert!(!body.to_string().contains("argon2"));
}

#[tokio::test]
async fn test_every_rejection_looks_the_same() {
    let dir = TempDir::new().unwrap();
    let (path, _) = seeded_db(&dir);

    let attempts = [
        json!({"email": "a@b.com", "password": "wrong12"}),
        json!({"email": "nobody@b.com", "password": "abcdef"}),
        json!({"email": "not-an-email", "password": "abcdef"}),
        json!({"email": "a@b.com", "password": "abc"}),
        json!({}),
    ];

    for attempt in attempts {
        let (status, body) = post_login(app(&path), &attempt.to_string()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "attempt: {}", attempt);
        assert_eq!(body, json!({"error": "Invalid credentials"}));
    }
}

#[tokio::test]
async fn test_store_failure_is_service_unavailable() {
    let dir = TempDir::new().unwrap();
    // no users table
    let path = dir.path().join("empty.db").to_string_lossy().into_owned();
    SqliteAccountStore::open_or_create(&path).unwrap();

    let (status, body) = post_login(
        app(&path),
        &json!({"email": "a@b.com", "password": "abcdef"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({"error": "Authentication service unavailable"}));
}

#[tokio::test]
async fn test_malformed_json_is_rejected_by_extractor() {
    let dir = TempDir::new().unwrap();
    let (path, _) = seeded_db(&dir);

    let (status, _) = post_login(app(&path), "email=a@b.com&password=abcdef").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_legacy_bcrypt_account_can_log_in() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("legacy.db").to_string_lossy().into_owned();
    let store = SqliteAccountStore::open_or_create(&path).unwrap();
    store.init_schema().unwrap();
    store
        .insert_account(&Account::new("Old", "old@b.com", bcrypt::hash("abcdef", 4).unwrap()))
        .unwrap();

    let (status, body) = post_login(
        app(&path),
        &json!({"email": "old@b.com", "password": "abcdef"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["account"]["email"], "old@b.com");
}

#[tokio::test]
async fn test_status_endpoint() {
    let dir = TempDir::new().unwrap();
    let (path, _) = seeded_db(&dir);

    let request = Request::builder()
        .uri("/api/status")
        .body(Body::empty())
        .unwrap();
    let response = app(&path).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
