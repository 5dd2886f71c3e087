//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use hardened_api::auth::{CredentialHasher, CredentialRecord, CredentialStore, MemoryCredentialStore};
use hardened_api::config::{AppConfig, HashingConfig, SecretKey};
use hardened_api::HttpServer;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret-key-7f3a";
pub const USERNAME: &str = "alice";
pub const PASSWORD: &str = "wonderland";

/// Cheapest Argon2 parameters the crate accepts.
pub fn fast_hashing() -> HashingConfig {
    HashingConfig {
        memory_kib: 8,
        iterations: 1,
        parallelism: 1,
    }
}

/// A data directory laid out as:
/// ```text
/// root/
///   secret.txt
///   data2/sibling.txt
///   data/               ← base_dir
///     hello.txt
///     nested/inner.txt
/// ```
pub fn data_dir() -> TempDir {
    let root = tempfile::tempdir().unwrap();
    let base = root.path().join("data");
    std::fs::create_dir_all(base.join("nested")).unwrap();
    std::fs::write(base.join("hello.txt"), "hello from the sandbox").unwrap();
    std::fs::write(base.join("nested/inner.txt"), "inner").unwrap();
    std::fs::create_dir_all(root.path().join("data2")).unwrap();
    std::fs::write(root.path().join("data2/sibling.txt"), "sibling").unwrap();
    std::fs::write(root.path().join("secret.txt"), "top secret").unwrap();
    root
}

/// Config pointing at `root/data` with a known secret key.
pub fn test_config(root: &TempDir) -> AppConfig {
    let mut config = AppConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.files.base_dir = root.path().join("data");
    config.hashing = fast_hashing();
    config.secret_key = SecretKey::new(TEST_SECRET);
    config
}

pub struct TestApp {
    pub router: Router,
    pub hasher: CredentialHasher,
    pub root: TempDir,
}

/// In-process app with `alice` / `wonderland` seeded in a memory store.
pub async fn test_app() -> TestApp {
    let store = Arc::new(MemoryCredentialStore::new());
    let hasher = CredentialHasher::new(&fast_hashing()).unwrap();
    store
        .insert(&CredentialRecord {
            username: USERNAME.into(),
            password_hash: hasher.hash(PASSWORD).unwrap(),
        })
        .await
        .unwrap();
    app_with_store(store, hasher)
}

pub fn app_with_store(store: Arc<dyn CredentialStore>, hasher: CredentialHasher) -> TestApp {
    let root = data_dir();
    let server = HttpServer::new(test_config(&root), store).unwrap();
    TestApp {
        router: server.router(),
        hasher,
        root,
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub raw: String,
    pub json: Value,
}

pub async fn send(router: &Router, request: Request<Body>) -> TestResponse {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let raw = String::from_utf8(bytes.to_vec()).unwrap();
    let json = serde_json::from_str(&raw).unwrap_or(Value::Null);
    TestResponse { status, headers, raw, json }
}

pub async fn post_raw(router: &Router, path: &str, body: impl Into<Body>) -> TestResponse {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();
    send(router, request).await
}

pub async fn post_json(router: &Router, path: &str, body: Value) -> TestResponse {
    post_raw(router, path, body.to_string()).await
}

pub async fn get(router: &Router, path: &str) -> TestResponse {
    let request = Request::builder().uri(path).body(Body::empty()).unwrap();
    send(router, request).await
}
