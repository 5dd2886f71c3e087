//! Endpoint behaviour, driven through the full middleware stack in-process.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use hardened_api::auth::{CredentialHasher, CredentialRecord, CredentialStore, StoreError};
use serde_json::json;

mod common;
use common::{get, post_json, post_raw, send, test_app, PASSWORD, TEST_SECRET, USERNAME};

fn error(message: &str) -> serde_json::Value {
    json!({"status": "error", "message": message})
}

// ---------------------------------------------------------------------------
// /login

#[tokio::test]
async fn test_login_success() {
    let app = test_app().await;
    let res = post_json(&app.router, "/login", json!({"username": USERNAME, "password": PASSWORD})).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json, json!({"status": "success", "user": USERNAME}));
}

#[tokio::test]
async fn test_login_does_not_reveal_which_part_was_wrong() {
    let app = test_app().await;

    let wrong_password =
        post_json(&app.router, "/login", json!({"username": USERNAME, "password": "nope"})).await;
    let unknown_users = ["bob", "ALICE", "alice ", "' OR '1'='1", "alice'--"];

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.json, error("Invalid credentials"));

    for username in unknown_users {
        let res = post_json(&app.router, "/login", json!({"username": username, "password": PASSWORD})).await;
        assert_eq!(res.status, wrong_password.status, "{username}");
        assert_eq!(res.raw, wrong_password.raw, "{username}");
    }
}

#[tokio::test]
async fn test_login_missing_fields() {
    let app = test_app().await;
    for body in [
        json!({}),
        json!({"username": USERNAME}),
        json!({"password": PASSWORD}),
        json!({"username": "", "password": PASSWORD}),
        json!({"username": USERNAME, "password": ""}),
    ] {
        let res = post_json(&app.router, "/login", body.clone()).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(res.json, error("Missing username or password"));
    }
}

#[tokio::test]
async fn test_login_oversized_fields() {
    let app = test_app().await;

    let long_name = "a".repeat(51);
    let res = post_json(&app.router, "/login", json!({"username": long_name, "password": PASSWORD})).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json, error("Invalid input format"));

    let long_password = "p".repeat(256);
    let res = post_json(&app.router, "/login", json!({"username": USERNAME, "password": long_password})).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json, error("Invalid input format"));
}

struct FailingStore;

#[async_trait]
impl CredentialStore for FailingStore {
    async fn find_password_hash(&self, _username: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Poisoned)
    }

    async fn insert(&self, _record: &CredentialRecord) -> Result<(), StoreError> {
        Err(StoreError::Poisoned)
    }
}

#[tokio::test]
async fn test_login_store_failure_is_generic() {
    let hasher = CredentialHasher::new(&common::fast_hashing()).unwrap();
    let app = common::app_with_store(Arc::new(FailingStore), hasher);

    let res = post_json(&app.router, "/login", json!({"username": USERNAME, "password": PASSWORD})).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.json, error("Authentication failed"));
    assert!(!res.raw.contains("poisoned"));
}

// ---------------------------------------------------------------------------
// /ping

#[tokio::test]
async fn test_ping_is_always_forbidden() {
    let app = test_app().await;
    for body in ["", "{}", r#"{"host": "127.0.0.1; cat /etc/passwd"}"#, "not json"] {
        let res = post_raw(&app.router, "/ping", body).await;
        assert_eq!(res.status, StatusCode::FORBIDDEN, "{body}");
        assert_eq!(res.json, error("Endpoint not available"));
    }
}

// ---------------------------------------------------------------------------
// /compute

#[tokio::test]
async fn test_compute() {
    let app = test_app().await;

    let res = post_json(&app.router, "/compute", json!({"expression": "2+2"})).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json["result"], json!(4));
    assert_eq!(res.json["status"], json!("success"));

    let res = post_json(&app.router, "/compute", json!({"expression": "(1 + 2) * 3 - 4 / 8"})).await;
    assert_eq!(res.json["result"], json!(8.5));
}

#[tokio::test]
async fn test_compute_defaults_to_one_plus_one() {
    let app = test_app().await;
    for body in ["", "{}"] {
        let res = post_raw(&app.router, "/compute", body).await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.json["result"], json!(2));
    }
}

#[tokio::test]
async fn test_compute_rejections() {
    let app = test_app().await;
    for expression in [
        "10/0",
        "__import__('os')",
        "__import__('os').system('id')",
        "2**100",
        "1 +",
        "(((",
        "abs(-1)",
        "1e3",
        "007",
        "",
    ] {
        let res = post_json(&app.router, "/compute", json!({"expression": expression})).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "{expression}");
        assert_eq!(res.json, error("Invalid expression"));
    }
}

#[tokio::test]
async fn test_compute_null_expression_is_rejected() {
    let app = test_app().await;
    let res = post_json(&app.router, "/compute", json!({"expression": null})).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json, error("Invalid expression"));
}

// ---------------------------------------------------------------------------
// /hash

#[tokio::test]
async fn test_hash_is_salted_and_verifiable() {
    let app = test_app().await;

    let first = post_json(&app.router, "/hash", json!({"password": "admin"})).await;
    let second = post_json(&app.router, "/hash", json!({"password": "admin"})).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(second.status, StatusCode::OK);

    let first = first.json["hashed"].as_str().unwrap().to_owned();
    let second = second.json["hashed"].as_str().unwrap().to_owned();
    assert_ne!(first, second);
    assert!(first.starts_with("$argon2id$"));
    assert!(app.hasher.verify("admin", &first).unwrap());
    assert!(app.hasher.verify("admin", &second).unwrap());
}

#[tokio::test]
async fn test_hash_defaults_to_admin() {
    let app = test_app().await;
    let res = post_json(&app.router, "/hash", json!({})).await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(app.hasher.verify("admin", res.json["hashed"].as_str().unwrap()).unwrap());
}

#[tokio::test]
async fn test_hash_null_password_is_rejected() {
    let app = test_app().await;
    let res = post_json(&app.router, "/hash", json!({"password": null})).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json, error("Invalid password"));
}

#[tokio::test]
async fn test_hash_length_bounds() {
    let app = test_app().await;
    for password in [String::new(), "x".repeat(256)] {
        let res = post_json(&app.router, "/hash", json!({"password": password})).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(res.json, error("Invalid password"));
    }

    let res = post_json(&app.router, "/hash", json!({"password": "x".repeat(255)})).await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(!res.raw.contains(&"x".repeat(255)));
}

// ---------------------------------------------------------------------------
// /readfile

#[tokio::test]
async fn test_readfile() {
    let app = test_app().await;

    let res = post_json(&app.router, "/readfile", json!({"filename": "hello.txt"})).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json, json!({"status": "success", "content": "hello from the sandbox"}));

    let res = post_json(&app.router, "/readfile", json!({"filename": "nested/inner.txt"})).await;
    assert_eq!(res.json["content"], json!("inner"));
}

#[tokio::test]
async fn test_readfile_blocks_escapes() {
    let app = test_app().await;
    let absolute = app.root.path().join("secret.txt");

    for filename in [
        "../secret.txt",
        "../../etc/passwd",
        "../../../../../../etc/passwd",
        "nested/../../secret.txt",
        "../data2/sibling.txt",
        "/etc/passwd",
        absolute.to_str().unwrap(),
    ] {
        let res = post_json(&app.router, "/readfile", json!({"filename": filename})).await;
        assert_eq!(res.status, StatusCode::FORBIDDEN, "{filename}");
        assert_eq!(res.json, error("Unauthorized"));
        assert!(!res.raw.contains("top secret"));
        assert!(!res.raw.contains("sibling"));
    }
}

#[cfg(unix)]
#[tokio::test]
async fn test_readfile_blocks_symlink_escape() {
    let app = test_app().await;
    let base = app.root.path().join("data");
    std::os::unix::fs::symlink(app.root.path().join("secret.txt"), base.join("innocent.txt")).unwrap();

    let res = post_json(&app.router, "/readfile", json!({"filename": "innocent.txt"})).await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert!(!res.raw.contains("top secret"));

    // Existence of files outside the base is not observable through a link.
    std::os::unix::fs::symlink(app.root.path().join("data2"), base.join("link")).unwrap();
    for filename in ["link/../secret.txt", "link/../absent.txt"] {
        let res = post_json(&app.router, "/readfile", json!({"filename": filename})).await;
        assert_eq!(res.status, StatusCode::FORBIDDEN, "{filename}");
        assert_eq!(res.json, error("Unauthorized"));
    }
}

#[tokio::test]
async fn test_readfile_errors() {
    let app = test_app().await;
    let base = app.root.path().join("data");

    let res = post_json(&app.router, "/readfile", json!({})).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json, error("Missing filename"));

    let res = post_json(&app.router, "/readfile", json!({"filename": "absent.txt"})).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.json, error("File not found"));

    let res = post_json(&app.router, "/readfile", json!({"filename": "nested"})).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.json, error("Read failed"));
    assert!(!res.raw.contains(base.to_str().unwrap()));
}

// ---------------------------------------------------------------------------
// /debug, /hello, dispatcher

#[tokio::test]
async fn test_debug_is_static() {
    let app = test_app().await;
    let res = get(&app.router, "/debug").await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        res.json,
        json!({"debug": false, "status": "healthy", "version": env!("CARGO_PKG_VERSION")})
    );
    assert!(!res.raw.contains(TEST_SECRET));
    assert!(!res.raw.contains(app.root.path().to_str().unwrap()));
}

#[tokio::test]
async fn test_hello() {
    let app = test_app().await;
    let res = get(&app.router, "/hello").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json, json!({"message": "Welcome to the DevSecOps vulnerable API"}));
}

#[tokio::test]
async fn test_unknown_route_and_wrong_method() {
    let app = test_app().await;

    let res = get(&app.router, "/admin").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.json, error("Not found"));

    let res = get(&app.router, "/login").await;
    assert_eq!(res.status, StatusCode::METHOD_NOT_ALLOWED);

    let res = post_json(&app.router, "/debug", json!({})).await;
    assert_eq!(res.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_malformed_bodies() {
    let app = test_app().await;
    for path in ["/login", "/compute", "/hash", "/readfile"] {
        for body in ["{", "[]", r#"{"expression": 5, "password": 5, "filename": 5, "username": 5}"#] {
            let res = post_raw(&app.router, path, body).await;
            assert_eq!(res.status, StatusCode::BAD_REQUEST, "{path} {body}");
            assert_eq!(res.json, error("Invalid request body"));
        }
    }
}

#[tokio::test]
async fn test_oversized_body() {
    let app = test_app().await;
    let huge = json!({"expression": "1+".repeat(64 * 1024)}).to_string();
    let res = post_raw(&app.router, "/compute", huge).await;
    assert_eq!(res.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(res.json, error("Payload too large"));
}

#[tokio::test]
async fn test_request_id_and_security_headers() {
    let app = test_app().await;

    let res = get(&app.router, "/hello").await;
    assert!(res.headers.contains_key("x-request-id"));
    assert_eq!(res.headers["x-content-type-options"], "nosniff");
    assert_eq!(res.headers["x-frame-options"], "DENY");
    assert_eq!(res.headers["cache-control"], "no-store");

    let request = Request::builder()
        .uri("/hello")
        .header("x-request-id", "caller-chosen-id")
        .body(Body::empty())
        .unwrap();
    let res = send(&app.router, request).await;
    assert_eq!(res.headers["x-request-id"], "caller-chosen-id");
}
