//! Authentication integration tests.
//!
//! Tests verify:
//! - Bearer and bare tokens are accepted
//! - Missing, wrong and mis-prefixed credentials get 401 on every endpoint
//! - Rejected requests never reach the storage backend
//! - The public health option only opens GET /health

use axum::body::Body;
use axum::http::{HeaderValue, Method, Request, StatusCode};
use serde_json::json;

use presign_gateway::RouterConfig;

use super::test_utils::{
    bearer, json_request, send, test_router, test_router_with_config, MockObjectStore,
    TEST_API_KEY,
};

/// Every endpoint with a body that would otherwise succeed.
const ENDPOINTS: &[(&str, &str, &str)] = &[
    ("POST", "/presign", r#"{"key": "obj1"}"#),
    ("DELETE", "/delete", r#"{"key": "obj1"}"#),
    ("GET", "/health", ""),
];

fn method(name: &str) -> Method {
    Method::from_bytes(name.as_bytes()).unwrap()
}

// =============================================================================
// Accepted Credentials
// =============================================================================

#[tokio::test]
async fn test_bearer_token_accepted() {
    for (m, uri, body) in ENDPOINTS {
        let store = MockObjectStore::new();
        let router = test_router(store.clone());

        let request = json_request(method(m), uri, body, Some(&bearer(TEST_API_KEY)));
        let (status, _) = send(router, request).await;

        assert_eq!(status, StatusCode::OK, "{} {}", m, uri);
    }
}

#[tokio::test]
async fn test_bare_token_accepted() {
    for (m, uri, body) in ENDPOINTS {
        let router = test_router(MockObjectStore::new());

        let request = json_request(method(m), uri, body, Some(TEST_API_KEY));
        let (status, _) = send(router, request).await;

        assert_eq!(status, StatusCode::OK, "{} {}", m, uri);
    }
}

#[tokio::test]
async fn test_health_with_valid_credential() {
    let router = test_router(MockObjectStore::new());

    let request = json_request(Method::GET, "/health", "", Some(&bearer(TEST_API_KEY)));
    let (status, body) = send(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ok": true}));
}

// =============================================================================
// Rejected Credentials
// =============================================================================

async fn assert_rejected_everywhere(auth: Option<&str>) {
    for (m, uri, body) in ENDPOINTS {
        let store = MockObjectStore::new();
        let router = test_router(store.clone());

        let request = json_request(method(m), uri, body, auth);
        let (status, json) = send(router, request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {} {:?}", m, uri, auth);
        assert_eq!(
            json,
            json!({
                "error": "Unauthorized",
                "message": "Valid Authorization header required"
            })
        );
        assert_eq!(store.call_count(), 0, "{} {} {:?}", m, uri, auth);
    }
}

#[tokio::test]
async fn test_missing_header_rejected() {
    assert_rejected_everywhere(None).await;
}

#[tokio::test]
async fn test_wrong_token_rejected() {
    assert_rejected_everywhere(Some("Bearer not-the-key")).await;
    assert_rejected_everywhere(Some("not-the-key")).await;
}

#[tokio::test]
async fn test_empty_token_rejected() {
    assert_rejected_everywhere(Some("")).await;
    assert_rejected_everywhere(Some("Bearer ")).await;
}

#[tokio::test]
async fn test_scheme_prefix_is_case_sensitive() {
    let lowercase = format!("bearer {}", TEST_API_KEY);
    assert_rejected_everywhere(Some(&lowercase)).await;
}

#[tokio::test]
async fn test_other_scheme_rejected() {
    let basic = format!("Basic {}", TEST_API_KEY);
    assert_rejected_everywhere(Some(&basic)).await;
}

#[tokio::test]
async fn test_non_utf8_header_rejected() {
    let store = MockObjectStore::new();
    let router = test_router(store.clone());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/presign")
        .header(
            "authorization",
            HeaderValue::from_bytes(b"Bearer \xff\xfe").unwrap(),
        )
        .body(Body::from(r#"{"key": "obj1"}"#))
        .unwrap();
    let (status, _) = send(router, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(store.call_count(), 0);
}

#[tokio::test]
async fn test_auth_checked_before_body_validation() {
    let store = MockObjectStore::new();
    let router = test_router(store.clone());

    let request = json_request(Method::POST, "/presign", "{}", None);
    let (status, _) = send(router, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_path_requires_auth() {
    let router = test_router(MockObjectStore::new());

    let request = json_request(Method::GET, "/anything", "", None);
    let (status, _) = send(router, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Public Health
// =============================================================================

#[tokio::test]
async fn test_public_health_skips_auth() {
    let config = RouterConfig::new(TEST_API_KEY).with_public_health(true);
    let router = test_router_with_config(MockObjectStore::new(), config);

    let request = json_request(Method::GET, "/health", "", None);
    let (status, body) = send(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ok": true}));
}

#[tokio::test]
async fn test_public_health_keeps_data_routes_protected() {
    for (m, uri, body) in &ENDPOINTS[..2] {
        let store = MockObjectStore::new();
        let config = RouterConfig::new(TEST_API_KEY).with_public_health(true);
        let router = test_router_with_config(store.clone(), config);

        let request = json_request(method(m), uri, body, None);
        let (status, _) = send(router, request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {}", m, uri);
        assert_eq!(store.call_count(), 0);

        let config = RouterConfig::new(TEST_API_KEY).with_public_health(true);
        let router = test_router_with_config(MockObjectStore::new(), config);
        let request = json_request(method(m), uri, body, Some(&bearer(TEST_API_KEY)));
        let (status, _) = send(router, request).await;

        assert_eq!(status, StatusCode::OK, "{} {}", m, uri);
    }
}

#[tokio::test]
async fn test_public_health_other_methods_require_auth() {
    for m in [Method::POST, Method::DELETE, Method::PUT] {
        let config = RouterConfig::new(TEST_API_KEY).with_public_health(true);
        let router = test_router_with_config(MockObjectStore::new(), config);

        let request = json_request(m.clone(), "/health", "", None);
        let (status, body) = send(router, request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", m);
        assert_eq!(body["error"], "Unauthorized");

        let config = RouterConfig::new(TEST_API_KEY).with_public_health(true);
        let router = test_router_with_config(MockObjectStore::new(), config);

        let request = json_request(m.clone(), "/health", "", Some(&bearer(TEST_API_KEY)));
        let (status, _) = send(router, request).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{}", m);
    }
}

#[tokio::test]
async fn test_public_health_wrong_method_matches_gated_mode() {
    let router = test_router(MockObjectStore::new());
    let request = json_request(Method::POST, "/health", "", None);
    let (gated_status, _) = send(router, request).await;

    let config = RouterConfig::new(TEST_API_KEY).with_public_health(true);
    let router = test_router_with_config(MockObjectStore::new(), config);
    let request = json_request(Method::POST, "/health", "", None);
    let (public_status, _) = send(router, request).await;

    assert_eq!(gated_status, StatusCode::UNAUTHORIZED);
    assert_eq!(public_status, gated_status);
}
