//! Integration tests for the HTTP API.

mod helpers;

use axum::http::StatusCode;
use axum::http::header::WWW_AUTHENTICATE;
use chrono::{TimeDelta, Utc};
use serde_json::{Map, json};

use helpers::{REALM, TestApp, basic, bearer};

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new().await;
    let response = app
        .get(
            "/v1/login?service=registry&scope=repository:library/app:pull",
            Some(basic("alice", "secret")),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let token = response.body["token"].as_str().expect("token");

    let claims = app.engine.verify(token).expect("verify");
    assert_eq!(claims.sub, "alice");
    assert_eq!(claims.aud, "registry");
    assert_eq!(claims.iss, REALM);
    assert_eq!(
        serde_json::to_value(&claims.access).expect("access"),
        json!([
            {"type": "repository", "name": "library/app", "actions": ["pull", "push"]},
            {"type": "repository", "name": "library/db", "actions": ["pull"]},
        ])
    );
}

#[tokio::test]
async fn test_login_service_from_host_header() {
    let app = TestApp::new().await;
    let request = axum::http::Request::builder()
        .uri("/v1/login")
        .header("host", "registry")
        .header("authorization", basic("alice", "secret"))
        .body(axum::body::Body::empty())
        .expect("request");

    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new().await;
    let response = app
        .get("/v1/login?service=registry", Some(basic("alice", "wrong")))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    // base64("cerber")
    assert_eq!(response.headers[WWW_AUTHENTICATE], "Basic realm=Y2VyYmVy");
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_login_unknown_zone_or_user() {
    let app = TestApp::new().await;

    let response = app
        .get("/v1/login?service=npm", Some(basic("alice", "secret")))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .get("/v1/login?service=registry", Some(basic("mallory", "secret")))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_requires_basic_auth() {
    let app = TestApp::new().await;
    let response = app.get("/v1/login?service=registry", None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers[WWW_AUTHENTICATE], "Basic realm=Y2VyYmVy");
}

#[tokio::test]
async fn test_validate_token() {
    let app = TestApp::new().await;
    let token = app.login().await;

    let response = app.get("/v1/token/validate", Some(bearer(&token))).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["sub"], "alice");
    assert_eq!(response.body["aud"], "registry");
    assert!(response.body["orig_iat"].is_i64());
}

#[tokio::test]
async fn test_validate_rejects_bad_tokens() {
    let app = TestApp::new().await;

    let response = app.get("/v1/token/validate", None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers[WWW_AUTHENTICATE], "JWT realm=Y2VyYmVy");

    let response = app
        .get("/v1/token/validate", Some(bearer("not.a.token")))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers[WWW_AUTHENTICATE], "JWT realm=Y2VyYmVy");
}

#[tokio::test]
async fn test_refresh_token() {
    let app = TestApp::new().await;
    let token = app.login().await;
    let original = app.engine.verify(&token).expect("verify");

    let response = app.get("/v1/token/refresh", Some(bearer(&token))).await;
    assert_eq!(response.status, StatusCode::OK);

    let refreshed = response.body["token"].as_str().expect("token");
    let claims = app.engine.verify(refreshed).expect("verify refreshed");
    assert_eq!(claims.sub, original.sub);
    assert_eq!(claims.orig_iat, original.orig_iat);
    assert_eq!(claims.access, original.access);
}

#[tokio::test]
async fn test_refresh_past_window() {
    let app = TestApp::new().await;
    // Still valid, but first issued beyond the one hour refresh ceiling.
    let token = app
        .engine
        .issue_at("ci", "alice", Vec::new(), Map::new(), Utc::now() - TimeDelta::hours(2))
        .expect("issue");

    let response = app.get("/v1/token/validate", Some(bearer(&token))).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.get("/v1/token/refresh", Some(bearer(&token))).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers[WWW_AUTHENTICATE], "JWT realm=Y2VyYmVy");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let response = app.get("/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["providers"][0]["url"], "memory://test");
    assert_eq!(response.body["providers"][0]["online"], true);
    assert!(response.headers.contains_key("x-request-id"));
}
