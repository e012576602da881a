//! Shared test helpers for API tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;
use tower::ServiceExt;
use url::Url;

use cerber_api::{AppState, build_router};
use cerber_auth::TokenEngine;
use cerber_core::crypto::TrustAnchor;
use cerber_core::types::{Group, User};
use cerber_zone::{MemoryProvider, StaticZone, ZoneDescriptor, ZoneRegistry};

pub const REALM: &str = "cerber";
const ZONE_CRT: &[u8] = include_bytes!("../fixtures/certs/zone.crt");
const ZONE_KEY: &[u8] = include_bytes!("../fixtures/certs/zone.key");

/// Response captured from the router.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Engine behind the router, for minting tokens directly
    pub engine: TokenEngine,
}

impl TestApp {
    /// Router over one memory provider serving the `registry` zone and a
    /// long-lived `ci` zone with a one hour refresh ceiling.
    pub async fn new() -> Self {
        let mut descriptor = ZoneDescriptor {
            name: "registry".to_string(),
            description: "Docker registry".to_string(),
            timeout: Some(Duration::from_secs(300)),
            max_refresh: Duration::from_secs(3600),
            hashing: "sha256".to_string(),
            groups: vec![
                Group::new("dev", ["library/app:push", "library/app:pull"]),
                Group::new("ops", ["library/db:pull"]),
            ],
            users: vec![User::new(
                "alice",
                // sha256("secret")
                "2bb80d537b1da3e38bd30361aa855686bde0eacd7162fef6a25fe97bf527a25b",
                ["dev", "ops"],
            )],
            ..Default::default()
        };
        descriptor.sign.method = "RS256".to_string();

        let mut ci = ZoneDescriptor {
            name: "ci".to_string(),
            timeout: Some(Duration::from_secs(3 * 3600)),
            max_refresh: Duration::from_secs(3600),
            hashing: "none".to_string(),
            ..Default::default()
        };
        ci.sign.method = "RS256".to_string();

        let anchor = TrustAnchor::from_pem(ZONE_CRT, ZONE_KEY).expect("fixture anchor");
        let registry_zone = StaticZone::new(descriptor, anchor.clone()).expect("fixture zone");
        let ci_zone = StaticZone::new(ci, anchor).expect("fixture zone");

        let provider = MemoryProvider::new(Url::parse("memory://test").expect("url"))
            .with_zone(Arc::new(registry_zone))
            .with_zone(Arc::new(ci_zone));
        let mut registry = ZoneRegistry::new();
        registry.add_provider(Arc::new(provider));
        let registry = Arc::new(registry);
        assert_eq!(registry.start_all().await, 1);

        let engine = TokenEngine::new(REALM, registry);
        let router = build_router(AppState::new(engine.clone()));
        Self { router, engine }
    }

    /// Sends a GET with an optional `Authorization` header value.
    pub async fn get(&self, uri: &str, authorization: Option<String>) -> TestResponse {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(value) = authorization {
            builder = builder.header("authorization", value);
        }
        let request = builder.body(Body::empty()).expect("request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("response");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Logs alice in and returns the token.
    pub async fn login(&self) -> String {
        let response = self
            .get("/v1/login?service=registry", Some(basic("alice", "secret")))
            .await;
        assert_eq!(response.status, StatusCode::OK);
        response.body["token"]
            .as_str()
            .expect("token")
            .to_string()
    }
}

pub fn basic(user: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{user}:{password}")))
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
