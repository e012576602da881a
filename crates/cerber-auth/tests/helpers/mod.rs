//! Shared fixtures for cerber-auth integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use cerber_auth::TokenEngine;
use cerber_core::crypto::TrustAnchor;
use cerber_core::traits::{Zone, ZoneProvider};
use cerber_core::types::{Group, User};
use cerber_zone::{MemoryProvider, StaticZone, ZoneDescriptor, ZoneRegistry};
use url::Url;

pub const REALM: &str = "cerber-test";
pub const ZONE_CRT: &[u8] = include_bytes!("../../../../tests/fixtures/certs/zone.crt");
pub const ZONE_KEY: &[u8] = include_bytes!("../../../../tests/fixtures/certs/zone.key");
pub const OTHER_KEY: &[u8] = include_bytes!("../../../../tests/fixtures/certs/other.key");

/// MD5 of "secret".
pub const SECRET_MD5: &str = "5ebe2294ecd0e0f08eab7690d2a6ee69";

/// Descriptor for the `registry` zone: md5 hashing, RS256, two users.
pub fn descriptor() -> ZoneDescriptor {
    let mut descriptor = ZoneDescriptor {
        name: "registry".to_string(),
        description: "Docker registry".to_string(),
        timeout: Some(Duration::from_secs(600)),
        max_refresh: Duration::from_secs(3600),
        hashing: "md5".to_string(),
        groups: vec![
            Group::new("dev", ["repoB:pull", "repoA:push"]),
            Group::new("qa", ["repoA:pull"]),
            Group::new("broken", ["repoNoColon"]),
        ],
        users: vec![
            User::new("alice", SECRET_MD5, ["dev", "qa"]),
            User::new("bob", SECRET_MD5, ["qa", "ghost"]),
            User::new("carol", SECRET_MD5, ["dev", "broken"]),
            User::new("dave", SECRET_MD5, Vec::<String>::new()),
        ],
        ..Default::default()
    };
    descriptor.sign.method = "RS256".to_string();
    descriptor
}

pub fn zone(descriptor: ZoneDescriptor) -> Arc<StaticZone> {
    let anchor = TrustAnchor::from_pem(ZONE_CRT, ZONE_KEY).expect("fixture anchor");
    Arc::new(StaticZone::new(descriptor, anchor).expect("fixture zone"))
}

/// Engine over a started memory provider serving the given zones.
pub async fn engine_with(zones: Vec<ZoneDescriptor>) -> TokenEngine {
    let zones = zones
        .into_iter()
        .map(|descriptor| zone(descriptor) as Arc<dyn Zone>)
        .collect();
    engine_over(zones).await
}

/// Engine over a started memory provider serving already-built zones.
pub async fn engine_over(zones: Vec<Arc<dyn Zone>>) -> TokenEngine {
    let mut provider = MemoryProvider::new(Url::parse("memory://test").expect("url"));
    for zone in zones {
        provider = provider.with_zone(zone);
    }
    provider.start().await.expect("start provider");

    let mut registry = ZoneRegistry::new();
    registry.add_provider(Arc::new(provider));
    TokenEngine::new(REALM, Arc::new(registry))
}

pub async fn engine() -> TokenEngine {
    engine_with(vec![descriptor()]).await
}
