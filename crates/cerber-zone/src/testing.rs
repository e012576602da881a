//! Zone builders shared by unit tests.

use std::sync::Arc;

use cerber_core::crypto::TrustAnchor;
use cerber_core::traits::Zone;

use crate::descriptor::ZoneDescriptor;
use crate::zone::StaticZone;

const ZONE_CRT: &[u8] = include_bytes!("../../../tests/fixtures/certs/zone.crt");
const ZONE_KEY: &[u8] = include_bytes!("../../../tests/fixtures/certs/zone.key");

pub(crate) fn zone(name: &str) -> Arc<dyn Zone> {
    zone_with_description(name, "")
}

pub(crate) fn zone_with_description(name: &str, description: &str) -> Arc<dyn Zone> {
    let mut descriptor = ZoneDescriptor {
        name: name.to_string(),
        description: description.to_string(),
        hashing: "none".to_string(),
        ..Default::default()
    };
    descriptor.sign.method = "RS256".to_string();
    let anchor = TrustAnchor::from_pem(ZONE_CRT, ZONE_KEY).expect("fixture anchor");
    Arc::new(StaticZone::new(descriptor, anchor).expect("fixture zone"))
}
