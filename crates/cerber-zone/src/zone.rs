//! Statically-loaded zone.

use std::collections::HashSet;
use std::time::Duration;

use cerber_core::crypto::{HashAlgorithm, SigningMethod, TrustAnchor};
use cerber_core::error::CerberError;
use cerber_core::result::CerberResult;
use cerber_core::traits::{DEFAULT_TIMEOUT, Zone};
use cerber_core::types::{Group, User};

use crate::descriptor::ZoneDescriptor;

/// A zone whose whole state is resident in memory and never changes.
#[derive(Debug, Clone)]
pub struct StaticZone {
    name: String,
    description: String,
    timeout: Option<Duration>,
    max_refresh: Duration,
    hashing: HashAlgorithm,
    signing_method: String,
    anchor: TrustAnchor,
    users: Vec<User>,
    groups: Vec<Group>,
}

impl StaticZone {
    /// Validates a descriptor and builds the zone around an already-loaded
    /// trust anchor.
    ///
    /// Rejects an empty name, unresolvable hashing or signing schemes, a zero
    /// timeout, and duplicate user or group names.
    pub fn new(descriptor: ZoneDescriptor, anchor: TrustAnchor) -> CerberResult<Self> {
        let name = descriptor.name.trim().to_string();
        if name.is_empty() {
            return Err(CerberError::configuration("Zone name is required"));
        }

        let hashing = HashAlgorithm::resolve(&descriptor.hashing)?;
        SigningMethod::resolve(&descriptor.sign.method)?;

        if descriptor.timeout == Some(Duration::ZERO) {
            return Err(CerberError::configuration(format!(
                "Zone '{name}' timeout must be positive"
            )));
        }

        ensure_unique(&name, "user", descriptor.users.iter().map(|u| u.name.as_str()))?;
        ensure_unique(&name, "group", descriptor.groups.iter().map(|g| g.name.as_str()))?;

        Ok(Self {
            name,
            description: descriptor.description,
            timeout: descriptor.timeout,
            max_refresh: descriptor.max_refresh,
            hashing,
            signing_method: descriptor.sign.method,
            anchor,
            users: descriptor.users,
            groups: descriptor.groups,
        })
    }

    /// Users, in declaration order.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Groups, in declaration order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }
}

fn ensure_unique<'a>(
    zone: &str,
    what: &str,
    names: impl Iterator<Item = &'a str>,
) -> CerberResult<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(CerberError::configuration(format!(
                "Zone '{zone}' declares {what} '{name}' more than once"
            )));
        }
    }
    Ok(())
}

impl Zone for StaticZone {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn timeout(&self) -> Duration {
        self.timeout.unwrap_or(DEFAULT_TIMEOUT)
    }

    fn max_refresh(&self) -> Duration {
        self.max_refresh
    }

    fn signing_method(&self) -> &str {
        &self.signing_method
    }

    fn certificate(&self) -> CerberResult<&TrustAnchor> {
        SigningMethod::resolve(&self.signing_method)?;
        Ok(&self.anchor)
    }

    fn hash_password(&self, plaintext: &str) -> CerberResult<String> {
        self.hashing.hash(plaintext)
    }

    fn find_user(&self, user_id: &str) -> CerberResult<&User> {
        self.users
            .iter()
            .find(|u| u.name == user_id)
            .ok_or_else(|| CerberError::user_not_found(user_id))
    }

    fn find_group(&self, name: &str) -> CerberResult<&Group> {
        self.groups
            .iter()
            .find(|g| g.name == name)
            .ok_or_else(|| CerberError::group_not_found(name))
    }
}
