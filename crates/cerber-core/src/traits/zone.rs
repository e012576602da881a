//! The zone capability: one authorization realm.

use std::fmt::Debug;
use std::time::Duration;

use crate::crypto::{SigningMethod, TrustAnchor};
use crate::result::CerberResult;
use crate::types::{Group, User};

/// Token validity applied when a zone does not configure one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15 * 60);

/// A single authorization zone: users, groups, trust anchor and aging policy.
///
/// Zones are immutable once loaded, so every method is a read-only query
/// that is safe to call from any number of threads.
pub trait Zone: Send + Sync + Debug + 'static {
    /// Zone name; used as the token audience.
    fn name(&self) -> &str;

    /// Human readable description. Not used by Cerber itself.
    fn description(&self) -> &str;

    /// How long an issued or refreshed token stays valid.
    fn timeout(&self) -> Duration;

    /// Ceiling on refreshing, measured from original issuance.
    /// `Duration::ZERO` means unlimited.
    fn max_refresh(&self) -> Duration;

    /// Signing method name exactly as declared by the zone.
    fn signing_method(&self) -> &str;

    /// Certificate chain and key used to sign this zone's tokens.
    ///
    /// Fails with `UnsupportedMethod` unless the declared signing method is
    /// certificate based.
    fn certificate(&self) -> CerberResult<&TrustAnchor>;

    /// Hashes a plaintext password with the zone's scheme.
    fn hash_password(&self, plaintext: &str) -> CerberResult<String>;

    /// Looks a user up by exact name.
    fn find_user(&self, user_id: &str) -> CerberResult<&User>;

    /// Looks a group up by exact name.
    fn find_group(&self, name: &str) -> CerberResult<&Group>;

    /// Resolves the declared signing method.
    fn algorithm(&self) -> CerberResult<SigningMethod> {
        SigningMethod::resolve(self.signing_method())
    }
}
