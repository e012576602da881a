//! Claim set carried by every Cerber token.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use cerber_core::types::Permission;

/// Claim names the engine always sets itself.
pub const RESERVED: [&str; 7] = ["iss", "sub", "aud", "exp", "iat", "orig_iat", "access"];

/// Claims payload of an issued or refreshed token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Issuer: the broker realm.
    pub iss: String,
    /// Subject: the user id.
    pub sub: String,
    /// Audience: the zone name.
    pub aud: String,
    /// Expiry (seconds since epoch).
    pub exp: i64,
    /// Time of this signing (seconds since epoch).
    #[serde(default)]
    pub iat: i64,
    /// Time of the original issuance; never changes across refreshes.
    pub orig_iat: i64,
    /// Granted permissions; serialized even when empty.
    #[serde(default)]
    pub access: Vec<Permission>,
    /// Caller-supplied claims, carried verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TokenClaims {
    /// Drops reserved names from caller-supplied claims so they cannot
    /// shadow the engine's own.
    pub(crate) fn strip_reserved(mut extra: Map<String, Value>) -> Map<String, Value> {
        for name in RESERVED {
            extra.remove(name);
        }
        extra
    }
}
