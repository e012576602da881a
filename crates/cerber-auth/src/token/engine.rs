//! Token issue, verification, and refresh bound to zone trust anchors.

use std::sync::Arc;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Header, Validation, decode, encode};
use serde_json::{Map, Value};
use tracing::debug;

use cerber_core::error::{CerberError, ErrorKind};
use cerber_core::result::CerberResult;
use cerber_core::traits::Zone;
use cerber_core::types::Permission;
use cerber_zone::ZoneRegistry;

use super::claims::TokenClaims;

/// Clock skew tolerated when checking expiry, in seconds.
const LEEWAY_SECS: u64 = 5;

/// Issues, verifies, and refreshes tokens for every zone in a registry.
///
/// The engine keeps no state of its own: trust lives in the signed claims
/// and in each zone's trust anchor.
#[derive(Debug, Clone)]
pub struct TokenEngine {
    realm: String,
    registry: Arc<ZoneRegistry>,
}

impl TokenEngine {
    /// Creates an engine issuing tokens under `realm`.
    pub fn new(realm: impl Into<String>, registry: Arc<ZoneRegistry>) -> Self {
        Self {
            realm: realm.into(),
            registry,
        }
    }

    /// Issuer written into every token.
    pub fn realm(&self) -> &str {
        &self.realm
    }

    /// Registry zones are resolved through.
    pub fn registry(&self) -> &Arc<ZoneRegistry> {
        &self.registry
    }

    /// Issues a token for `user_id` in zone `zone_name`.
    pub fn issue(
        &self,
        zone_name: &str,
        user_id: &str,
        access: Vec<Permission>,
        extra: Map<String, Value>,
    ) -> CerberResult<String> {
        self.issue_at(zone_name, user_id, access, extra, Utc::now())
    }

    /// [`issue`](Self::issue) with an explicit clock.
    pub fn issue_at(
        &self,
        zone_name: &str,
        user_id: &str,
        access: Vec<Permission>,
        extra: Map<String, Value>,
        now: DateTime<Utc>,
    ) -> CerberResult<String> {
        let zone = self.registry.find_zone(zone_name)?;
        let issued = now.timestamp();

        let claims = TokenClaims {
            iss: self.realm.clone(),
            sub: user_id.to_string(),
            aud: zone.name().to_string(),
            exp: expiry(issued, zone.timeout()),
            iat: issued,
            orig_iat: issued,
            access,
            extra: TokenClaims::strip_reserved(extra),
        };

        debug!(zone = zone.name(), user = user_id, exp = claims.exp, "Issuing token");
        sign(zone.as_ref(), &claims)
    }

    /// Verifies a token against the zone named by its audience and returns
    /// its claims.
    ///
    /// The header algorithm must equal the zone's declared method exactly,
    /// including names `jsonwebtoken` cannot represent such as `none`; keys
    /// embedded in the token are never trusted.
    pub fn verify(&self, token: &str) -> CerberResult<TokenClaims> {
        let (header, payload) = peek(token)?;
        let audience = audience_of(&payload)?;
        let zone = self.registry.find_zone(&audience)?;

        let method = zone.algorithm()?;
        let alg = header
            .get("alg")
            .and_then(Value::as_str)
            .ok_or_else(|| CerberError::malformed_token("Token header has no algorithm"))?;
        if alg != method.name() {
            return Err(CerberError::new(
                ErrorKind::AlgorithmMismatch,
                format!(
                    "Token algorithm '{alg}' does not match zone '{}' method {method}",
                    zone.name()
                ),
            ));
        }

        let anchor = zone.certificate()?;
        let mut validation = Validation::new(method.algorithm());
        validation.leeway = LEEWAY_SECS;
        validation.set_audience(&[zone.name()]);
        validation.set_required_spec_claims(&["exp", "aud", "sub"]);

        let data = decode::<TokenClaims>(token, anchor.decoding_key(), &validation).map_err(
            |e| match e.kind() {
                JwtErrorKind::ExpiredSignature => {
                    CerberError::new(ErrorKind::Expired, "Token has expired")
                }
                JwtErrorKind::InvalidSignature => {
                    CerberError::new(ErrorKind::InvalidSignature, "Invalid token signature")
                }
                _ => CerberError::malformed_token(format!("Token validation failed: {e}")),
            },
        )?;

        Ok(data.claims)
    }

    /// Re-signs verified claims with a fresh expiry.
    pub fn refresh(&self, claims: &TokenClaims) -> CerberResult<String> {
        self.refresh_at(claims, Utc::now())
    }

    /// [`refresh`](Self::refresh) with an explicit clock.
    ///
    /// Fails with `RefreshWindowExpired` once the zone's max-refresh period,
    /// measured from the original issuance, has elapsed.
    pub fn refresh_at(&self, claims: &TokenClaims, now: DateTime<Utc>) -> CerberResult<String> {
        let zone = self.registry.find_zone(&claims.aud)?;
        let issued = now.timestamp();

        let max_refresh = zone.max_refresh();
        if !max_refresh.is_zero() && claims.orig_iat < issued.saturating_sub(secs(max_refresh)) {
            return Err(CerberError::new(
                ErrorKind::RefreshWindowExpired,
                format!(
                    "Token for '{}' can no longer be refreshed in zone '{}'",
                    claims.sub,
                    zone.name()
                ),
            ));
        }

        let mut refreshed = claims.clone();
        refreshed.exp = expiry(issued, zone.timeout());
        refreshed.iat = issued;

        debug!(zone = zone.name(), user = %claims.sub, exp = refreshed.exp, "Refreshing token");
        sign(zone.as_ref(), &refreshed)
    }

    /// Verifies a token string and refreshes it.
    pub fn refresh_token(&self, token: &str) -> CerberResult<String> {
        let claims = self.verify(token)?;
        self.refresh(&claims)
    }
}

/// Signs claims with the zone's key, embedding its chain in the header.
fn sign(zone: &dyn Zone, claims: &TokenClaims) -> CerberResult<String> {
    let method = zone.algorithm()?;
    let anchor = zone.certificate()?;

    let mut header = Header::new(method.algorithm());
    header.x5c = Some(anchor.x5c());

    encode(&header, claims, anchor.encoding_key()).map_err(|e| {
        CerberError::with_source(
            ErrorKind::SigningFailure,
            format!("Failed to sign token for zone '{}'", zone.name()),
            e,
        )
    })
}

/// Decodes the header and payload of an unverified token.
fn peek(token: &str) -> CerberResult<(Value, Value)> {
    let mut parts = token.split('.');
    let (header, payload) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(header), Some(payload), Some(_), None) => (header, payload),
        _ => return Err(CerberError::malformed_token("Token must have three segments")),
    };
    Ok((segment(header, "header")?, segment(payload, "payload")?))
}

fn segment(encoded: &str, what: &str) -> CerberResult<Value> {
    let bytes = URL_SAFE_NO_PAD
        .decode(encoded)
        .map_err(|e| CerberError::malformed_token(format!("Invalid token {what}: {e}")))?;
    match serde_json::from_slice(&bytes) {
        Ok(value @ Value::Object(_)) => Ok(value),
        Ok(_) => Err(CerberError::malformed_token(format!(
            "Token {what} is not a JSON object"
        ))),
        Err(e) => Err(CerberError::malformed_token(format!("Invalid token {what}: {e}"))),
    }
}

/// Reads the audience from an unverified payload.
fn audience_of(payload: &Value) -> CerberResult<String> {
    let audience = match payload.get("aud") {
        Some(Value::String(aud)) => Some(aud.as_str()),
        Some(Value::Array(auds)) => auds.first().and_then(Value::as_str),
        _ => None,
    };
    audience
        .filter(|aud| !aud.is_empty())
        .map(str::to_string)
        .ok_or_else(|| CerberError::new(ErrorKind::ZoneNotFound, "Token has no audience"))
}

fn secs(duration: Duration) -> i64 {
    i64::try_from(duration.as_secs()).unwrap_or(i64::MAX)
}

fn expiry(issued: i64, timeout: Duration) -> i64 {
    issued.saturating_add(secs(timeout))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peek_audience(token: &str) -> CerberResult<String> {
        audience_of(&peek(token)?.1)
    }

    #[test]
    fn test_peek_audience() {
        let payload = URL_SAFE_NO_PAD.encode(br#"{"aud":"registry","sub":"alice"}"#);
        let token = format!("e30.{payload}.sig");
        assert_eq!(peek_audience(&token).expect("aud"), "registry");

        let payload = URL_SAFE_NO_PAD.encode(br#"{"aud":["npm","other"]}"#);
        let token = format!("e30.{payload}.sig");
        assert_eq!(peek_audience(&token).expect("aud"), "npm");
    }

    #[test]
    fn test_peek_audience_missing() {
        let payload = URL_SAFE_NO_PAD.encode(br#"{"sub":"alice"}"#);
        let token = format!("e30.{payload}.sig");
        let err = peek_audience(&token).expect_err("no aud");
        assert_eq!(err.kind, ErrorKind::ZoneNotFound);
    }

    #[test]
    fn test_peek_keeps_raw_algorithm() {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none"}"#);
        let token = format!("{header}.e30.");
        let (header, _) = peek(&token).expect("segments");
        assert_eq!(header["alg"], "none");
    }

    #[test]
    fn test_peek_malformed() {
        let scalar = URL_SAFE_NO_PAD.encode(b"42");
        let not_object = format!("{scalar}.e30.sig");
        for token in ["abc", "a.b", "a.!!!.c", "a.b.c.d", not_object.as_str()] {
            let err = peek_audience(token).expect_err(token);
            assert_eq!(err.kind, ErrorKind::MalformedToken, "{token}");
        }
    }

    #[test]
    fn test_expiry_saturates() {
        assert_eq!(expiry(100, Duration::from_secs(900)), 1000);
        assert_eq!(expiry(i64::MAX - 1, Duration::from_secs(900)), i64::MAX);
    }
}
