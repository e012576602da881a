//! Token signing methods and zone trust anchors.
//!
//! A trust anchor is the certificate chain plus private key a zone signs its
//! tokens with. The chain travels inside every token header (`x5c`) so a
//! token can be checked stand-alone, while Cerber itself always verifies
//! against the key derived from the zone's own leaf certificate.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, crypto};
use x509_parser::pem::Pem;
use x509_parser::public_key::PublicKey;

use crate::error::{CerberError, ErrorKind};
use crate::result::CerberResult;

/// Signing methods that can be backed by an X.509 certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SigningMethod {
    /// RSASSA-PKCS1-v1_5 with SHA-256.
    Rs256,
    /// RSASSA-PKCS1-v1_5 with SHA-384.
    Rs384,
    /// RSASSA-PKCS1-v1_5 with SHA-512.
    Rs512,
    /// RSASSA-PSS with SHA-256.
    Ps256,
    /// RSASSA-PSS with SHA-384.
    Ps384,
    /// RSASSA-PSS with SHA-512.
    Ps512,
}

impl SigningMethod {
    /// Every supported method.
    pub const ALL: [SigningMethod; 6] = [
        Self::Rs256,
        Self::Rs384,
        Self::Rs512,
        Self::Ps256,
        Self::Ps384,
        Self::Ps512,
    ];

    /// Resolves a declared method name, ignoring case.
    ///
    /// Methods that are not certificate based (`HS256`, `none`, ...) fail
    /// with `UnsupportedMethod`.
    pub fn resolve(name: &str) -> CerberResult<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| CerberError::unsupported_method(name))
    }

    /// JWS algorithm name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Rs256 => "RS256",
            Self::Rs384 => "RS384",
            Self::Rs512 => "RS512",
            Self::Ps256 => "PS256",
            Self::Ps384 => "PS384",
            Self::Ps512 => "PS512",
        }
    }

    /// The `jsonwebtoken` algorithm for this method.
    pub fn algorithm(self) -> Algorithm {
        match self {
            Self::Rs256 => Algorithm::RS256,
            Self::Rs384 => Algorithm::RS384,
            Self::Rs512 => Algorithm::RS512,
            Self::Ps256 => Algorithm::PS256,
            Self::Ps384 => Algorithm::PS384,
            Self::Ps512 => Algorithm::PS512,
        }
    }
}

impl fmt::Display for SigningMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Certificate chain and private key a zone signs with.
#[derive(Clone)]
pub struct TrustAnchor {
    /// DER certificates, leaf first.
    chain: Vec<Vec<u8>>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl fmt::Debug for TrustAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrustAnchor")
            .field("chain_len", &self.chain.len())
            .finish_non_exhaustive()
    }
}

impl TrustAnchor {
    /// Builds a trust anchor from a PEM certificate chain (leaf first) and a
    /// PEM RSA private key (PKCS#1 or PKCS#8).
    pub fn from_pem(cert_pem: &[u8], key_pem: &[u8]) -> CerberResult<Self> {
        let mut chain = Vec::new();
        for pem in Pem::iter_from_buffer(cert_pem) {
            let pem = pem.map_err(|e| {
                CerberError::with_source(
                    ErrorKind::Certificate,
                    "Failed to read PEM certificate block",
                    e,
                )
            })?;
            if pem.label == "CERTIFICATE" {
                chain.push(pem.contents);
            }
        }

        let encoding_key = EncodingKey::from_rsa_pem(key_pem).map_err(|e| {
            CerberError::with_source(
                ErrorKind::Certificate,
                "Failed to parse zone private key",
                e,
            )
        })?;

        Self::from_der_chain(chain, encoding_key)
    }

    /// Builds a trust anchor from DER certificates (leaf first) and an
    /// already-parsed signing key.
    pub fn from_der_chain(chain: Vec<Vec<u8>>, encoding_key: EncodingKey) -> CerberResult<Self> {
        let leaf = chain
            .first()
            .ok_or_else(|| CerberError::certificate("Certificate chain is empty"))?;
        let decoding_key = leaf_decoding_key(leaf)?;

        for (idx, der) in chain.iter().enumerate().skip(1) {
            x509_parser::parse_x509_certificate(der).map_err(|e| {
                CerberError::certificate(format!("Failed to parse certificate #{idx}: {e}"))
            })?;
        }
        ensure_key_pair(&encoding_key, &decoding_key)?;

        Ok(Self {
            chain,
            encoding_key,
            decoding_key,
        })
    }

    /// DER certificates, leaf first.
    pub fn chain(&self) -> &[Vec<u8>] {
        &self.chain
    }

    /// The chain in `x5c` header form: standard base64, leaf first.
    pub fn x5c(&self) -> Vec<String> {
        self.chain.iter().map(|der| STANDARD.encode(der)).collect()
    }

    /// Private key for signing.
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    /// Public key of the leaf certificate, for verification.
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}

/// Fails unless the private key belongs to the leaf certificate.
fn ensure_key_pair(encoding_key: &EncodingKey, decoding_key: &DecodingKey) -> CerberResult<()> {
    const CHECK_MESSAGE: &[u8] = b"cerber trust anchor key check";

    let signature = crypto::sign(CHECK_MESSAGE, encoding_key, Algorithm::RS256).map_err(|e| {
        CerberError::with_source(ErrorKind::Certificate, "Zone private key cannot sign", e)
    })?;
    let matches = crypto::verify(&signature, CHECK_MESSAGE, decoding_key, Algorithm::RS256)
        .map_err(|e| {
            CerberError::with_source(
                ErrorKind::Certificate,
                "Leaf certificate key cannot verify",
                e,
            )
        })?;

    if !matches {
        return Err(CerberError::certificate(
            "Private key does not match the leaf certificate",
        ));
    }
    Ok(())
}

/// Parses the leaf certificate and extracts its RSA public key.
fn leaf_decoding_key(der: &[u8]) -> CerberResult<DecodingKey> {
    let (_, leaf) = x509_parser::parse_x509_certificate(der)
        .map_err(|e| CerberError::certificate(format!("Failed to parse leaf certificate: {e}")))?;

    let spki = leaf.public_key();
    match spki.parsed() {
        Ok(PublicKey::RSA(_)) => Ok(DecodingKey::from_rsa_der(
            spki.subject_public_key.data.as_ref(),
        )),
        Ok(_) => Err(CerberError::certificate(
            "Leaf certificate does not carry an RSA public key",
        )),
        Err(e) => Err(CerberError::certificate(format!(
            "Failed to parse leaf public key: {e}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZONE_CRT: &[u8] = include_bytes!("../../../../tests/fixtures/certs/zone.crt");
    const ZONE_KEY: &[u8] = include_bytes!("../../../../tests/fixtures/certs/zone.key");

    #[test]
    fn test_resolve_methods() {
        assert_eq!(SigningMethod::resolve("RS256").expect("rs256"), SigningMethod::Rs256);
        assert_eq!(SigningMethod::resolve("ps512").expect("ps512"), SigningMethod::Ps512);
        assert_eq!(SigningMethod::Rs384.algorithm(), Algorithm::RS384);
    }

    #[test]
    fn test_resolve_rejects_non_certificate_methods() {
        for name in ["HS256", "none", "ES256", ""] {
            let err = SigningMethod::resolve(name).expect_err("unsupported");
            assert_eq!(err.kind, ErrorKind::UnsupportedMethod);
        }
    }

    #[test]
    fn test_anchor_from_pem_keeps_leaf_first() {
        let anchor = TrustAnchor::from_pem(ZONE_CRT, ZONE_KEY).expect("anchor");
        assert_eq!(anchor.chain().len(), 2);

        let x5c = anchor.x5c();
        assert_eq!(x5c.len(), 2);
        let leaf = STANDARD.decode(&x5c[0]).expect("base64");
        assert_eq!(leaf, anchor.chain()[0]);

        let (_, parsed) = x509_parser::parse_x509_certificate(&leaf).expect("leaf");
        assert!(parsed.subject().to_string().contains("registry.example.test"));
    }

    #[test]
    fn test_anchor_rejects_garbage() {
        let err = TrustAnchor::from_pem(b"not a certificate", ZONE_KEY).expect_err("no certs");
        assert_eq!(err.kind, ErrorKind::Certificate);

        let err = TrustAnchor::from_pem(ZONE_CRT, b"not a key").expect_err("bad key");
        assert_eq!(err.kind, ErrorKind::Certificate);
    }

    #[test]
    fn test_anchor_rejects_foreign_key() {
        const OTHER_KEY: &[u8] = include_bytes!("../../../../tests/fixtures/certs/other.key");

        let err = TrustAnchor::from_pem(ZONE_CRT, OTHER_KEY).expect_err("mismatched pair");
        assert_eq!(err.kind, ErrorKind::Certificate);
        assert!(err.message.contains("does not match"), "{}", err.message);
    }

    #[test]
    fn test_debug_hides_key_material() {
        let anchor = TrustAnchor::from_pem(ZONE_CRT, ZONE_KEY).expect("anchor");
        let debug = format!("{anchor:?}");
        assert!(debug.contains("chain_len: 2"));
        assert!(!debug.contains("PRIVATE"));
    }
}
