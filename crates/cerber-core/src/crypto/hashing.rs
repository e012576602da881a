//! Password hashing schemes selectable by name.
//!
//! Schemes are unsalted one-way transforms: a zone stores the digest and a
//! login is checked by hashing the supplied password the same way and
//! comparing the strings.

use std::fmt;

use md5::Md5;
use sha2::{Digest, Sha256};

use crate::error::CerberError;
use crate::result::CerberResult;

/// A named password hashing scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// Identity passthrough.
    None,
    /// Hex-encoded MD5.
    Md5,
    /// Hex-encoded SHA-256.
    Sha256,
}

impl HashAlgorithm {
    /// Every built-in scheme.
    pub const ALL: [HashAlgorithm; 3] = [Self::None, Self::Md5, Self::Sha256];

    /// Resolves a scheme by name, ignoring case.
    pub fn resolve(name: &str) -> CerberResult<Self> {
        Self::ALL
            .into_iter()
            .find(|alg| alg.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| CerberError::unknown_algorithm(name))
    }

    /// Canonical scheme name.
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Md5 => "md5",
            Self::Sha256 => "sha256",
        }
    }

    /// Hashes `plaintext` with this scheme.
    pub fn hash(self, plaintext: &str) -> CerberResult<String> {
        let digest = match self {
            Self::None => plaintext.to_string(),
            Self::Md5 => hex::encode(Md5::digest(plaintext.as_bytes())),
            Self::Sha256 => hex::encode(Sha256::digest(plaintext.as_bytes())),
        };
        Ok(digest)
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_resolve_is_case_insensitive() {
        assert_eq!(HashAlgorithm::resolve("MD5").expect("md5"), HashAlgorithm::Md5);
        assert_eq!(HashAlgorithm::resolve("md5").expect("md5"), HashAlgorithm::Md5);
        assert_eq!(HashAlgorithm::resolve("None").expect("none"), HashAlgorithm::None);
        assert_eq!(
            HashAlgorithm::resolve("SHA256").expect("sha256"),
            HashAlgorithm::Sha256
        );
    }

    #[test]
    fn test_resolve_unknown() {
        let err = HashAlgorithm::resolve("bcrypt").expect_err("unknown");
        assert_eq!(err.kind, ErrorKind::UnknownAlgorithm);
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = HashAlgorithm::ALL.iter().map(|a| a.name()).collect();
        assert_eq!(names.len(), HashAlgorithm::ALL.len());
    }

    #[test]
    fn test_none_is_identity() {
        assert_eq!(HashAlgorithm::None.hash("secret").expect("hash"), "secret");
    }

    #[test]
    fn test_md5_hex() {
        assert_eq!(
            HashAlgorithm::Md5.hash("secret").expect("hash"),
            "5ebe2294ecd0e0f08eab7690d2a6ee69"
        );
    }

    #[test]
    fn test_sha256_hex() {
        assert_eq!(
            HashAlgorithm::Sha256.hash("secret").expect("hash"),
            "2bb80d537b1da3e38bd30361aa855686bde0eacd7162fef6a25fe97bf527a25b"
        );
    }
}
