//! Zone descriptor schema consumed by file-backed providers.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::FileFormat;
use serde::{Deserialize, Serialize};

use cerber_core::error::{CerberError, ErrorKind};
use cerber_core::result::CerberResult;
use cerber_core::types::{Group, User};

/// On-disk description of one zone.
///
/// ```yaml
/// name: registry
/// description: Docker registry
/// timeout: 15m
/// max_refresh: 24h
/// hashing: md5
/// sign:
///   method: RS256
///   cert:
///     crt: certs/zone.crt
///     key: certs/zone.key
/// groups:
///   - name: dev
///     actions: ["library/app:pull", "library/app:push"]
/// users:
///   - name: alice
///     passwd: 5ebe2294ecd0e0f08eab7690d2a6ee69
///     groups: [dev]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZoneDescriptor {
    /// Zone name, case-insensitively unique within a provider.
    #[serde(default)]
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Token validity; 15 minutes when absent.
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
    /// Refresh ceiling measured from original issuance; zero is unlimited.
    #[serde(default, alias = "maxrefresh", with = "humantime_serde")]
    pub max_refresh: Duration,
    /// Password hashing scheme name.
    #[serde(default)]
    pub hashing: String,
    /// Signing method and trust anchor location.
    #[serde(default)]
    pub sign: SignDescriptor,
    /// Groups, in declaration order.
    #[serde(default)]
    pub groups: Vec<Group>,
    /// Users, in declaration order.
    #[serde(default)]
    pub users: Vec<User>,
}

/// Signing section of a descriptor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignDescriptor {
    /// Declared signing method, e.g. `RS256`.
    #[serde(default)]
    pub method: String,
    /// Certificate chain and key files.
    #[serde(default)]
    pub cert: CertificatePaths,
}

/// PEM files making up a zone trust anchor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CertificatePaths {
    /// Certificate chain, leaf first.
    #[serde(default)]
    pub crt: PathBuf,
    /// RSA private key.
    #[serde(default)]
    pub key: PathBuf,
}

impl CertificatePaths {
    /// Resolves relative paths against `base`.
    pub fn resolve(&self, base: &Path) -> (PathBuf, PathBuf) {
        (absolutize(base, &self.crt), absolutize(base, &self.key))
    }
}

fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

impl ZoneDescriptor {
    /// Descriptor format implied by a file extension, if it is one Cerber reads.
    pub fn format_for(path: &Path) -> Option<FileFormat> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(FileFormat::Yaml),
            "toml" => Some(FileFormat::Toml),
            "json" => Some(FileFormat::Json),
            _ => None,
        }
    }

    /// Parses a descriptor document.
    pub fn parse(text: &str, format: FileFormat) -> CerberResult<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(text, format))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| {
                CerberError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to parse zone descriptor: {e}"),
                    e,
                )
            })
    }
}
