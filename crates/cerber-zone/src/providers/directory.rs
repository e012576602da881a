//! Directory-backed zone provider.
//!
//! Every YAML, TOML or JSON file directly inside the directory describes one
//! zone. Loading is all-or-nothing: one bad descriptor or a duplicated zone
//! name fails the whole load.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, error, info};
use url::Url;

use cerber_core::crypto::TrustAnchor;
use cerber_core::error::{CerberError, ErrorKind};
use cerber_core::result::CerberResult;
use cerber_core::traits::{Zone, ZoneProvider};

use crate::descriptor::ZoneDescriptor;
use crate::set::ZoneSet;
use crate::zone::StaticZone;

/// Loads zones from descriptor files in one directory.
///
/// Addressed as `directory:///absolute/path` or `directory://./relative`.
#[derive(Debug)]
pub struct DirectoryProvider {
    url: Url,
    root: PathBuf,
    active: RwLock<Arc<ZoneSet>>,
    online: AtomicBool,
}

impl DirectoryProvider {
    /// Creates a provider for the directory named by `url`.
    ///
    /// The URL must not carry a query or fragment and must point at an
    /// existing directory.
    pub fn new(url: Url) -> CerberResult<Self> {
        if url.query().is_some() || url.fragment().is_some() {
            return Err(CerberError::configuration(format!(
                "Directory URL shouldn't have fragment or query parts: {url}"
            )));
        }

        let root = directory_path(&url);
        let meta = std::fs::metadata(&root).map_err(|e| {
            CerberError::with_source(
                ErrorKind::Configuration,
                format!("Error accessing zone directory: {}", root.display()),
                e,
            )
        })?;
        if !meta.is_dir() {
            return Err(CerberError::configuration(format!(
                "Given path is not a directory: {}",
                root.display()
            )));
        }

        Ok(Self {
            url,
            root,
            active: RwLock::new(Arc::new(ZoneSet::new())),
            online: AtomicBool::new(false),
        })
    }

    /// Directory the zones are read from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Names of the zones currently served.
    pub fn zone_names(&self) -> Vec<String> {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .names()
    }

    fn swap(&self, set: ZoneSet) {
        let mut active = self.active.write().unwrap_or_else(PoisonError::into_inner);
        *active = Arc::new(set);
    }

    /// Reads every descriptor in the directory into a fresh set.
    async fn load_all(&self) -> CerberResult<ZoneSet> {
        let mut entries = fs::read_dir(&self.root).await.map_err(|e| {
            CerberError::with_source(
                ErrorKind::Io,
                format!("Failed to list directory: {}", self.root.display()),
                e,
            )
        })?;

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                continue;
            }
            files.push(entry.path());
        }
        files.sort();

        let mut set = ZoneSet::new();
        for path in files {
            let Some(format) = ZoneDescriptor::format_for(&path) else {
                debug!(file = %path.display(), "Skipping non-descriptor file");
                continue;
            };

            info!(file = %path.display(), "Loading zone file");
            let zone = load_zone(&path, format).await?;
            set.insert(Arc::new(zone)).map_err(|e| {
                CerberError::configuration(format!("{} in {}", e.message, path.display()))
            })?;
        }
        Ok(set)
    }
}

/// Reads one descriptor and the trust anchor it points at.
async fn load_zone(path: &Path, format: config::FileFormat) -> CerberResult<StaticZone> {
    let text = fs::read_to_string(path).await.map_err(|e| {
        CerberError::with_source(
            ErrorKind::Io,
            format!("Failed to read file: {}", path.display()),
            e,
        )
    })?;
    let descriptor = ZoneDescriptor::parse(&text, format).map_err(|e| {
        CerberError::configuration(format!("{}: {}", path.display(), e.message))
    })?;

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    let (crt, key) = descriptor.sign.cert.resolve(base);
    let crt_pem = read_pem(&crt).await?;
    let key_pem = read_pem(&key).await?;
    let anchor = TrustAnchor::from_pem(&crt_pem, &key_pem)?;

    StaticZone::new(descriptor, anchor)
}

async fn read_pem(path: &Path) -> CerberResult<Vec<u8>> {
    fs::read(path).await.map_err(|e| {
        CerberError::with_source(
            ErrorKind::Certificate,
            format!("Failed to read PEM file: {}", path.display()),
            e,
        )
    })
}

/// Filesystem path named by a `directory://` URL. A host part makes the
/// path relative to the working directory.
fn directory_path(url: &Url) -> PathBuf {
    match url.host_str() {
        Some(host) if !host.is_empty() => PathBuf::from(format!("{host}{}", url.path())),
        _ => PathBuf::from(url.path()),
    }
}

#[async_trait]
impl ZoneProvider for DirectoryProvider {
    fn url(&self) -> &Url {
        &self.url
    }

    async fn start(&self) -> CerberResult<()> {
        info!(path = %self.root.display(), "Starting directory zone provider");
        match self.load_all().await {
            Ok(set) => {
                info!(path = %self.root.display(), zones = set.len(), "Directory zone provider online");
                self.swap(set);
                self.online.store(true, Ordering::Release);
                Ok(())
            }
            Err(e) => {
                error!(path = %self.root.display(), error = %e, "Directory zone provider failed to start");
                self.swap(ZoneSet::new());
                self.online.store(false, Ordering::Release);
                Err(e)
            }
        }
    }

    async fn stop(&self) -> CerberResult<()> {
        if self.online.swap(false, Ordering::AcqRel) {
            info!(path = %self.root.display(), "Stopping directory zone provider");
        }
        self.swap(ZoneSet::new());
        Ok(())
    }

    async fn reload(&self) -> CerberResult<()> {
        let set = self.load_all().await?;
        info!(path = %self.root.display(), zones = set.len(), "Directory zone provider reloaded");
        self.swap(set);
        self.online.store(true, Ordering::Release);
        Ok(())
    }

    fn is_online(&self) -> bool {
        self.online.load(Ordering::Acquire)
    }

    fn find_zone(&self, name: &str) -> CerberResult<Arc<dyn Zone>> {
        let active = self.active.read().unwrap_or_else(PoisonError::into_inner);
        active
            .get(name)
            .ok_or_else(|| CerberError::zone_not_found(name))
    }
}
