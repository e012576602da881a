//! In-memory zone provider.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use tracing::info;
use url::Url;

use cerber_core::error::CerberError;
use cerber_core::result::CerberResult;
use cerber_core::traits::{Zone, ZoneProvider};

use crate::set::ZoneSet;

/// Serves zones built in-process. Addressed as `memory://<label>`.
#[derive(Debug)]
pub struct MemoryProvider {
    url: Url,
    /// Zones handed over before start.
    configured: Vec<Arc<dyn Zone>>,
    active: RwLock<Arc<ZoneSet>>,
    online: AtomicBool,
}

impl MemoryProvider {
    /// Creates an empty provider.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            configured: Vec::new(),
            active: RwLock::new(Arc::new(ZoneSet::new())),
            online: AtomicBool::new(false),
        }
    }

    /// Adds a zone to be served once the provider starts.
    pub fn with_zone(mut self, zone: Arc<dyn Zone>) -> Self {
        self.configured.push(zone);
        self
    }

    fn swap(&self, set: ZoneSet) {
        let mut active = self.active.write().unwrap_or_else(PoisonError::into_inner);
        *active = Arc::new(set);
    }
}

#[async_trait]
impl ZoneProvider for MemoryProvider {
    fn url(&self) -> &Url {
        &self.url
    }

    async fn start(&self) -> CerberResult<()> {
        let mut set = ZoneSet::new();
        for zone in &self.configured {
            if let Err(e) = set.insert(Arc::clone(zone)) {
                self.swap(ZoneSet::new());
                self.online.store(false, Ordering::Release);
                return Err(e);
            }
        }

        info!(provider = %self.url, zones = set.len(), "Memory zone provider started");
        self.swap(set);
        self.online.store(true, Ordering::Release);
        Ok(())
    }

    async fn stop(&self) -> CerberResult<()> {
        self.swap(ZoneSet::new());
        self.online.store(false, Ordering::Release);
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
