//! Zone registry: ordered fallback lookup across providers.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use cerber_core::error::{CerberError, ErrorKind};
use cerber_core::result::CerberResult;
use cerber_core::traits::{Zone, ZoneProvider};

/// Routes zone lookups to registered providers in registration order.
///
/// The registry holds no zones itself. When several providers know a zone
/// name the first registered one wins; results are never merged.
#[derive(Debug, Clone, Default)]
pub struct ZoneRegistry {
    providers: Vec<Arc<dyn ZoneProvider>>,
}

impl ZoneRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider at the lowest priority.
    ///
    /// Registering the same provider instance again is ignored; returns
    /// whether the provider was added.
    pub fn add_provider(&mut self, provider: Arc<dyn ZoneProvider>) -> bool {
        if self.providers.iter().any(|p| same_instance(p, &provider)) {
            debug!(provider = %provider.url(), "Provider already registered");
            return false;
        }
        self.providers.push(provider);
        true
    }

    /// Registered providers in priority order.
    pub fn providers(&self) -> &[Arc<dyn ZoneProvider>] {
        &self.providers
    }

    /// Number of registered providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether no provider is registered.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Returns the zone from the first provider that has it.
    ///
    /// Provider errors are logged and the search moves on.
    pub fn find_zone(&self, name: &str) -> CerberResult<Arc<dyn Zone>> {
        for provider in &self.providers {
            match provider.find_zone(name) {
                Ok(zone) => return Ok(zone),
                Err(e) if e.kind == ErrorKind::ZoneNotFound => {
                    debug!(provider = %provider.url(), zone = name, "Zone not in provider");
                }
                Err(e) => {
                    warn!(provider = %provider.url(), zone = name, error = %e, "Error querying provider");
                }
            }
        }
        Err(CerberError::zone_not_found(name))
    }

    /// Starts every provider in order, logging failures, and returns how
    /// many are online afterwards.
    pub async fn start_all(&self) -> usize {
        let mut online = 0;
        for provider in &self.providers {
            match provider.start().await {
                Ok(()) => {
                    info!(provider = %provider.url(), "Zone provider started");
                    online += 1;
                }
                Err(e) => {
                    error!(provider = %provider.url(), error = %e, "Zone provider failed to start");
                }
            }
        }
        online
    }

    /// Stops every provider, logging failures.
    pub async fn stop_all(&self) {
        for provider in &self.providers {
            if let Err(e) = provider.stop().await {
                warn!(provider = %provider.url(), error = %e, "Zone provider failed to stop");
            }
        }
    }
}

fn same_instance(a: &Arc<dyn ZoneProvider>, b: &Arc<dyn ZoneProvider>) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}
