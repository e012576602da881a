//! Case-insensitive set of zones owned by one provider.

use std::collections::HashMap;
use std::sync::Arc;

use cerber_core::error::CerberError;
use cerber_core::result::CerberResult;
use cerber_core::traits::Zone;

/// Zones keyed by case-folded name.
#[derive(Debug, Clone, Default)]
pub struct ZoneSet {
    zones: HashMap<String, Arc<dyn Zone>>,
}

impl ZoneSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a zone, failing if another zone already uses the name.
    pub fn insert(&mut self, zone: Arc<dyn Zone>) -> CerberResult<()> {
        let key = fold(zone.name());
        if let Some(existing) = self.zones.get(&key) {
            return Err(CerberError::configuration(format!(
                "Found duplicated zone: {} ({})",
                existing.name(),
                existing.description()
            )));
        }
        self.zones.insert(key, zone);
        Ok(())
    }

    /// Looks a zone up ignoring case.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Zone>> {
        self.zones.get(&fold(name)).cloned()
    }

    /// Number of zones.
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Zone names as declared, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.zones.values().map(|z| z.name().to_string()).collect();
        names.sort();
        names
    }
}

fn fold(name: &str) -> String {
    name.to_lowercase()
}
