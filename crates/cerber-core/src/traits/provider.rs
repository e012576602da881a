//! Zone provider trait for pluggable zone backing stores.

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use super::zone::Zone;
use crate::result::CerberResult;

/// Supplies a set of zones from one backing store.
///
/// `start` and `stop` are called once, sequentially, at bring-up and
/// tear-down. `find_zone` must be safe to call concurrently once `start`
/// has returned.
#[async_trait]
pub trait ZoneProvider: Send + Sync + Debug + 'static {
    /// URI this provider was created from.
    fn url(&self) -> &Url;

    /// Load or attach the backing data.
    ///
    /// Fails on duplicate zone names. A failed start leaves the provider
    /// offline with no zones.
    async fn start(&self) -> CerberResult<()>;

    /// Release resources. Calling it again is a no-op.
    async fn stop(&self) -> CerberResult<()>;

    /// Re-read the backing data and swap the zone set atomically.
    ///
    /// Providers without mutable backing data keep the default no-op.
    async fn reload(&self) -> CerberResult<()> {
        Ok(())
    }

    /// True only after a start that completed without error.
    fn is_online(&self) -> bool;

    /// Case-insensitive lookup within this provider's zones.
    fn find_zone(&self, name: &str) -> CerberResult<Arc<dyn Zone>>;
}
