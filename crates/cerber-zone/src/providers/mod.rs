//! Zone provider implementations and the URI-driven factory.

pub mod directory;
pub mod memory;

use std::sync::Arc;

use url::Url;

use cerber_core::error::{CerberError, ErrorKind};
use cerber_core::result::CerberResult;
use cerber_core::traits::ZoneProvider;

pub use directory::DirectoryProvider;
pub use memory::MemoryProvider;

/// Creates a provider from its URI; the scheme selects the implementation.
pub fn create_provider(location: &str) -> CerberResult<Arc<dyn ZoneProvider>> {
    let url = Url::parse(location).map_err(|e| {
        CerberError::with_source(
            ErrorKind::Configuration,
            format!("Failed to parse zone provider URL '{location}'"),
            e,
        )
    })?;

    match url.scheme() {
        "directory" => Ok(Arc::new(DirectoryProvider::new(url)?)),
        "memory" => Ok(Arc::new(MemoryProvider::new(url))),
        other => Err(CerberError::new(
            ErrorKind::UnsupportedScheme,
            format!("Unknown zone provider scheme: '{other}'"),
        )),
    }
}
