//! Core traits defined in `cerber-core` and implemented by other crates.

pub mod provider;
pub mod zone;

pub use provider::ZoneProvider;
pub use zone::{DEFAULT_TIMEOUT, Zone};
