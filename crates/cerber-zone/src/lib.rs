//! # cerber-zone
//!
//! Zone storage for Cerber: the on-disk descriptor schema, the immutable
//! [`StaticZone`], the directory and in-memory providers, and the
//! [`ZoneRegistry`] that routes lookups across providers by priority.

pub mod descriptor;
pub mod providers;
pub mod registry;
pub mod set;
pub mod zone;

#[cfg(test)]
pub(crate) mod testing;

pub use descriptor::ZoneDescriptor;
pub use providers::{DirectoryProvider, MemoryProvider, create_provider};
pub use registry::ZoneRegistry;
pub use set::ZoneSet;
pub use zone::StaticZone;
