//! # cerber-core
//!
//! Core crate for Cerber. Contains the zone and provider traits, process
//! configuration schemas, password hashing and signing primitives, shared
//! roster and permission types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Cerber crates.

pub mod config;
pub mod crypto;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{CerberError, ErrorCategory, ErrorKind};
pub use result::CerberResult;
