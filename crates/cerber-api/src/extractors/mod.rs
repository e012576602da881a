//! Credential extractors.

pub mod credentials;

pub use credentials::{BasicCredentials, VerifiedToken};
