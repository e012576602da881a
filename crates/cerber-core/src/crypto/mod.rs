//! Cryptographic primitives shared by zones and the token engine.

pub mod hashing;
pub mod signing;

pub use hashing::HashAlgorithm;
pub use signing::{SigningMethod, TrustAnchor};
