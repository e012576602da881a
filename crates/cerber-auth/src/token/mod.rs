//! Signed token claims and the lifecycle engine.

pub mod claims;
pub mod engine;

pub use claims::TokenClaims;
pub use engine::TokenEngine;
