//! # cerber-auth
//!
//! Turns zone rosters into signed tokens.
//!
//! ## Modules
//!
//! - `resolver`: user → groups → actions expansion and action canonicalization
//! - `token`: claim set and the issue/verify/refresh engine

pub mod resolver;
pub mod token;

pub use resolver::{authenticate, authorize, canonicalize};
pub use token::{TokenClaims, TokenEngine};
