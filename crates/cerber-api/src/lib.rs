//! # cerber-api
//!
//! HTTP surface for Cerber built on Axum.
//!
//! Provides the login, token refresh, token validation and health endpoints,
//! the credential extractors, request logging, and the mapping of
//! [`cerber_core::CerberError`] to `401`/`500` responses.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
