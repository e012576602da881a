//! Request handlers.

pub mod health;
pub mod login;
pub mod token;

use serde::{Deserialize, Serialize};

/// Body returned by login and refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Signed token.
    pub token: String,
}
