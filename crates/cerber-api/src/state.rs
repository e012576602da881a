//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use cerber_auth::TokenEngine;
use cerber_zone::ZoneRegistry;

/// Shared dependencies handed to every handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Token engine, which also owns the zone registry.
    pub engine: Arc<TokenEngine>,
}

impl AppState {
    /// Wraps an engine.
    pub fn new(engine: TokenEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Realm announced in tokens and authentication challenges.
    pub fn realm(&self) -> &str {
        self.engine.realm()
    }

    /// Registry zones are looked up in.
    pub fn registry(&self) -> &ZoneRegistry {
        self.engine.registry()
    }
}
