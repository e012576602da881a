//! Health check handler.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health of the broker and each registered provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` when at least one provider is online, else `degraded`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Providers in lookup order.
    pub providers: Vec<ProviderHealth>,
}

/// Online flag of one provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderHealth {
    /// Provider URI.
    pub url: String,
    /// Whether the provider is serving zones.
    pub online: bool,
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let providers: Vec<ProviderHealth> = state
        .registry()
        .providers()
        .iter()
        .map(|p| ProviderHealth {
            url: p.url().to_string(),
            online: p.is_online(),
        })
        .collect();

    let status = if providers.iter().any(|p| p.online) {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        providers,
    })
}
