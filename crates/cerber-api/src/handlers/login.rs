//! Basic-authenticated login issuing a zone token.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::http::header::HOST;
use serde::Deserialize;
use serde_json::Map;
use tracing::debug;

use cerber_auth::authenticate;

use super::TokenResponse;
use crate::error::ApiError;
use crate::extractors::BasicCredentials;
use crate::state::AppState;

/// Query string accepted by login.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginParams {
    /// Zone to log into; defaults to the `Host` header.
    pub service: Option<String>,
    /// Requested scope. Logged only; grants come from the zone roster.
    pub scope: Option<String>,
}

/// GET /v1/login
pub async fn login(
    State(state): State<AppState>,
    credentials: BasicCredentials,
    headers: HeaderMap,
    Query(params): Query<LoginParams>,
) -> Result<Json<TokenResponse>, ApiError> {
    let realm = state.realm();
    let service = params
        .service
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get(HOST)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        })
        .unwrap_or_default();

    debug!(
        zone = %service,
        user = %credentials.user,
        password = credentials.password.len(),
        scope = params.scope.as_deref().unwrap_or(""),
        "Authenticating user in zone"
    );

    let zone = state
        .registry()
        .find_zone(&service)
        .map_err(|e| ApiError::basic(realm, e))?;
    let access = authenticate(zone.as_ref(), &credentials.user, &credentials.password)
        .map_err(|e| ApiError::basic(realm, e))?;
    let token = state
        .engine
        .issue(zone.name(), &credentials.user, access, Map::new())
        .map_err(|e| ApiError::basic(realm, e))?;

    Ok(Json(TokenResponse { token }))
}
