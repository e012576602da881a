//! Bearer-authenticated token endpoints.

use axum::Json;
use axum::extract::State;

use cerber_auth::TokenClaims;

use super::TokenResponse;
use crate::error::ApiError;
use crate::extractors::VerifiedToken;
use crate::state::AppState;

/// GET /v1/token/refresh
pub async fn refresh(
    State(state): State<AppState>,
    VerifiedToken(claims): VerifiedToken,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = state
        .engine
        .refresh(&claims)
        .map_err(|e| ApiError::jwt(state.realm(), e))?;
    Ok(Json(TokenResponse { token }))
}

/// GET /v1/token/validate
///
/// A `200` means the presented token is valid; the body is its claim set.
pub async fn validate(VerifiedToken(claims): VerifiedToken) -> Json<TokenClaims> {
    Json(claims)
}
