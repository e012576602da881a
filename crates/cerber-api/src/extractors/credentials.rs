//! Extractors pulling credentials from the `Authorization` header.
//!
//! Rejections are [`ApiError`]s so that a missing or unreadable header is
//! answered with the same challenge as a failed check.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::{Basic, Bearer};

use cerber_auth::TokenClaims;
use cerber_core::error::{CerberError, ErrorKind};

use crate::error::ApiError;
use crate::state::AppState;

/// User id and plaintext password from `Authorization: Basic`.
#[derive(Clone)]
pub struct BasicCredentials {
    /// User id.
    pub user: String,
    /// Plaintext password.
    pub password: String,
}

impl std::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("user", &self.user)
            .field("password_len", &self.password.len())
            .finish()
    }
}

impl FromRequestParts<AppState> for BasicCredentials {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(basic)) =
            TypedHeader::<Authorization<Basic>>::from_request_parts(parts, state)
                .await
                .map_err(|e| {
                    ApiError::basic(
                        state.realm(),
                        CerberError::new(
                            ErrorKind::InvalidCredentials,
                            format!("Basic authorization is required: {e}"),
                        ),
                    )
                })?;

        Ok(Self {
            user: basic.username().to_string(),
            password: basic.password().to_string(),
        })
    }
}

/// Claims of a bearer token that passed verification.
#[derive(Debug, Clone)]
pub struct VerifiedToken(pub TokenClaims);

impl std::ops::Deref for VerifiedToken {
    type Target = TokenClaims;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for VerifiedToken {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|e| {
                    ApiError::jwt(
                        state.realm(),
                        CerberError::malformed_token(format!("Bearer token is required: {e}")),
                    )
                })?;

        let claims = state
            .engine
            .verify(bearer.token())
            .map_err(|e| ApiError::jwt(state.realm(), e))?;

        Ok(Self(claims))
    }
}
