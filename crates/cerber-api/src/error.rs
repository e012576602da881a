//! Maps `CerberError` to HTTP responses.
//!
//! Authorization failures become `401` with a `WWW-Authenticate` challenge
//! naming the base64-encoded realm. Crypto and internal failures become
//! `500`, except a bad signature on a presented token, which is the
//! caller's fault. The reason is logged, never returned to the client.

use axum::Json;
use axum::http::header::WWW_AUTHENTICATE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use cerber_core::error::{CerberError, ErrorCategory, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Authentication scheme the client is challenged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Challenge {
    /// Username and password, used by login.
    Basic,
    /// Bearer token, used by refresh and validate.
    Jwt,
}

impl Challenge {
    fn scheme(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Jwt => "JWT",
        }
    }
}

/// A failed request together with the challenge to answer it with.
#[derive(Debug)]
pub struct ApiError {
    challenge: Challenge,
    realm: String,
    error: CerberError,
}

impl ApiError {
    /// Failure on a Basic-authenticated endpoint.
    pub fn basic(realm: &str, error: CerberError) -> Self {
        Self {
            challenge: Challenge::Basic,
            realm: realm.to_string(),
            error,
        }
    }

    /// Failure on a bearer-authenticated endpoint.
    pub fn jwt(realm: &str, error: CerberError) -> Self {
        Self {
            challenge: Challenge::Jwt,
            realm: realm.to_string(),
            error,
        }
    }

    /// Underlying error.
    pub fn error(&self) -> &CerberError {
        &self.error
    }

    /// Challenge header value, e.g. `Basic realm=Y2VyYmVy`.
    pub fn challenge_value(&self) -> String {
        format!(
            "{} realm={}",
            self.challenge.scheme(),
            STANDARD.encode(self.realm.as_bytes())
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let internal = self.error.kind != ErrorKind::InvalidSignature
            && matches!(
                self.error.category(),
                ErrorCategory::Crypto | ErrorCategory::Internal
            );
        if internal {
            tracing::error!(error = %self.error, "Internal server error");
            let body = ApiErrorResponse {
                error: "INTERNAL_ERROR".to_string(),
                message: "Internal server error".to_string(),
            };
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
        }

        tracing::warn!(reason = %self.error, "Request unauthorized");
        let body = ApiErrorResponse {
            error: "UNAUTHORIZED".to_string(),
            message: "Not Authorized".to_string(),
        };
        let mut response = (StatusCode::UNAUTHORIZED, Json(body)).into_response();
        if let Ok(value) = HeaderValue::from_str(&self.challenge_value()) {
            response.headers_mut().insert(WWW_AUTHENTICATE, value);
        }
        response
    }
}
