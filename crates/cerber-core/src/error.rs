//! Unified error types for Cerber.
//!
//! Every crate maps its internal failures into [`CerberError`] so that the
//! `?` operator works across crate boundaries. The [`ErrorKind`] names the
//! precise failure, while [`ErrorCategory`] groups kinds into the handful of
//! classes the transport layer cares about.

use std::fmt;
use thiserror::Error;

/// The precise failure that occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// A hashing scheme name did not resolve.
    UnknownAlgorithm,
    /// A zone declares a signing method that cannot be used with certificates.
    UnsupportedMethod,
    /// A provider URI uses a scheme no provider implements.
    UnsupportedScheme,
    /// A zone descriptor or provider configuration is invalid.
    Configuration,
    /// No provider knows the requested zone.
    ZoneNotFound,
    /// The zone has no such user.
    UserNotFound,
    /// The zone has no such group.
    GroupNotFound,
    /// Supplied credentials did not match.
    InvalidCredentials,
    /// An action string is not in `resource:action` form.
    MalformedAction,
    /// A token could not be parsed.
    MalformedToken,
    /// Producing a token signature failed.
    SigningFailure,
    /// A token signature did not verify.
    InvalidSignature,
    /// Certificate or key material could not be parsed.
    Certificate,
    /// A token is past its expiry.
    Expired,
    /// A token header names a different algorithm than its zone.
    AlgorithmMismatch,
    /// A token is older than its zone allows refreshing.
    RefreshWindowExpired,
    /// Reading backing data failed.
    Io,
    /// Anything else.
    Internal,
}

/// Coarse error classes used to decide how a failure is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorCategory {
    /// Bad zone descriptor or unresolvable scheme; fatal for one provider.
    Configuration,
    /// Zone, user or group absent.
    NotFound,
    /// Password mismatch.
    Credential,
    /// Signing, verification or certificate parsing failed.
    Crypto,
    /// Refresh window exceeded or algorithm mismatch; re-authenticate.
    Policy,
    /// Unparsable action strings or tokens.
    MalformedInput,
    /// Internal or I/O failure.
    Internal,
}

impl ErrorKind {
    /// Returns the category this kind belongs to.
    pub fn category(self) -> ErrorCategory {
        match self {
            Self::UnknownAlgorithm
            | Self::UnsupportedMethod
            | Self::UnsupportedScheme
            | Self::Configuration => ErrorCategory::Configuration,
            Self::ZoneNotFound | Self::UserNotFound | Self::GroupNotFound => {
                ErrorCategory::NotFound
            }
            Self::InvalidCredentials => ErrorCategory::Credential,
            Self::SigningFailure | Self::InvalidSignature | Self::Certificate => {
                ErrorCategory::Crypto
            }
            Self::AlgorithmMismatch | Self::RefreshWindowExpired | Self::Expired => {
                ErrorCategory::Policy
            }
            Self::MalformedAction | Self::MalformedToken => ErrorCategory::MalformedInput,
            Self::Io | Self::Internal => ErrorCategory::Internal,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAlgorithm => write!(f, "UNKNOWN_ALGORITHM"),
            Self::UnsupportedMethod => write!(f, "UNSUPPORTED_METHOD"),
            Self::UnsupportedScheme => write!(f, "UNSUPPORTED_SCHEME"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::ZoneNotFound => write!(f, "ZONE_NOT_FOUND"),
            Self::UserNotFound => write!(f, "USER_NOT_FOUND"),
            Self::GroupNotFound => write!(f, "GROUP_NOT_FOUND"),
            Self::InvalidCredentials => write!(f, "INVALID_CREDENTIALS"),
            Self::MalformedAction => write!(f, "MALFORMED_ACTION"),
            Self::MalformedToken => write!(f, "MALFORMED_TOKEN"),
            Self::SigningFailure => write!(f, "SIGNING_FAILURE"),
            Self::InvalidSignature => write!(f, "INVALID_SIGNATURE"),
            Self::Certificate => write!(f, "CERTIFICATE"),
            Self::Expired => write!(f, "EXPIRED"),
            Self::AlgorithmMismatch => write!(f, "ALGORITHM_MISMATCH"),
            Self::RefreshWindowExpired => write!(f, "REFRESH_WINDOW_EXPIRED"),
            Self::Io => write!(f, "IO"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified error used throughout Cerber.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct CerberError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// A human-readable error message. Never contains secrets.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CerberError {
    /// Create a new error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns the category of this error.
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an unknown-hashing-algorithm error.
    pub fn unknown_algorithm(name: &str) -> Self {
        Self::new(
            ErrorKind::UnknownAlgorithm,
            format!("Unknown hashing algorithm: '{name}'"),
        )
    }

    /// Create an unsupported-signing-method error.
    pub fn unsupported_method(method: &str) -> Self {
        Self::new(
            ErrorKind::UnsupportedMethod,
            format!("Signing method '{method}' is not certificate based"),
        )
    }

    /// Create a zone-not-found error.
    pub fn zone_not_found(name: &str) -> Self {
        Self::new(
            ErrorKind::ZoneNotFound,
            format!("There is no zone with name: '{name}'"),
        )
    }

    /// Create a user-not-found error.
    pub fn user_not_found(user_id: &str) -> Self {
        Self::new(ErrorKind::UserNotFound, format!("Unknown user: '{user_id}'"))
    }

    /// Create a group-not-found error.
    pub fn group_not_found(group: &str) -> Self {
        Self::new(ErrorKind::GroupNotFound, format!("Unknown group: '{group}'"))
    }

    /// Create an invalid-credentials error.
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorKind::InvalidCredentials, "Wrong password")
    }

    /// Create a malformed-action error.
    pub fn malformed_action(action: &str) -> Self {
        Self::new(
            ErrorKind::MalformedAction,
            format!("Invalid action format: '{action}'"),
        )
    }

    /// Create a malformed-token error.
    pub fn malformed_token(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedToken, message)
    }

    /// Create a certificate error.
    pub fn certificate(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Certificate, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for CerberError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for CerberError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Internal,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for CerberError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Io, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for CerberError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
