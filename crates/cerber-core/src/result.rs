//! Convenience result type alias for Cerber.

use crate::error::CerberError;

/// A specialized `Result` type for Cerber operations.
pub type CerberResult<T> = Result<T, CerberError>;
