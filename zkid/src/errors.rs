//! Error types for the identification core.

use curve::CurveError;
use thiserror::Error;

/// Errors raised by key handling, proving and secret storage.
///
/// A proof that fails the verification equation is not an error; the
/// verifier reports it as `false`.
#[derive(Debug, Error)]
pub enum ZkError {
    /// The secret key is malformed or outside `[1, n - 1]`.
    #[error("secret key must be a scalar in [1, n-1]")]
    InvalidKey,

    /// A public value (point, scalar, payload) could not be decoded.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The secure random source failed. Generation is aborted, never
    /// retried with another source.
    #[error("secure random source unavailable: {0}")]
    EntropyUnavailable(String),

    /// The secret store could not be read or written.
    #[error("secret store error: {0}")]
    Storage(#[from] std::io::Error),
}

impl From<CurveError> for ZkError {
    fn from(err: CurveError) -> Self {
        match err {
            CurveError::Entropy(msg) => ZkError::EntropyUnavailable(msg),
            other => ZkError::InvalidInput(other.to_string()),
        }
    }
}
