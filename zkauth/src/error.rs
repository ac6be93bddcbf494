//! Error types for the registration and login boundary.

use thiserror::Error;
use zkid::ZkError;

/// Result alias for service operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Failures surfaced to the request layer.
///
/// A well-formed proof that does not verify is not an error; it is reported
/// as [`crate::LoginOutcome::Rejected`].
#[derive(Debug, Error)]
pub enum AuthError {
    /// Missing fields, malformed keys or session ids.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No public key is registered for the username.
    #[error("user not found")]
    NotFound,

    /// The username already has a registered public key.
    #[error("user already exists")]
    Conflict,

    /// The pending challenge table is full.
    #[error("too many pending login challenges")]
    Busy,

    /// The user directory could not be read or written.
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// The user directory file does not parse.
    #[error("corrupt user directory: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// The configuration is unreadable or inconsistent.
    #[error("configuration error: {0}")]
    Config(String),

    /// Error from the identification core.
    #[error(transparent)]
    Core(#[from] ZkError),
}

impl AuthError {
    /// HTTP status the request layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::InvalidInput(_) => 400,
            AuthError::NotFound => 404,
            AuthError::Conflict => 409,
            AuthError::Busy => 503,
            AuthError::Core(ZkError::InvalidKey | ZkError::InvalidInput(_)) => 400,
            AuthError::Storage(_)
            | AuthError::Corrupt(_)
            | AuthError::Config(_)
            | AuthError::Core(_) => 500,
        }
    }
}
