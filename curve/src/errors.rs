//! Error types for curve encoding and sampling.

use thiserror::Error;

/// Errors raised while decoding or sampling curve values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurveError {
    /// The input is not a hexadecimal string.
    #[error("invalid hex encoding")]
    InvalidHex,

    /// The integer is not a canonical scalar (it is `>= n`, or zero where
    /// a non-zero scalar is required).
    #[error("scalar out of range")]
    ScalarOutOfRange,

    /// The bytes are not a SEC1 encoding of a non-identity secp256k1 point.
    #[error("invalid curve point: {0}")]
    InvalidPoint(&'static str),

    /// The random source failed to produce output.
    #[error("random source unavailable: {0}")]
    Entropy(String),
}
