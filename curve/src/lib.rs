//! secp256k1 group primitives for Schnorr identification.
//!
//! This crate wraps the `k256` arithmetic in two value types, [`Scalar`] and
//! [`GroupElement`], fixes their hex encodings, and provides helpers for
//! secure sampling and hashing into the scalar field. The curve is fixed to
//! secp256k1 with its standard generator.

mod errors;
mod hash;
mod point;
mod random;
mod scalar;

pub use errors::CurveError;
pub use hash::hash_to_scalar;
pub use point::{GroupElement, COMPRESSED_POINT_SIZE, UNCOMPRESSED_POINT_SIZE};
pub use random::RandomField;
pub use scalar::{Scalar, SCALAR_HEX_LEN};
