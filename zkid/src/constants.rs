//! Sizes of the serialized identification values.

/// Size of a serialized public key in bytes.
///
/// A public key is a secp256k1 point in SEC1 compressed form.
pub const PK_SIZE: usize = 33;

/// Size of a serialized secret key in bytes.
///
/// A secret key is a scalar modulo the group order, big-endian.
pub const SK_SIZE: usize = 32;

/// Number of hex digits in a stored secret key.
pub const SK_HEX_LEN: usize = 2 * SK_SIZE;

/// Size of a serialized proof in bytes.
///
/// A proof consists of:
/// - A commitment point R (33 bytes)
/// - A response scalar s (32 bytes)
/// Total: 65 bytes
pub const PROOF_SIZE: usize = PK_SIZE + SK_SIZE;
