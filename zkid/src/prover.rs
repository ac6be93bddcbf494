//! Proof generation.

use core::fmt::Display;

use curve::{GroupElement, RandomField, Scalar};
use rand::TryCryptoRng;
use rand::rngs::OsRng;
use zeroize::Zeroize;

use crate::errors::ZkError;
use crate::keys::SecretKey;
use crate::proof::{Proof, hash_challenge};

/// Creates a proof of knowledge of `secret`, bound to `context`, using the
/// operating system's random source for the nonce.
///
/// # Errors
///
/// [`ZkError::EntropyUnavailable`] if no nonce can be drawn.
pub fn create_proof(secret: &SecretKey, context: &[u8]) -> Result<Proof, ZkError> {
    create_proof_with_rng(&mut OsRng, secret, context)
}

/// Like [`create_proof`], for callers holding the secret as hex.
///
/// # Errors
///
/// [`ZkError::InvalidKey`] if `secret_hex` is not a scalar in `[1, n - 1]`.
pub fn create_proof_from_hex(secret_hex: &str, context: &[u8]) -> Result<Proof, ZkError> {
    let secret = SecretKey::from_hex(secret_hex)?;
    create_proof(&secret, context)
}

/// Creates a proof using the provided random source.
///
/// The proof is computed as follows:
/// 1. Draw a fresh nonce `k` from `[1, n - 1]`
/// 2. Compute `R = k * G`
/// 3. Recompute `Y = x * G`
/// 4. Compute challenge `c = H(Y || R || context)`
/// 5. Compute `s = k + c * x`
/// 6. Return `(R, s)`
///
/// Every call draws a new `k`. Two proofs sharing a nonce under the same key
/// reveal the key.
pub fn create_proof_with_rng<R>(
    rng: &mut R,
    secret: &SecretKey,
    context: &[u8],
) -> Result<Proof, ZkError>
where
    R: TryCryptoRng,
    R::Error: Display,
{
    let mut nonce = Scalar::random(rng)?;
    let r = GroupElement::mul_generator(&nonce);
    let public = GroupElement::mul_generator(secret.scalar());

    let c = hash_challenge(&public, &r, context);
    let s = nonce + c * *secret.scalar();
    nonce.zeroize();

    Ok(Proof { r, s })
}
