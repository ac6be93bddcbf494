//! Secret keys, public keys and identities.

use core::fmt;
use core::fmt::Display;

use curve::{GroupElement, RandomField, Scalar};
use rand::TryCryptoRng;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, Zeroizing};

use crate::constants::SK_SIZE;
use crate::errors::ZkError;
use crate::proof::Proof;
use crate::{prover, verifier};

/// A secret identification key.
///
/// The key is a scalar in `[1, n - 1]`. It never leaves the client: only
/// proofs derived from it are sent to a verifier. The scalar is wiped when
/// the key is dropped and is never printed by `Debug`.
///
/// # Example
///
/// ```
/// use zkid::SecretKey;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let secret_key = SecretKey::random(&mut rng).expect("entropy");
/// let public_key = secret_key.public_key();
/// assert_eq!(public_key.to_hex().len(), 66);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey {
    scalar: Scalar,
}

/// A registered public key `Y = x * G`.
///
/// Serializes as the lowercase hex of the compressed point.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicKey {
    point: GroupElement,
}

/// A secret key together with its public key.
///
/// Created once per user at registration time. The public half goes to the
/// user directory; the secret half stays with the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    secret: SecretKey,
    public: PublicKey,
}

impl SecretKey {
    /// Draws a secret key uniformly from `[1, n - 1]`.
    ///
    /// # Errors
    ///
    /// [`ZkError::EntropyUnavailable`] if the random source fails.
    pub fn random<R>(rng: &mut R) -> Result<Self, ZkError>
    where
        R: TryCryptoRng,
        R::Error: Display,
    {
        Ok(Self {
            scalar: Scalar::random(rng)?,
        })
    }

    /// Wraps an existing scalar, rejecting zero.
    pub fn from_scalar(scalar: Scalar) -> Result<Self, ZkError> {
        if scalar.is_zero() {
            return Err(ZkError::InvalidKey);
        }
        Ok(Self { scalar })
    }

    /// Parses the hex form of a secret key (padded or unpadded).
    ///
    /// # Errors
    ///
    /// [`ZkError::InvalidKey`] for malformed hex, zero, or values `>= n`.
    pub fn from_hex(input: &str) -> Result<Self, ZkError> {
        let scalar = Scalar::from_hex(input).map_err(|_| ZkError::InvalidKey)?;
        Self::from_scalar(scalar)
    }

    /// Parses a big-endian 32-byte secret key.
    pub fn from_bytes(bytes: &[u8; SK_SIZE]) -> Result<Self, ZkError> {
        let scalar = Scalar::from_be_bytes(bytes).map_err(|_| ZkError::InvalidKey)?;
        Self::from_scalar(scalar)
    }

    /// 64-digit lowercase hex, wiped on drop.
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(self.scalar.to_padded_hex())
    }

    /// Big-endian bytes, wiped on drop.
    pub fn to_bytes(&self) -> Zeroizing<[u8; SK_SIZE]> {
        Zeroizing::new(self.scalar.to_be_bytes())
    }

    /// Derives the public key `x * G`.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            point: GroupElement::mul_generator(&self.scalar),
        }
    }

    /// Proves knowledge of this key, bound to `context`.
    ///
    /// Shorthand for [`prover::create_proof_with_rng`].
    pub fn prove<R>(&self, rng: &mut R, context: &[u8]) -> Result<Proof, ZkError>
    where
        R: TryCryptoRng,
        R::Error: Display,
    {
        prover::create_proof_with_rng(rng, self, context)
    }

    pub(crate) fn scalar(&self) -> &Scalar {
        &self.scalar
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.scalar.zeroize();
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

impl PublicKey {
    /// Wraps a group element, rejecting the identity.
    pub fn from_element(point: GroupElement) -> Result<Self, ZkError> {
        if point.is_identity() {
            return Err(ZkError::InvalidInput("public key is the identity".into()));
        }
        Ok(Self { point })
    }

    /// Parses SEC1 hex (compressed or uncompressed).
    pub fn from_hex(input: &str) -> Result<Self, ZkError> {
        Ok(Self {
            point: GroupElement::from_hex(input)?,
        })
    }

    /// Canonical lowercase hex of the compressed point.
    pub fn to_hex(&self) -> String {
        self.point.to_hex()
    }

    pub fn as_element(&self) -> &GroupElement {
        &self.point
    }

    /// Checks a proof against this key; see [`verifier::verify_proof`].
    pub fn verify(&self, proof: &Proof, context: &[u8]) -> bool {
        verifier::verify_proof(self, proof, context)
    }
}

impl From<&SecretKey> for PublicKey {
    /// Equivalent to [`SecretKey::public_key`].
    fn from(sk: &SecretKey) -> Self {
        sk.public_key()
    }
}

impl Identity {
    /// Generates a fresh identity from `rng`.
    pub fn generate<R>(rng: &mut R) -> Result<Self, ZkError>
    where
        R: TryCryptoRng,
        R::Error: Display,
    {
        Ok(Self::from_secret(SecretKey::random(rng)?))
    }

    /// Rebuilds an identity from a previously stored secret.
    pub fn from_secret(secret: SecretKey) -> Self {
        let public = secret.public_key();
        Self { secret, public }
    }

    pub fn secret(&self) -> &SecretKey {
        &self.secret
    }

    pub fn public(&self) -> &PublicKey {
        &self.public
    }

    pub fn into_parts(self) -> (SecretKey, PublicKey) {
        (self.secret, self.public)
    }
}

/// Generates an identity from the operating system's random source.
///
/// # Errors
///
/// [`ZkError::EntropyUnavailable`] if the OS cannot supply randomness.
pub fn generate_identity() -> Result<Identity, ZkError> {
    Identity::generate(&mut OsRng)
}
