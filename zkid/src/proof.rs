//! Proof types and challenge hashing for Schnorr identification.

use curve::{GroupElement, Scalar, hash_to_scalar};
use serde::{Deserialize, Serialize};

use crate::constants::{PK_SIZE, PROOF_SIZE};
use crate::errors::ZkError;

/// A non-interactive proof of knowledge of a secret key.
///
/// The proof is a pair `(R, s)` where:
/// - `R` is the commitment `k * G` for a fresh nonce `k`
/// - `s` is the response `k + c * x mod n`
///
/// # Structure
///
/// The proof satisfies the verification equation `s * G == R + c * Y`
/// where `c = H(Y || R || context)` is the Fiat-Shamir challenge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    /// The commitment point R = k * G
    #[serde(rename = "R")]
    pub r: GroupElement,
    /// The response scalar s = k + c * x
    pub s: Scalar,
}

/// Wire form of a proof as submitted by a client, not yet decoded.
///
/// `R` is SEC1 hex, `s` is big-endian hex with or without padding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofPayload {
    #[serde(rename = "R")]
    pub r: String,
    pub s: String,
}

impl Proof {
    /// Decodes a wire payload.
    ///
    /// # Errors
    ///
    /// [`ZkError::InvalidInput`] if `R` is not a curve point or `s` is not a
    /// scalar below the group order.
    pub fn from_payload(payload: &ProofPayload) -> Result<Self, ZkError> {
        let r = GroupElement::from_hex(&payload.r)
            .map_err(|e| ZkError::InvalidInput(format!("commitment: {e}")))?;
        let s = Scalar::from_hex(&payload.s)
            .map_err(|e| ZkError::InvalidInput(format!("response: {e}")))?;
        Ok(Self { r, s })
    }

    /// Encodes for the wire: compressed `R`, unpadded `s`.
    pub fn to_payload(&self) -> ProofPayload {
        ProofPayload {
            r: self.r.to_hex(),
            s: self.s.to_hex(),
        }
    }

    /// Fixed-width binary form `R || s`.
    pub fn to_bytes(&self) -> [u8; PROOF_SIZE] {
        let mut out = [0u8; PROOF_SIZE];
        out[..PK_SIZE].copy_from_slice(&self.r.to_compressed());
        out[PK_SIZE..].copy_from_slice(&self.s.to_be_bytes());
        out
    }

    /// Parses the binary form produced by [`Proof::to_bytes`].
    pub fn from_bytes(bytes: &[u8; PROOF_SIZE]) -> Result<Self, ZkError> {
        let r = GroupElement::from_sec1_bytes(&bytes[..PK_SIZE])?;
        let mut s_bytes = [0u8; PROOF_SIZE - PK_SIZE];
        s_bytes.copy_from_slice(&bytes[PK_SIZE..]);
        let s = Scalar::from_be_bytes(&s_bytes)?;
        Ok(Self { r, s })
    }
}

impl From<&Proof> for ProofPayload {
    fn from(proof: &Proof) -> Self {
        proof.to_payload()
    }
}

/// Computes the Fiat-Shamir challenge `c = H(Y || R || context) mod n`.
///
/// # Implementation Details
///
/// 1. `Y` and `R` are encoded as the lowercase hex text of their compressed
///    SEC1 form (66 ASCII characters each)
/// 2. The pre-image is `hex(Y) || hex(R) || context`, with no framing
/// 3. SHA-256 is applied and the digest is read big-endian and reduced mod `n`
///
/// Existing clients hash the same hex strings they send, so this layout is
/// part of the wire format.
pub(crate) fn hash_challenge(public: &GroupElement, r: &GroupElement, context: &[u8]) -> Scalar {
    let public_hex = public.to_hex();
    let r_hex = r.to_hex();
    hash_to_scalar(&[public_hex.as_bytes(), r_hex.as_bytes(), context])
}
