//! Proof verification.

use curve::GroupElement;
use tracing::debug;

use crate::keys::PublicKey;
use crate::proof::{Proof, ProofPayload, hash_challenge};

/// Checks a proof against a public key and context.
///
/// The verification checks whether `s * G == R + c * Y`, where:
/// - `G` is the curve generator
/// - `s` is the proof response
/// - `R` is the proof commitment
/// - `Y` is the public key
/// - `c = H(Y || R || context)` is the challenge
///
/// Returns `false` for any proof that fails the equation or carries an
/// identity commitment. Point comparison is constant-time.
pub fn verify_proof(public: &PublicKey, proof: &Proof, context: &[u8]) -> bool {
    let y = public.as_element();
    if y.is_identity() || proof.r.is_identity() {
        debug!("rejecting proof with identity point");
        return false;
    }

    let c = hash_challenge(y, &proof.r, context);
    let lhs = GroupElement::mul_generator(&proof.s);
    let rhs = proof.r + y * &c;

    lhs == rhs
}

/// Checks a proof given in wire form.
///
/// Decoding failures (bad hex, points off the curve, `s >= n`) yield
/// `false`; this function never errors or panics on client input.
pub fn verify_encoded(public_hex: &str, payload: &ProofPayload, context: &[u8]) -> bool {
    let public = match PublicKey::from_hex(public_hex) {
        Ok(public) => public,
        Err(err) => {
            debug!(error = %err, "rejecting proof: malformed public key");
            return false;
        }
    };

    let proof = match Proof::from_payload(payload) {
        Ok(proof) => proof,
        Err(err) => {
            debug!(error = %err, "rejecting proof: malformed payload");
            return false;
        }
    };

    verify_proof(&public, &proof, context)
}
