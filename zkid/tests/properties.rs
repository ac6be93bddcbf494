//! Property-based tests for Schnorr identification.
//!
//! Completeness over arbitrary keys and contexts, context binding, key
//! binding, and robustness of the wire decoder.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use curve::Scalar;
use proptest::prelude::*;
use zkid::{
    Identity, ProofPayload, SecretKey, create_proof, verify_encoded, verify_proof,
};

fn secret_from_bytes(bytes: [u8; 32]) -> Option<SecretKey> {
    SecretKey::from_bytes(&bytes).ok()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Any valid secret proves under any context.
    #[test]
    fn proof_completeness(
        bytes in any::<[u8; 32]>(),
        context in prop::collection::vec(any::<u8>(), 0..256),
    ) {
        let Some(secret) = secret_from_bytes(bytes) else {
            return Ok(());
        };
        let identity = Identity::from_secret(secret);
        let proof = create_proof(identity.secret(), &context).unwrap();

        prop_assert!(verify_proof(identity.public(), &proof, &context));
        prop_assert!(verify_encoded(&identity.public().to_hex(), &proof.to_payload(), &context));
    }

    /// A proof never carries over to another context.
    #[test]
    fn proof_bound_to_context(
        small in 1u64..u64::MAX,
        context1 in prop::collection::vec(any::<u8>(), 0..64),
        context2 in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        prop_assume!(context1 != context2);

        let secret = SecretKey::from_scalar(Scalar::from_u64(small)).unwrap();
        let proof = create_proof(&secret, &context1).unwrap();

        prop_assert!(!verify_proof(&secret.public_key(), &proof, &context2));
    }

    /// A proof never verifies under a different key.
    #[test]
    fn proof_bound_to_key(x1 in 1u64..u64::MAX, x2 in 1u64..u64::MAX) {
        prop_assume!(x1 != x2);

        let sk1 = SecretKey::from_scalar(Scalar::from_u64(x1)).unwrap();
        let sk2 = SecretKey::from_scalar(Scalar::from_u64(x2)).unwrap();
        let proof = create_proof(&sk1, b"ctx").unwrap();

        prop_assert!(!verify_proof(&sk2.public_key(), &proof, b"ctx"));
    }

    /// Arbitrary strings never make the verifier panic or accept.
    #[test]
    fn garbage_payload_rejected(r in ".{0,80}", s in ".{0,80}") {
        let public = SecretKey::from_scalar(Scalar::from_u64(7)).unwrap().public_key();
        let payload = ProofPayload { r, s };

        prop_assert!(!verify_encoded(&public.to_hex(), &payload, b"ctx"));
    }

    /// Scalar hex parsing ignores leading zero padding.
    #[test]
    fn scalar_hex_padding(value in any::<u64>(), pad in 0usize..40) {
        let hex = format!("{}{:x}", "0".repeat(pad), value);
        let parsed = Scalar::from_hex(&hex).unwrap();

        prop_assert_eq!(parsed, Scalar::from_u64(value));
        prop_assert_eq!(parsed.to_hex(), format!("{value:x}"));
    }
}
