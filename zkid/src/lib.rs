//! Schnorr zero-knowledge identification over secp256k1.
//!
//! A user proves knowledge of the secret key behind a registered public key
//! without sending the secret. The scheme is Schnorr's identification
//! protocol made non-interactive with the Fiat-Shamir transform:
//! - SHA-256 over `hex(Y) || hex(R) || context` for the challenge
//! - secp256k1 arithmetic from the `curve` crate
//!
//! # Overview
//!
//! Three operations make up the core:
//! - [`generate_identity`]: draw a secret `x` and its public key `Y = x * G`
//! - [`create_proof`]: prove knowledge of `x` for a given context
//! - [`verify_proof`]: accept or reject a proof for `Y` and a context
//!
//! All three are pure computations over value types and can be called from
//! any number of threads at once.
//!
//! # Example
//!
//! ```
//! use zkid::{create_proof, generate_identity, verify_proof};
//!
//! let identity = generate_identity().expect("entropy");
//! let context = b"login-session-42";
//!
//! let proof = create_proof(identity.secret(), context).expect("prove");
//! assert!(verify_proof(identity.public(), &proof, context));
//! assert!(!verify_proof(identity.public(), &proof, b"login-session-43"));
//! ```
//!
//! # Security Considerations
//!
//! - Every proof uses a fresh nonce from a cryptographically secure source
//! - The verifier should choose the context and make it unique per attempt;
//!   a fixed context lets a captured proof be replayed
//! - Secret keys are wiped from memory on drop

mod constants;
mod errors;
mod keys;
mod proof;
mod prover;
mod store;
mod verifier;


pub use constants::{PK_SIZE, PROOF_SIZE, SK_HEX_LEN, SK_SIZE};
pub use errors::ZkError;
pub use keys::{Identity, PublicKey, SecretKey, generate_identity};
pub use proof::{Proof, ProofPayload};
pub use prover::{create_proof, create_proof_from_hex, create_proof_with_rng};
pub use store::{FileSecretStore, MemorySecretStore, SecretStore, load_or_generate};
pub use verifier::{verify_encoded, verify_proof};
