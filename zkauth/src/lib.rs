//! Registration and login boundary for Schnorr zero-knowledge identification.
//!
//! The identification core lives in `zkid`. This crate wraps it with what a
//! web backend needs around it:
//! - a user directory mapping usernames to public keys
//! - per-attempt login challenges that bind each proof to one session
//! - request and response types with the field names clients send
//! - configuration from a JSON file and `ZKAUTH_*` environment variables
//!
//! # Login flow
//!
//! ```
//! use zkauth::{AuthConfig, AuthService, LoginRequest, MemoryDirectory, RegistrationRequest};
//!
//! let service = AuthService::new(MemoryDirectory::new(), AuthConfig::default());
//!
//! // Client side: generate once, register the public half.
//! let identity = zkid::generate_identity().expect("entropy");
//! service
//!     .register(&RegistrationRequest {
//!         username: "alice".into(),
//!         public_key: identity.public().to_hex(),
//!     })
//!     .expect("register");
//!
//! // Each login: fetch a challenge, prove against its context.
//! let challenge = service.begin_login("alice").expect("challenge");
//! let proof = zkid::create_proof(identity.secret(), challenge.context.as_bytes())
//!     .expect("prove");
//!
//! let outcome = service
//!     .login(&LoginRequest {
//!         username: "alice".into(),
//!         session_id: challenge.session_id,
//!         proof: proof.to_payload(),
//!     })
//!     .expect("login");
//! assert!(outcome.is_accepted());
//! ```

pub mod challenge;
pub mod config;
pub mod directory;
pub mod error;
pub mod logging;
pub mod protocol;
pub mod service;

pub use challenge::{login_context, ChallengeRegistry, LoginChallenge, NONCE_SIZE};
pub use config::{AuthConfig, USERS_FILE};
pub use directory::{JsonFileDirectory, MemoryDirectory, UserDirectory, UserRecord};
pub use error::{AuthError, Result};
pub use protocol::{
    ChallengeRequest, LoginOutcome, LoginRequest, RegistrationRequest, RegistrationResponse,
};
pub use service::AuthService;
