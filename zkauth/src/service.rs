//! Registration and login handlers.

use tracing::{info, warn};
use zkid::{verify_encoded, PublicKey};

use crate::challenge::{ChallengeRegistry, LoginChallenge};
use crate::config::AuthConfig;
use crate::directory::{UserDirectory, UserRecord};
use crate::error::{AuthError, Result};
use crate::protocol::{LoginOutcome, LoginRequest, RegistrationRequest, RegistrationResponse};

/// Key checked in place of a missing user's, so masked lookups cost the
/// same as real ones. This is the generator point `G`.
const DECOY_PUBLIC_KEY: &str = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";

/// Request-layer boundary around the identification core.
///
/// Holds the user directory and the pending challenge table. Every method
/// takes `&self`; the service can be shared across request handlers.
pub struct AuthService<D: UserDirectory> {
    directory: D,
    challenges: ChallengeRegistry,
    config: AuthConfig,
}

impl<D: UserDirectory> AuthService<D> {
    pub fn new(directory: D, config: AuthConfig) -> Self {
        Self {
            challenges: ChallengeRegistry::new(&config),
            directory,
            config,
        }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Outstanding login challenges.
    pub fn pending_challenges(&self) -> usize {
        self.challenges.len()
    }

    /// Register `username` with a public key.
    ///
    /// The key is stored in compressed lowercase form whatever encoding the
    /// client sent.
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidInput`] for an empty field or a key that is not
    ///   a valid point
    /// - [`AuthError::Conflict`] if the username is taken
    pub fn register(&self, request: &RegistrationRequest) -> Result<RegistrationResponse> {
        require("username", &request.username)?;
        require("publicKey", &request.public_key)?;

        let public_key = PublicKey::from_hex(&request.public_key)
            .map_err(|e| AuthError::InvalidInput(format!("publicKey: {e}")))?
            .to_hex();

        let record = UserRecord::new(request.username.clone(), public_key.clone());
        if !self.directory.create_user(record)? {
            warn!(username = %request.username, "registration for existing user");
            return Err(AuthError::Conflict);
        }

        info!(username = %request.username, public_key = %public_key, "registered identity");
        Ok(RegistrationResponse {
            success: true,
            message: "Identity Registered".to_string(),
            public_key,
        })
    }

    /// Issue a fresh challenge for the next login attempt of `username`.
    ///
    /// # Errors
    ///
    /// [`AuthError::NotFound`] for an unregistered user unless
    /// `mask_unknown_users` is set, in which case an unrecorded decoy
    /// challenge is returned.
    pub fn begin_login(&self, username: &str) -> Result<LoginChallenge> {
        require("username", username)?;

        if self.directory.get_user(username)?.is_none() {
            if !self.config.mask_unknown_users {
                return Err(AuthError::NotFound);
            }
            return self.challenges.decoy(username);
        }

        let challenge = self.challenges.issue(username)?;
        info!(username, session_id = %challenge.session_id, "issued login challenge");
        Ok(challenge)
    }

    /// Check a login proof against the registered key and the challenge
    /// issued under `request.session_id`.
    ///
    /// The challenge is consumed by this call whatever the outcome.
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidInput`] for empty fields
    /// - [`AuthError::NotFound`] for an unregistered user, unless masked
    pub fn login(&self, request: &LoginRequest) -> Result<LoginOutcome> {
        require("username", &request.username)?;
        require("sessionId", &request.session_id)?;
        require("proof.R", &request.proof.r)?;
        require("proof.s", &request.proof.s)?;

        let context = self
            .challenges
            .take(&request.session_id, &request.username);

        let user = self.directory.get_user(&request.username)?;
        if user.is_none() && !self.config.mask_unknown_users {
            return Err(AuthError::NotFound);
        }

        // One verification on every path that reaches here.
        let public_key = user
            .as_ref()
            .map_or(DECOY_PUBLIC_KEY, |user| user.public_key.as_str());
        let valid = std::hint::black_box(verify_encoded(
            public_key,
            &request.proof,
            context.as_deref().unwrap_or_default().as_bytes(),
        ));

        let outcome = match (&user, &context) {
            (None, _) => {
                warn!(username = %request.username, "login rejected: unknown user");
                LoginOutcome::Rejected
            }
            (Some(_), None) => {
                warn!(username = %request.username, "login rejected: no valid challenge");
                LoginOutcome::Rejected
            }
            (Some(_), Some(_)) if valid => {
                info!(username = %request.username, "login accepted");
                LoginOutcome::Accepted
            }
            (Some(_), Some(_)) => {
                warn!(username = %request.username, "login rejected: invalid proof");
                LoginOutcome::Rejected
            }
        };
        Ok(outcome)
    }

    /// Drop expired challenges. Returns how many were removed.
    pub fn prune_expired(&self) -> usize {
        self.challenges.prune_expired()
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AuthError::InvalidInput(format!("{field} is required")));
    }
    Ok(())
}
