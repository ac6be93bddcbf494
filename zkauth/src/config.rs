//! Service configuration.
//!
//! Loaded from a JSON file, then overridden by environment variables.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AuthError, Result};

/// File name of the JSON user directory inside `data_dir`.
pub const USERS_FILE: &str = "users.json";

/// Configuration for [`crate::AuthService`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    /// Leading component of every login context.
    pub context_prefix: String,
    /// Lifetime of an issued login challenge, in seconds.
    pub challenge_ttl_secs: u64,
    /// Upper bound on outstanding challenges.
    pub max_pending_challenges: usize,
    /// Outstanding challenges kept per username; issuing another evicts
    /// the oldest.
    pub max_challenges_per_user: usize,
    /// Report unknown usernames as ordinary rejections.
    pub mask_unknown_users: bool,
    /// Directory holding `users.json`. None = in-memory only.
    pub data_dir: Option<PathBuf>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            context_prefix: "x402-login".to_string(),
            challenge_ttl_secs: 120,
            max_pending_challenges: 10_000,
            max_challenges_per_user: 4,
            mask_unknown_users: false,
            data_dir: None,
        }
    }
}

impl AuthConfig {
    /// Parse and validate a JSON document. Missing keys take defaults.
    pub fn from_json_str(input: &str) -> Result<Self> {
        let config: AuthConfig =
            serde_json::from_str(input).map_err(|e| AuthError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON file, then apply environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)?.apply_env()
    }

    /// Apply `ZKAUTH_*` environment overrides.
    pub fn apply_env(self) -> Result<Self> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_env_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(prefix) = lookup("ZKAUTH_CONTEXT_PREFIX") {
            self.context_prefix = prefix;
        }
        if let Some(ttl) = lookup("ZKAUTH_CHALLENGE_TTL_SECS") {
            self.challenge_ttl_secs = ttl
                .parse()
                .map_err(|_| AuthError::Config(format!("bad ZKAUTH_CHALLENGE_TTL_SECS: {ttl}")))?;
        }
        if let Some(cap) = lookup("ZKAUTH_MAX_CHALLENGES_PER_USER") {
            self.max_challenges_per_user = cap.parse().map_err(|_| {
                AuthError::Config(format!("bad ZKAUTH_MAX_CHALLENGES_PER_USER: {cap}"))
            })?;
        }
        if let Some(mask) = lookup("ZKAUTH_MASK_UNKNOWN_USERS") {
            self.mask_unknown_users = parse_flag(&mask).ok_or_else(|| {
                AuthError::Config(format!("bad ZKAUTH_MASK_UNKNOWN_USERS: {mask}"))
            })?;
        }
        if let Some(dir) = lookup("ZKAUTH_DATA_DIR") {
            self.data_dir = (!dir.is_empty()).then(|| PathBuf::from(dir));
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.context_prefix.is_empty() {
            return Err(AuthError::Config("context_prefix must not be empty".into()));
        }
        if self.max_pending_challenges == 0 {
            return Err(AuthError::Config(
                "max_pending_challenges must be at least 1".into(),
            ));
        }
        if self.max_challenges_per_user == 0 {
            return Err(AuthError::Config(
                "max_challenges_per_user must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Path of the JSON user directory, if persistence is enabled.
    pub fn users_file(&self) -> Option<PathBuf> {
        self.data_dir.as_ref().map(|dir| dir.join(USERS_FILE))
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
