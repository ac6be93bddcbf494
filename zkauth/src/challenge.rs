//! Per-attempt login challenges.
//!
//! Each login attempt starts with the server issuing a random nonce under a
//! fresh session id. The proof context is derived from the nonce, so a proof
//! is valid for exactly one attempt. Challenges expire after the configured
//! TTL and are consumed by the first login that presents them.
//!
//! Two bounds apply: a global cap on outstanding challenges, and a per-user
//! cap past which the user's oldest challenge is evicted.

use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use parking_lot::Mutex;
use rand::rngs::OsRng;
use rand::TryRngCore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zkid::ZkError;

use crate::config::AuthConfig;
use crate::error::{AuthError, Result};

/// Size of the random challenge nonce in bytes.
pub const NONCE_SIZE: usize = 32;

/// Challenge handed to the client before it builds a proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginChallenge {
    pub session_id: String,
    /// Hex of the random nonce.
    pub nonce: String,
    /// Exact bytes the proof must be bound to.
    pub context: String,
    /// Expiry, milliseconds since the Unix epoch.
    pub expires_at: i64,
}

#[derive(Debug, Clone)]
struct PendingChallenge {
    username: String,
    context: String,
    expires_at: DateTime<Utc>,
}

/// Outstanding challenges keyed by session id.
#[derive(Debug)]
pub struct ChallengeRegistry {
    pending: DashMap<String, PendingChallenge>,
    /// Session ids per username, oldest first. May hold ids already taken;
    /// those are dropped lazily.
    by_user: DashMap<String, VecDeque<String>>,
    /// Serializes issuance so the capacity checks and the insert are one step.
    issue_lock: Mutex<()>,
    context_prefix: String,
    ttl: Duration,
    max_pending: usize,
    max_per_user: usize,
}

impl ChallengeRegistry {
    pub fn new(config: &AuthConfig) -> Self {
        let ttl_secs = i64::try_from(config.challenge_ttl_secs).unwrap_or(i64::MAX);
        Self {
            pending: DashMap::new(),
            by_user: DashMap::new(),
            issue_lock: Mutex::new(()),
            context_prefix: config.context_prefix.clone(),
            ttl: Duration::try_seconds(ttl_secs).unwrap_or(Duration::MAX),
            max_pending: config.max_pending_challenges,
            max_per_user: config.max_challenges_per_user,
        }
    }

    /// Number of challenges not yet consumed (expired ones included until
    /// the next prune).
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Issue a fresh challenge for `username`.
    ///
    /// If the user already holds `max_challenges_per_user` challenges, the
    /// oldest one is evicted first.
    ///
    /// # Errors
    ///
    /// [`AuthError::Busy`] if the table is still full after pruning expired
    /// entries; [`AuthError::Core`] if the OS random source fails.
    pub fn issue(&self, username: &str) -> Result<LoginChallenge> {
        let _issuing = self.issue_lock.lock();

        self.evict_over_user_cap(username);

        if self.pending.len() >= self.max_pending {
            let pruned = self.prune_expired();
            tracing::debug!(pruned, "pruned expired login challenges");
            if self.pending.len() >= self.max_pending {
                tracing::warn!(pending = self.pending.len(), "challenge table full");
                return Err(AuthError::Busy);
            }
        }

        let (challenge, expires_at) = self.build(username)?;
        self.pending.insert(
            challenge.session_id.clone(),
            PendingChallenge {
                username: username.to_string(),
                context: challenge.context.clone(),
                expires_at,
            },
        );
        self.by_user
            .entry(username.to_string())
            .or_default()
            .push_back(challenge.session_id.clone());

        Ok(challenge)
    }

    /// Build a challenge that looks like [`Self::issue`]'s but is not
    /// recorded, so it can never be redeemed and takes no table space.
    pub fn decoy(&self, username: &str) -> Result<LoginChallenge> {
        self.build(username).map(|(challenge, _)| challenge)
    }

    /// Consume the challenge for `session_id` and return its context.
    ///
    /// The entry is removed whatever the outcome. Returns `None` if the
    /// session is unknown, expired, or was issued to another username.
    pub fn take(&self, session_id: &str, username: &str) -> Option<String> {
        let (_, pending) = self.pending.remove(session_id)?;

        if Utc::now() >= pending.expires_at {
            tracing::warn!(session_id, "login challenge expired");
            return None;
        }
        if pending.username != username {
            tracing::warn!(session_id, "login challenge presented for another user");
            return None;
        }
        Some(pending.context)
    }

    /// Drop every expired challenge, returning how many were removed.
    pub fn prune_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.pending.len();
        self.pending.retain(|_, pending| pending.expires_at > now);
        self.by_user.retain(|_, sessions| {
            sessions.retain(|id| self.pending.contains_key(id));
            !sessions.is_empty()
        });
        before.saturating_sub(self.pending.len())
    }

    fn evict_over_user_cap(&self, username: &str) {
        let Some(mut sessions) = self.by_user.get_mut(username) else {
            return;
        };
        sessions.retain(|id| self.pending.contains_key(id));
        while sessions.len() >= self.max_per_user {
            let Some(oldest) = sessions.pop_front() else {
                break;
            };
            self.pending.remove(&oldest);
            tracing::debug!(username, session_id = %oldest, "evicted oldest login challenge");
        }
    }

    fn build(&self, username: &str) -> Result<(LoginChallenge, DateTime<Utc>)> {
        let mut nonce = [0u8; NONCE_SIZE];
        OsRng
            .try_fill_bytes(&mut nonce)
            .map_err(|e| AuthError::Core(ZkError::EntropyUnavailable(e.to_string())))?;
        let nonce = hex::encode(nonce);

        let session_id = Uuid::new_v4().to_string();
        let context = login_context(&self.context_prefix, username, &nonce);
        let expires_at = Utc::now()
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let challenge = LoginChallenge {
            session_id,
            nonce,
            context,
            expires_at: expires_at.timestamp_millis(),
        };
        Ok((challenge, expires_at))
    }
}

/// Context string a client must bind its proof to.
///
/// Layout: `{prefix}:{username}:{nonce_hex}`.
pub fn login_context(prefix: &str, username: &str, nonce_hex: &str) -> String {
    format!("{prefix}:{username}:{nonce_hex}")
}
