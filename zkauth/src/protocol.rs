//! Request and response bodies exchanged with the request layer.
//!
//! Field names follow the JSON the web client already sends
//! (`publicKey`, `proof.R`, `proof.s`).

use serde::{Deserialize, Serialize};
use zkid::ProofPayload;

/// `POST /auth/register`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub username: String,
    /// SEC1 hex, compressed or uncompressed.
    pub public_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub success: bool,
    pub message: String,
    /// The key as stored: compressed, lowercase.
    pub public_key: String,
}

/// `POST /auth/challenge`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeRequest {
    pub username: String,
}

/// `POST /auth/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub session_id: String,
    pub proof: ProofPayload,
}

/// Result of a login attempt that reached the verifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginOutcome {
    Accepted,
    Rejected,
}

impl LoginOutcome {
    pub fn is_accepted(self) -> bool {
        self == LoginOutcome::Accepted
    }

    /// HTTP status the request layer should answer with.
    pub fn status_code(self) -> u16 {
        match self {
            LoginOutcome::Accepted => 200,
            LoginOutcome::Rejected => 401,
        }
    }
}

impl From<bool> for LoginOutcome {
    fn from(valid: bool) -> Self {
        if valid {
            LoginOutcome::Accepted
        } else {
            LoginOutcome::Rejected
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_wire_names() {
        let body = r#"{
            "username": "alice",
            "sessionId": "6f1c",
            "proof": { "R": "02aa", "s": "1f" }
        }"#;
        let request: LoginRequest = serde_json::from_str(body).expect("parse");
        assert_eq!(request.session_id, "6f1c");
        assert_eq!(request.proof.r, "02aa");
        assert_eq!(request.proof.s, "1f");
    }

    #[test]
    fn test_challenge_request_wire_names() {
        let request: ChallengeRequest =
            serde_json::from_str(r#"{ "username": "carol" }"#).expect("parse");
        assert_eq!(request.username, "carol");
        assert!(serde_json::from_str::<ChallengeRequest>(r#"{ "user": "carol" }"#).is_err());
    }

    #[test]
    fn test_registration_request_wire_names() {
        let body = r#"{ "username": "bob", "publicKey": "02bb" }"#;
        let request: RegistrationRequest = serde_json::from_str(body).expect("parse");
        assert_eq!(request.public_key, "02bb");
    }

    #[test]
    fn test_outcome_status() {
        assert_eq!(LoginOutcome::from(true).status_code(), 200);
        assert_eq!(LoginOutcome::from(false).status_code(), 401);
        assert_eq!(
            serde_json::to_string(&LoginOutcome::Accepted).expect("json"),
            "\"accepted\""
        );
    }
}
