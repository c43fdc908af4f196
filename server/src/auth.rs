//! Passwordless magic-link auth.
//!
//! A recruiter asking to sign in gets a short-lived challenge token mailed
//! to them; presenting the exact outstanding token back signs them in. The
//! token is an HMAC-signed JSON payload, `v1.<payload>.<sig>` with URL-safe
//! unpadded base64, so it survives being pasted into a query string.
//!
//! Accounts are provisioned when a purchase is validated, never at sign-in.
//! Accounts and sessions live in process memory and do not survive a
//! restart.

use std::collections::HashMap;
use std::sync::RwLock;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

const TOKEN_VERSION_V1: &str = "v1";
const CHALLENGE_TTL_MINUTES: i64 = 10;

#[derive(Debug, Serialize, Deserialize)]
pub struct ChallengePayload {
    pub email: String,
    /// RFC 3339 instant after which the token is dead.
    pub expiration: String,
}

/// Mints a signed challenge token for `email`, valid for ten minutes.
pub fn mint_challenge(email: &str, secret: &[u8]) -> Result<String, AppError> {
    let payload = ChallengePayload {
        email: email.to_string(),
        expiration: (Utc::now() + Duration::minutes(CHALLENGE_TTL_MINUTES)).to_rfc3339(),
    };
    encode_token(&payload, secret)
}

fn encode_token(payload: &ChallengePayload, secret: &[u8]) -> Result<String, AppError> {
    let payload_bytes =
        serde_json::to_vec(payload).map_err(|e| AppError::Internal(e.to_string()))?;
    let payload_part = URL_SAFE_NO_PAD.encode(payload_bytes);

    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    mac.update(payload_part.as_bytes());
    let sig_part = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(format!("{TOKEN_VERSION_V1}.{payload_part}.{sig_part}"))
}

/// Checks format and signature and returns the embedded payload. Expiry and
/// email matching are the caller's to verify.
pub fn decode_token(token: &str, secret: &[u8]) -> Result<ChallengePayload, AppError> {
    let mut parts = token.splitn(3, '.');
    let (Some(version), Some(payload_part), Some(sig_part)) =
        (parts.next(), parts.next(), parts.next())
    else {
        return Err(AppError::SignInFailed);
    };
    if version != TOKEN_VERSION_V1 {
        return Err(AppError::SignInFailed);
    }

    let mut mac =
        HmacSha256::new_from_slice(secret).map_err(|e| AppError::Internal(e.to_string()))?;
    mac.update(payload_part.as_bytes());
    let sig = URL_SAFE_NO_PAD
        .decode(sig_part)
        .map_err(|_| AppError::SignInFailed)?;
    mac.verify_slice(&sig).map_err(|_| AppError::SignInFailed)?;

    let payload_bytes = URL_SAFE_NO_PAD
        .decode(payload_part)
        .map_err(|_| AppError::SignInFailed)?;
    serde_json::from_slice(&payload_bytes).map_err(|_| AppError::SignInFailed)
}

#[derive(Default)]
struct Account {
    /// The challenge token last mailed out, cleared once it is used.
    challenge: Option<String>,
}

/// In-memory account and session registry, keyed by lowercased email.
#[derive(Default)]
pub struct AuthRegistry {
    accounts: RwLock<HashMap<String, Account>>,
    sessions: RwLock<HashMap<String, String>>,
}

impl AuthRegistry {
    /// Provision an account on first validated purchase; a no-op when it
    /// already exists.
    pub fn ensure_account(&self, email: &str) {
        let mut accounts = self.accounts.write().unwrap();
        accounts.entry(email.to_lowercase()).or_default();
    }

    pub fn account_exists(&self, email: &str) -> bool {
        let accounts = self.accounts.read().unwrap();
        accounts.contains_key(&email.to_lowercase())
    }

    /// Records the outstanding challenge for an account. Fails when the
    /// recruiter has posts but never completed a purchase, so no account.
    pub fn set_challenge(&self, email: &str, token: &str) -> Result<(), AppError> {
        let mut accounts = self.accounts.write().unwrap();
        let account = accounts
            .get_mut(&email.to_lowercase())
            .ok_or_else(|| AppError::Internal("error updating account attributes".to_string()))?;
        account.challenge = Some(token.to_string());
        Ok(())
    }

    /// The full sign-in check: known account, verbatim outstanding
    /// challenge, valid signature, matching email, unexpired. Success
    /// consumes the challenge and opens a session.
    pub fn sign_in(&self, email: &str, answer: &str, secret: &[u8]) -> Result<String, AppError> {
        let key = email.to_lowercase();

        {
            let accounts = self.accounts.read().unwrap();
            let account = accounts.get(&key).ok_or(AppError::SignInFailed)?;
            match &account.challenge {
                Some(expected) if expected == answer => {}
                _ => return Err(AppError::SignInFailed),
            }
        }

        let payload = decode_token(answer, secret)?;
        if !payload.email.eq_ignore_ascii_case(email) {
            return Err(AppError::SignInFailed);
        }
        let expiration = DateTime::parse_from_rfc3339(&payload.expiration)
            .map_err(|_| AppError::SignInFailed)?;
        if Utc::now() > expiration {
            return Err(AppError::SignInFailed);
        }

        let mut accounts = self.accounts.write().unwrap();
        if let Some(account) = accounts.get_mut(&key) {
            account.challenge = None;
        }

        let session_token = Uuid::new_v4().to_string();
        let mut sessions = self.sessions.write().unwrap();
        sessions.insert(session_token.clone(), key);
        Ok(session_token)
    }

    pub fn signed_in(&self, session_token: &str) -> bool {
        let sessions = self.sessions.read().unwrap();
        sessions.contains_key(session_token)
    }

    /// Drops the session, answering whether one existed.
    pub fn sign_out(&self, session_token: &str) -> bool {
        let mut sessions = self.sessions.write().unwrap();
        sessions.remove(session_token).is_some()
    }
}
