//! Session manager.
//!
//! An explicit store object, shared as app data, instead of any process-wide
//! flag: callers are `Anonymous` until login succeeds, then hold a bearer
//! token resolving to `Authenticated(username)` until logout or expiry.
//!
//! Tokens are random and shown to the client once; the store keeps only
//! their SHA-256 digests, so a leaked store snapshot cannot be replayed.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::error::{AppError, AppResult};

/// Session token prefix.
const TOKEN_PREFIX: &str = "sbd_";
/// Length of the random part of a token.
const TOKEN_RANDOM_LENGTH: usize = 32;

/// An authenticated session.
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// In-memory session store keyed by token digest.
pub struct SessionStore {
    ttl: Duration,
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    /// Create a store issuing sessions with the given lifetime.
    pub fn new(ttl: Duration) -> Self {
        SessionStore {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Create a session for a user who just authenticated.
    ///
    /// Returns the bearer token (shown to the client once) and its expiry.
    pub fn create(&self, username: &str) -> (String, DateTime<Utc>) {
        let random_part: String = rand::thread_rng()
            .sample_iter(&rand::distributions::Alphanumeric)
            .take(TOKEN_RANDOM_LENGTH)
            .map(char::from)
            .collect();

        let token = format!("{}{}", TOKEN_PREFIX, random_part);
        let expires_at = Utc::now()
            + chrono::Duration::from_std(self.ttl).unwrap_or_else(|_| chrono::Duration::hours(8));

        let session = Session {
            username: username.to_string(),
            expires_at,
        };

        let mut sessions = self.sessions.write().expect("session lock poisoned");
        sessions.insert(hash_token(&token), session);

        (token, expires_at)
    }

    /// Resolve a token to its session.
    ///
    /// Expired sessions are removed on sight and reported the same as
    /// unknown tokens.
    pub fn validate(&self, token: &str) -> AppResult<Session> {
        let digest = hash_token(token);
        let now = Utc::now();

        {
            let sessions = self.sessions.read().expect("session lock poisoned");
            match sessions.get(&digest) {
                Some(s) if !s.is_expired(now) => return Ok(s.clone()),
                None => {
                    return Err(AppError::NotAuthenticated(
                        "invalid session token".to_string(),
                    ))
                }
                Some(_) => {} // expired, fall through to purge
            }
        }

        let mut sessions = self.sessions.write().expect("session lock poisoned");
        sessions.remove(&digest);
        Err(AppError::NotAuthenticated("session expired".to_string()))
    }

    /// Invalidate a token on logout. Unknown tokens are a no-op.
    pub fn revoke(&self, token: &str) {
        let mut sessions = self.sessions.write().expect("session lock poisoned");
        sessions.remove(&hash_token(token));
    }

    /// Drop every expired session. Called opportunistically; correctness
    /// never depends on it because `validate` rejects expired entries.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().expect("session lock poisoned");
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(now));
        before - sessions.len()
    }

    /// Number of live sessions (expired entries may still be counted until
    /// purged).
    pub fn len(&self) -> usize {
        self.sessions.read().expect("session lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Hash a session token for storage.
fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
