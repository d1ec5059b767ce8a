//! Session management for CORKBOARD.
//!
//! The store keeps ephemeral server-side records keyed by an opaque UUID
//! token. The value handed to clients is `<token>.<signature>` where the
//! signature is an HMAC-SHA256 of the token under the configured session
//! secret; resolution verifies the signature before the lookup.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Session-related errors.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Session teardown failed.
    #[error("session teardown failed")]
    TeardownFailed,
}

/// Authenticated identity carried by a session.
///
/// Holds the capability route handlers need - who is acting - rather
/// than a full user row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// The acting user's ID.
    pub user_id: i64,
    /// The acting user's display name.
    pub user_name: String,
    /// The acting user's email (the admin guard compares this).
    pub email: String,
}

/// Server-side session record.
#[derive(Debug, Clone)]
struct SessionRecord {
    context: AuthContext,
    created_at: DateTime<Utc>,
}

/// In-process session store.
pub struct SessionStore {
    secret: Vec<u8>,
    sessions: RwLock<HashMap<String, SessionRecord>>,
}

impl SessionStore {
    /// Create a new store signing cookies with the given secret.
    pub fn new(secret: &str) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Open a session for the given identity.
    ///
    /// Returns the signed cookie value.
    pub fn create(&self, context: AuthContext) -> String {
        let token = Uuid::new_v4().to_string();
        let cookie_value = format!("{}.{}", token, self.sign(&token));

        let record = SessionRecord {
            context,
            created_at: Utc::now(),
        };
        self.sessions
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(token, record);

        cookie_value
    }

    /// Resolve a cookie value to the identity it was issued for.
    ///
    /// Returns `None` for forged, malformed, or unknown cookies.
    pub fn resolve(&self, cookie_value: &str) -> Option<AuthContext> {
        let token = self.verify(cookie_value)?;
        let sessions = self.sessions.read().unwrap_or_else(|e| e.into_inner());
        sessions.get(token).map(|record| record.context.clone())
    }

    /// Destroy the session for the given cookie value.
    ///
    /// Unknown or forged cookies are ignored; teardown is idempotent.
    /// The fallible signature is the store contract, for backends that
    /// can actually fail.
    pub fn destroy(&self, cookie_value: &str) -> Result<(), SessionError> {
        if let Some(token) = self.verify(cookie_value) {
            let removed = self
                .sessions
                .write()
                .unwrap_or_else(|e| e.into_inner())
                .remove(token);
            if let Some(record) = removed {
                debug!(
                    user_id = record.context.user_id,
                    opened_at = %record.created_at,
                    "session destroyed"
                );
            }
        }
        Ok(())
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    /// Sign a token with the store secret.
    fn sign(&self, token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC accepts keys of any length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Verify the cookie signature and return the embedded token.
    fn verify<'a>(&self, cookie_value: &'a str) -> Option<&'a str> {
        let (token, signature) = cookie_value.split_once('.')?;
        let signature = hex::decode(signature).ok()?;

        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC accepts keys of any length");
        mac.update(token.as_bytes());
        let expected = mac.finalize().into_bytes();

        if bool::from(signature.as_slice().ct_eq(expected.as_slice())) {
            Some(token)
        } else {
            None
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("sessions", &self.session_count())
            .finish()
    }
}
