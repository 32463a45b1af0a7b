//! The authorization gate separating public reads from admin-only
//! mutations.
//!
//! Token storage is in-process: there is a single admin, so sessions
//! not surviving a restart is an accepted trade-off.

use super::authenticator::{AdminIdentity, Authenticator};
use super::token::{SessionToken, SessionTokenValue};
use std::collections::HashMap;
use std::time::SystemTime;
use tracing::debug;

pub struct AuthGate {
    authenticator: Box<dyn Authenticator>,
    tokens: HashMap<SessionTokenValue, SessionToken>,
}

impl AuthGate {
    pub fn new(authenticator: Box<dyn Authenticator>) -> Self {
        AuthGate {
            authenticator,
            tokens: HashMap::new(),
        }
    }

    /// Verifies the credentials pair and, on success, issues a session
    /// token usable for future requests.
    pub fn login(&mut self, email: &str, password: &str) -> Option<SessionToken> {
        let identity = self.authenticator.verify(email, password)?;
        let token = SessionToken {
            email: identity.email,
            created: SystemTime::now(),
            value: SessionTokenValue::generate(),
        };
        self.tokens.insert(token.value.clone(), token.clone());
        debug!("Issued session token for {}", token.email);
        Some(token)
    }

    /// The gate decision: a valid, unexpired token yields the caller's
    /// identity; anything else is a denial. Expired tokens are dropped
    /// on the way.
    pub fn authorize(&mut self, value: &SessionTokenValue) -> Option<AdminIdentity> {
        let token = self.tokens.get(value)?;
        if token.is_expired(SystemTime::now()) {
            debug!("Session token for {} expired", token.email);
            self.tokens.remove(value);
            return None;
        }
        Some(AdminIdentity {
            email: token.email.clone(),
        })
    }

    /// Invalidates the token. Returns false when it was not active.
    pub fn logout(&mut self, value: &SessionTokenValue) -> bool {
        self.tokens.remove(value).is_some()
    }
}
