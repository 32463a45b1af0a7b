//! Opaque session tokens.

use rand::Rng;
use rand_distr::Alphanumeric;
use std::time::{Duration, SystemTime};

/// Sessions expire 24 hours after issuance.
pub const SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct SessionTokenValue(pub String);

impl SessionTokenValue {
    pub fn generate() -> SessionTokenValue {
        let rng = rand::rng();
        let random_string: String = rng
            .sample_iter(&Alphanumeric)
            .take(64)
            .map(char::from)
            .collect();
        SessionTokenValue(random_string)
    }
}

#[derive(Clone, Debug)]
pub struct SessionToken {
    pub email: String,
    pub created: SystemTime,
    pub value: SessionTokenValue,
}

impl SessionToken {
    pub fn is_expired(&self, now: SystemTime) -> bool {
        match now.duration_since(self.created) {
            Ok(age) => age >= SESSION_TTL,
            // A token created "in the future" (clock drift) still counts.
            Err(_) => false,
        }
    }
}
