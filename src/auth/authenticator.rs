//! Credential verification.
//!
//! The server is single-tenant: one statically configured admin
//! identity. The comparison strategy is behind the `Authenticator`
//! trait so the hash scheme (or a future multi-admin backend) can be
//! swapped without touching the gate or repository contracts.

use anyhow::{bail, Result};
use std::str::FromStr;

/// The identity of a successfully verified caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminIdentity {
    pub email: String,
}

/// One method: verify a credentials pair, yielding an identity or
/// nothing. No side effects either way.
pub trait Authenticator: Send + Sync {
    fn verify(&self, email: &str, password: &str) -> Option<AdminIdentity>;
}

mod portfolio_argon2 {
    use anyhow::{anyhow, Result};
    use argon2::{
        password_hash::{
            rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        },
        Argon2,
    };

    pub fn hash(plain: &[u8]) -> Result<String> {
        let argon2 = Argon2::default();
        let salt = SaltString::generate(&mut OsRng);
        let hash_string = argon2
            .hash_password(plain, &salt)
            .map_err(|err| anyhow!("{}", err))?
            .to_string();
        Ok(hash_string)
    }

    pub fn verify<T: AsRef<str>>(plain_pw: &[u8], target_hash: T) -> Result<bool> {
        let argon2 = Argon2::default();
        let password_hash =
            PasswordHash::new(target_hash.as_ref()).map_err(|err| anyhow!("{}", err))?;
        Ok(argon2.verify_password(plain_pw, &password_hash).is_ok())
    }
}

#[derive(Clone, Debug)]
pub enum PasswordHasher {
    Argon2,
}

impl FromStr for PasswordHasher {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "argon2" => Ok(PasswordHasher::Argon2),
            _ => bail!("Unknown hasher {}", s),
        }
    }
}

impl PasswordHasher {
    pub fn hash(&self, plain: &str) -> Result<String> {
        match self {
            PasswordHasher::Argon2 => portfolio_argon2::hash(plain.as_bytes()),
        }
    }

    pub fn verify(&self, plain: &str, target_hash: &str) -> Result<bool> {
        match self {
            PasswordHasher::Argon2 => portfolio_argon2::verify(plain.as_bytes(), target_hash),
        }
    }
}

/// The production authenticator: case-insensitive email match against
/// the configured admin address, then a password-hash comparison.
pub struct StaticAdminAuthenticator {
    admin_email_lowercase: String,
    password_hash: String,
    hasher: PasswordHasher,
}

impl StaticAdminAuthenticator {
    /// `password_hash` is a PHC string produced by `cli-admin hash-password`.
    pub fn new<S: Into<String>>(admin_email: S, password_hash: S) -> Self {
        StaticAdminAuthenticator {
            admin_email_lowercase: admin_email.into().to_lowercase(),
            password_hash: password_hash.into(),
            hasher: PasswordHasher::Argon2,
        }
    }
}

impl Authenticator for StaticAdminAuthenticator {
    fn verify(&self, email: &str, password: &str) -> Option<AdminIdentity> {
        if email.to_lowercase() != self.admin_email_lowercase {
            return None;
        }
        match self.hasher.verify(password, &self.password_hash) {
            Ok(true) => Some(AdminIdentity {
                email: email.to_string(),
            }),
            _ => None,
        }
    }
}
