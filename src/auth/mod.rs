mod authenticator;
mod gate;
mod token;

pub use authenticator::{AdminIdentity, Authenticator, PasswordHasher, StaticAdminAuthenticator};
pub use gate::AuthGate;
pub use token::{SessionToken, SessionTokenValue, SESSION_TTL};
