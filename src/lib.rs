//! Portfolio Track Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod auth;
pub mod media;
pub mod server;
pub mod track_store;

// Re-export commonly used types for convenience
pub use auth::{Authenticator, PasswordHasher, StaticAdminAuthenticator};
pub use media::{MediaResolver, ResolverState};
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
pub use track_store::{SqliteTrackStore, TrackRepository, TrackStore};
