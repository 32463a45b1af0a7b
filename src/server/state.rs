use axum::extract::FromRef;

use crate::auth::AuthGate;
use crate::track_store::TrackRepository;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use super::ServerConfig;

pub type SharedRepository = Arc<TrackRepository>;
pub type GuardedAuthGate = Arc<Mutex<AuthGate>>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub repository: SharedRepository,
    pub auth_gate: GuardedAuthGate,
    pub hash: String,
}

impl FromRef<ServerState> for SharedRepository {
    fn from_ref(input: &ServerState) -> Self {
        input.repository.clone()
    }
}

impl FromRef<ServerState> for GuardedAuthGate {
    fn from_ref(input: &ServerState) -> Self {
        input.auth_gate.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
