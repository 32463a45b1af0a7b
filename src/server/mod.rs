mod config;
mod error;
mod http_layers;
#[allow(clippy::module_inception)]
mod server;
mod session;
mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use http_layers::{log_requests, RequestsLoggingLevel};
pub use server::{make_app, run_server};
pub use state::ServerState;
