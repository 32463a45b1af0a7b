use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use portfolio_track_server::auth::StaticAdminAuthenticator;
use portfolio_track_server::server::{run_server, RequestsLoggingLevel, ServerConfig};
use portfolio_track_server::track_store::{SqliteTrackStore, TrackRepository};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the SQLite tracks database file.
    #[clap(value_parser = parse_path)]
    pub track_db: PathBuf,

    /// Email address of the single admin account.
    #[clap(long, env = "ADMIN_EMAIL")]
    pub admin_email: String,

    /// Argon2 PHC hash of the admin password, as printed by
    /// `cli-admin hash-password`.
    #[clap(long, env = "ADMIN_PASSWORD_HASH")]
    pub admin_password_hash: String,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Path to the frontend directory to be statically served.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    info!("Opening SQLite tracks database at {:?}...", cli_args.track_db);
    let track_store = Arc::new(SqliteTrackStore::new(&cli_args.track_db)?);
    let repository = Arc::new(TrackRepository::new(track_store));

    let authenticator = Box::new(StaticAdminAuthenticator::new(
        cli_args.admin_email,
        cli_args.admin_password_hash,
    ));

    let config = ServerConfig {
        requests_logging_level: cli_args.logging_level,
        port: cli_args.port,
        frontend_dir_path: cli_args.frontend_dir_path,
    };

    info!("Ready to serve at port {}!", config.port);
    run_server(config, repository, authenticator).await
}
