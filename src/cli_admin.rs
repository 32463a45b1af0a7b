use anyhow::Result;
use clap::{Parser, Subcommand};

use portfolio_track_server::auth::PasswordHasher;

#[derive(Parser, Debug)]
#[command(about = "Admin credential tooling for the portfolio track server.")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hashes a password, the output goes into ADMIN_PASSWORD_HASH.
    HashPassword { password: String },

    /// Verifies a password against a hash, it doesn't make any
    /// persistent change, it just compares the password hash.
    CheckPassword { password: String, hash: String },
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();
    let hasher = PasswordHasher::Argon2;

    match cli_args.command {
        Command::HashPassword { password } => {
            println!("{}", hasher.hash(&password)?);
        }
        Command::CheckPassword { password, hash } => {
            if hasher.verify(&password, &hash)? {
                println!("Password matches.");
            } else {
                println!("Password does NOT match.");
                std::process::exit(1);
            }
        }
    }
    Ok(())
}
