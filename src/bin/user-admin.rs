use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use zeroize::Zeroizing;

use hardened_api::auth::{
    hash_password, CredentialHasher, CredentialRecord, CredentialStore, CredentialsError,
    LoginCredentials, SqliteCredentialStore, StoreError,
};
use hardened_api::config::load_startup_config;
use hardened_api::observability::logging;

#[derive(Parser)]
#[command(name = "user-admin")]
#[command(about = "Provision credentials for the hardened API", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "API_CONFIG")]
    config: Option<PathBuf>,

    /// Override the credential database URL.
    #[arg(short, long)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a user; the password is read from the first line of stdin
    Add { username: String },
    /// Report whether a user exists
    Check { username: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_startup_config(cli.config.as_deref())?;
    if let Some(url) = cli.database_url {
        config.storage.database_url = url;
    }
    logging::init_logging(&config.observability);

    let store = SqliteCredentialStore::connect(&config.storage).await?;

    match cli.command {
        Commands::Add { username } => {
            let password = read_password()?;
            let parsed = LoginCredentials::try_from_parts(Some(username.as_str()), Some(password.as_str()));
            let credentials = match parsed {
                Ok(c) => c,
                Err(CredentialsError::Missing) => {
                    return Err("username and password must not be empty".into());
                }
                Err(CredentialsError::Oversized) => {
                    return Err("username is limited to 50 and password to 255 characters".into());
                }
            };

            let hasher = Arc::new(CredentialHasher::new(&config.hashing)?);
            let password_hash = hash_password(hasher, password).await?;
            let record = CredentialRecord {
                username: credentials.username().to_owned(),
                password_hash,
            };

            match store.insert(&record).await {
                Ok(()) => println!("Added user '{}'", record.username),
                Err(StoreError::Duplicate) => {
                    return Err(format!("user '{}' already exists", record.username).into());
                }
                Err(e) => return Err(e.into()),
            }
        }
        Commands::Check { username } => {
            let exists = store.find_password_hash(&username).await?.is_some();
            println!("{}", if exists { "present" } else { "absent" });
        }
    }

    store.close().await;
    Ok(())
}

/// First line of stdin, without the line terminator.
fn read_password() -> Result<Zeroizing<String>, std::io::Error> {
    let mut line = Zeroizing::new(String::new());
    std::io::stdin().lock().read_line(&mut line)?;
    let trimmed = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed);
    Ok(line)
}
