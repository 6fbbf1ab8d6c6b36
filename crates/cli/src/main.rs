use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use playlister_core::StoreConfig;
use playlister_storage::StorageBackend;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "playlister")]
#[command(about = "Users and playlists over a document or relational store", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to the configured backend and report which one is active
    Check,
    /// Load users and playlists from a JSON file
    Seed {
        #[arg(short, long)]
        file: std::path::PathBuf,
        /// First delete users from the file that already exist, with their
        /// playlists. Users not named in the file are kept.
        #[arg(long)]
        reset: bool,
    },
    /// Repair user -> playlist bookkeeping and print the report
    Reconcile,
    #[command(subcommand)]
    User(commands::user::UserCommand),
    #[command(subcommand)]
    Playlist(commands::playlist::PlaylistCommand),
}

/// Reads configuration from the environment and connects exactly one backend.
pub(crate) async fn open_storage() -> Result<Arc<StorageBackend>> {
    let config = StoreConfig::from_env().context("invalid storage configuration")?;
    let storage = StorageBackend::open(&config)
        .await
        .with_context(|| format!("failed to open {} backend", config.backend))?;
    Ok(Arc::new(storage))
}

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {},
        Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env"),
    }

    let cli = Cli::parse();
    let storage = open_storage().await?;

    match cli.command {
        Commands::Check => commands::check::run(&storage),
        Commands::Seed { file, reset } => commands::seed::run(&storage, &file, reset).await,
        Commands::Reconcile => commands::reconcile::run(&storage).await,
        Commands::User(cmd) => commands::user::run(&storage, cmd).await,
        Commands::Playlist(cmd) => commands::playlist::run(storage, cmd).await,
    }
}
