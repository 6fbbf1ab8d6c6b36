//! Relational backend: PostgreSQL via sqlx.
//!
//! The user → playlist relationship is declared in the schema
//! (`playlists.owner_email REFERENCES users(email) ON DELETE CASCADE ON UPDATE CASCADE`).
//! A user's `playlists` field is never stored; it is derived by query.

mod lifecycle;
mod playlists;
mod schema;
mod users;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use playlister_core::{
    PG_POOL_ACQUIRE_TIMEOUT_SECS, PG_POOL_IDLE_TIMEOUT_SECS, Playlist, RelationalConfig, Song,
    User,
};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tokio::sync::OnceCell;

use crate::error::{Result, StorageError};

#[derive(Clone, Debug)]
pub struct PgStore {
    config: RelationalConfig,
    pool: Arc<OnceCell<PgPool>>,
}

impl PgStore {
    /// Describe a store; nothing is opened until [`connect`](crate::StoreLifecycle::connect).
    #[must_use]
    pub fn new(config: &RelationalConfig) -> Self {
        Self { config: config.clone(), pool: Arc::new(OnceCell::new()) }
    }

    /// Store for a full connection string.
    #[must_use]
    pub fn from_url(database_url: &str) -> Self {
        Self::new(&RelationalConfig {
            url: Some(database_url.to_owned()),
            host: String::new(),
            port: 0,
            database: String::new(),
            user: String::new(),
            password: String::new(),
            max_connections: playlister_core::PG_POOL_MAX_CONNECTIONS,
        })
    }

    /// Connect, verify and synchronize the schema. Runs once.
    pub(crate) async fn open(&self) -> Result<()> {
        self.pool.get_or_try_init(|| build_pool(&self.config)).await?;
        Ok(())
    }

    pub(crate) fn pool(&self) -> Result<&PgPool> {
        self.pool.get().ok_or(StorageError::NotConnected)
    }
}

fn connection_error(message: impl std::fmt::Display) -> StorageError {
    StorageError::Connection { backend: "relational", message: message.to_string() }
}

/// `DATABASE_URL` is parsed as given; otherwise the parts are set one by one
/// so credentials never pass through URL syntax.
fn connect_options(config: &RelationalConfig) -> Result<PgConnectOptions> {
    match &config.url {
        Some(url) => url.parse().map_err(connection_error),
        None => Ok(PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database)),
    }
}

async fn build_pool(config: &RelationalConfig) -> Result<PgPool> {
    let options = connect_options(config)?;
    let host = options.get_host().to_owned();
    let database = options.get_database().unwrap_or_default().to_owned();

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections.max(1))
        .acquire_timeout(Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
        .idle_timeout(Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
        .test_before_acquire(true)
        .connect_with(options)
        .await
        .map_err(connection_error)?;

    sqlx::query("SELECT 1").execute(&pool).await.map_err(connection_error)?;
    schema::sync_schema(&pool).await.map_err(connection_error)?;

    tracing::info!(%host, %database, "PgStore connected, schema synchronized");
    Ok(pool)
}

/// Ids are `BIGSERIAL`; anything that is not one cannot exist.
pub(crate) fn parse_id(id: &str) -> Option<i64> {
    id.parse().ok()
}

pub(crate) const USER_COLUMNS: &str = "u.id, u.first_name, u.last_name, u.email, u.password_hash,
     u.created_at, u.updated_at,
     ARRAY(SELECT p.id::TEXT FROM playlists p WHERE p.owner_email = u.email ORDER BY p.id)
        AS playlists";

pub(crate) const PLAYLIST_COLUMNS: &str =
    "id, name, owner_email, songs, created_at, updated_at";

pub(crate) fn row_to_user(row: &PgRow) -> Result<User> {
    let id: i64 = row.try_get("id")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at")?;
    Ok(User {
        id: id.to_string(),
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        playlists: row.try_get("playlists")?,
        created_at,
        updated_at,
    })
}

pub(crate) fn row_to_playlist(row: &PgRow) -> Result<Playlist> {
    let id: i64 = row.try_get("id")?;
    let songs: serde_json::Value = row.try_get("songs")?;
    let songs: Vec<Song> = serde_json::from_value(songs).map_err(|e| {
        StorageError::DataCorruption {
            context: format!("songs of playlist {id}"),
            source: Box::new(e),
        }
    })?;
    Ok(Playlist {
        id: id.to_string(),
        name: row.try_get("name")?,
        owner_email: row.try_get("owner_email")?,
        songs,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
