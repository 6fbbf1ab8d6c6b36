//! Document backend: schema-less JSON documents in `SQLite`.
//!
//! Users and playlists live as independent documents in one `documents`
//! table keyed by `(collection, id)`. Nothing in the store links them; the
//! owner's `playlists` field is maintained by [`relationship`] inside the
//! same transaction as the playlist write.
//!
//! All methods here are synchronous; `backend.rs` moves them onto the
//! blocking pool for the async contract.

mod backend;
mod playlists;
mod reconcile;
mod relationship;
mod schema;
mod users;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use playlister_core::{DOCUMENT_BUSY_TIMEOUT_MS, DOCUMENT_POOL_SIZE, DocumentConfig};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, OptionalExtension as _, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;

use crate::error::{Result, StorageError};

pub(crate) type PooledConn = PooledConnection<SqliteConnectionManager>;

pub(crate) const USERS: &str = "users";
pub(crate) const PLAYLISTS: &str = "playlists";

/// Document store over a pooled `SQLite` file.
///
/// Cheap to clone; clones share the pool.
#[derive(Clone, Debug)]
pub struct DocumentStore {
    path: PathBuf,
    pool_size: u32,
    pool: Arc<OnceCell<Pool<SqliteConnectionManager>>>,
}

impl DocumentStore {
    /// Describe a store; nothing is opened until [`connect`](crate::StoreLifecycle::connect).
    #[must_use]
    pub fn new(config: &DocumentConfig) -> Self {
        Self {
            path: config.path.clone(),
            pool_size: config.pool_size.max(1),
            pool: Arc::new(OnceCell::new()),
        }
    }

    /// Shorthand for a store at `path` with the default pool size.
    #[must_use]
    pub fn at_path(path: impl AsRef<Path>) -> Self {
        Self::new(&DocumentConfig {
            path: path.as_ref().to_path_buf(),
            pool_size: DOCUMENT_POOL_SIZE,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the pool and create the schema. Runs once; later calls are no-ops.
    pub(crate) async fn open(&self) -> Result<()> {
        let path = self.path.clone();
        let pool_size = self.pool_size;
        self.pool
            .get_or_try_init(|| async move {
                tokio::task::spawn_blocking(move || build_pool(&path, pool_size)).await?
            })
            .await?;
        Ok(())
    }

    pub(crate) fn conn(&self) -> Result<PooledConn> {
        let pool = self.pool.get().ok_or(StorageError::NotConnected)?;
        Ok(pool.get()?)
    }
}

fn connection_error(message: impl std::fmt::Display) -> StorageError {
    StorageError::Connection { backend: "document", message: message.to_string() }
}

fn build_pool(path: &Path, pool_size: u32) -> Result<Pool<SqliteConnectionManager>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            connection_error(format!("cannot create {}: {e}", parent.display()))
        })?;
    }

    let manager = SqliteConnectionManager::file(path).with_init(init_connection);
    let pool = Pool::builder().max_size(pool_size).build(manager).map_err(connection_error)?;

    let conn = pool.get().map_err(connection_error)?;
    schema::ensure_schema(&conn).map_err(connection_error)?;
    drop(conn);

    tracing::info!(path = %path.display(), pool_size, "Document store connected");
    Ok(pool)
}

/// Per-connection settings for concurrent access.
fn init_connection(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(&format!(
        "PRAGMA busy_timeout = {DOCUMENT_BUSY_TIMEOUT_MS};
         PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;"
    ))?;
    Ok(())
}

// ── Collection primitives ────────────────────────────────────────
//
// `conn` is a plain connection or a transaction (both deref to `Connection`).

pub(crate) fn insert_doc<T: Serialize>(
    conn: &Connection,
    collection: &str,
    id: &str,
    doc: &T,
) -> Result<()> {
    conn.execute(
        "INSERT INTO documents (collection, id, body) VALUES (?1, ?2, ?3)",
        params![collection, id, serde_json::to_string(doc)?],
    )?;
    Ok(())
}

/// Overwrite an existing document. Returns `false` if it does not exist.
pub(crate) fn replace_doc<T: Serialize>(
    conn: &Connection,
    collection: &str,
    id: &str,
    doc: &T,
) -> Result<bool> {
    let affected = conn.execute(
        "UPDATE documents SET body = ?3 WHERE collection = ?1 AND id = ?2",
        params![collection, id, serde_json::to_string(doc)?],
    )?;
    Ok(affected > 0)
}

pub(crate) fn delete_doc(conn: &Connection, collection: &str, id: &str) -> Result<bool> {
    let affected = conn.execute(
        "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
        params![collection, id],
    )?;
    Ok(affected > 0)
}

pub(crate) fn find_by_id<T: DeserializeOwned>(
    conn: &Connection,
    collection: &str,
    id: &str,
) -> Result<Option<T>> {
    let body: Option<String> = conn
        .query_row(
            "SELECT body FROM documents WHERE collection = ?1 AND id = ?2",
            params![collection, id],
            |row| row.get(0),
        )
        .optional()?;
    body.map(|b| decode(collection, &b)).transpose()
}

/// Insertion sequence of a document; orders playlists by creation.
pub(crate) fn seq_of(conn: &Connection, collection: &str, id: &str) -> Result<Option<i64>> {
    Ok(conn
        .query_row(
            "SELECT seq FROM documents WHERE collection = ?1 AND id = ?2",
            params![collection, id],
            |row| row.get(0),
        )
        .optional()?)
}

/// Documents whose top-level `field` equals `value`, in insertion order.
pub(crate) fn find_by_field<T: DeserializeOwned>(
    conn: &Connection,
    collection: &'static str,
    field: &'static str,
    value: &str,
) -> Result<Vec<T>> {
    // Literal collection and path so the partial expression indexes apply.
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT body FROM documents
         WHERE collection = '{collection}' AND json_extract(body, '$.{field}') = ?1
         ORDER BY seq"
    ))?;
    let bodies = stmt
        .query_map(params![value], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    bodies.iter().map(|b| decode(collection, b)).collect()
}

pub(crate) fn find_one_by_field<T: DeserializeOwned>(
    conn: &Connection,
    collection: &'static str,
    field: &'static str,
    value: &str,
) -> Result<Option<T>> {
    Ok(find_by_field(conn, collection, field, value)?.into_iter().next())
}

/// Every document in a collection, in insertion order.
pub(crate) fn find_all<T: DeserializeOwned>(conn: &Connection, collection: &str) -> Result<Vec<T>> {
    let mut stmt =
        conn.prepare_cached("SELECT body FROM documents WHERE collection = ?1 ORDER BY seq")?;
    let bodies = stmt
        .query_map(params![collection], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    bodies.iter().map(|b| decode(collection, b)).collect()
}

fn decode<T: DeserializeOwned>(collection: &str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| StorageError::DataCorruption {
        context: format!("malformed document in {collection}"),
        source: Box::new(e),
    })
}
