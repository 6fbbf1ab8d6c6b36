//! Typed error enum for the storage layer.
//!
//! Every backend reports the same domain failures (validation, conflict,
//! integrity) so callers never have to know which store is active. Absence is
//! `Ok(None)`, never an error.

use playlister_core::ConfigError;
use thiserror::Error;

pub type Result<T, E = StorageError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum StorageError {
    /// A required field is missing or blank.
    #[error("validation failed: {entity}.{field} is required")]
    Validation { entity: &'static str, field: &'static str },

    /// Unique email already taken.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Playlist references an owner that does not exist.
    #[error("integrity violation: {0}")]
    Integrity(String),

    /// Backend could not be reached or its schema could not be synchronized.
    #[error("connection failed ({backend}): {message}")]
    Connection { backend: &'static str, message: String },

    /// A data operation was issued before `connect()`.
    #[error("storage not connected: call connect() first")]
    NotConnected,

    /// Backend selection or feature mismatch.
    #[error("configuration error: {0}")]
    Config(String),

    /// Any other store-native failure.
    #[error("database error ({backend}): {source}")]
    Database {
        backend: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Stored data could not be deserialized into a domain type.
    #[error("data corruption: {context}")]
    DataCorruption {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Blocking worker panicked or was cancelled.
    #[error("background task failed: {0}")]
    Task(String),
}

impl StorageError {
    pub(crate) fn owner_missing(email: &str) -> Self {
        Self::Integrity(format!("owner with email {email} does not exist"))
    }

    pub(crate) fn email_taken(email: &str) -> Self {
        Self::Conflict(format!("user with email {email} already exists"))
    }

    /// Whether this error is likely transient (worth retrying by the caller).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Connection { .. } => true,
            Self::Database { source, .. } => is_transient_source(source.as_ref()),
            _ => false,
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    pub fn is_integrity(&self) -> bool {
        matches!(self, Self::Integrity(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

fn is_transient_source(source: &(dyn std::error::Error + Send + Sync + 'static)) -> bool {
    #[cfg(feature = "relational")]
    if let Some(e) = source.downcast_ref::<sqlx::Error>() {
        return matches!(e, sqlx::Error::PoolTimedOut | sqlx::Error::Io(_));
    }
    #[cfg(feature = "document")]
    {
        if let Some(e) = source.downcast_ref::<rusqlite::Error>() {
            return e.sqlite_error_code() == Some(rusqlite::ErrorCode::DatabaseBusy);
        }
        if source.is::<r2d2::Error>() {
            return true;
        }
    }
    false
}

/// Custom `From<sqlx::Error>` — NOT blanket `#[from]`.
///
/// - SQLSTATE 23505 → `Conflict`
/// - SQLSTATE 23503 → `Integrity`
/// - Everything else → `Database`
#[cfg(feature = "relational")]
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.code().is_some_and(|c| c == "23505") => {
                Self::Conflict(db_err.message().to_owned())
            },
            sqlx::Error::Database(db_err) if db_err.code().is_some_and(|c| c == "23503") => {
                Self::Integrity(db_err.message().to_owned())
            },
            _ => Self::Database { backend: "relational", source: Box::new(err) },
        }
    }
}

/// Unique-index violations become `Conflict`; everything else is `Database`.
#[cfg(feature = "document")]
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, msg)
                if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                Self::Conflict(msg.clone().unwrap_or_else(|| "unique constraint".to_owned()))
            },
            _ => Self::Database { backend: "document", source: Box::new(err) },
        }
    }
}

#[cfg(feature = "document")]
impl From<r2d2::Error> for StorageError {
    fn from(err: r2d2::Error) -> Self {
        Self::Database { backend: "document", source: Box::new(err) }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::DataCorruption {
            context: "JSON serialization/deserialization".to_owned(),
            source: Box::new(err),
        }
    }
}

impl From<ConfigError> for StorageError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<tokio::task::JoinError> for StorageError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Task(err.to_string())
    }
}
