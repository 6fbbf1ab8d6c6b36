//! Shared constants for playlister.

/// Default value of `DB_TYPE` when unset.
pub const DEFAULT_BACKEND: &str = "document";

/// Default document database file name inside the data directory.
pub const DOCUMENT_DB_FILE: &str = "playlister.db";

/// SQLite connection pool: default size.
pub const DOCUMENT_POOL_SIZE: u32 = 8;

/// SQLite busy timeout in milliseconds.
pub const DOCUMENT_BUSY_TIMEOUT_MS: u32 = 30_000;

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 20;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;

/// Default PostgreSQL port.
pub const PG_DEFAULT_PORT: u16 = 5432;
