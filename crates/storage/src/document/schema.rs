//! Document store schema.
//!
//! A single generic collection table. The only structure imposed on bodies
//! is a unique index over user emails and a lookup index over playlist owners.

use rusqlite::Connection;

pub const SCHEMA_VERSION: i32 = 1;

pub fn ensure_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    let current_version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    tracing::debug!(current_version, target_version = SCHEMA_VERSION, "Document schema version");

    if current_version < 1 {
        tracing::info!("Creating document collections");
        conn.execute_batch(
            r#"
            BEGIN;

            CREATE TABLE IF NOT EXISTS documents (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                collection TEXT NOT NULL,
                id TEXT NOT NULL,
                body TEXT NOT NULL CHECK (json_valid(body)),
                UNIQUE (collection, id)
            );

            CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email
                ON documents (json_extract(body, '$.email'))
                WHERE collection = 'users';

            CREATE INDEX IF NOT EXISTS idx_playlists_owner
                ON documents (json_extract(body, '$.ownerEmail'))
                WHERE collection = 'playlists';

            PRAGMA user_version = 1;

            COMMIT;
            "#,
        )?;
    }

    Ok(())
}
