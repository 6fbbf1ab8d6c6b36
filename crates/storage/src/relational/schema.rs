//! Schema synchronization, run once from `connect()`.
//!
//! Idempotent `CREATE ... IF NOT EXISTS` statements; there is no separate
//! migration step.

use sqlx::PgPool;

pub async fn sync_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Cascade on delete is what a user delete relies on; cascade on update
    // carries playlists along when a user changes email.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS playlists (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            owner_email TEXT NOT NULL
                REFERENCES users (email) ON DELETE CASCADE ON UPDATE CASCADE,
            songs JSONB NOT NULL DEFAULT '[]',
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_playlists_owner ON playlists (owner_email)")
        .execute(pool)
        .await?;

    Ok(())
}
