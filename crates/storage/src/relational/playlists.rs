//! PlaylistStore implementation for PgStore.

use async_trait::async_trait;
use playlister_core::{NewPlaylist, Playlist, PlaylistUpdate, now};
use sqlx::{Executor, Postgres};

use super::{PLAYLIST_COLUMNS, PgStore, parse_id, row_to_playlist};
use crate::error::{Result, StorageError};
use crate::traits::PlaylistStore;
use crate::validation;

/// The foreign key would reject a missing owner too, but only with a
/// constraint message; this gives the domain error first.
async fn ensure_owner_exists<'e, E>(executor: E, email: &str) -> Result<()>
where
    E: Executor<'e, Database = Postgres>,
{
    let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
        .bind(email)
        .fetch_one(executor)
        .await?;
    if exists { Ok(()) } else { Err(StorageError::owner_missing(email)) }
}

#[async_trait]
impl PlaylistStore for PgStore {
    async fn create_playlist(&self, input: NewPlaylist) -> Result<Playlist> {
        validation::new_playlist(&input)?;
        let pool = self.pool()?;
        ensure_owner_exists(pool, &input.owner_email).await?;

        let ts = now();
        // Owner deleted between the check and the insert surfaces as 23503 → Integrity.
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO playlists (name, owner_email, songs, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $4)
             RETURNING id",
        )
        .bind(&input.name)
        .bind(&input.owner_email)
        .bind(serde_json::to_value(&input.songs)?)
        .bind(ts)
        .fetch_one(pool)
        .await
        .map_err(|e| match StorageError::from(e) {
            StorageError::Integrity(_) => StorageError::owner_missing(&input.owner_email),
            other => other,
        })?;

        tracing::debug!(id, owner = %input.owner_email, "Created playlist row");
        Ok(Playlist::from_new(id.to_string(), input, ts))
    }

    async fn get_playlist_by_id(&self, id: &str) -> Result<Option<Playlist>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        let row = sqlx::query(&format!("SELECT {PLAYLIST_COLUMNS} FROM playlists WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool()?)
            .await?;
        row.as_ref().map(row_to_playlist).transpose()
    }

    async fn get_playlists_by_owner_email(&self, email: &str) -> Result<Vec<Playlist>> {
        let rows = sqlx::query(&format!(
            "SELECT {PLAYLIST_COLUMNS} FROM playlists WHERE owner_email = $1 ORDER BY id"
        ))
        .bind(email)
        .fetch_all(self.pool()?)
        .await?;
        rows.iter().map(row_to_playlist).collect()
    }

    async fn update_playlist(
        &self,
        id: &str,
        update: PlaylistUpdate,
    ) -> Result<Option<Playlist>> {
        validation::playlist_update(&update)?;
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        let mut tx = self.pool()?.begin().await?;

        let row = sqlx::query(&format!(
            "SELECT {PLAYLIST_COLUMNS} FROM playlists WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(mut playlist) = row.as_ref().map(row_to_playlist).transpose()? else {
            return Ok(None);
        };

        if let Some(email) = update.owner_email.as_deref() {
            if email != playlist.owner_email {
                ensure_owner_exists(&mut *tx, email).await?;
            }
        }

        playlist.apply(update, now());
        sqlx::query(
            "UPDATE playlists SET name = $1, owner_email = $2, songs = $3, updated_at = $4
             WHERE id = $5",
        )
        .bind(&playlist.name)
        .bind(&playlist.owner_email)
        .bind(serde_json::to_value(&playlist.songs)?)
        .bind(playlist.updated_at)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| match StorageError::from(e) {
            StorageError::Integrity(_) => StorageError::owner_missing(&playlist.owner_email),
            other => other,
        })?;

        tx.commit().await?;
        Ok(Some(playlist))
    }

    async fn delete_playlist(&self, id: &str) -> Result<Option<Playlist>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        let row = sqlx::query(&format!(
            "DELETE FROM playlists WHERE id = $1 RETURNING {PLAYLIST_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(self.pool()?)
        .await?;
        let playlist = row.as_ref().map(row_to_playlist).transpose()?;
        if playlist.is_some() {
            tracing::debug!(id, "Deleted playlist row");
        }
        Ok(playlist)
    }

    async fn get_all_playlists(&self) -> Result<Vec<Playlist>> {
        let rows = sqlx::query(&format!("SELECT {PLAYLIST_COLUMNS} FROM playlists ORDER BY id"))
            .fetch_all(self.pool()?)
            .await?;
        rows.iter().map(row_to_playlist).collect()
    }
}
