//! UserStore implementation for PgStore.

use async_trait::async_trait;
use playlister_core::{NewUser, User, UserUpdate, now};

use super::{PgStore, USER_COLUMNS, parse_id, row_to_user};
use crate::error::{Result, StorageError};
use crate::traits::UserStore;
use crate::validation;

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, input: NewUser) -> Result<User> {
        validation::new_user(&input)?;
        let ts = now();
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO users (first_name, last_name, email, password_hash, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $5)
             RETURNING id",
        )
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.email)
        .bind(&input.password_hash)
        .bind(ts)
        .fetch_one(self.pool()?)
        .await
        .map_err(|e| match StorageError::from(e) {
            StorageError::Conflict(_) => StorageError::email_taken(&input.email),
            other => other,
        })?;

        tracing::debug!(id, "Created user row");
        Ok(User::from_new(id.to_string(), input, ts))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users u WHERE u.email = $1"))
            .bind(email)
            .fetch_optional(self.pool()?)
            .await?;
        row.as_ref().map(row_to_user).transpose()
    }

    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users u WHERE u.id = $1"))
            .bind(id)
            .fetch_optional(self.pool()?)
            .await?;
        row.as_ref().map(row_to_user).transpose()
    }

    async fn update_user(&self, id: &str, update: UserUpdate) -> Result<Option<User>> {
        validation::user_update(&update)?;
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        let mut tx = self.pool()?.begin().await?;

        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users u WHERE u.id = $1 FOR UPDATE OF u"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(mut user) = row.as_ref().map(row_to_user).transpose()? else {
            return Ok(None);
        };

        user.apply(update, now());
        sqlx::query(
            "UPDATE users
             SET first_name = $1, last_name = $2, email = $3, password_hash = $4, updated_at = $5
             WHERE id = $6",
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.updated_at)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| match StorageError::from(e) {
            StorageError::Conflict(_) => StorageError::email_taken(&user.email),
            other => other,
        })?;

        tx.commit().await?;
        Ok(Some(user))
    }

    async fn delete_user(&self, id: &str) -> Result<Option<User>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        let mut tx = self.pool()?.begin().await?;

        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users u WHERE u.id = $1 FOR UPDATE OF u"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(user) = row.as_ref().map(row_to_user).transpose()? else {
            return Ok(None);
        };

        // Owned playlists go with it through ON DELETE CASCADE.
        sqlx::query("DELETE FROM users WHERE id = $1").bind(id).execute(&mut *tx).await?;

        tx.commit().await?;
        tracing::debug!(id, playlists = user.playlists.len(), "Deleted user row");
        Ok(Some(user))
    }
}
