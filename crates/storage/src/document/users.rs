use playlister_core::{NewUser, Playlist, User, UserUpdate, now};
use rusqlite::TransactionBehavior;

use super::{
    DocumentStore, PLAYLISTS, USERS, delete_doc, find_by_field, find_by_id, find_one_by_field,
    insert_doc, replace_doc,
};
use crate::error::{Result, StorageError};
use crate::validation;

impl DocumentStore {
    /// Insert a new user document.
    ///
    /// # Errors
    /// `Validation` on a blank field, `Conflict` if the email index rejects it.
    pub(crate) fn insert_user(&self, input: NewUser) -> Result<User> {
        validation::new_user(&input)?;
        let conn = self.conn()?;
        let user = User::from_new(uuid::Uuid::new_v4().to_string(), input, now());
        insert_doc(&conn, USERS, &user.id, &user).map_err(|e| match e {
            StorageError::Conflict(_) => StorageError::email_taken(&user.email),
            other => other,
        })?;
        tracing::debug!(id = %user.id, "Created user document");
        Ok(user)
    }

    pub(crate) fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = self.conn()?;
        find_one_by_field(&conn, USERS, "email", email)
    }

    pub(crate) fn find_user_by_id(&self, id: &str) -> Result<Option<User>> {
        let conn = self.conn()?;
        find_by_id(&conn, USERS, id)
    }

    /// Apply a partial update. An email change rewrites `ownerEmail` on every
    /// owned playlist in the same transaction.
    pub(crate) fn modify_user(&self, id: &str, update: UserUpdate) -> Result<Option<User>> {
        validation::user_update(&update)?;
        let mut conn = self.conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let Some(mut user) = find_by_id::<User>(&tx, USERS, id)? else {
            return Ok(None);
        };
        let old_email = user.email.clone();
        let ts = now();
        user.apply(update, ts);

        replace_doc(&tx, USERS, id, &user).map_err(|e| match e {
            StorageError::Conflict(_) => StorageError::email_taken(&user.email),
            other => other,
        })?;

        if user.email != old_email {
            let owned: Vec<Playlist> = find_by_field(&tx, PLAYLISTS, "ownerEmail", &old_email)?;
            for mut playlist in owned {
                playlist.owner_email.clone_from(&user.email);
                playlist.updated_at = ts;
                replace_doc(&tx, PLAYLISTS, &playlist.id, &playlist)?;
            }
            tracing::debug!(id, "Moved playlists to new owner email");
        }

        tx.commit()?;
        Ok(Some(user))
    }

    /// Delete a user and all playlists owned by its email.
    pub(crate) fn remove_user(&self, id: &str) -> Result<Option<User>> {
        let mut conn = self.conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let Some(user) = find_by_id::<User>(&tx, USERS, id)? else {
            return Ok(None);
        };
        let owned: Vec<Playlist> = find_by_field(&tx, PLAYLISTS, "ownerEmail", &user.email)?;
        for playlist in &owned {
            delete_doc(&tx, PLAYLISTS, &playlist.id)?;
        }
        delete_doc(&tx, USERS, id)?;

        tx.commit()?;
        tracing::debug!(id, playlists = owned.len(), "Deleted user document");
        Ok(Some(user))
    }
}
