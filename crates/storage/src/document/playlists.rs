use playlister_core::{NewPlaylist, Playlist, PlaylistUpdate, User, now};
use rusqlite::TransactionBehavior;

use super::relationship::{link_to_owner, unlink_from_owner};
use super::{
    DocumentStore, PLAYLISTS, USERS, delete_doc, find_all, find_by_field, find_by_id,
    find_one_by_field, insert_doc, replace_doc,
};
use crate::error::{Result, StorageError};
use crate::validation;

impl DocumentStore {
    /// Insert a playlist and append its id to the owner's list.
    ///
    /// # Errors
    /// `Validation` on a blank field, `Integrity` if the owner does not exist.
    pub(crate) fn insert_playlist(&self, input: NewPlaylist) -> Result<Playlist> {
        validation::new_playlist(&input)?;
        let mut conn = self.conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let Some(mut owner) = find_one_by_field::<User>(&tx, USERS, "email", &input.owner_email)?
        else {
            return Err(StorageError::owner_missing(&input.owner_email));
        };

        let playlist = Playlist::from_new(uuid::Uuid::new_v4().to_string(), input, now());
        insert_doc(&tx, PLAYLISTS, &playlist.id, &playlist)?;
        link_to_owner(&tx, &mut owner, &playlist.id)?;

        tx.commit()?;
        tracing::debug!(id = %playlist.id, owner = %playlist.owner_email, "Created playlist document");
        Ok(playlist)
    }

    pub(crate) fn find_playlist(&self, id: &str) -> Result<Option<Playlist>> {
        let conn = self.conn()?;
        find_by_id(&conn, PLAYLISTS, id)
    }

    pub(crate) fn find_playlists_by_owner(&self, email: &str) -> Result<Vec<Playlist>> {
        let conn = self.conn()?;
        find_by_field(&conn, PLAYLISTS, "ownerEmail", email)
    }

    pub(crate) fn all_playlists(&self) -> Result<Vec<Playlist>> {
        let conn = self.conn()?;
        find_all(&conn, PLAYLISTS)
    }

    /// Apply a partial update. A new owner must exist; the id moves from the
    /// old owner's list to the new one in the same transaction.
    pub(crate) fn modify_playlist(
        &self,
        id: &str,
        update: PlaylistUpdate,
    ) -> Result<Option<Playlist>> {
        validation::playlist_update(&update)?;
        let mut conn = self.conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let Some(mut playlist) = find_by_id::<Playlist>(&tx, PLAYLISTS, id)? else {
            return Ok(None);
        };

        let new_owner = match update.owner_email.as_deref() {
            Some(email) if email != playlist.owner_email => {
                let owner = find_one_by_field::<User>(&tx, USERS, "email", email)?
                    .ok_or_else(|| StorageError::owner_missing(email))?;
                Some(owner)
            },
            _ => None,
        };

        let old_email = playlist.owner_email.clone();
        playlist.apply(update, now());
        replace_doc(&tx, PLAYLISTS, id, &playlist)?;

        if let Some(mut owner) = new_owner {
            unlink_from_owner(&tx, &old_email, id)?;
            link_to_owner(&tx, &mut owner, id)?;
        }

        tx.commit()?;
        Ok(Some(playlist))
    }

    /// Delete a playlist and remove its id from the owner's list.
    pub(crate) fn remove_playlist(&self, id: &str) -> Result<Option<Playlist>> {
        let mut conn = self.conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let Some(playlist) = find_by_id::<Playlist>(&tx, PLAYLISTS, id)? else {
            return Ok(None);
        };
        delete_doc(&tx, PLAYLISTS, id)?;
        unlink_from_owner(&tx, &playlist.owner_email, id)?;

        tx.commit()?;
        tracing::debug!(id, "Deleted playlist document");
        Ok(Some(playlist))
    }
}
