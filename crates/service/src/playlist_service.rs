use std::sync::Arc;

use playlister_core::{NewPlaylist, Playlist, PlaylistPair, PlaylistUpdate, Song, User};
use playlister_storage::StorageBackend;
use playlister_storage::traits::{PlaylistStore, UserStore};

use crate::error::{Result, ServiceError};

/// Playlist operations performed on behalf of an authenticated user.
///
/// A playlist is visible to, and modifiable by, the user whose email it is
/// owned by. Anyone else gets [`ServiceError::Forbidden`].
pub struct PlaylistService {
    storage: Arc<StorageBackend>,
}

impl PlaylistService {
    #[must_use]
    pub const fn new(storage: Arc<StorageBackend>) -> Self {
        Self { storage }
    }

    pub async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        songs: Vec<Song>,
    ) -> Result<Playlist> {
        let user = self.requesting_user(user_id).await?;
        let playlist =
            self.storage.create_playlist(NewPlaylist::new(name, &user.email, songs)).await?;
        tracing::debug!(user_id, playlist_id = %playlist.id, "playlist created");
        Ok(playlist)
    }

    pub async fn playlist(&self, user_id: &str, playlist_id: &str) -> Result<Playlist> {
        self.owned_playlist(user_id, playlist_id).await
    }

    pub async fn update_playlist(
        &self,
        user_id: &str,
        playlist_id: &str,
        update: PlaylistUpdate,
    ) -> Result<Playlist> {
        if update.is_empty() {
            return Err(ServiceError::InvalidInput("update names no fields".to_owned()));
        }
        self.owned_playlist(user_id, playlist_id).await?;
        self.storage
            .update_playlist(playlist_id, update)
            .await?
            .ok_or_else(|| ServiceError::playlist_not_found(playlist_id))
    }

    /// Deletes a playlist after checking ownership, returning what was removed.
    pub async fn delete_playlist(&self, user_id: &str, playlist_id: &str) -> Result<Playlist> {
        self.owned_playlist(user_id, playlist_id).await?;
        let deleted = self
            .storage
            .delete_playlist(playlist_id)
            .await?
            .ok_or_else(|| ServiceError::playlist_not_found(playlist_id))?;
        tracing::debug!(user_id, playlist_id, "playlist deleted");
        Ok(deleted)
    }

    /// `(id, name)` pairs of the user's playlists in creation order.
    pub async fn playlist_pairs(&self, user_id: &str) -> Result<Vec<PlaylistPair>> {
        let user = self.requesting_user(user_id).await?;
        let playlists = self.storage.get_playlists_by_owner_email(&user.email).await?;
        Ok(playlists.iter().map(Playlist::pair).collect())
    }

    pub async fn all_playlists(&self) -> Result<Vec<Playlist>> {
        Ok(self.storage.get_all_playlists().await?)
    }

    async fn requesting_user(&self, user_id: &str) -> Result<User> {
        self.storage
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::user_not_found(user_id))
    }

    async fn owned_playlist(&self, user_id: &str, playlist_id: &str) -> Result<Playlist> {
        let playlist = self
            .storage
            .get_playlist_by_id(playlist_id)
            .await?
            .ok_or_else(|| ServiceError::playlist_not_found(playlist_id))?;
        let owner = self.storage.get_user_by_email(&playlist.owner_email).await?;
        match owner {
            Some(owner) if owner.id == user_id => Ok(playlist),
            _ => {
                tracing::warn!(user_id, playlist_id, "playlist access by non-owner");
                Err(ServiceError::Forbidden {
                    user_id: user_id.to_owned(),
                    playlist_id: playlist_id.to_owned(),
                })
            },
        }
    }
}
