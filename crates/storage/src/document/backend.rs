//! Async contract for [`DocumentStore`]: each call runs the synchronous
//! implementation on tokio's blocking pool.

use async_trait::async_trait;
use playlister_core::{
    BackendKind, NewPlaylist, NewUser, Playlist, PlaylistUpdate, User, UserUpdate,
};

use super::DocumentStore;
use crate::error::Result;
use crate::reconcile::ReconcileReport;
use crate::traits::{PlaylistStore, StoreLifecycle, UserStore};

impl DocumentStore {
    async fn blocking<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Self) -> Result<T> + Send + 'static,
    {
        let store = self.clone();
        tokio::task::spawn_blocking(move || f(&store)).await?
    }
}

#[async_trait]
impl StoreLifecycle for DocumentStore {
    async fn connect(&self) -> Result<()> {
        self.open().await
    }

    fn backend_kind(&self) -> BackendKind {
        BackendKind::Document
    }

    async fn reconcile(&self) -> Result<ReconcileReport> {
        self.blocking(Self::repair_relationships).await
    }
}

#[async_trait]
impl UserStore for DocumentStore {
    async fn create_user(&self, input: NewUser) -> Result<User> {
        self.blocking(move |s| s.insert_user(input)).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = email.to_owned();
        self.blocking(move |s| s.find_user_by_email(&email)).await
    }

    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        let id = id.to_owned();
        self.blocking(move |s| s.find_user_by_id(&id)).await
    }

    async fn update_user(&self, id: &str, update: UserUpdate) -> Result<Option<User>> {
        let id = id.to_owned();
        self.blocking(move |s| s.modify_user(&id, update)).await
    }

    async fn delete_user(&self, id: &str) -> Result<Option<User>> {
        let id = id.to_owned();
        self.blocking(move |s| s.remove_user(&id)).await
    }
}

#[async_trait]
impl PlaylistStore for DocumentStore {
    async fn create_playlist(&self, input: NewPlaylist) -> Result<Playlist> {
        self.blocking(move |s| s.insert_playlist(input)).await
    }

    async fn get_playlist_by_id(&self, id: &str) -> Result<Option<Playlist>> {
        let id = id.to_owned();
        self.blocking(move |s| s.find_playlist(&id)).await
    }

    async fn get_playlists_by_owner_email(&self, email: &str) -> Result<Vec<Playlist>> {
        let email = email.to_owned();
        self.blocking(move |s| s.find_playlists_by_owner(&email)).await
    }

    async fn update_playlist(
        &self,
        id: &str,
        update: PlaylistUpdate,
    ) -> Result<Option<Playlist>> {
        let id = id.to_owned();
        self.blocking(move |s| s.modify_playlist(&id, update)).await
    }

    async fn delete_playlist(&self, id: &str) -> Result<Option<Playlist>> {
        let id = id.to_owned();
        self.blocking(move |s| s.remove_playlist(&id)).await
    }

    async fn get_all_playlists(&self) -> Result<Vec<Playlist>> {
        self.blocking(Self::all_playlists).await
    }
}
