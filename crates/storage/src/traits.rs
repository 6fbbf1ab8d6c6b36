//! Storage contract.
//!
//! Every backend implements the same three traits with identical semantics:
//! absence is `Ok(None)` (or an empty `Vec`), domain failures are the typed
//! [`StorageError`](crate::StorageError) variants, and no store-native handle
//! ever leaves the backend.

use async_trait::async_trait;
use playlister_core::{
    BackendKind, NewPlaylist, NewUser, Playlist, PlaylistUpdate, User, UserUpdate,
};

use crate::error::Result;
use crate::reconcile::ReconcileReport;

/// Connection lifecycle and maintenance.
#[async_trait]
pub trait StoreLifecycle: Send + Sync {
    /// Establish the connection and synchronize the schema. Idempotent.
    async fn connect(&self) -> Result<()>;

    /// Which variant this is.
    fn backend_kind(&self) -> BackendKind;

    /// Detect and repair divergence between each user's `playlists` field and
    /// the playlists actually owned by that user's email.
    async fn reconcile(&self) -> Result<ReconcileReport>;
}

/// User operations.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Create a user. Fails with `Validation` on a blank required field and
    /// `Conflict` if the email is taken.
    async fn create_user(&self, input: NewUser) -> Result<User>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>>;

    /// Replace the named attributes. An email change carries owned playlists along.
    async fn update_user(&self, id: &str, update: UserUpdate) -> Result<Option<User>>;

    /// Delete a user and every playlist it owns. Returns the user as it was.
    async fn delete_user(&self, id: &str) -> Result<Option<User>>;
}

/// Playlist operations.
#[async_trait]
pub trait PlaylistStore: Send + Sync {
    /// Create a playlist and record it on its owner. Fails with `Integrity` if
    /// `owner_email` does not belong to an existing user.
    async fn create_playlist(&self, input: NewPlaylist) -> Result<Playlist>;

    async fn get_playlist_by_id(&self, id: &str) -> Result<Option<Playlist>>;

    /// Playlists owned by `email` in creation order. Empty if none.
    async fn get_playlists_by_owner_email(&self, email: &str) -> Result<Vec<Playlist>>;

    /// Replace the named attributes; `songs` is replaced wholesale.
    async fn update_playlist(&self, id: &str, update: PlaylistUpdate)
    -> Result<Option<Playlist>>;

    /// Delete a playlist and drop it from its owner. Returns the playlist as it was.
    async fn delete_playlist(&self, id: &str) -> Result<Option<Playlist>>;

    async fn get_all_playlists(&self) -> Result<Vec<Playlist>>;
}

/// The full contract.
pub trait Store: StoreLifecycle + UserStore + PlaylistStore {}

impl<T: StoreLifecycle + UserStore + PlaylistStore> Store for T {}
