//! Backend selection with enum dispatch.
//!
//! [`StorageBackend::open`] is the only place that decides which store a
//! process runs against. The result is meant to be built once at startup,
//! wrapped in an `Arc` and handed to whoever needs storage.

use async_trait::async_trait;
use playlister_core::{
    BackendKind, NewPlaylist, NewUser, Playlist, PlaylistUpdate, StoreConfig, User, UserUpdate,
};

use crate::error::Result;
use crate::reconcile::ReconcileReport;
use crate::traits::{PlaylistStore, StoreLifecycle, UserStore};

macro_rules! dispatch {
    ($self:expr, $trait:path, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            #[cfg(feature = "document")]
            StorageBackend::Document(s) => <crate::DocumentStore as $trait>::$method(s, $($arg),*).await,
            #[cfg(feature = "relational")]
            StorageBackend::Relational(s) => <crate::PgStore as $trait>::$method(s, $($arg),*).await,
        }
    };
}

#[derive(Clone, Debug)]
pub enum StorageBackend {
    #[cfg(feature = "document")]
    Document(crate::DocumentStore),
    #[cfg(feature = "relational")]
    Relational(crate::PgStore),
}

impl StorageBackend {
    /// Construct the variant named by `config.backend` without connecting.
    ///
    /// # Errors
    /// `Config` if that variant was not compiled in.
    pub fn new(config: &StoreConfig) -> Result<Self> {
        match config.backend {
            BackendKind::Document => Self::document(config),
            BackendKind::Relational => Self::relational(config),
        }
    }

    /// Construct the configured variant and connect it.
    ///
    /// # Errors
    /// `Config` for an unavailable variant, `Connection` if the store cannot
    /// be reached or its schema cannot be created. Both are fatal at startup.
    pub async fn open(config: &StoreConfig) -> Result<Self> {
        let backend = Self::new(config)?;
        tracing::info!(backend = %config.backend, "Connecting storage backend");
        backend.connect().await?;
        Ok(backend)
    }

    #[cfg(feature = "document")]
    fn document(config: &StoreConfig) -> Result<Self> {
        Ok(Self::Document(crate::DocumentStore::new(&config.document)))
    }

    #[cfg(not(feature = "document"))]
    fn document(_config: &StoreConfig) -> Result<Self> {
        Err(crate::StorageError::Config("document backend not compiled in (feature `document`)".into()))
    }

    #[cfg(feature = "relational")]
    fn relational(config: &StoreConfig) -> Result<Self> {
        Ok(Self::Relational(crate::PgStore::new(&config.relational)))
    }

    #[cfg(not(feature = "relational"))]
    fn relational(_config: &StoreConfig) -> Result<Self> {
        Err(crate::StorageError::Config(
            "relational backend not compiled in (feature `relational`)".into(),
        ))
    }
}

#[cfg(feature = "document")]
impl From<crate::DocumentStore> for StorageBackend {
    fn from(store: crate::DocumentStore) -> Self {
        Self::Document(store)
    }
}

#[cfg(feature = "relational")]
impl From<crate::PgStore> for StorageBackend {
    fn from(store: crate::PgStore) -> Self {
        Self::Relational(store)
    }
}

// ── StoreLifecycle ───────────────────────────────────────────────

#[async_trait]
impl StoreLifecycle for StorageBackend {
    async fn connect(&self) -> Result<()> {
        dispatch!(self, StoreLifecycle, connect())
    }

    fn backend_kind(&self) -> BackendKind {
        match self {
            #[cfg(feature = "document")]
            Self::Document(_) => BackendKind::Document,
            #[cfg(feature = "relational")]
            Self::Relational(_) => BackendKind::Relational,
        }
    }

    async fn reconcile(&self) -> Result<ReconcileReport> {
        dispatch!(self, StoreLifecycle, reconcile())
    }
}

// ── UserStore ────────────────────────────────────────────────────

#[async_trait]
impl UserStore for StorageBackend {
    async fn create_user(&self, input: NewUser) -> Result<User> {
        dispatch!(self, UserStore, create_user(input))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        dispatch!(self, UserStore, get_user_by_email(email))
    }

    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        dispatch!(self, UserStore, get_user_by_id(id))
    }

    async fn update_user(&self, id: &str, update: UserUpdate) -> Result<Option<User>> {
        dispatch!(self, UserStore, update_user(id, update))
    }

    async fn delete_user(&self, id: &str) -> Result<Option<User>> {
        dispatch!(self, UserStore, delete_user(id))
    }
}

// ── PlaylistStore ────────────────────────────────────────────────

#[async_trait]
impl PlaylistStore for StorageBackend {
    async fn create_playlist(&self, input: NewPlaylist) -> Result<Playlist> {
        dispatch!(self, PlaylistStore, create_playlist(input))
    }

    async fn get_playlist_by_id(&self, id: &str) -> Result<Option<Playlist>> {
        dispatch!(self, PlaylistStore, get_playlist_by_id(id))
    }

    async fn get_playlists_by_owner_email(&self, email: &str) -> Result<Vec<Playlist>> {
        dispatch!(self, PlaylistStore, get_playlists_by_owner_email(email))
    }

    async fn update_playlist(
        &self,
        id: &str,
        update: PlaylistUpdate,
    ) -> Result<Option<Playlist>> {
        dispatch!(self, PlaylistStore, update_playlist(id, update))
    }

    async fn delete_playlist(&self, id: &str) -> Result<Option<Playlist>> {
        dispatch!(self, PlaylistStore, delete_playlist(id))
    }

    async fn get_all_playlists(&self) -> Result<Vec<Playlist>> {
        dispatch!(self, PlaylistStore, get_all_playlists())
    }
}
