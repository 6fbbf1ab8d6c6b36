//! Storage layer for playlister
//!
//! One contract ([`UserStore`], [`PlaylistStore`], [`StoreLifecycle`]) with
//! two interchangeable backends:
//!
//! - [`DocumentStore`]: schema-less JSON documents in `SQLite`; the
//!   user → playlist relationship is kept by hand, inside one transaction.
//! - [`PgStore`]: PostgreSQL tables with a foreign key from
//!   `playlists.owner_email` to `users.email` and cascading rules.
//!
//! [`StorageBackend::open`] picks one from configuration and connects it.

#[cfg(not(any(feature = "document", feature = "relational")))]
compile_error!("enable at least one of the `document` or `relational` features");

mod backend;
#[cfg(feature = "document")]
mod document;
mod error;
mod reconcile;
#[cfg(feature = "relational")]
mod relational;
pub mod traits;
mod validation;

pub use backend::StorageBackend;
#[cfg(feature = "document")]
pub use document::DocumentStore;
pub use error::{Result, StorageError};
pub use reconcile::ReconcileReport;
#[cfg(feature = "relational")]
pub use relational::PgStore;
pub use traits::{PlaylistStore, Store, StoreLifecycle, UserStore};
