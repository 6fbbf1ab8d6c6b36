//! StoreLifecycle implementation for PgStore.

use async_trait::async_trait;
use playlister_core::BackendKind;

use super::PgStore;
use crate::error::Result;
use crate::reconcile::ReconcileReport;
use crate::traits::StoreLifecycle;

#[async_trait]
impl StoreLifecycle for PgStore {
    async fn connect(&self) -> Result<()> {
        self.open().await
    }

    fn backend_kind(&self) -> BackendKind {
        BackendKind::Relational
    }

    /// The relationship is derived by query and guarded by the foreign key, so
    /// there is nothing to repair; the pass only counts users.
    async fn reconcile(&self) -> Result<ReconcileReport> {
        let users: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users").fetch_one(self.pool()?).await?;
        Ok(ReconcileReport {
            users_scanned: usize::try_from(users).unwrap_or(0),
            ..Default::default()
        })
    }
}
