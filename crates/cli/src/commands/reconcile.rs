use anyhow::Result;
use playlister_storage::{StorageBackend, StoreLifecycle};

use super::print_json;

pub(crate) async fn run(storage: &StorageBackend) -> Result<()> {
    let report = storage.reconcile().await?;
    if report.is_clean() {
        tracing::info!(users = report.users_scanned, "relationships consistent");
    } else {
        tracing::warn!(
            repaired = report.users_repaired,
            orphaned = report.orphaned_playlists.len(),
            "relationships repaired"
        );
    }
    print_json(&report)
}
