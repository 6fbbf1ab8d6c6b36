use anyhow::Result;
use playlister_storage::{StorageBackend, StoreLifecycle};

pub(crate) fn run(storage: &StorageBackend) -> Result<()> {
    println!("connected: {}", storage.backend_kind());
    Ok(())
}
