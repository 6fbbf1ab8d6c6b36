use std::path::Path;

use anyhow::{Context, Result};
use playlister_core::{NewPlaylist, NewUser};
use playlister_storage::{PlaylistStore, StorageBackend, UserStore};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SeedData {
    #[serde(default)]
    users: Vec<NewUser>,
    #[serde(default)]
    playlists: Vec<NewPlaylist>,
}

pub(crate) async fn run(storage: &StorageBackend, file: &Path, reset: bool) -> Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let data: SeedData = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse {}", file.display()))?;

    if reset {
        let mut removed = 0usize;
        for user in &data.users {
            if let Some(existing) = storage.get_user_by_email(&user.email).await? {
                storage.delete_user(&existing.id).await?;
                removed += 1;
            }
        }
        tracing::info!(removed, "existing users cleared");
    }

    // Owners must exist before their playlists.
    for user in data.users {
        let email = user.email.clone();
        storage.create_user(user).await.with_context(|| format!("user {email}"))?;
    }
    tracing::info!("users filled");

    let mut playlists = 0usize;
    for playlist in data.playlists {
        let name = playlist.name.clone();
        storage.create_playlist(playlist).await.with_context(|| format!("playlist {name}"))?;
        playlists += 1;
    }
    tracing::info!(playlists, "playlists filled");
    Ok(())
}
