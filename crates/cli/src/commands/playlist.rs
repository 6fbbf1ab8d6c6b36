use std::sync::Arc;

use anyhow::Result;
use clap::Subcommand;
use playlister_service::PlaylistService;
use playlister_storage::{PlaylistStore, StorageBackend};

use super::print_json;

#[derive(Subcommand)]
pub(crate) enum PlaylistCommand {
    /// List every playlist, or only those owned by one email
    List {
        #[arg(long)]
        owner: Option<String>,
    },
    /// Id and name of each playlist owned by a user id
    Pairs {
        #[arg(long)]
        user: String,
    },
    Get { id: String },
    Delete { id: String },
}

pub(crate) async fn run(storage: Arc<StorageBackend>, cmd: PlaylistCommand) -> Result<()> {
    let service = PlaylistService::new(Arc::clone(&storage));
    match cmd {
        PlaylistCommand::List { owner: Some(owner) } => {
            print_json(&storage.get_playlists_by_owner_email(&owner).await?)?;
        },
        PlaylistCommand::List { owner: None } => print_json(&service.all_playlists().await?)?,
        PlaylistCommand::Pairs { user } => print_json(&service.playlist_pairs(&user).await?)?,
        PlaylistCommand::Get { id } => match storage.get_playlist_by_id(&id).await? {
            Some(playlist) => print_json(&playlist)?,
            None => println!("Playlist not found: {id}"),
        },
        PlaylistCommand::Delete { id } => match storage.delete_playlist(&id).await? {
            Some(playlist) => print_json(&playlist)?,
            None => println!("Playlist not found: {id}"),
        },
    }
    Ok(())
}
