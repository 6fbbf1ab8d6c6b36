use anyhow::Result;
use clap::Subcommand;
use playlister_storage::{StorageBackend, UserStore};

use super::print_json;

#[derive(Subcommand)]
pub(crate) enum UserCommand {
    /// Look up one user by email or id
    Get {
        #[arg(long, conflicts_with = "id", required_unless_present = "id")]
        email: Option<String>,
        #[arg(long)]
        id: Option<String>,
    },
    /// Delete a user and every playlist they own
    Delete { id: String },
}

pub(crate) async fn run(storage: &StorageBackend, cmd: UserCommand) -> Result<()> {
    match cmd {
        UserCommand::Get { email, id } => {
            let user = match (email, id) {
                (Some(email), _) => storage.get_user_by_email(&email).await?,
                (None, Some(id)) => storage.get_user_by_id(&id).await?,
                (None, None) => None,
            };
            match user {
                Some(user) => print_json(&user)?,
                None => println!("User not found"),
            }
        },
        UserCommand::Delete { id } => match storage.delete_user(&id).await? {
            Some(user) => print_json(&user)?,
            None => println!("User not found: {id}"),
        },
    }
    Ok(())
}
