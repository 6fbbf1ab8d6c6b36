//! Required-field checks shared by every backend, run before any store call.

use playlister_core::{NewPlaylist, NewUser, PlaylistUpdate, UserUpdate};

use crate::error::{Result, StorageError};

fn require(entity: &'static str, field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(StorageError::Validation { entity, field });
    }
    Ok(())
}

fn require_if_set(entity: &'static str, field: &'static str, value: Option<&str>) -> Result<()> {
    value.map_or(Ok(()), |v| require(entity, field, v))
}

pub(crate) fn new_user(input: &NewUser) -> Result<()> {
    require("user", "firstName", &input.first_name)?;
    require("user", "lastName", &input.last_name)?;
    require("user", "email", &input.email)?;
    require("user", "passwordHash", &input.password_hash)
}

pub(crate) fn user_update(update: &UserUpdate) -> Result<()> {
    require_if_set("user", "firstName", update.first_name.as_deref())?;
    require_if_set("user", "lastName", update.last_name.as_deref())?;
    require_if_set("user", "email", update.email.as_deref())?;
    require_if_set("user", "passwordHash", update.password_hash.as_deref())
}

pub(crate) fn new_playlist(input: &NewPlaylist) -> Result<()> {
    require("playlist", "name", &input.name)?;
    require("playlist", "ownerEmail", &input.owner_email)
}

pub(crate) fn playlist_update(update: &PlaylistUpdate) -> Result<()> {
    require_if_set("playlist", "name", update.name.as_deref())?;
    require_if_set("playlist", "ownerEmail", update.owner_email.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_required_user_field_is_rejected() {
        let err = new_user(&NewUser::new("A", "  ", "ab@x.com", "h")).unwrap_err();
        assert!(matches!(err, StorageError::Validation { entity: "user", field: "lastName" }));
    }

    #[test]
    fn complete_user_passes() {
        assert!(new_user(&NewUser::new("A", "B", "ab@x.com", "h")).is_ok());
    }

    #[test]
    fn missing_owner_is_rejected() {
        let err = new_playlist(&NewPlaylist::new("Mix", "", Vec::new())).unwrap_err();
        assert!(matches!(err, StorageError::Validation { field: "ownerEmail", .. }));
    }

    #[test]
    fn update_only_checks_present_fields() {
        assert!(user_update(&UserUpdate::default()).is_ok());
        assert!(user_update(&UserUpdate::default().email("")).is_err());
        assert!(playlist_update(&PlaylistUpdate::default().songs(Vec::new())).is_ok());
        assert!(playlist_update(&PlaylistUpdate::default().name(" ")).is_err());
    }
}
