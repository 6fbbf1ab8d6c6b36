//! Typed error enum for the service layer.

use playlister_storage::StorageError;
use thiserror::Error;

pub type Result<T, E = ServiceError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed (validation, conflict, integrity, database).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The playlist exists but belongs to someone else.
    #[error("user {user_id} does not own playlist {playlist_id}")]
    Forbidden { user_id: String, playlist_id: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ServiceError {
    pub(crate) fn user_not_found(id: &str) -> Self {
        Self::NotFound { entity: "user", id: id.to_owned() }
    }

    pub(crate) fn playlist_not_found(id: &str) -> Self {
        Self::NotFound { entity: "playlist", id: id.to_owned() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert!(ServiceError::user_not_found("1").is_not_found());
        assert!(
            ServiceError::Forbidden { user_id: "1".into(), playlist_id: "2".into() }
                .is_forbidden()
        );
        assert!(!ServiceError::from(StorageError::NotConnected).is_not_found());
    }

    #[test]
    fn messages_name_the_entity() {
        assert_eq!(ServiceError::playlist_not_found("42").to_string(), "playlist not found: 42");
    }
}
