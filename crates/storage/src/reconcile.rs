use serde::Serialize;

/// Outcome of a relationship repair pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub users_scanned: usize,
    pub users_repaired: usize,
    /// Ids removed from a user's list because no such owned playlist exists.
    pub dangling_removed: usize,
    /// Owned playlist ids that were missing from the owner's list.
    pub missing_added: usize,
    /// Playlists whose owner email matches no user. Reported, not deleted.
    pub orphaned_playlists: Vec<String>,
}

impl ReconcileReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.users_repaired == 0 && self.orphaned_playlists.is_empty()
    }
}
