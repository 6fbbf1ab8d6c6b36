use std::collections::{HashMap, HashSet};

use playlister_core::{Playlist, User};
use rusqlite::TransactionBehavior;

use super::{DocumentStore, PLAYLISTS, USERS, find_all, replace_doc};
use crate::error::Result;
use crate::reconcile::ReconcileReport;

impl DocumentStore {
    /// Rebuild every user's `playlists` list from the playlists' `ownerEmail`.
    ///
    /// The rebuilt list is the owned playlists in creation order, the same
    /// order a linked write produces. Playlists with no matching user are
    /// reported and left in place.
    pub(crate) fn repair_relationships(&self) -> Result<ReconcileReport> {
        let mut conn = self.conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let users: Vec<User> = find_all(&tx, USERS)?;
        let playlists: Vec<Playlist> = find_all(&tx, PLAYLISTS)?;

        let mut owned: HashMap<&str, Vec<&str>> = HashMap::new();
        for playlist in &playlists {
            owned.entry(playlist.owner_email.as_str()).or_default().push(playlist.id.as_str());
        }

        let mut report = ReconcileReport { users_scanned: users.len(), ..Default::default() };

        for mut user in users {
            let actual = owned.remove(user.email.as_str()).unwrap_or_default();
            let actual_set: HashSet<&str> = actual.iter().copied().collect();

            let listed: HashSet<&str> = user.playlists.iter().map(String::as_str).collect();
            let kept = listed.iter().filter(|id| actual_set.contains(*id)).count();
            let dangling = user.playlists.len() - kept;
            let missing = actual.iter().filter(|id| !listed.contains(*id)).count();
            let repaired: Vec<String> = actual.iter().map(|id| (*id).to_owned()).collect();

            if repaired != user.playlists {
                tracing::warn!(
                    user = %user.id,
                    dangling,
                    missing,
                    "Repairing playlist list"
                );
                report.users_repaired += 1;
                report.dangling_removed += dangling;
                report.missing_added += missing;
                user.playlists = repaired;
                replace_doc(&tx, USERS, &user.id, &user)?;
            }
        }

        report.orphaned_playlists = playlists
            .iter()
            .filter(|p| owned.contains_key(p.owner_email.as_str()))
            .map(|p| p.id.clone())
            .collect();
        for id in &report.orphaned_playlists {
            tracing::warn!(playlist = %id, "Playlist owner does not exist");
        }

        tx.commit()?;
        Ok(report)
    }
}
