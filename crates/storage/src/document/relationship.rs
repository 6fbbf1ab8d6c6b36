//! Owner bookkeeping.
//!
//! The store has no foreign keys, so a playlist's membership in its owner's
//! `playlists` list is written by hand. Both helpers take the caller's
//! transaction: the playlist write and the owner write commit together or
//! roll back together, and `BEGIN IMMEDIATE` serializes concurrent
//! read-modify-write cycles on the same owner.
//!
//! The owner's `updated_at` is left alone; the list mirrors a join, not an
//! edit of the user.

use playlister_core::User;
use rusqlite::Connection;

use super::{PLAYLISTS, USERS, find_one_by_field, replace_doc, seq_of};
use crate::error::Result;

/// Add `playlist_id` to `owner.playlists` and persist the owner.
///
/// The list stays in playlist creation order: a new playlist lands at the
/// end, a transferred one at the position of its original insert.
pub(crate) fn link_to_owner(conn: &Connection, owner: &mut User, playlist_id: &str) -> Result<()> {
    if !owner.playlists.iter().any(|id| id == playlist_id) {
        let seq = seq_of(conn, PLAYLISTS, playlist_id)?;
        let mut at = owner.playlists.len();
        while at > 0 && seq_of(conn, PLAYLISTS, &owner.playlists[at - 1])? > seq {
            at -= 1;
        }
        owner.playlists.insert(at, playlist_id.to_owned());
    }
    replace_doc(conn, USERS, &owner.id, owner)?;
    Ok(())
}

/// Remove `playlist_id` from the list of the user owning `owner_email`.
///
/// Returns `false` if no such user exists (nothing to unlink).
pub(crate) fn unlink_from_owner(
    conn: &Connection,
    owner_email: &str,
    playlist_id: &str,
) -> Result<bool> {
    let Some(mut owner) = find_one_by_field::<User>(conn, USERS, "email", owner_email)? else {
        tracing::warn!(owner_email, playlist_id, "Playlist owner missing while unlinking");
        return Ok(false);
    };
    let before = owner.playlists.len();
    owner.playlists.retain(|id| id != playlist_id);
    if owner.playlists.len() != before {
        replace_doc(conn, USERS, &owner.id, &owner)?;
    }
    Ok(true)
}
