//! Contract scenarios shared by every backend's integration tests.
//!
//! Each scenario takes a connected store and uses unique emails, so the same
//! functions run against a fresh `SQLite` file or a long-lived PostgreSQL
//! database.

#![allow(dead_code, reason = "each test binary uses a subset")]

use playlister_core::{NewPlaylist, NewUser, PlaylistUpdate, Song, UserUpdate};
use playlister_storage::{Store, StorageError};
use uuid::Uuid;

pub fn unique_email(tag: &str) -> String {
    format!("{tag}_{}@example.com", Uuid::new_v4().simple())
}

pub fn make_user(email: &str) -> NewUser {
    NewUser::new("Vitest", "Tester", email, "hash1234")
}

pub fn make_playlist(name: &str, owner: &str) -> NewPlaylist {
    NewPlaylist::new(
        name,
        owner,
        vec![
            Song::new("Song A", "Tester", 2025, "abc123"),
            Song::new("Song B", "Tester", 2024, "xyz789"),
        ],
    )
}

pub async fn user_round_trip<S: Store>(store: &S) {
    let email = unique_email("roundtrip");
    let created = store.create_user(make_user(&email)).await.unwrap();

    let by_email = store.get_user_by_email(&email).await.unwrap().unwrap();
    assert_eq!(by_email.first_name, "Vitest");
    assert_eq!(by_email.last_name, "Tester");
    assert_eq!(by_email.email, email);
    assert_eq!(by_email, created);

    let by_id = store.get_user_by_id(&created.id).await.unwrap().unwrap();
    assert_eq!(by_id, created);
}

pub async fn duplicate_email_conflicts<S: Store>(store: &S) {
    let email = unique_email("dup");
    let first = store.create_user(make_user(&email)).await.unwrap();

    let err = store.create_user(make_user(&email)).await.unwrap_err();
    assert!(err.is_conflict(), "expected conflict, got {err}");

    let still = store.get_user_by_email(&email).await.unwrap().unwrap();
    assert_eq!(still.id, first.id);
}

pub async fn missing_required_field_is_validation<S: Store>(store: &S) {
    let mut input = make_user(&unique_email("invalid"));
    input.password_hash.clear();
    let err = store.create_user(input).await.unwrap_err();
    assert!(matches!(err, StorageError::Validation { entity: "user", field: "passwordHash" }));

    let err = store.create_playlist(make_playlist("", "x@example.com")).await.unwrap_err();
    assert!(matches!(err, StorageError::Validation { entity: "playlist", field: "name" }));
}

pub async fn update_user_replaces_named_fields<S: Store>(store: &S) {
    let email = unique_email("update");
    let created = store.create_user(make_user(&email)).await.unwrap();

    let updated = store
        .update_user(&created.id, UserUpdate::default().first_name("Richard"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.first_name, "Richard");
    assert_eq!(updated.last_name, created.last_name);
    assert_eq!(updated.email, created.email);

    let reread = store.get_user_by_id(&created.id).await.unwrap().unwrap();
    assert_eq!(reread, updated);
}

pub async fn update_user_to_taken_email_conflicts<S: Store>(store: &S) {
    let taken = unique_email("taken");
    store.create_user(make_user(&taken)).await.unwrap();
    let other = store.create_user(make_user(&unique_email("other"))).await.unwrap();

    let err =
        store.update_user(&other.id, UserUpdate::default().email(&taken)).await.unwrap_err();
    assert!(err.is_conflict(), "expected conflict, got {err}");
}

pub async fn absent_records_are_none<S: Store>(store: &S) {
    assert!(store.get_user_by_email(&unique_email("ghost")).await.unwrap().is_none());
    for id in ["999999999", "not-an-id"] {
        assert!(store.get_user_by_id(id).await.unwrap().is_none());
        assert!(store.get_playlist_by_id(id).await.unwrap().is_none());
        assert!(store.update_user(id, UserUpdate::default()).await.unwrap().is_none());
        assert!(store.update_playlist(id, PlaylistUpdate::default()).await.unwrap().is_none());
        assert!(store.delete_playlist(id).await.unwrap().is_none());
        assert!(store.delete_user(id).await.unwrap().is_none());
    }
    assert!(store.get_playlists_by_owner_email(&unique_email("ghost")).await.unwrap().is_empty());
}

pub async fn playlist_needs_existing_owner<S: Store>(store: &S) {
    let nobody = unique_email("nobody");
    let err = store.create_playlist(make_playlist("Orphan", &nobody)).await.unwrap_err();
    assert!(err.is_integrity(), "expected integrity error, got {err}");

    assert!(store.get_playlists_by_owner_email(&nobody).await.unwrap().is_empty());
    let all = store.get_all_playlists().await.unwrap();
    assert!(all.iter().all(|p| p.owner_email != nobody));
}

pub async fn playlist_crud<S: Store>(store: &S) {
    let email = unique_email("crud");
    store.create_user(make_user(&email)).await.unwrap();

    let created = store.create_playlist(make_playlist("Test Playlist", &email)).await.unwrap();
    assert_eq!(created.name, "Test Playlist");
    assert_eq!(created.songs.len(), 2);

    let fetched = store.get_playlist_by_id(&created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);

    let owner = store.get_user_by_email(&email).await.unwrap().unwrap();
    assert_eq!(owner.playlists, vec![created.id.clone()]);

    let renamed = store
        .update_playlist(&created.id, PlaylistUpdate::default().name("New Name"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(renamed.name, "New Name");
    assert_eq!(renamed.songs, created.songs);
    assert_eq!(renamed.owner_email, created.owner_email);

    let replaced = store
        .update_playlist(
            &created.id,
            PlaylistUpdate::default().songs(vec![Song::new("Only", "One", 1999, "id9")]),
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(replaced.songs, vec![Song::new("Only", "One", 1999, "id9")]);
    assert_eq!(replaced.name, "New Name");
}

pub async fn delete_playlist_unlinks_owner<S: Store>(store: &S) {
    let email = unique_email("cascade");
    store.create_user(make_user(&email)).await.unwrap();
    let keep = store.create_playlist(make_playlist("Keep", &email)).await.unwrap();
    let doomed = store.create_playlist(make_playlist("Doomed", &email)).await.unwrap();

    let deleted = store.delete_playlist(&doomed.id).await.unwrap().unwrap();
    assert_eq!(deleted, doomed);

    let remaining = store.get_playlists_by_owner_email(&email).await.unwrap();
    assert_eq!(remaining.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(), vec![keep.id.as_str()]);

    let owner = store.get_user_by_email(&email).await.unwrap().unwrap();
    assert_eq!(owner.playlists, vec![keep.id.clone()]);

    assert!(store.get_playlist_by_id(&doomed.id).await.unwrap().is_none());
    assert!(store.delete_playlist(&doomed.id).await.unwrap().is_none());
}

pub async fn all_playlists_spans_owners<S: Store>(store: &S) {
    let a = unique_email("owner_a");
    let b = unique_email("owner_b");
    store.create_user(make_user(&a)).await.unwrap();
    store.create_user(make_user(&b)).await.unwrap();
    let p1 = store.create_playlist(make_playlist("A's", &a)).await.unwrap();
    let p2 = store.create_playlist(make_playlist("B's", &b)).await.unwrap();

    let all = store.get_all_playlists().await.unwrap();
    assert!(all.contains(&p1));
    assert!(all.contains(&p2));
}

pub async fn delete_user_cascades<S: Store>(store: &S) {
    let email = unique_email("leaving");
    let user = store.create_user(make_user(&email)).await.unwrap();
    let p1 = store.create_playlist(make_playlist("One", &email)).await.unwrap();
    let p2 = store.create_playlist(make_playlist("Two", &email)).await.unwrap();

    let deleted = store.delete_user(&user.id).await.unwrap().unwrap();
    assert_eq!(deleted.playlists, vec![p1.id.clone(), p2.id.clone()]);

    assert!(store.get_user_by_email(&email).await.unwrap().is_none());
    assert!(store.get_playlist_by_id(&p1.id).await.unwrap().is_none());
    assert!(store.get_playlist_by_id(&p2.id).await.unwrap().is_none());
    assert!(store.get_playlists_by_owner_email(&email).await.unwrap().is_empty());

    // The email is free again.
    store.create_user(make_user(&email)).await.unwrap();
}

pub async fn end_to_end_scenario<S: Store>(store: &S) {
    let email = unique_email("ab");
    store.create_user(NewUser::new("A", "B", &email, "h")).await.unwrap();
    store
        .create_playlist(NewPlaylist::new(
            "Mix",
            &email,
            vec![Song::new("S1", "Art", 2020, "id1")],
        ))
        .await
        .unwrap();

    let owned = store.get_playlists_by_owner_email(&email).await.unwrap();
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].name, "Mix");

    store.delete_playlist(&owned[0].id).await.unwrap().unwrap();
    assert!(store.get_playlists_by_owner_email(&email).await.unwrap().is_empty());
}

pub async fn reconcile_is_clean_after_contract_writes<S: Store>(store: &S) {
    let email = unique_email("clean");
    store.create_user(make_user(&email)).await.unwrap();
    let p = store.create_playlist(make_playlist("Clean", &email)).await.unwrap();
    store.delete_playlist(&p.id).await.unwrap();
    store.create_playlist(make_playlist("Clean 2", &email)).await.unwrap();

    let report = store.reconcile().await.unwrap();
    assert_eq!(report.users_repaired, 0);
    assert!(report.users_scanned >= 1);
}

pub async fn owner_transfer_keeps_creation_order<S: Store>(store: &S) {
    let a = unique_email("giver");
    let b = unique_email("taker");
    store.create_user(make_user(&a)).await.unwrap();
    store.create_user(make_user(&b)).await.unwrap();
    let old = store.create_playlist(make_playlist("Old", &a)).await.unwrap();
    let newer = store.create_playlist(make_playlist("Newer", &b)).await.unwrap();

    let moved = store
        .update_playlist(&old.id, PlaylistUpdate::default().owner_email(&b))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(moved.owner_email, b);

    let giver = store.get_user_by_email(&a).await.unwrap().unwrap();
    assert!(giver.playlists.is_empty());
    assert!(store.get_playlists_by_owner_email(&a).await.unwrap().is_empty());

    let taker = store.get_user_by_email(&b).await.unwrap().unwrap();
    assert_eq!(taker.playlists, vec![old.id.clone(), newer.id.clone()]);
    let owned: Vec<String> =
        store.get_playlists_by_owner_email(&b).await.unwrap().into_iter().map(|p| p.id).collect();
    assert_eq!(owned, taker.playlists);
}

pub async fn owner_transfer_to_unknown_user_is_integrity<S: Store>(store: &S) {
    let email = unique_email("keeper");
    store.create_user(make_user(&email)).await.unwrap();
    let playlist = store.create_playlist(make_playlist("Stays", &email)).await.unwrap();

    let err = store
        .update_playlist(&playlist.id, PlaylistUpdate::default().owner_email(unique_email("ghost")))
        .await
        .unwrap_err();
    assert!(err.is_integrity(), "expected integrity error, got {err}");

    let unchanged = store.get_playlist_by_id(&playlist.id).await.unwrap().unwrap();
    assert_eq!(unchanged, playlist);
    let owner = store.get_user_by_email(&email).await.unwrap().unwrap();
    assert_eq!(owner.playlists, vec![playlist.id]);
}

pub async fn email_change_carries_playlists<S: Store>(store: &S) {
    let old = unique_email("old");
    let new = unique_email("new");
    let user = store.create_user(make_user(&old)).await.unwrap();
    let first = store.create_playlist(make_playlist("First", &old)).await.unwrap();
    let second = store.create_playlist(make_playlist("Second", &old)).await.unwrap();

    let updated =
        store.update_user(&user.id, UserUpdate::default().email(&new)).await.unwrap().unwrap();
    assert_eq!(updated.email, new);
    assert_eq!(updated.playlists, vec![first.id.clone(), second.id.clone()]);

    assert!(store.get_playlists_by_owner_email(&old).await.unwrap().is_empty());
    let moved = store.get_playlists_by_owner_email(&new).await.unwrap();
    assert_eq!(moved.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(), vec![
        first.id.as_str(),
        second.id.as_str()
    ]);
    assert!(moved.iter().all(|p| p.owner_email == new));
}
