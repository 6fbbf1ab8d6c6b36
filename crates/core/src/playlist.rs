use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single entry in a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub title: String,
    pub artist: String,
    pub year: i32,
    #[serde(alias = "youTubeId")]
    pub external_media_id: String,
}

impl Song {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        year: i32,
        external_media_id: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            year,
            external_media_id: external_media_id.into(),
        }
    }
}

/// A named, ordered list of songs owned by the user whose email is `owner_email`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub owner_email: String,
    #[serde(default)]
    pub songs: Vec<Song>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Playlist {
    #[must_use]
    pub fn from_new(id: String, input: NewPlaylist, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name,
            owner_email: input.owner_email,
            songs: input.songs,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the named attributes. `songs` is replaced wholesale, never appended.
    pub fn apply(&mut self, update: PlaylistUpdate, now: DateTime<Utc>) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(owner_email) = update.owner_email {
            self.owner_email = owner_email;
        }
        if let Some(songs) = update.songs {
            self.songs = songs;
        }
        self.updated_at = now;
    }

    #[must_use]
    pub fn pair(&self) -> PlaylistPair {
        PlaylistPair { id: self.id.clone(), name: self.name.clone() }
    }
}

/// Input for creating a playlist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlaylist {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub owner_email: String,
    #[serde(default)]
    pub songs: Vec<Song>,
}

impl NewPlaylist {
    #[must_use]
    pub fn new(name: impl Into<String>, owner_email: impl Into<String>, songs: Vec<Song>) -> Self {
        Self { name: name.into(), owner_email: owner_email.into(), songs }
    }
}

/// Partial playlist update. `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistUpdate {
    pub name: Option<String>,
    pub owner_email: Option<String>,
    pub songs: Option<Vec<Song>>,
}

impl PlaylistUpdate {
    #[must_use]
    pub fn name(mut self, value: impl Into<String>) -> Self {
        self.name = Some(value.into());
        self
    }

    #[must_use]
    pub fn owner_email(mut self, value: impl Into<String>) -> Self {
        self.owner_email = Some(value.into());
        self
    }

    #[must_use]
    pub fn songs(mut self, value: Vec<Song>) -> Self {
        self.songs = Some(value);
        self
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.owner_email.is_none() && self.songs.is_none()
    }
}

/// Id and name of a playlist, used for listing a user's playlists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistPair {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}
