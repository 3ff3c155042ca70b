use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::catalog::{Video, VideoLibrary};

/// Spaces become underscores - applied on creation and on every lookup
pub fn normalize_name(name: &str) -> String {
    name.replace(' ', "_")
}

// Store key: normalized and case-folded
fn playlist_key(name: &str) -> String {
    normalize_name(name).to_lowercase()
}

/// Represents a single playlist: a name and an ordered, duplicate-free list of videos
#[derive(Debug, Clone)]
pub struct Playlist {
    name: String,
    videos: Vec<Arc<Video>>,
}

impl Playlist {
    /// Create a new empty playlist
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            videos: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn videos(&self) -> &[Arc<Video>] {
        &self.videos
    }

    /// Membership is by video id
    pub fn contains(&self, video_id: &str) -> bool {
        self.videos.iter().any(|v| v.id() == video_id)
    }

    /// Append a video; returns false if it was already a member
    pub fn add(&mut self, video: Arc<Video>) -> bool {
        if self.contains(video.id()) {
            return false;
        }
        self.videos.push(video);
        true
    }

    /// Remove a video by id, returning it if it was a member
    pub fn remove(&mut self, video_id: &str) -> Option<Arc<Video>> {
        let pos = self.videos.iter().position(|v| v.id() == video_id)?;
        Some(self.videos.remove(pos))
    }

    pub fn clear(&mut self) {
        self.videos.clear();
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }
}

/// Which operation failed - also the prefix of its error message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistAction {
    Add,
    Remove,
    Clear,
    Delete,
    Show,
}

impl fmt::Display for PlaylistAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self {
            PlaylistAction::Add => "Cannot add video to",
            PlaylistAction::Remove => "Cannot remove video from",
            PlaylistAction::Clear => "Cannot clear playlist",
            PlaylistAction::Delete => "Cannot delete playlist",
            PlaylistAction::Show => "Cannot show playlist",
        };
        f.write_str(prefix)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaylistError {
    #[error("Cannot create playlist: A playlist with the same name already exists")]
    AlreadyExists { name: String },

    #[error("{action} {name}: Playlist does not exist")]
    PlaylistNotFound { action: PlaylistAction, name: String },

    #[error("{action} {name}: Video does not exist")]
    VideoNotFound {
        action: PlaylistAction,
        name: String,
        video_id: String,
    },

    #[error("Cannot add video to {name}: Video already added")]
    AlreadyAdded { name: String, video_id: String },

    #[error("Cannot remove video from {name}: Video is not in playlist")]
    NotInPlaylist { name: String, video_id: String },
}

/// Successful store mutations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistEvent {
    Created { name: String },
    VideoAdded { playlist: String, video: Arc<Video> },
    VideoRemoved { playlist: String, video: Arc<Video> },
    Cleared { name: String },
    Deleted { name: String },
}

impl fmt::Display for PlaylistEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaylistEvent::Created { name } => {
                write!(f, "Successfully created new playlist: {}", name)
            }
            PlaylistEvent::VideoAdded { playlist, video } => {
                write!(f, "Added video to {}: {}", playlist, video.title())
            }
            PlaylistEvent::VideoRemoved { playlist, video } => {
                write!(f, "Removed video from {}: {}", playlist, video.title())
            }
            PlaylistEvent::Cleared { name } => {
                write!(f, "Successfully removed all videos from {}", name)
            }
            PlaylistEvent::Deleted { name } => write!(f, "Deleted playlist: {}", name),
        }
    }
}

/// Manages all playlists - creation, membership, deletion.
/// Names are unique ignoring case; the originally supplied casing is kept for display.
#[derive(Debug)]
pub struct PlaylistStore {
    library: Arc<VideoLibrary>,
    playlists: HashMap<String, Playlist>,
}

impl PlaylistStore {
    pub fn new(library: Arc<VideoLibrary>) -> Self {
        Self {
            library,
            playlists: HashMap::new(),
        }
    }

    /// Create a new empty playlist
    pub fn create(&mut self, name: &str) -> Result<PlaylistEvent, PlaylistError> {
        let name = normalize_name(name);
        let key = name.to_lowercase();

        if self.playlists.contains_key(&key) {
            return Err(PlaylistError::AlreadyExists { name });
        }

        self.playlists.insert(key, Playlist::new(name.clone()));
        info!("Created new playlist: '{}'", name);
        Ok(PlaylistEvent::Created { name })
    }

    /// Case-insensitive lookup
    pub fn lookup(&self, name: &str) -> Option<&Playlist> {
        self.playlists.get(&playlist_key(name))
    }

    /// Append a video to the end of a playlist
    pub fn add_video(&mut self, name: &str, video_id: &str) -> Result<PlaylistEvent, PlaylistError> {
        let action = PlaylistAction::Add;
        let (playlist, video) = self.resolve(action, name, video_id)?;
        let name = normalize_name(name);

        if !playlist.add(Arc::clone(&video)) {
            return Err(PlaylistError::AlreadyAdded {
                name,
                video_id: video_id.to_string(),
            });
        }

        info!("Added video '{}' to playlist '{}'", video_id, playlist.name());
        Ok(PlaylistEvent::VideoAdded { playlist: name, video })
    }

    pub fn remove_video(
        &mut self,
        name: &str,
        video_id: &str,
    ) -> Result<PlaylistEvent, PlaylistError> {
        let action = PlaylistAction::Remove;
        let (playlist, _) = self.resolve(action, name, video_id)?;
        let name = normalize_name(name);

        let video = playlist
            .remove(video_id)
            .ok_or_else(|| PlaylistError::NotInPlaylist {
                name: name.clone(),
                video_id: video_id.to_string(),
            })?;

        info!("Removed video '{}' from playlist '{}'", video_id, playlist.name());
        Ok(PlaylistEvent::VideoRemoved { playlist: name, video })
    }

    /// Empty a playlist; the playlist itself stays
    pub fn clear(&mut self, name: &str) -> Result<PlaylistEvent, PlaylistError> {
        let playlist = self
            .playlists
            .get_mut(&playlist_key(name))
            .ok_or_else(|| not_found(PlaylistAction::Clear, name))?;

        playlist.clear();
        debug!("Cleared playlist '{}'", playlist.name());
        Ok(PlaylistEvent::Cleared { name: normalize_name(name) })
    }

    pub fn delete(&mut self, name: &str) -> Result<PlaylistEvent, PlaylistError> {
        let playlist = self
            .playlists
            .remove(&playlist_key(name))
            .ok_or_else(|| not_found(PlaylistAction::Delete, name))?;

        info!("Deleted playlist: '{}'", playlist.name());
        Ok(PlaylistEvent::Deleted { name: normalize_name(name) })
    }

    /// All playlist names, sorted ignoring case
    pub fn list(&self) -> PlaylistIndex<'_> {
        let mut names: Vec<&str> = self.playlists.values().map(Playlist::name).collect();
        names.sort_by_key(|name| name.to_lowercase());
        PlaylistIndex { names }
    }

    pub fn show(&self, name: &str) -> Result<PlaylistView<'_>, PlaylistError> {
        let playlist = self
            .lookup(name)
            .ok_or_else(|| not_found(PlaylistAction::Show, name))?;

        Ok(PlaylistView {
            name: normalize_name(name),
            playlist,
        })
    }

    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    // Playlist first, then video - the order the error messages are checked in
    fn resolve(
        &mut self,
        action: PlaylistAction,
        name: &str,
        video_id: &str,
    ) -> Result<(&mut Playlist, Arc<Video>), PlaylistError> {
        let playlist = self
            .playlists
            .get_mut(&playlist_key(name))
            .ok_or_else(|| not_found(action, name))?;

        let video = self
            .library
            .get_video(video_id)
            .cloned()
            .ok_or_else(|| PlaylistError::VideoNotFound {
                action,
                name: normalize_name(name),
                video_id: video_id.to_string(),
            })?;

        Ok((playlist, video))
    }
}

fn not_found(action: PlaylistAction, name: &str) -> PlaylistError {
    PlaylistError::PlaylistNotFound {
        action,
        name: normalize_name(name),
    }
}

/// Sorted playlist names, rendered for SHOW_ALL_PLAYLISTS
#[derive(Debug, Clone)]
pub struct PlaylistIndex<'a> {
    names: Vec<&'a str>,
}

impl PlaylistIndex<'_> {
    pub fn names(&self) -> &[&str] {
        &self.names
    }
}

impl fmt::Display for PlaylistIndex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.names.is_empty() {
            return write!(f, "No playlists exist yet");
        }

        write!(f, "Showing all playlists:")?;
        for name in &self.names {
            write!(f, "\n  {}", name)?;
        }
        Ok(())
    }
}

/// One playlist's members in insertion order
#[derive(Debug, Clone)]
pub struct PlaylistView<'a> {
    name: String,
    playlist: &'a Playlist,
}

impl PlaylistView<'_> {
    pub fn playlist(&self) -> &Playlist {
        self.playlist
    }
}

impl fmt::Display for PlaylistView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Showing playlist: {}", self.name)?;

        if self.playlist.is_empty() {
            return write!(f, "\n  No videos here yet");
        }

        for video in self.playlist.videos() {
            write!(f, "\n  {}", video)?;
        }
        Ok(())
    }
}
