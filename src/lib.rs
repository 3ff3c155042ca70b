// videodeck library - core modules for the terminal video catalog browser
// The shell is the only part that touches stdin/stdout

pub mod catalog;    // the fixed video library and its loaders
pub mod config;     // settings and preferences
pub mod moderation; // flag/allow placeholders
pub mod player;     // playback state machine
pub mod playlist;   // named playlists over catalog videos
pub mod search;     // title/tag search with interactive pick
pub mod shell;      // command parsing and dispatch

// Export the stuff other modules actually use
pub use catalog::{CatalogError, Video, VideoLibrary};
pub use config::Config;
pub use player::{PlaybackController, PlaybackError, PlaybackEvent, PlaybackState};
pub use playlist::{Playlist, PlaylistError, PlaylistEvent, PlaylistStore};
pub use search::{SearchEngine, SearchError, SearchOutcome, SearchQuery, SearchResults};
pub use shell::{Command, Shell};
