// Video catalog - the fixed library everything else reads from
// Loaded once at startup, never mutated afterwards

pub mod video;

pub use video::Video;

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Sample catalog shipped with the binary, used when no catalog is configured
const BUILTIN_LISTING: &str = include_str!("../../data/videos.txt");

/// Errors raised while building a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Duplicate video id in catalog: {id}")]
    DuplicateId { id: String },

    #[error("Malformed catalog line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("Failed to parse catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
}

/// Read-only collection of videos, queryable by id and enumerable in load order
#[derive(Debug, Default)]
pub struct VideoLibrary {
    videos: Vec<Arc<Video>>,
    by_id: HashMap<String, usize>,
}

impl VideoLibrary {
    /// Build a library from already-parsed videos, rejecting repeated ids
    pub fn new(videos: Vec<Video>) -> Result<Self, CatalogError> {
        let mut library = Self {
            videos: Vec::with_capacity(videos.len()),
            by_id: HashMap::with_capacity(videos.len()),
        };

        for video in videos {
            if library.by_id.contains_key(video.id()) {
                return Err(CatalogError::DuplicateId {
                    id: video.id().to_string(),
                });
            }
            library.by_id.insert(video.id().to_string(), library.videos.len());
            library.videos.push(Arc::new(video));
        }

        Ok(library)
    }

    /// Parse the pipe-separated listing format: `title | id | #tag , #tag`
    pub fn parse_listing(text: &str) -> Result<Self, CatalogError> {
        let mut videos = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            let mut fields = line.split('|').map(str::trim);
            let title = fields.next().unwrap_or_default();
            let id = fields.next().ok_or_else(|| CatalogError::Malformed {
                line: idx + 1,
                reason: "expected `title | id | tags`".to_string(),
            })?;

            if title.is_empty() || id.is_empty() {
                return Err(CatalogError::Malformed {
                    line: idx + 1,
                    reason: "title and id must not be empty".to_string(),
                });
            }

            let tags: Vec<&str> = fields
                .next()
                .map(|t| t.split(',').map(str::trim).filter(|t| !t.is_empty()).collect())
                .unwrap_or_default();

            videos.push(Video::new(id, title, tags));
        }

        Self::new(videos)
    }

    /// Parse a JSON array of `{ "id", "title", "tags" }` objects
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let videos: Vec<Video> = serde_json::from_str(text)?;
        Self::new(videos)
    }

    /// Load a catalog file - `.json` files as JSON, everything else as a listing
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let library = if is_json {
            Self::from_json(&content)?
        } else {
            Self::parse_listing(&content)?
        };

        info!("Loaded {} videos from {}", library.len(), path.display());
        Ok(library)
    }

    /// The bundled sample catalog
    pub fn builtin() -> Result<Self, CatalogError> {
        let library = Self::parse_listing(BUILTIN_LISTING)?;
        debug!("Using built-in catalog with {} videos", library.len());
        Ok(library)
    }

    pub fn get_video(&self, id: &str) -> Option<&Arc<Video>> {
        self.by_id.get(id).and_then(|&idx| self.videos.get(idx))
    }

    pub fn all_videos(&self) -> &[Arc<Video>] {
        &self.videos
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    /// "N videos in the library"
    pub fn count(&self) -> VideoCount {
        VideoCount(self.videos.len())
    }

    /// Every video, sorted by its display line
    pub fn listing(&self) -> LibraryListing {
        let mut lines: Vec<String> = self.videos.iter().map(|v| v.to_string()).collect();
        lines.sort();
        LibraryListing { lines }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoCount(pub usize);

impl fmt::Display for VideoCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} videos in the library", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct LibraryListing {
    lines: Vec<String>,
}

impl LibraryListing {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl fmt::Display for LibraryListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Here's a list of all available videos:")?;
        for line in &self.lines {
            write!(f, "\n{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_listing() {
        let text = "Funny Dogs | funny_dogs_video_id |  #dog , #animal\n\
                    \n\
                    Video about nothing | nothing_video_id |\n\
                    Bare Entry | bare_id\n";
        let library = VideoLibrary::parse_listing(text).unwrap();

        assert_eq!(library.len(), 3);
        let dogs = library.get_video("funny_dogs_video_id").unwrap();
        assert_eq!(dogs.title(), "Funny Dogs");
        assert_eq!(dogs.tags(), ["#dog", "#animal"]);
        assert!(library.get_video("nothing_video_id").unwrap().tags().is_empty());
        assert!(library.get_video("bare_id").unwrap().tags().is_empty());
        assert!(library.get_video("missing").is_none());
    }

    #[test]
    fn test_parse_listing_rejects_bad_lines() {
        let err = VideoLibrary::parse_listing("Ok | ok_id\nno separator here\n").unwrap_err();
        assert!(matches!(err, CatalogError::Malformed { line: 2, .. }));

        let err = VideoLibrary::parse_listing(" | empty_title").unwrap_err();
        assert!(matches!(err, CatalogError::Malformed { line: 1, .. }));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = VideoLibrary::new(vec![
            Video::new("v1", "One", ["#a"]),
            Video::new("v1", "Other", ["#b"]),
        ])
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId { ref id } if id == "v1"));
    }

    #[test]
    fn test_builtin_catalog() {
        let library = VideoLibrary::builtin().unwrap();
        assert_eq!(library.len(), 5);
        assert_eq!(library.count().to_string(), "5 videos in the library");
        assert!(library.get_video("amazing_cats_video_id").is_some());
    }

    #[test]
    fn test_listing_sorted_case_sensitively() {
        let library = VideoLibrary::new(vec![
            Video::new("v3", "banana", Vec::<String>::new()),
            Video::new("v1", "Cherry", ["#c"]),
            Video::new("v2", "Apple", ["#a", "#b"]),
        ])
        .unwrap();

        let listing = library.listing();
        assert_eq!(listing.lines(), ["Apple (v2) [#a #b]", "Cherry (v1) [#c]", "banana (v3) []"]);
        assert_eq!(
            listing.to_string(),
            "Here's a list of all available videos:\nApple (v2) [#a #b]\nCherry (v1) [#c]\nbanana (v3) []"
        );
    }

    #[test]
    fn test_load_json_and_listing_files() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("catalog.json");
        let mut file = fs::File::create(&json_path).unwrap();
        write!(
            file,
            r##"[{{"id": "v1", "title": "Amazing Cats", "tags": ["#cat"]}}, {{"id": "v2", "title": "Funny Dogs"}}]"##
        )
        .unwrap();
        let library = VideoLibrary::load(&json_path).unwrap();
        assert_eq!(library.len(), 2);
        assert!(library.get_video("v2").unwrap().tags().is_empty());

        let txt_path = dir.path().join("videos.txt");
        fs::write(&txt_path, "Amazing Cats | v1 | #cat\n").unwrap();
        let library = VideoLibrary::load(&txt_path).unwrap();
        assert_eq!(library.all_videos()[0].id(), "v1");

        assert!(matches!(
            VideoLibrary::load(dir.path().join("missing.txt")),
            Err(CatalogError::Io(_))
        ));
    }
}
