use serde::{Deserialize, Serialize};
use std::fmt;

/// A single catalog entry. Immutable once the library is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    id: String,
    title: String,
    #[serde(default)]
    tags: Vec<String>,
}

impl Video {
    pub fn new<I, T>(id: impl Into<String>, title: impl Into<String>, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            id: id.into(),
            title: title.into(),
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Tags joined the way they're shown between the brackets
    pub fn tag_line(&self) -> String {
        self.tags.join(" ")
    }

    /// Exact tag match, ignoring case
    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == wanted)
    }

    /// Substring match on the title, ignoring case
    pub fn title_contains(&self, term: &str) -> bool {
        self.title.to_lowercase().contains(&term.to_lowercase())
    }
}

// "title (id) [tags]" - used by listings, playlists, search hits and now-playing
impl fmt::Display for Video {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) [{}]", self.title, self.id, self.tag_line())
    }
}
