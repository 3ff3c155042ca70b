// Catalog search - title substring or exact tag, then an optional pick to play

use anyhow::Result;
use std::fmt;
use std::io::{BufRead, Write};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::catalog::{Video, VideoLibrary};
use crate::player::{PlaybackController, PlaybackError, PlaybackEvent};

pub const SELECTION_PROMPT: &str = "Would you like to play any of the above? If yes, specify the number of the video.\n\
If your answer is not a valid number, we will assume it's a no.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    /// Case-insensitive substring of the title
    Title(String),
    /// Case-insensitive exact tag
    Tag(String),
}

impl SearchQuery {
    pub fn term(&self) -> &str {
        match self {
            SearchQuery::Title(term) | SearchQuery::Tag(term) => term,
        }
    }

    pub fn matches(&self, video: &Video) -> bool {
        match self {
            SearchQuery::Title(term) => video.title_contains(term),
            SearchQuery::Tag(tag) => video.has_tag(tag),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("No search results for {term}")]
    NoResults { term: String },
}

#[derive(Debug, Clone)]
pub struct SearchHit {
    pub line: String,
    pub video: Arc<Video>,
}

/// Matches sorted by their display line, numbered from 1
#[derive(Debug, Clone)]
pub struct SearchResults {
    term: String,
    hits: Vec<SearchHit>,
}

impl SearchResults {
    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn hits(&self) -> &[SearchHit] {
        &self.hits
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Interpret a typed answer as a 1-based result number.
    /// Anything that isn't a number in range means "no".
    pub fn select(&self, answer: &str) -> Option<&Arc<Video>> {
        let number: usize = answer.trim().parse().ok()?;
        let index = number.checked_sub(1)?;
        self.hits.get(index).map(|hit| &hit.video)
    }
}

impl fmt::Display for SearchResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Here are the results for {}:", self.term)?;
        for (i, hit) in self.hits.iter().enumerate() {
            write!(f, "\n  {}) {}", i + 1, hit.line)?;
        }
        Ok(())
    }
}

/// How an interactive search ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    NoResults,
    Declined,
    Played(Vec<PlaybackEvent>),
    PlayFailed(PlaybackError),
}

pub struct SearchEngine {
    library: Arc<VideoLibrary>,
}

impl SearchEngine {
    pub fn new(library: Arc<VideoLibrary>) -> Self {
        Self { library }
    }

    pub fn search(&self, query: &SearchQuery) -> Result<SearchResults, SearchError> {
        let mut hits: Vec<SearchHit> = self
            .library
            .all_videos()
            .iter()
            .filter(|video| query.matches(video))
            .map(|video| SearchHit {
                line: video.to_string(),
                video: Arc::clone(video),
            })
            .collect();

        if hits.is_empty() {
            return Err(SearchError::NoResults {
                term: query.term().to_string(),
            });
        }

        // whole line, not just the title
        hits.sort_by_cached_key(|hit| hit.line.to_lowercase());
        debug!("Search {:?} matched {} videos", query, hits.len());

        Ok(SearchResults {
            term: query.term().to_string(),
            hits,
        })
    }

    /// Print results and the prompt, read one answer, and play the pick if there is one.
    /// A missing or unusable answer counts as declining.
    pub fn search_and_play<R, W>(
        &self,
        query: &SearchQuery,
        player: &mut PlaybackController,
        input: &mut R,
        output: &mut W,
    ) -> Result<SearchOutcome>
    where
        R: BufRead,
        W: Write,
    {
        let results = match self.search(query) {
            Ok(results) => results,
            Err(e) => {
                writeln!(output, "{}", e)?;
                return Ok(SearchOutcome::NoResults);
            }
        };

        writeln!(output, "{}", results)?;
        writeln!(output, "{}", SELECTION_PROMPT)?;
        output.flush()?;

        // raw bytes, so a line that isn't UTF-8 is just an unusable answer
        let mut raw = Vec::new();
        input.read_until(b'\n', &mut raw)?;
        let answer = String::from_utf8_lossy(&raw);

        let Some(video) = results.select(&answer) else {
            debug!("No selection from answer {:?}", answer.trim());
            return Ok(SearchOutcome::Declined);
        };

        match player.play(video.id()) {
            Ok(events) => {
                for event in &events {
                    writeln!(output, "{}", event)?;
                }
                Ok(SearchOutcome::Played(events))
            }
            Err(e) => {
                writeln!(output, "{}", e)?;
                Ok(SearchOutcome::PlayFailed(e))
            }
        }
    }
}
