// Playback controller - one video at a time, optionally paused
// Every transition returns events instead of printing, the shell renders them

use crate::catalog::{Video, VideoLibrary};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Which video is current, and whether it's paused.
/// Idle carries no video, so "paused with nothing playing" can't be represented.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing(Arc<Video>),
    Paused(Arc<Video>),
}

impl PlaybackState {
    pub fn current(&self) -> Option<&Arc<Video>> {
        match self {
            PlaybackState::Idle => None,
            PlaybackState::Playing(video) | PlaybackState::Paused(video) => Some(video),
        }
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, PlaybackState::Paused(_))
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackState::Idle => write!(f, "No video is currently playing"),
            PlaybackState::Playing(video) => write!(f, "Currently playing: {}", video),
            PlaybackState::Paused(video) => write!(f, "Currently playing: {} - PAUSED", video),
        }
    }
}

/// Something observable that happened to the current video
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackEvent {
    Started(Arc<Video>),
    Stopped(Arc<Video>),
    Paused(Arc<Video>),
    AlreadyPaused(Arc<Video>),
    Resumed(Arc<Video>),
}

impl PlaybackEvent {
    pub fn video(&self) -> &Arc<Video> {
        match self {
            PlaybackEvent::Started(v)
            | PlaybackEvent::Stopped(v)
            | PlaybackEvent::Paused(v)
            | PlaybackEvent::AlreadyPaused(v)
            | PlaybackEvent::Resumed(v) => v,
        }
    }
}

impl fmt::Display for PlaybackEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackEvent::Started(v) => write!(f, "Playing video: {}", v.title()),
            PlaybackEvent::Stopped(v) => write!(f, "Stopping video: {}", v.title()),
            PlaybackEvent::Paused(v) => write!(f, "Pausing video: {}", v.title()),
            PlaybackEvent::AlreadyPaused(v) => write!(f, "Video already paused: {}", v.title()),
            PlaybackEvent::Resumed(v) => write!(f, "Continuing video: {}", v.title()),
        }
    }
}

/// Operations that need something to be playing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackAction {
    Stop,
    Pause,
    Continue,
}

impl fmt::Display for PlaybackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            PlaybackAction::Stop => "stop",
            PlaybackAction::Pause => "pause",
            PlaybackAction::Continue => "continue",
        };
        f.write_str(verb)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("Cannot play video: Video does not exist")]
    VideoNotFound { id: String },

    #[error("Cannot {action} video: No video is currently playing")]
    NothingPlaying { action: PlaybackAction },

    #[error("Cannot continue video: Video is not paused")]
    NotPaused,

    #[error("Cannot play video: No videos available")]
    EmptyLibrary,
}

pub struct PlaybackController {
    library: Arc<VideoLibrary>,
    state: PlaybackState,
}

impl PlaybackController {
    pub fn new(library: Arc<VideoLibrary>) -> Self {
        Self {
            library,
            state: PlaybackState::Idle,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Play a video by id, stopping whatever is current first
    pub fn play(&mut self, video_id: &str) -> Result<Vec<PlaybackEvent>, PlaybackError> {
        let video = self
            .library
            .get_video(video_id)
            .cloned()
            .ok_or_else(|| PlaybackError::VideoNotFound { id: video_id.to_string() })?;

        Ok(self.switch_to(video))
    }

    /// Play a uniformly random catalog video. The current video may be drawn again.
    pub fn play_random(&mut self) -> Result<Vec<PlaybackEvent>, PlaybackError> {
        self.play_random_with(&mut rand::thread_rng())
    }

    pub fn play_random_with<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<Vec<PlaybackEvent>, PlaybackError> {
        let video = self
            .library
            .all_videos()
            .choose(rng)
            .cloned()
            .ok_or(PlaybackError::EmptyLibrary)?;

        debug!("Random pick: {}", video.id());
        Ok(self.switch_to(video))
    }

    pub fn stop(&mut self) -> Result<PlaybackEvent, PlaybackError> {
        match std::mem::take(&mut self.state) {
            PlaybackState::Idle => Err(PlaybackError::NothingPlaying {
                action: PlaybackAction::Stop,
            }),
            PlaybackState::Playing(video) | PlaybackState::Paused(video) => {
                info!("Stopped '{}'", video.id());
                Ok(PlaybackEvent::Stopped(video))
            }
        }
    }

    /// Pausing twice is harmless - the second call reports AlreadyPaused
    pub fn pause(&mut self) -> Result<PlaybackEvent, PlaybackError> {
        match &self.state {
            PlaybackState::Idle => Err(PlaybackError::NothingPlaying {
                action: PlaybackAction::Pause,
            }),
            PlaybackState::Paused(video) => Ok(PlaybackEvent::AlreadyPaused(Arc::clone(video))),
            PlaybackState::Playing(video) => {
                let video = Arc::clone(video);
                self.state = PlaybackState::Paused(Arc::clone(&video));
                debug!("Paused '{}'", video.id());
                Ok(PlaybackEvent::Paused(video))
            }
        }
    }

    pub fn resume(&mut self) -> Result<PlaybackEvent, PlaybackError> {
        match &self.state {
            PlaybackState::Idle => Err(PlaybackError::NothingPlaying {
                action: PlaybackAction::Continue,
            }),
            PlaybackState::Playing(_) => Err(PlaybackError::NotPaused),
            PlaybackState::Paused(video) => {
                let video = Arc::clone(video);
                self.state = PlaybackState::Playing(Arc::clone(&video));
                debug!("Resumed '{}'", video.id());
                Ok(PlaybackEvent::Resumed(video))
            }
        }
    }

    // Stop + start as one transition; the new video is current when this returns
    fn switch_to(&mut self, video: Arc<Video>) -> Vec<PlaybackEvent> {
        let mut events = Vec::with_capacity(2);

        if let Some(previous) = std::mem::take(&mut self.state).current() {
            events.push(PlaybackEvent::Stopped(Arc::clone(previous)));
        }

        info!("Playing '{}'", video.id());
        self.state = PlaybackState::Playing(Arc::clone(&video));
        events.push(PlaybackEvent::Started(video));
        events
    }
}
