// Line-oriented command shell - reads commands, dispatches them, prints the outcome
// The core modules never print; everything user-visible is rendered here

pub mod commands;

pub use commands::{Command, CommandError, HELP_TEXT};

use anyhow::Result;
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::debug;

use crate::catalog::VideoLibrary;
use crate::moderation;
use crate::player::{PlaybackController, PlaybackEvent};
use crate::playlist::PlaylistStore;
use crate::search::{SearchEngine, SearchQuery};

/// Whether the loop should keep reading after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Shell {
    library: Arc<VideoLibrary>,
    player: PlaybackController,
    playlists: PlaylistStore,
    search: SearchEngine,
    prompt: String,
}

impl Shell {
    pub fn new(library: Arc<VideoLibrary>) -> Self {
        Self {
            player: PlaybackController::new(Arc::clone(&library)),
            playlists: PlaylistStore::new(Arc::clone(&library)),
            search: SearchEngine::new(Arc::clone(&library)),
            library,
            prompt: String::new(),
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn player(&self) -> &PlaybackController {
        &self.player
    }

    pub fn playlists(&self) -> &PlaylistStore {
        &self.playlists
    }

    /// Read and execute commands until EXIT or end of input
    pub fn run<R, W>(&mut self, input: &mut R, output: &mut W) -> Result<()>
    where
        R: BufRead,
        W: Write,
    {
        let mut raw = Vec::new();

        loop {
            write!(output, "{}", self.prompt)?;
            output.flush()?;

            raw.clear();
            if input.read_until(b'\n', &mut raw)? == 0 {
                debug!("End of input, leaving shell");
                break;
            }

            // invalid UTF-8 becomes replacement chars and fails to parse like any typo
            let line = String::from_utf8_lossy(&raw);

            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<Command>() {
                Ok(command) => {
                    if self.execute(command, input, output)? == Flow::Exit {
                        break;
                    }
                }
                Err(e) => writeln!(output, "{}", e)?,
            }
        }

        Ok(())
    }

    /// Run one command. `input` is only read by the search commands, for the selection.
    pub fn execute<R, W>(&mut self, command: Command, input: &mut R, output: &mut W) -> Result<Flow>
    where
        R: BufRead,
        W: Write,
    {
        debug!("Dispatching {:?}", command);

        match command {
            Command::NumberOfVideos => writeln!(output, "{}", self.library.count())?,
            Command::ShowAllVideos => writeln!(output, "{}", self.library.listing())?,

            Command::Play(video_id) => emit_all(output, self.player.play(&video_id))?,
            Command::PlayRandom => emit_all(output, self.player.play_random())?,
            Command::Stop => emit(output, self.player.stop())?,
            Command::Pause => emit(output, self.player.pause())?,
            Command::Continue => emit(output, self.player.resume())?,
            Command::ShowPlaying => writeln!(output, "{}", self.player.state())?,

            Command::CreatePlaylist(name) => emit(output, self.playlists.create(&name))?,
            Command::AddToPlaylist { playlist, video_id } => {
                emit(output, self.playlists.add_video(&playlist, &video_id))?
            }
            Command::RemoveFromPlaylist { playlist, video_id } => {
                emit(output, self.playlists.remove_video(&playlist, &video_id))?
            }
            Command::ClearPlaylist(name) => emit(output, self.playlists.clear(&name))?,
            Command::DeletePlaylist(name) => emit(output, self.playlists.delete(&name))?,
            Command::ShowPlaylist(name) => emit(output, self.playlists.show(&name))?,
            Command::ShowAllPlaylists => writeln!(output, "{}", self.playlists.list())?,

            Command::SearchVideos(term) => {
                let query = SearchQuery::Title(term);
                self.search.search_and_play(&query, &mut self.player, input, output)?;
            }
            Command::SearchVideosWithTag(tag) => {
                let query = SearchQuery::Tag(tag);
                self.search.search_and_play(&query, &mut self.player, input, output)?;
            }

            Command::FlagVideo { video_id, reason } => {
                if let Err(e) = moderation::flag_video(&video_id, reason.as_deref()) {
                    writeln!(output, "{}", e)?;
                }
            }
            Command::AllowVideo(video_id) => {
                if let Err(e) = moderation::allow_video(&video_id) {
                    writeln!(output, "{}", e)?;
                }
            }

            Command::Help => writeln!(output, "{}", HELP_TEXT)?,
            Command::Exit => return Ok(Flow::Exit),
        }

        Ok(Flow::Continue)
    }
}

// Either side of an outcome is a printable message
fn emit<W: Write, T: Display, E: Display>(output: &mut W, outcome: Result<T, E>) -> Result<()> {
    match outcome {
        Ok(message) => writeln!(output, "{}", message)?,
        Err(e) => writeln!(output, "{}", e)?,
    }
    Ok(())
}

fn emit_all<W: Write, E: Display>(
    output: &mut W,
    outcome: Result<Vec<PlaybackEvent>, E>,
) -> Result<()> {
    match outcome {
        Ok(events) => {
            for event in events {
                writeln!(output, "{}", event)?;
            }
        }
        Err(e) => writeln!(output, "{}", e)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Video;
    use crate::player::PlaybackState;
    use std::io::Cursor;

    fn shell() -> Shell {
        let library = VideoLibrary::new(vec![
            Video::new("v1", "Amazing Cats", ["#cat", "#fun"]),
            Video::new("v2", "Funny Dogs", ["#dog"]),
        ])
        .unwrap();
        Shell::new(Arc::new(library))
    }

    fn session(shell: &mut Shell, script: &str) -> Vec<String> {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        shell.run(&mut input, &mut output).unwrap();
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_playlist_and_playback_scenario() {
        let mut shell = shell();
        let output = session(
            &mut shell,
            "CREATE_PLAYLIST My List\n\
             ADD_TO_PLAYLIST My List v1\n\
             SHOW_PLAYLIST My List\n\
             PLAY v2\n\
             PAUSE\n\
             CONTINUE\n\
             STOP\n\
             STOP\n",
        );

        assert_eq!(
            output,
            [
                "Successfully created new playlist: My_List",
                "Added video to My_List: Amazing Cats",
                "Showing playlist: My_List",
                "  Amazing Cats (v1) [#cat #fun]",
                "Playing video: Funny Dogs",
                "Pausing video: Funny Dogs",
                "Continuing video: Funny Dogs",
                "Stopping video: Funny Dogs",
                "Cannot stop video: No video is currently playing",
            ]
        );
        assert_eq!(shell.player().state(), &PlaybackState::Idle);
    }

    #[test]
    fn test_tag_search_selection_reads_next_line() {
        let mut shell = shell();
        let output = session(&mut shell, "SEARCH_VIDEOS_WITH_TAG #dog\n1\nSHOW_PLAYING\n");

        assert_eq!(output[0], "Here are the results for #dog:");
        assert_eq!(output[1], "  1) Funny Dogs (v2) [#dog]");
        assert_eq!(output[4], "Playing video: Funny Dogs");
        assert_eq!(output[5], "Currently playing: Funny Dogs (v2) [#dog]");
    }

    #[test]
    fn test_declined_search_leaves_player_idle() {
        let mut shell = shell();
        let output = session(&mut shell, "SEARCH_VIDEOS_WITH_TAG #dog\nabc\nSHOW_PLAYING\n");

        assert_eq!(output.last().unwrap(), "No video is currently playing");
        assert!(shell.player().state().current().is_none());
    }

    #[test]
    fn test_non_utf8_input_does_not_end_session() {
        let mut shell = shell();
        let mut input =
            Cursor::new(b"SEARCH_VIDEOS_WITH_TAG #dog\n\xff\xfe\n\xff PLAY\nSHOW_PLAYING\n".to_vec());
        let mut output = Vec::new();
        shell.run(&mut input, &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[4].starts_with("Unknown command: "));
        assert_eq!(lines[5], "No video is currently playing");
        assert_eq!(lines.len(), 6);
        assert!(shell.player().state().current().is_none());
    }

    #[test]
    fn test_exit_stops_reading() {
        let mut shell = shell();
        let output = session(&mut shell, "PLAY v1\nEXIT\nPLAY v2\n");
        assert_eq!(output, ["Playing video: Amazing Cats"]);
        assert_eq!(shell.player().state().current().unwrap().id(), "v1");
    }

    #[test]
    fn test_library_and_misc_commands() {
        let mut shell = shell();
        let output = session(
            &mut shell,
            "number_of_videos\nSHOW_ALL_VIDEOS\nSHOW_ALL_PLAYLISTS\nFLAG_VIDEO v1 spam\nALLOW_VIDEO v1\nWHAT\n\n",
        );

        assert_eq!(
            output,
            [
                "2 videos in the library",
                "Here's a list of all available videos:",
                "Amazing Cats (v1) [#cat #fun]",
                "Funny Dogs (v2) [#dog]",
                "No playlists exist yet",
                "flag_video needs implementation",
                "allow_video needs implementation",
                "Unknown command: WHAT. Type HELP for a list of available commands.",
            ]
        );
        assert!(shell.playlists().is_empty());
    }

    #[test]
    fn test_prompt_is_written_before_each_read() {
        let mut shell = shell().with_prompt("> ");
        let mut input = Cursor::new(b"SHOW_PLAYING\n".to_vec());
        let mut output = Vec::new();
        shell.run(&mut input, &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "> No video is currently playing\n> "
        );
    }
}
