use std::str::FromStr;
use thiserror::Error;

pub const HELP_TEXT: &str = "Available commands:
    NUMBER_OF_VIDEOS - Shows how many videos are in the library.
    SHOW_ALL_VIDEOS - Lists all videos from the library.
    PLAY <video_id> - Plays specified video.
    PLAY_RANDOM - Plays a random video from the library.
    STOP - Stop the current video.
    PAUSE - Pause the current video.
    CONTINUE - Resume the current paused video.
    SHOW_PLAYING - Displays the title, video_id, video tags and paused status of the video that is currently playing (or paused).
    CREATE_PLAYLIST <playlist_name> - Creates a new (empty) playlist with the provided name.
    ADD_TO_PLAYLIST <playlist_name> <video_id> - Adds the requested video to the playlist.
    REMOVE_FROM_PLAYLIST <playlist_name> <video_id> - Removes the specified video from the specified playlist
    CLEAR_PLAYLIST <playlist_name> - Removes all the videos from the playlist.
    DELETE_PLAYLIST <playlist_name> - Deletes the playlist.
    SHOW_PLAYLIST <playlist_name> - List all the videos in this playlist.
    SHOW_ALL_PLAYLISTS - Display all the available playlists.
    SEARCH_VIDEOS <search_term> - Display all the videos whose titles contain the search_term.
    SEARCH_VIDEOS_WITH_TAG <tag_name> - Display all videos whose tags contains the provided tag.
    FLAG_VIDEO <video_id> <flag_reason> - Mark a video as flagged.
    ALLOW_VIDEO <video_id> - Removes a flag from a video.
    HELP - Displays help.
    EXIT - Terminates the program execution.";

/// One line of user input, parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    NumberOfVideos,
    ShowAllVideos,
    Play(String),
    PlayRandom,
    Stop,
    Pause,
    Continue,
    ShowPlaying,
    CreatePlaylist(String),
    AddToPlaylist { playlist: String, video_id: String },
    RemoveFromPlaylist { playlist: String, video_id: String },
    ClearPlaylist(String),
    DeletePlaylist(String),
    ShowPlaylist(String),
    ShowAllPlaylists,
    SearchVideos(String),
    SearchVideosWithTag(String),
    FlagVideo { video_id: String, reason: Option<String> },
    AllowVideo(String),
    Help,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Please enter a command. Type HELP for a list of available commands.")]
    Empty,

    #[error("Unknown command: {0}. Type HELP for a list of available commands.")]
    Unknown(String),

    #[error("Missing argument for {command}: {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let word = words.next().ok_or(CommandError::Empty)?;
        let args: Vec<&str> = words.collect();

        let command = match word.to_uppercase().as_str() {
            "NUMBER_OF_VIDEOS" => Command::NumberOfVideos,
            "SHOW_ALL_VIDEOS" => Command::ShowAllVideos,
            "PLAY" => Command::Play(rest("PLAY", "<video_id>", &args)?),
            "PLAY_RANDOM" => Command::PlayRandom,
            "STOP" => Command::Stop,
            "PAUSE" => Command::Pause,
            "CONTINUE" => Command::Continue,
            "SHOW_PLAYING" => Command::ShowPlaying,
            "CREATE_PLAYLIST" => {
                Command::CreatePlaylist(rest("CREATE_PLAYLIST", "<playlist_name>", &args)?)
            }
            "ADD_TO_PLAYLIST" => {
                let (playlist, video_id) = name_and_id("ADD_TO_PLAYLIST", &args)?;
                Command::AddToPlaylist { playlist, video_id }
            }
            "REMOVE_FROM_PLAYLIST" => {
                let (playlist, video_id) = name_and_id("REMOVE_FROM_PLAYLIST", &args)?;
                Command::RemoveFromPlaylist { playlist, video_id }
            }
            "CLEAR_PLAYLIST" => {
                Command::ClearPlaylist(rest("CLEAR_PLAYLIST", "<playlist_name>", &args)?)
            }
            "DELETE_PLAYLIST" => {
                Command::DeletePlaylist(rest("DELETE_PLAYLIST", "<playlist_name>", &args)?)
            }
            "SHOW_PLAYLIST" => {
                Command::ShowPlaylist(rest("SHOW_PLAYLIST", "<playlist_name>", &args)?)
            }
            "SHOW_ALL_PLAYLISTS" => Command::ShowAllPlaylists,
            "SEARCH_VIDEOS" => Command::SearchVideos(rest("SEARCH_VIDEOS", "<search_term>", &args)?),
            "SEARCH_VIDEOS_WITH_TAG" => {
                Command::SearchVideosWithTag(rest("SEARCH_VIDEOS_WITH_TAG", "<tag_name>", &args)?)
            }
            "FLAG_VIDEO" => {
                let (video_id, reason) = args.split_first().ok_or(CommandError::MissingArgument {
                    command: "FLAG_VIDEO",
                    expected: "<video_id>",
                })?;
                Command::FlagVideo {
                    video_id: video_id.to_string(),
                    reason: (!reason.is_empty()).then(|| reason.join(" ")),
                }
            }
            "ALLOW_VIDEO" => Command::AllowVideo(rest("ALLOW_VIDEO", "<video_id>", &args)?),
            "HELP" => Command::Help,
            "EXIT" => Command::Exit,
            _ => return Err(CommandError::Unknown(word.to_string())),
        };

        Ok(command)
    }
}

// All remaining words as one argument, so playlist names and titles may contain spaces
fn rest(command: &'static str, expected: &'static str, args: &[&str]) -> Result<String, CommandError> {
    if args.is_empty() {
        return Err(CommandError::MissingArgument { command, expected });
    }
    Ok(args.join(" "))
}

// Last word is the video id, everything before it is the playlist name
fn name_and_id(command: &'static str, args: &[&str]) -> Result<(String, String), CommandError> {
    match args.split_last() {
        Some((video_id, name)) if !name.is_empty() => Ok((name.join(" "), video_id.to_string())),
        _ => Err(CommandError::MissingArgument {
            command,
            expected: "<playlist_name> <video_id>",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_commands() {
        assert_eq!("number_of_videos".parse::<Command>(), Ok(Command::NumberOfVideos));
        assert_eq!("  STOP  ".parse::<Command>(), Ok(Command::Stop));
        assert_eq!("Play v1".parse::<Command>(), Ok(Command::Play("v1".to_string())));
        assert_eq!("EXIT".parse::<Command>(), Ok(Command::Exit));
    }

    #[test]
    fn test_multi_word_arguments() {
        assert_eq!(
            "CREATE_PLAYLIST My List".parse::<Command>(),
            Ok(Command::CreatePlaylist("My List".to_string()))
        );
        assert_eq!(
            "ADD_TO_PLAYLIST My List v1".parse::<Command>(),
            Ok(Command::AddToPlaylist {
                playlist: "My List".to_string(),
                video_id: "v1".to_string(),
            })
        );
        assert_eq!(
            "SEARCH_VIDEOS funny dogs".parse::<Command>(),
            Ok(Command::SearchVideos("funny dogs".to_string()))
        );
        assert_eq!(
            "FLAG_VIDEO v1 not family friendly".parse::<Command>(),
            Ok(Command::FlagVideo {
                video_id: "v1".to_string(),
                reason: Some("not family friendly".to_string()),
            })
        );
        assert_eq!(
            "FLAG_VIDEO v1".parse::<Command>(),
            Ok(Command::FlagVideo { video_id: "v1".to_string(), reason: None })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "DANCE".parse::<Command>().unwrap_err().to_string(),
            "Unknown command: DANCE. Type HELP for a list of available commands."
        );
        assert_eq!(
            "PLAY".parse::<Command>().unwrap_err().to_string(),
            "Missing argument for PLAY: <video_id>"
        );
        assert!(matches!(
            "ADD_TO_PLAYLIST v1".parse::<Command>(),
            Err(CommandError::MissingArgument { command: "ADD_TO_PLAYLIST", .. })
        ));
    }
}
