//! Host action dispatch
//!
//! The host invokes actions by name with a loose string parameter map.
//! This module turns an invocation into a typed [`Command`], applying the
//! documented defaults when a key is absent. Unknown actions return `None`
//! and the caller logs and ignores them.

use std::collections::HashMap;

use crate::command::{Command, PlaybackRate, RepeatArg, ToggleArg};

/// Typed accessor over an action's parameter map
pub struct ActionParams<'a>(pub &'a HashMap<String, String>);

impl ActionParams<'_> {
    pub fn i64_or(&self, key: &str, default: i64) -> i64 {
        self.0
            .get(key)
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(default)
    }

    pub fn str_or<'b>(&'b self, key: &str, default: &'b str) -> &'b str {
        match self.0.get(key) {
            Some(v) => v.as_str(),
            None => default,
        }
    }

    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        self.0
            .get(key)
            .and_then(|v| match v.as_str() {
                "true" | "True" | "1" => Some(true),
                "false" | "False" | "0" => Some(false),
                _ => None,
            })
            .unwrap_or(default)
    }
}

impl PlaybackRate {
    pub fn from_param(value: &str) -> Self {
        match value {
            "verySlow" => PlaybackRate::VerySlow,
            "slow" => PlaybackRate::Slow,
            "fast" => PlaybackRate::Fast,
            "veryFast" => PlaybackRate::VeryFast,
            _ => PlaybackRate::Normal,
        }
    }
}

/// Map one host action invocation to a command
///
/// Parameter keys and defaults: `volume` (50), `amount` (10), `position`
/// (0), `seconds` (10), `rating` (0), `shuffleState`/`repeatState`/
/// `fullscreenState` ("toggle"), `rate` ("normal"), plus the free-string
/// keys `uri`, `query`, `playlist`, `album`, `artist`, `path`, `url`.
pub fn command_from_action(action: &str, params: &ActionParams<'_>) -> Option<Command> {
    let command = match action {
        "play" => Command::Play,
        "pause" => Command::Pause,
        "playPause" => Command::PlayPause,
        "stop" => Command::Stop,
        "next" => Command::Next,
        "previous" => Command::Previous,
        "setVolume" => Command::SetVolume(params.i64_or("volume", 50)),
        "volumeUp" => Command::VolumeUp(params.i64_or("amount", 10)),
        "volumeDown" => Command::VolumeDown(params.i64_or("amount", 10)),
        "mute" => Command::Mute,
        "unmute" => Command::Unmute,
        "seek" => Command::Seek(params.i64_or("position", 0)),
        "skipForward" => Command::SkipForward(params.i64_or("seconds", 10)),
        "skipBackward" => Command::SkipBackward(params.i64_or("seconds", 10)),
        "setShuffle" => {
            Command::SetShuffle(ToggleArg::from_param(params.str_or("shuffleState", "toggle")))
        }
        "setRepeat" => {
            Command::SetRepeat(RepeatArg::from_param(params.str_or("repeatState", "toggle")))
        }
        "setRating" => Command::SetRating(params.i64_or("rating", 0)),
        "playUri" => Command::PlayUri(params.str_or("uri", "").to_string()),
        "searchAndPlay" => Command::SearchAndPlay(params.str_or("query", "").to_string()),
        "playPlaylist" => Command::PlayPlaylist(params.str_or("playlist", "").to_string()),
        "playAlbum" => Command::PlayAlbum {
            album: params.str_or("album", "").to_string(),
            artist: params
                .0
                .get("artist")
                .filter(|a| !a.is_empty())
                .cloned(),
        },
        "openMedia" => Command::OpenMedia(params.str_or("path", "").to_string()),
        "openUrl" => Command::OpenUrl(params.str_or("url", "").to_string()),
        "setPlaybackRate" => {
            Command::SetPlaybackRate(PlaybackRate::from_param(params.str_or("rate", "normal")))
        }
        "setFullscreen" => Command::SetFullscreen(ToggleArg::from_param(
            params.str_or("fullscreenState", "toggle"),
        )),
        _ => return None,
    };
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_when_keys_absent() {
        let empty = params(&[]);
        let p = ActionParams(&empty);
        assert_eq!(command_from_action("setVolume", &p), Some(Command::SetVolume(50)));
        assert_eq!(command_from_action("volumeUp", &p), Some(Command::VolumeUp(10)));
        assert_eq!(command_from_action("skipForward", &p), Some(Command::SkipForward(10)));
        assert_eq!(
            command_from_action("setShuffle", &p),
            Some(Command::SetShuffle(ToggleArg::Toggle))
        );
    }

    #[test]
    fn test_typed_parameters() {
        let map = params(&[("volume", "85")]);
        assert_eq!(
            command_from_action("setVolume", &ActionParams(&map)),
            Some(Command::SetVolume(85))
        );

        let map = params(&[("shuffleState", "on")]);
        assert_eq!(
            command_from_action("setShuffle", &ActionParams(&map)),
            Some(Command::SetShuffle(ToggleArg::On))
        );
    }

    #[test]
    fn test_unparseable_int_falls_back_to_default() {
        let map = params(&[("volume", "loud")]);
        assert_eq!(
            command_from_action("setVolume", &ActionParams(&map)),
            Some(Command::SetVolume(50))
        );
    }

    #[test]
    fn test_play_album_with_optional_artist() {
        let map = params(&[("album", "Blue"), ("artist", "Joni Mitchell")]);
        assert_eq!(
            command_from_action("playAlbum", &ActionParams(&map)),
            Some(Command::PlayAlbum {
                album: "Blue".to_string(),
                artist: Some("Joni Mitchell".to_string()),
            })
        );

        let map = params(&[("album", "Blue"), ("artist", "")]);
        assert_eq!(
            command_from_action("playAlbum", &ActionParams(&map)),
            Some(Command::PlayAlbum {
                album: "Blue".to_string(),
                artist: None,
            })
        );
    }

    #[test]
    fn test_unknown_action() {
        let empty = params(&[]);
        assert_eq!(command_from_action("defrost", &ActionParams(&empty)), None);
    }
}
