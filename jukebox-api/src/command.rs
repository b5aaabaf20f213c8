//! Transport command vocabulary
//!
//! One enum covers everything a virtual device action can ask a player to
//! do. Each player supports a subset; an unsupported command is a no-op at
//! the adapter, never an error. Out-of-range parameters are clamped, never
//! rejected.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::kind::PlayerKind;

/// Three-way switch argument for shuffle/fullscreen style settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToggleArg {
    On,
    Off,
    Toggle,
}

impl ToggleArg {
    /// Resolve against the current state
    pub fn resolve(&self, current: bool) -> bool {
        match self {
            ToggleArg::On => true,
            ToggleArg::Off => false,
            ToggleArg::Toggle => !current,
        }
    }

    pub fn from_param(value: &str) -> Self {
        match value {
            "on" => ToggleArg::On,
            "off" => ToggleArg::Off,
            _ => ToggleArg::Toggle,
        }
    }
}

/// A player's current repeat mode
///
/// Only Apple Music distinguishes `One` from `All`; the other players
/// collapse it (Spotify/VLC repeat is a plain boolean).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RepeatMode {
    #[default]
    Off,
    All,
    One,
}

impl RepeatMode {
    pub fn is_on(&self) -> bool {
        !matches!(self, RepeatMode::Off)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RepeatMode::Off => "off",
            RepeatMode::All => "all",
            RepeatMode::One => "one",
        }
    }

    pub fn from_str_loose(value: &str) -> Self {
        match value {
            "all" => RepeatMode::All,
            "one" => RepeatMode::One,
            _ => RepeatMode::Off,
        }
    }
}

/// Repeat command argument; `Toggle` cycles off → all → one → off where
/// the player supports `one`, off → all → off otherwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepeatArg {
    Mode(RepeatMode),
    Toggle,
}

impl RepeatArg {
    pub fn from_param(value: &str) -> Self {
        match value {
            "off" => RepeatArg::Mode(RepeatMode::Off),
            "all" | "on" => RepeatArg::Mode(RepeatMode::All),
            "one" => RepeatArg::Mode(RepeatMode::One),
            _ => RepeatArg::Toggle,
        }
    }
}

/// VLC playback rate presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackRate {
    VerySlow,
    Slow,
    Normal,
    Fast,
    VeryFast,
}

impl PlaybackRate {
    pub fn factor(&self) -> f64 {
        match self {
            PlaybackRate::VerySlow => 0.25,
            PlaybackRate::Slow => 0.5,
            PlaybackRate::Normal => 1.0,
            PlaybackRate::Fast => 1.5,
            PlaybackRate::VeryFast => 2.0,
        }
    }
}

/// Everything a virtual device can ask a player to do
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    Play,
    Pause,
    PlayPause,
    Stop,
    Next,
    Previous,
    /// Absolute volume, 0-100 (clamped)
    SetVolume(i64),
    VolumeUp(i64),
    VolumeDown(i64),
    Mute,
    Unmute,
    /// Absolute position in seconds
    Seek(i64),
    SkipForward(i64),
    SkipBackward(i64),
    SetShuffle(ToggleArg),
    SetRepeat(RepeatArg),
    /// 0-5 stars (clamped); Apple Music only
    SetRating(i64),
    /// Spotify URI or open.spotify.com URL
    PlayUri(String),
    SearchAndPlay(String),
    /// Apple Music library playlist by name
    PlayPlaylist(String),
    /// Apple Music album, optionally narrowed by artist
    PlayAlbum { album: String, artist: Option<String> },
    /// VLC local file path
    OpenMedia(String),
    /// VLC stream URL
    OpenUrl(String),
    SetPlaybackRate(PlaybackRate),
    SetFullscreen(ToggleArg),
}

impl Command {
    /// Whether this command changes which track/media is loaded
    ///
    /// Track changes need the long settle delay before the follow-up
    /// refresh; the player briefly reports the old transport state while
    /// it switches.
    pub fn changes_media(&self) -> bool {
        matches!(
            self,
            Command::Next
                | Command::Previous
                | Command::PlayUri(_)
                | Command::SearchAndPlay(_)
                | Command::PlayPlaylist(_)
                | Command::PlayAlbum { .. }
                | Command::OpenMedia(_)
                | Command::OpenUrl(_)
        )
    }

    /// How long to wait after executing before reading transport state back
    ///
    /// Reading immediately would race the player's own state change; this
    /// is a deliberate settle delay, not a correctness dependency.
    pub fn settle_delay(&self, kind: PlayerKind) -> Duration {
        if self.changes_media() {
            return Duration::from_millis(500);
        }
        match kind {
            // VLC reacts noticeably slower than the music players
            PlayerKind::Vlc => Duration::from_millis(200),
            PlayerKind::Spotify | PlayerKind::AppleMusic => Duration::ZERO,
        }
    }
}

/// Clamp a volume parameter into 0-100
pub fn clamp_volume(volume: i64) -> i64 {
    volume.clamp(0, 100)
}

/// Clamp a rating parameter into 0-5 stars
pub fn clamp_rating(rating: i64) -> i64 {
    rating.clamp(0, 5)
}
