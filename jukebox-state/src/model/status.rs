//! Normalized player status snapshot

use jukebox_api::{PlayerKind, RepeatMode};
use serde::{Deserialize, Serialize};

use super::{format_clock, TrackInfo, TransportState};

/// One player's complete normalized status
///
/// Recomputed in full on every refresh and published atomically; a status
/// is never partially mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatus {
    pub kind: PlayerKind,
    /// Whether the application is running at all
    pub running: bool,
    pub transport: TransportState,
    pub track: TrackInfo,
    /// Position in seconds, non-negative
    pub position: i64,
    /// Duration in seconds, non-negative
    pub duration: i64,
    /// Volume on the common 0-100 scale
    pub volume: i64,
    pub muted: bool,
    pub shuffle: bool,
    pub repeat: RepeatMode,
    /// 0-5 stars, Apple Music only (0 elsewhere)
    pub rating: i64,
    /// VLC only
    pub fullscreen: bool,
}

impl PlayerStatus {
    /// The status of a player whose application is not running
    pub fn not_running(kind: PlayerKind) -> Self {
        Self {
            kind,
            running: false,
            transport: TransportState::Stopped,
            track: TrackInfo::default(),
            position: 0,
            duration: 0,
            volume: jukebox_api::DEFAULT_VOLUME,
            muted: false,
            shuffle: false,
            repeat: RepeatMode::Off,
            rating: 0,
            fullscreen: false,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.transport.is_playing()
    }

    /// Position through the track as 0-100, 0 when duration is unknown
    pub fn progress_percent(&self) -> i64 {
        if self.duration <= 0 {
            return 0;
        }
        (self.position.clamp(0, self.duration) * 100) / self.duration
    }

    pub fn position_formatted(&self) -> String {
        format_clock(self.position)
    }

    pub fn duration_formatted(&self) -> String {
        format_clock(self.duration)
    }

    /// One-line display status: service icon, state glyph, track display
    pub fn display_line(&self) -> String {
        let icon = match self.kind {
            PlayerKind::Spotify => "🎵",
            PlayerKind::AppleMusic => "🎶",
            PlayerKind::Vlc => "🎬",
        };
        let glyph = match self.transport {
            TransportState::Playing => "▶",
            TransportState::Paused => "⏸",
            TransportState::Stopped => "⏹",
        };
        let track = self.track.display();
        if track.is_empty() {
            format!("{} {}", icon, glyph)
        } else {
            format!("{} {} {}", icon, glyph, track)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_running_defaults() {
        let status = PlayerStatus::not_running(PlayerKind::Vlc);
        assert!(!status.running);
        assert_eq!(status.transport, TransportState::Stopped);
        assert_eq!(status.volume, 50);
        assert!(status.track.is_empty());
        assert_eq!(status.progress_percent(), 0);
    }

    #[test]
    fn test_progress_percent() {
        let mut status = PlayerStatus::not_running(PlayerKind::Spotify);
        status.duration = 200;
        status.position = 50;
        assert_eq!(status.progress_percent(), 25);

        // Position past the end clamps to 100
        status.position = 250;
        assert_eq!(status.progress_percent(), 100);

        status.duration = 0;
        assert_eq!(status.progress_percent(), 0);
    }

    #[test]
    fn test_display_line() {
        let mut status = PlayerStatus::not_running(PlayerKind::Spotify);
        status.transport = TransportState::Playing;
        status.track = TrackInfo {
            name: "Heroes".to_string(),
            artist: "David Bowie".to_string(),
            ..TrackInfo::default()
        };
        assert_eq!(status.display_line(), "🎵 ▶ David Bowie - Heroes");

        let stopped = PlayerStatus::not_running(PlayerKind::Vlc);
        assert_eq!(stopped.display_line(), "🎬 ⏹");
    }
}
