//! Transport state enumeration

use serde::{Deserialize, Serialize};

/// Current transport state of a player
///
/// Exactly one of the three holds at any instant. VLC never reports
/// "paused" directly; its Paused is inferred from "media loaded but not
/// playing" by the decoder. That asymmetry is a property of the player,
/// not something this type papers over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportState {
    /// Currently playing audio
    Playing,
    /// Playback is paused
    Paused,
    /// Playback is stopped (or the application is not running)
    Stopped,
}

impl TransportState {
    /// Parse from a player's state string ("playing", "paused", "stopped")
    pub fn from_player_state(state: &str) -> Self {
        match state.to_lowercase().as_str() {
            "playing" => TransportState::Playing,
            "paused" => TransportState::Paused,
            _ => TransportState::Stopped,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransportState::Playing => "playing",
            TransportState::Paused => "paused",
            TransportState::Stopped => "stopped",
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, TransportState::Playing)
    }
}

impl Default for TransportState {
    fn default() -> Self {
        TransportState::Stopped
    }
}
