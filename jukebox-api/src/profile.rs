//! Per-player quirk profiles
//!
//! The three players speak near-identical scripting dialects with small,
//! fixed differences (units, ranges, capabilities). Everything that differs
//! between them lives in this table; the adapter and the script builders
//! stay generic.

use crate::kind::PlayerKind;

/// Static description of one player's scripting dialect
#[derive(Debug, Clone, Copy)]
pub struct PlayerProfile {
    pub kind: PlayerKind,
    /// Application name used in `tell application "..."` blocks
    pub app_name: &'static str,
    /// Process name to test for in System Events
    pub process_name: &'static str,
    /// Ceiling of the player's native volume scale (our API is 0-100)
    pub native_volume_max: i64,
    /// Track duration unit in status replies is milliseconds
    pub duration_in_millis: bool,
    /// The player never reports "paused"; it must be inferred from
    /// "media loaded but not playing"
    pub inferred_pause: bool,
    /// Repeat supports the `one` (single track) mode
    pub repeat_one: bool,
    /// Track rating is settable
    pub rating: bool,
}

/// Profile table, one row per player
const PROFILES: [PlayerProfile; 3] = [
    PlayerProfile {
        kind: PlayerKind::Spotify,
        app_name: "Spotify",
        process_name: "Spotify",
        native_volume_max: 100,
        duration_in_millis: true,
        inferred_pause: false,
        repeat_one: false,
        rating: false,
    },
    PlayerProfile {
        kind: PlayerKind::AppleMusic,
        app_name: "Music",
        process_name: "Music",
        native_volume_max: 100,
        duration_in_millis: false,
        inferred_pause: false,
        repeat_one: true,
        rating: true,
    },
    PlayerProfile {
        kind: PlayerKind::Vlc,
        app_name: "VLC",
        process_name: "VLC",
        native_volume_max: 256,
        duration_in_millis: false,
        inferred_pause: true,
        repeat_one: false,
        rating: false,
    },
];

impl PlayerProfile {
    pub fn of(kind: PlayerKind) -> &'static PlayerProfile {
        match kind {
            PlayerKind::Spotify => &PROFILES[0],
            PlayerKind::AppleMusic => &PROFILES[1],
            PlayerKind::Vlc => &PROFILES[2],
        }
    }

    /// Convert an API volume (0-100) to the player's native scale
    pub fn to_native_volume(&self, volume: i64) -> i64 {
        let clamped = volume.clamp(0, 100);
        if self.native_volume_max == 100 {
            clamped
        } else {
            (clamped as f64 / 100.0 * self.native_volume_max as f64).round() as i64
        }
    }

    /// Convert a native volume reading to the API 0-100 scale
    pub fn from_native_volume(&self, native: i64) -> i64 {
        if self.native_volume_max == 100 {
            native.clamp(0, 100)
        } else {
            (native.clamp(0, self.native_volume_max) as f64 / self.native_volume_max as f64
                * 100.0)
                .round() as i64
        }
    }
}
