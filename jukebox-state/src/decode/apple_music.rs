//! Apple Music status decoder
//!
//! The only player with a real tri-state repeat mode and a track rating.
//! Durations are already in seconds; ratings come back on the player's
//! 0-100 scale and normalize to 0-5 stars.

use jukebox_api::{PlayerKind, RepeatMode};
use script_client::Record;

use crate::model::{PlayerStatus, TrackInfo, TransportState};

pub fn decode(record: &Record) -> PlayerStatus {
    let transport = TransportState::from_player_state(record.str_or("playerState", "stopped"));
    let volume = record.i64_or("soundVolume", jukebox_api::DEFAULT_VOLUME);

    PlayerStatus {
        kind: PlayerKind::AppleMusic,
        running: true,
        transport,
        track: TrackInfo {
            name: record.str_or("trackName", "").to_string(),
            artist: record.str_or("trackArtist", "").to_string(),
            album: record.str_or("trackAlbum", "").to_string(),
            album_artist: record.str_or("albumArtist", "").to_string(),
        },
        position: record.f64_or("playerPosition", 0.0).max(0.0) as i64,
        duration: record.f64_or("trackDuration", 0.0).max(0.0) as i64,
        volume,
        muted: volume == 0,
        shuffle: record.bool_or("shuffleEnabled", false),
        repeat: RepeatMode::from_str_loose(record.str_or("songRepeat", "off")),
        rating: (record.i64_or("rating", 0) / 20).clamp(0, 5),
        fullscreen: false,
    }
}
