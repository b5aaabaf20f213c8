//! Spotify status decoder
//!
//! Spotify reports track duration in milliseconds and repeat as a plain
//! boolean; everything else maps directly.

use jukebox_api::{PlayerKind, PlayerProfile, RepeatMode};
use script_client::Record;

use crate::model::{PlayerStatus, TrackInfo, TransportState};

pub fn decode(record: &Record) -> PlayerStatus {
    let profile = PlayerProfile::of(PlayerKind::Spotify);
    let transport = TransportState::from_player_state(record.str_or("playerState", "stopped"));

    let duration_raw = record.i64_or("trackDuration", 0);
    let duration = if profile.duration_in_millis {
        duration_raw / 1000
    } else {
        duration_raw
    };

    let volume = record.i64_or("soundVolume", jukebox_api::DEFAULT_VOLUME);

    PlayerStatus {
        kind: PlayerKind::Spotify,
        running: true,
        transport,
        track: TrackInfo {
            name: record.str_or("trackName", "").to_string(),
            artist: record.str_or("trackArtist", "").to_string(),
            album: record.str_or("trackAlbum", "").to_string(),
            album_artist: record.str_or("albumArtist", "").to_string(),
        },
        position: record.f64_or("playerPosition", 0.0).max(0.0) as i64,
        duration: duration.max(0),
        volume,
        muted: volume == 0,
        shuffle: record.bool_or("shuffling", false),
        repeat: if record.bool_or("repeating", false) {
            RepeatMode::All
        } else {
            RepeatMode::Off
        },
        rating: 0,
        fullscreen: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_record(reply: &str) -> Record {
        script_client::record::parse(reply).unwrap()
    }

    #[test]
    fn test_decode_playing() {
        let record = create_test_record(
            r#"{playerState:"playing", trackName:"Heroes", trackArtist:"David Bowie", trackAlbum:"Heroes", albumArtist:"David Bowie", trackDuration:180000, playerPosition:42.5, soundVolume:70, shuffling:false, repeating:true}"#,
        );
        let status = decode(&record);
        assert!(status.running);
        assert_eq!(status.transport, TransportState::Playing);
        assert_eq!(status.track.name, "Heroes");
        // Milliseconds normalize to whole seconds
        assert_eq!(status.duration, 180);
        assert_eq!(status.duration_formatted(), "3:00");
        assert_eq!(status.position, 42);
        assert_eq!(status.volume, 70);
        assert_eq!(status.repeat, RepeatMode::All);
        assert!(!status.muted);
    }

    #[test]
    fn test_decode_missing_fields_default() {
        let record = create_test_record(r#"{playerState:"paused"}"#);
        let status = decode(&record);
        assert_eq!(status.transport, TransportState::Paused);
        assert!(status.track.is_empty());
        assert_eq!(status.volume, 50);
        assert_eq!(status.duration, 0);
        assert_eq!(status.repeat, RepeatMode::Off);
    }

    #[test]
    fn test_zero_volume_reads_as_muted() {
        let record = create_test_record(r#"{playerState:"playing", soundVolume:0}"#);
        assert!(decode(&record).muted);
    }
}
