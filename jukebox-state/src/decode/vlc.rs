//! VLC status decoder
//!
//! VLC has no "paused" transport state of its own: it reports only a
//! `playing` boolean. Paused is inferred as "media loaded but not playing";
//! no loaded media means Stopped. This is a documented asymmetry of the
//! player, mirrored here rather than hidden.
//!
//! Volume arrives on VLC's native 0-256 scale and normalizes to 0-100.

use jukebox_api::{PlayerKind, PlayerProfile, RepeatMode};
use script_client::Record;

use crate::model::{PlayerStatus, TrackInfo, TransportState};

pub fn decode(record: &Record) -> PlayerStatus {
    let profile = PlayerProfile::of(PlayerKind::Vlc);

    let name = record.str_or("mediaName", "").to_string();
    let duration = record.i64_or("duration", 0).max(0);
    let playing = record.bool_or("playing", false);

    let media_loaded = !name.is_empty() || duration > 0;
    let transport = if playing {
        TransportState::Playing
    } else if media_loaded {
        TransportState::Paused
    } else {
        TransportState::Stopped
    };

    PlayerStatus {
        kind: PlayerKind::Vlc,
        running: true,
        transport,
        track: TrackInfo {
            name,
            ..TrackInfo::default()
        },
        position: record.i64_or("currentTime", 0).max(0),
        duration,
        volume: profile.from_native_volume(record.i64_or(
            "audioVolume",
            profile.to_native_volume(jukebox_api::DEFAULT_VOLUME),
        )),
        muted: record.bool_or("muted", false),
        shuffle: record.bool_or("randomMode", false),
        repeat: if record.bool_or("looping", false) {
            RepeatMode::All
        } else {
            RepeatMode::Off
        },
        rating: 0,
        fullscreen: record.bool_or("fullscreen", false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_record(reply: &str) -> Record {
        script_client::record::parse(reply).unwrap()
    }

    #[test]
    fn test_decode_playing_with_native_volume() {
        let record = create_test_record(
            r#"{playing:true, currentTime:30, duration:7200, mediaName:"movie.mkv", audioVolume:128, muted:false, fullscreen:true, looping:false, randomMode:false}"#,
        );
        let status = decode(&record);
        assert_eq!(status.transport, TransportState::Playing);
        assert_eq!(status.track.name, "movie.mkv");
        assert_eq!(status.volume, 50);
        assert!(status.fullscreen);
    }

    #[test]
    fn test_pause_inferred_from_loaded_media() {
        let record = create_test_record(
            r#"{playing:false, currentTime:30, duration:7200, mediaName:"movie.mkv", audioVolume:128, muted:false, fullscreen:false, looping:false, randomMode:false}"#,
        );
        assert_eq!(decode(&record).transport, TransportState::Paused);
    }

    #[test]
    fn test_no_media_is_stopped() {
        let record = create_test_record(
            r#"{playing:false, currentTime:0, duration:0, mediaName:"", audioVolume:256, muted:false, fullscreen:false, looping:false, randomMode:false}"#,
        );
        let status = decode(&record);
        assert_eq!(status.transport, TransportState::Stopped);
        assert_eq!(status.volume, 100);
    }

    #[test]
    fn test_missing_volume_defaults_to_midpoint() {
        let record = create_test_record(r#"{playing:false, mediaName:""}"#);
        assert_eq!(decode(&record).volume, 50);
    }
}
