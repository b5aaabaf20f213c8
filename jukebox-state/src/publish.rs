//! Status-to-state-key translation
//!
//! Turns a [`PlayerStatus`] snapshot into the ordered state list published
//! on its virtual device. Each player keeps its historical key names: the
//! music players expose `trackName`/`playerPosition`/`soundVolume`, VLC
//! exposes `mediaName`/`currentTime`/`audioVolume`, and shuffle/repeat keys
//! follow each player's own vocabulary. The manager remaps VLC's aliases
//! back into the music-player schema when it republishes the active status.

use device_store::StateUpdate;
use jukebox_api::PlayerKind;

use crate::model::{PlayerStatus, TransportState};

/// The ordered state list for one player's virtual device
pub fn player_updates(status: &PlayerStatus) -> Vec<StateUpdate> {
    let mut updates = vec![
        StateUpdate::new("appRunning", status.running),
        StateUpdate::new("playerState", status.transport.as_str()),
        StateUpdate::new("isPlaying", status.transport == TransportState::Playing),
        StateUpdate::new("isPaused", status.transport == TransportState::Paused),
        StateUpdate::new("isStopped", status.transport == TransportState::Stopped),
    ];

    match status.kind {
        PlayerKind::Vlc => {
            updates.push(StateUpdate::new("mediaName", status.track.name.as_str()));
            updates.push(StateUpdate::new("currentTime", status.position));
        }
        _ => {
            updates.push(StateUpdate::new("trackName", status.track.name.as_str()));
            updates.push(StateUpdate::new("artist", status.track.artist.as_str()));
            updates.push(StateUpdate::new("album", status.track.album.as_str()));
            updates.push(StateUpdate::new(
                "albumArtist",
                status.track.album_artist.as_str(),
            ));
            updates.push(StateUpdate::new("playerPosition", status.position));
        }
    }

    updates.push(StateUpdate::new("duration", status.duration));
    updates.push(StateUpdate::new(
        "positionFormatted",
        status.position_formatted(),
    ));
    updates.push(StateUpdate::new(
        "durationFormatted",
        status.duration_formatted(),
    ));
    updates.push(StateUpdate::new("progressPercent", status.progress_percent()));

    match status.kind {
        PlayerKind::Vlc => {
            updates.push(StateUpdate::new("audioVolume", status.volume));
            updates.push(StateUpdate::new("randomMode", status.shuffle));
            updates.push(StateUpdate::new("looping", status.repeat.is_on()));
            updates.push(StateUpdate::new("fullscreen", status.fullscreen));
        }
        PlayerKind::Spotify => {
            updates.push(StateUpdate::new("soundVolume", status.volume));
            updates.push(StateUpdate::new("shuffling", status.shuffle));
            updates.push(StateUpdate::new("repeating", status.repeat.is_on()));
        }
        PlayerKind::AppleMusic => {
            updates.push(StateUpdate::new("soundVolume", status.volume));
            updates.push(StateUpdate::new("shuffleEnabled", status.shuffle));
            updates.push(StateUpdate::new("songRepeat", status.repeat.as_str()));
            updates.push(StateUpdate::new("rating", status.rating));
        }
    }

    updates.push(StateUpdate::new("muted", status.muted));
    updates.push(StateUpdate::new("status", status.display_line()));
    updates
}

/// The manager's republished view of the active player's status
///
/// Uniform music-player key names regardless of which player is active;
/// `mediaName`/`currentTime`/`audioVolume` fold into
/// `trackName`/`playerPosition`/`soundVolume` here.
pub fn manager_updates(
    active: &PlayerStatus,
    playing: [bool; 3],
    active_tag: &str,
) -> Vec<StateUpdate> {
    vec![
        StateUpdate::new("activeService", active_tag),
        StateUpdate::new("spotifyIsPlaying", playing[0]),
        StateUpdate::new("appleMusicIsPlaying", playing[1]),
        StateUpdate::new("vlcIsPlaying", playing[2]),
        StateUpdate::new("playerState", active.transport.as_str()),
        StateUpdate::new("isPlaying", active.transport == TransportState::Playing),
        StateUpdate::new("trackName", active.track.name.as_str()),
        StateUpdate::new("artist", active.track.artist.as_str()),
        StateUpdate::new("album", active.track.album.as_str()),
        StateUpdate::new("playerPosition", active.position),
        StateUpdate::new("duration", active.duration),
        StateUpdate::new("positionFormatted", active.position_formatted()),
        StateUpdate::new("durationFormatted", active.duration_formatted()),
        StateUpdate::new("progressPercent", active.progress_percent()),
        StateUpdate::new("soundVolume", active.volume),
        StateUpdate::new("status", active.display_line()),
    ]
}

/// Rebuild a status snapshot from a player device's published states
///
/// The manager works from the states the players last published rather
/// than re-querying the applications, so its view is at most one player
/// poll interval old.
pub fn status_from_states(kind: PlayerKind, device: &device_store::DeviceRecord) -> PlayerStatus {
    use crate::model::TrackInfo;
    use jukebox_api::RepeatMode;

    let (name_key, position_key, volume_key) = match kind {
        PlayerKind::Vlc => ("mediaName", "currentTime", "audioVolume"),
        _ => ("trackName", "playerPosition", "soundVolume"),
    };
    let shuffle = match kind {
        PlayerKind::Spotify => device.state_bool("shuffling", false),
        PlayerKind::AppleMusic => device.state_bool("shuffleEnabled", false),
        PlayerKind::Vlc => device.state_bool("randomMode", false),
    };
    let repeat = match kind {
        PlayerKind::AppleMusic => RepeatMode::from_str_loose(device.state_str("songRepeat", "off")),
        PlayerKind::Spotify if device.state_bool("repeating", false) => RepeatMode::All,
        PlayerKind::Vlc if device.state_bool("looping", false) => RepeatMode::All,
        _ => RepeatMode::Off,
    };

    PlayerStatus {
        kind,
        running: device.state_bool("appRunning", false),
        transport: crate::model::TransportState::from_player_state(
            device.state_str("playerState", "stopped"),
        ),
        track: TrackInfo {
            name: device.state_str(name_key, "").to_string(),
            artist: device.state_str("artist", "").to_string(),
            album: device.state_str("album", "").to_string(),
            album_artist: device.state_str("albumArtist", "").to_string(),
        },
        position: device.state_i64(position_key, 0),
        duration: device.state_i64("duration", 0),
        volume: device.state_i64(volume_key, jukebox_api::DEFAULT_VOLUME),
        muted: device.state_bool("muted", false),
        shuffle,
        repeat,
        rating: device.state_i64("rating", 0),
        fullscreen: device.state_bool("fullscreen", false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TrackInfo;
    use device_store::StateValue;

    fn find<'a>(updates: &'a [StateUpdate], key: &str) -> &'a StateValue {
        &updates
            .iter()
            .find(|u| u.key == key)
            .unwrap_or_else(|| panic!("missing key {}", key))
            .value
    }

    #[test]
    fn test_music_player_keys() {
        let mut status = PlayerStatus::not_running(PlayerKind::Spotify);
        status.running = true;
        status.transport = TransportState::Playing;
        status.track = TrackInfo {
            name: "Heroes".to_string(),
            artist: "David Bowie".to_string(),
            ..TrackInfo::default()
        };
        status.position = 42;
        status.duration = 180;
        status.volume = 70;

        let updates = player_updates(&status);
        assert_eq!(find(&updates, "trackName"), &StateValue::from("Heroes"));
        assert_eq!(find(&updates, "playerPosition"), &StateValue::Int(42));
        assert_eq!(find(&updates, "soundVolume"), &StateValue::Int(70));
        assert_eq!(find(&updates, "durationFormatted"), &StateValue::from("3:00"));
        assert_eq!(find(&updates, "isPlaying"), &StateValue::Bool(true));
        assert!(!updates.iter().any(|u| u.key == "mediaName"));
    }

    #[test]
    fn test_vlc_keys_aliased() {
        let mut status = PlayerStatus::not_running(PlayerKind::Vlc);
        status.running = true;
        status.transport = TransportState::Paused;
        status.track.name = "movie.mkv".to_string();
        status.position = 30;
        status.volume = 50;

        let updates = player_updates(&status);
        assert_eq!(find(&updates, "mediaName"), &StateValue::from("movie.mkv"));
        assert_eq!(find(&updates, "currentTime"), &StateValue::Int(30));
        assert_eq!(find(&updates, "audioVolume"), &StateValue::Int(50));
        assert!(!updates.iter().any(|u| u.key == "trackName"));
        assert!(!updates.iter().any(|u| u.key == "soundVolume"));
    }

    #[test]
    fn test_manager_remaps_vlc_aliases() {
        let mut status = PlayerStatus::not_running(PlayerKind::Vlc);
        status.running = true;
        status.transport = TransportState::Playing;
        status.track.name = "movie.mkv".to_string();
        status.position = 30;
        status.volume = 45;

        let updates = manager_updates(&status, [false, false, true], "vlc");
        assert_eq!(find(&updates, "activeService"), &StateValue::from("vlc"));
        assert_eq!(find(&updates, "trackName"), &StateValue::from("movie.mkv"));
        assert_eq!(find(&updates, "playerPosition"), &StateValue::Int(30));
        assert_eq!(find(&updates, "soundVolume"), &StateValue::Int(45));
        assert_eq!(find(&updates, "vlcIsPlaying"), &StateValue::Bool(true));
        assert_eq!(find(&updates, "spotifyIsPlaying"), &StateValue::Bool(false));
    }
}
