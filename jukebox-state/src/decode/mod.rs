//! Status decoders for the three players
//!
//! Each decoder maps one player's raw status record into the common
//! [`PlayerStatus`] schema, absorbing per-player field names and units.
//! Decoding is pure and total: a missing or unparseable record decodes to
//! the not-running status, never an error.

mod apple_music;
mod spotify;
mod vlc;

use jukebox_api::{Availability, PlayerKind};
use script_client::Record;

use crate::model::PlayerStatus;

/// Normalize one refresh result into the common status schema
pub fn normalize(kind: PlayerKind, availability: &Availability) -> PlayerStatus {
    match availability.record() {
        Some(record) => decode_record(kind, record),
        None => PlayerStatus::not_running(kind),
    }
}

fn decode_record(kind: PlayerKind, record: &Record) -> PlayerStatus {
    // The process-existence branch of the status script
    if record.bool_or("notRunning", false) {
        return PlayerStatus::not_running(kind);
    }
    match kind {
        PlayerKind::Spotify => spotify::decode(record),
        PlayerKind::AppleMusic => apple_music::decode(record),
        PlayerKind::Vlc => vlc::decode(record),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TransportState;

    #[test]
    fn test_unavailable_normalizes_to_not_running() {
        let status = normalize(PlayerKind::Spotify, &Availability::Unavailable);
        assert!(!status.running);
        assert_eq!(status.transport, TransportState::Stopped);
        assert_eq!(status.volume, 50);
    }

    #[test]
    fn test_not_running_record() {
        let record = script_client::record::parse("{notRunning:true}").unwrap();
        let status = normalize(PlayerKind::Vlc, &Availability::Available(record));
        assert!(!status.running);
        assert_eq!(status.transport, TransportState::Stopped);
    }
}
