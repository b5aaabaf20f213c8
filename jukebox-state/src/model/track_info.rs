//! Current track information

use serde::{Deserialize, Serialize};

/// Track/media metadata, all fields empty when stopped or unknown
///
/// VLC only ever fills `name` (the loaded item's filename or stream
/// title); the music players fill all four.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackInfo {
    pub name: String,
    pub artist: String,
    pub album: String,
    pub album_artist: String,
}

impl TrackInfo {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.artist.is_empty()
            && self.album.is_empty()
            && self.album_artist.is_empty()
    }

    /// "Artist - Track" display form, degrading when fields are missing
    pub fn display(&self) -> String {
        match (self.artist.is_empty(), self.name.is_empty()) {
            (false, false) => format!("{} - {}", self.artist, self.name),
            (true, false) => self.name.clone(),
            (false, true) => self.artist.clone(),
            (true, true) => String::new(),
        }
    }
}
