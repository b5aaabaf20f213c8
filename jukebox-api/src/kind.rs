//! Player kind enumeration

use serde::{Deserialize, Serialize};

/// The three desktop players the bridge knows how to drive
///
/// The declaration order is also the arbitration priority order: when two
/// players start in the same tick, Spotify wins over Apple Music, which
/// wins over VLC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerKind {
    Spotify,
    AppleMusic,
    Vlc,
}

/// All kinds in arbitration priority order
pub const PRIORITY: [PlayerKind; 3] = [PlayerKind::Spotify, PlayerKind::AppleMusic, PlayerKind::Vlc];

impl PlayerKind {
    /// Tag used for the `activeService` state and owner lookups
    pub fn tag(&self) -> &'static str {
        match self {
            PlayerKind::Spotify => "spotify",
            PlayerKind::AppleMusic => "applemusic",
            PlayerKind::Vlc => "vlc",
        }
    }

    /// Parse from a tag, accepting the config spellings
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "spotify" => Some(PlayerKind::Spotify),
            "applemusic" => Some(PlayerKind::AppleMusic),
            "vlc" => Some(PlayerKind::Vlc),
            _ => None,
        }
    }
}

impl std::fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        assert_eq!(
            PRIORITY,
            [PlayerKind::Spotify, PlayerKind::AppleMusic, PlayerKind::Vlc]
        );
    }

    #[test]
    fn test_tag_round_trip() {
        for kind in PRIORITY {
            assert_eq!(PlayerKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(PlayerKind::from_tag("winamp"), None);
    }
}
