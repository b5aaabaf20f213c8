//! Per-device configuration
//!
//! Host-side device props are a loose key → string map; this module parses
//! them into typed configuration with the historical defaults. Bad values
//! fall back to the default rather than failing the device.

use std::time::Duration;

use device_store::{DeviceId, DeviceRecord};
use jukebox_api::PlayerKind;

/// Fallback rule when no configured player is playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreferredFallback {
    /// A specific player, when it is configured
    Service(PlayerKind),
    /// The most recently active player
    #[default]
    LastActive,
    /// The first configured player in priority order
    FirstConfigured,
}

impl PreferredFallback {
    /// Parse the `preferredService` prop ("spotify", "applemusic", "vlc",
    /// "last", "first"); anything unrecognized means "last"
    pub fn from_prop(value: &str) -> Self {
        match value {
            "first" => PreferredFallback::FirstConfigured,
            "last" => PreferredFallback::LastActive,
            other => match PlayerKind::from_tag(other) {
                Some(kind) => PreferredFallback::Service(kind),
                None => PreferredFallback::LastActive,
            },
        }
    }
}

/// Parsed configuration of a player device
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerDeviceConfig {
    /// Poll interval; prop `updateFrequency` in float seconds, default 1.0
    pub update_interval: Duration,
    /// Mirror published states into host variables
    pub update_variables: bool,
}

impl Default for PlayerDeviceConfig {
    fn default() -> Self {
        Self {
            update_interval: Duration::from_secs(1),
            update_variables: false,
        }
    }
}

impl PlayerDeviceConfig {
    pub fn from_device(device: &DeviceRecord) -> Self {
        let props = device.props();
        Self {
            update_interval: interval_from_secs(props.f64_or("updateFrequency", 1.0)),
            update_variables: props.bool_or("updateVariables", false),
        }
    }
}

/// Parsed configuration of a manager device
#[derive(Debug, Clone, PartialEq)]
pub struct ManagerConfig {
    /// Backing device ids in priority order [Spotify, Apple Music, VLC];
    /// `None` = unconfigured
    pub services: [Option<DeviceId>; 3],
    pub auto_exclusive: bool,
    pub preferred: PreferredFallback,
    pub update_variables: bool,
    pub variable_prefix: String,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            services: [None; 3],
            auto_exclusive: true,
            preferred: PreferredFallback::LastActive,
            update_variables: false,
            variable_prefix: String::new(),
        }
    }
}

impl ManagerConfig {
    /// The manager polls at a fixed cadence, not user-configurable
    pub const UPDATE_INTERVAL: Duration = Duration::from_millis(500);

    pub fn from_device(device: &DeviceRecord) -> Self {
        let props = device.props();
        Self {
            services: [
                props.device_id("spotifyDeviceId"),
                props.device_id("appleMusicDeviceId"),
                props.device_id("vlcDeviceId"),
            ],
            auto_exclusive: props.bool_or("autoExclusive", true),
            preferred: PreferredFallback::from_prop(props.str_or("preferredService", "last")),
            update_variables: props.bool_or("updateVariables", false),
            variable_prefix: props.str_or("variablePrefix", "").to_string(),
        }
    }

    pub fn service_id(&self, kind: PlayerKind) -> Option<DeviceId> {
        self.services[kind_index(kind)]
    }

    pub fn is_configured(&self, kind: PlayerKind) -> bool {
        self.service_id(kind).is_some()
    }

    pub fn any_configured(&self) -> bool {
        self.services.iter().any(Option::is_some)
    }
}

/// Index of a kind in priority-ordered arrays
pub fn kind_index(kind: PlayerKind) -> usize {
    match kind {
        PlayerKind::Spotify => 0,
        PlayerKind::AppleMusic => 1,
        PlayerKind::Vlc => 2,
    }
}

fn interval_from_secs(secs: f64) -> Duration {
    if secs.is_finite() && secs > 0.0 {
        Duration::from_secs_f64(secs)
    } else {
        Duration::from_secs(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_manager_device() -> DeviceRecord {
        DeviceRecord::new(DeviceId::new(1), "Music Manager", "manager")
            .with_prop("spotifyDeviceId", "10")
            .with_prop("appleMusicDeviceId", "")
            .with_prop("vlcDeviceId", "12")
            .with_prop("autoExclusive", "false")
            .with_prop("preferredService", "vlc")
            .with_prop("updateVariables", "true")
            .with_prop("variablePrefix", "music")
    }

    #[test]
    fn test_manager_config_parsing() {
        let config = ManagerConfig::from_device(&create_test_manager_device());
        assert_eq!(config.services[0], Some(DeviceId::new(10)));
        assert_eq!(config.services[1], None);
        assert_eq!(config.services[2], Some(DeviceId::new(12)));
        assert!(!config.auto_exclusive);
        assert_eq!(config.preferred, PreferredFallback::Service(PlayerKind::Vlc));
        assert!(config.update_variables);
        assert_eq!(config.variable_prefix, "music");
        assert!(config.is_configured(PlayerKind::Spotify));
        assert!(!config.is_configured(PlayerKind::AppleMusic));
    }

    #[test]
    fn test_manager_defaults() {
        let device = DeviceRecord::new(DeviceId::new(2), "Manager", "manager");
        let config = ManagerConfig::from_device(&device);
        assert!(config.auto_exclusive);
        assert_eq!(config.preferred, PreferredFallback::LastActive);
        assert!(!config.any_configured());
    }

    #[test]
    fn test_player_config_parsing() {
        let device = DeviceRecord::new(DeviceId::new(3), "Spotify", "spotify")
            .with_prop("updateFrequency", "2.5");
        let config = PlayerDeviceConfig::from_device(&device);
        assert_eq!(config.update_interval, Duration::from_secs_f64(2.5));

        let bad = DeviceRecord::new(DeviceId::new(4), "Spotify", "spotify")
            .with_prop("updateFrequency", "-1");
        assert_eq!(
            PlayerDeviceConfig::from_device(&bad).update_interval,
            Duration::from_secs(1)
        );
    }

    #[test]
    fn test_preferred_fallback_parsing() {
        assert_eq!(PreferredFallback::from_prop("last"), PreferredFallback::LastActive);
        assert_eq!(
            PreferredFallback::from_prop("first"),
            PreferredFallback::FirstConfigured
        );
        assert_eq!(
            PreferredFallback::from_prop("spotify"),
            PreferredFallback::Service(PlayerKind::Spotify)
        );
        assert_eq!(PreferredFallback::from_prop("winamp"), PreferredFallback::LastActive);
    }
}
