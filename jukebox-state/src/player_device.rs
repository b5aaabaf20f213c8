//! Virtual device wrapper for one player
//!
//! Binds a [`PlayerAdapter`] to its host device record: refresh pulls the
//! raw status, normalizes it and publishes the state list; execute resolves
//! relative/toggle commands against the last published states, runs the
//! command, then refreshes so the host sees the new state immediately.

use device_store::{DeviceId, DeviceRecord, DeviceRegistry, VariableStore};
use jukebox_api::{
    Command, ExecCtx, PlayerAdapter, PlayerController, PlayerKind, RepeatMode,
};
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::config::PlayerDeviceConfig;
use crate::decode;
use crate::poller::Monitored;
use crate::publish;

pub struct PlayerDevice {
    id: DeviceId,
    kind: PlayerKind,
    adapter: Mutex<PlayerAdapter>,
    registry: DeviceRegistry,
    config: PlayerDeviceConfig,
    variables: Option<VariableStore>,
    variable_prefix: String,
}

impl PlayerDevice {
    /// Wire an adapter to its registry record
    ///
    /// Reads `updateFrequency`/`updateVariables`/`variablePrefix` from the
    /// device's props; `variables` may be `None` when the host offers no
    /// variable store.
    pub fn new(
        device: &DeviceRecord,
        adapter: PlayerAdapter,
        registry: DeviceRegistry,
        variables: Option<VariableStore>,
    ) -> Self {
        let config = PlayerDeviceConfig::from_device(device);
        let variable_prefix = device.props().str_or("variablePrefix", "").to_string();
        Self {
            id: device.id,
            kind: adapter.kind(),
            adapter: Mutex::new(adapter),
            registry,
            config,
            variables: if config.update_variables { variables } else { None },
            variable_prefix,
        }
    }

    pub fn id(&self) -> DeviceId {
        self.id
    }

    pub fn config(&self) -> &PlayerDeviceConfig {
        &self.config
    }

    /// Build the execute-time context from the last published states
    fn exec_ctx(&self) -> ExecCtx {
        match self.registry.get(self.id) {
            Some(device) => exec_ctx_from_states(self.kind, &device),
            None => ExecCtx::default(),
        }
    }
}

/// Read the per-kind state keys back into an [`ExecCtx`]
fn exec_ctx_from_states(kind: PlayerKind, device: &DeviceRecord) -> ExecCtx {
    let default = ExecCtx::default();
    match kind {
        PlayerKind::Vlc => ExecCtx {
            volume: device.state_i64("audioVolume", default.volume),
            position: device.state_i64("currentTime", 0),
            shuffling: device.state_bool("randomMode", false),
            repeat: if device.state_bool("looping", false) {
                RepeatMode::All
            } else {
                RepeatMode::Off
            },
            muted: device.state_bool("muted", false),
            fullscreen: device.state_bool("fullscreen", false),
        },
        PlayerKind::Spotify => ExecCtx {
            volume: device.state_i64("soundVolume", default.volume),
            position: device.state_i64("playerPosition", 0),
            shuffling: device.state_bool("shuffling", false),
            repeat: if device.state_bool("repeating", false) {
                RepeatMode::All
            } else {
                RepeatMode::Off
            },
            muted: device.state_bool("muted", false),
            fullscreen: false,
        },
        PlayerKind::AppleMusic => ExecCtx {
            volume: device.state_i64("soundVolume", default.volume),
            position: device.state_i64("playerPosition", 0),
            shuffling: device.state_bool("shuffleEnabled", false),
            repeat: RepeatMode::from_str_loose(device.state_str("songRepeat", "off")),
            muted: device.state_bool("muted", false),
            fullscreen: false,
        },
    }
}

impl PlayerController for PlayerDevice {
    fn kind(&self) -> PlayerKind {
        self.kind
    }

    fn refresh(&self) {
        let availability = self.adapter.lock().refresh();
        let status = decode::normalize(self.kind, &availability);
        let updates = publish::player_updates(&status);

        if !self.registry.update_states(self.id, &updates) {
            // Device was removed mid-refresh; the result is simply discarded
            debug!(player = %self.kind, device = %self.id, "device gone, dropping refresh");
            return;
        }
        if let Some(variables) = &self.variables {
            variables.mirror(&self.variable_prefix, &updates);
        }
    }

    fn execute(&self, command: &Command) {
        let ctx = self.exec_ctx();
        debug!(player = %self.kind, device = %self.id, ?command, "executing");
        self.adapter.lock().execute(command, &ctx);
        if !self.registry.contains(self.id) {
            warn!(player = %self.kind, device = %self.id, "device gone after command");
            return;
        }
        self.refresh();
    }
}

impl Monitored for PlayerDevice {
    fn id(&self) -> DeviceId {
        self.id
    }

    fn interval(&self) -> std::time::Duration {
        self.config.update_interval
    }

    fn tick(&self) {
        self.refresh();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use device_store::StateValue;
    use script_client::{ScriptError, ScriptRunner};
    use std::sync::{Arc, Mutex as StdMutex};

    struct CannedRunner {
        scripts: Arc<StdMutex<Vec<String>>>,
        reply: String,
    }

    impl ScriptRunner for CannedRunner {
        fn run(&self, script: &str) -> Result<String, ScriptError> {
            self.scripts.lock().unwrap().push(script.to_string());
            Ok(self.reply.clone())
        }
    }

    fn create_test_device(
        reply: &str,
        kind: PlayerKind,
    ) -> (PlayerDevice, DeviceRegistry, Arc<StdMutex<Vec<String>>>) {
        let registry = DeviceRegistry::new();
        let record = DeviceRecord::new(DeviceId::new(1), "player", kind.tag());
        registry.insert(record.clone());

        let scripts = Arc::new(StdMutex::new(Vec::new()));
        let runner = CannedRunner {
            scripts: scripts.clone(),
            reply: reply.to_string(),
        };
        let adapter = PlayerAdapter::new(kind, Box::new(runner));
        let device = PlayerDevice::new(&record, adapter, registry.clone(), None);
        (device, registry, scripts)
    }

    #[test]
    fn test_refresh_publishes_normalized_status() {
        let (device, registry, _) = create_test_device(
            r#"{playerState:"playing", trackName:"Heroes", trackArtist:"David Bowie", trackAlbum:"Heroes", albumArtist:"David Bowie", trackDuration:180000, playerPosition:42, soundVolume:70, shuffling:false, repeating:false}"#,
            PlayerKind::Spotify,
        );
        device.refresh();

        let record = registry.get(DeviceId::new(1)).unwrap();
        assert!(record.state_bool("isPlaying", false));
        assert_eq!(record.state_str("trackName", ""), "Heroes");
        assert_eq!(record.state_i64("duration", 0), 180);
        assert_eq!(record.state_i64("soundVolume", 0), 70);
    }

    #[test]
    fn test_execute_resolves_context_from_states() {
        let (device, registry, scripts) = create_test_device(
            r#"{playerState:"playing", soundVolume:80, shuffling:false, repeating:false}"#,
            PlayerKind::Spotify,
        );
        registry.update_states(
            DeviceId::new(1),
            &[device_store::StateUpdate::new("soundVolume", 80i64)],
        );

        device.execute(&Command::VolumeUp(15));

        let ran = scripts.lock().unwrap();
        // Command first, then the follow-up status query
        assert!(ran[0].ends_with("set sound volume to 95"));
        assert!(ran[1].contains("System Events"));
    }

    #[test]
    fn test_not_running_reply_publishes_stopped() {
        let (device, registry, _) = create_test_device("{notRunning:true}", PlayerKind::Vlc);
        device.refresh();

        let record = registry.get(DeviceId::new(1)).unwrap();
        assert_eq!(record.state("appRunning"), Some(&StateValue::Bool(false)));
        assert_eq!(record.state_str("playerState", ""), "stopped");
        assert_eq!(record.state_i64("audioVolume", 0), 50);
    }
}
