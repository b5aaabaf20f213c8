//! Exclusivity arbitration engine
//!
//! One manager device watches up to three player devices and decides which
//! one is "the" active player: a newly-started player pauses the others
//! (when auto-exclusive is on), the active player's status is republished
//! on the manager device, and commands sent to the manager route to the
//! active player.
//!
//! The decision itself is the pure [`arbitrate`] function; [`ManagerDevice`]
//! wraps it with the registry reads, peer pause calls and state publishing.

use device_store::{DeviceId, DeviceRecord, DeviceRegistry, VariableStore};
use jukebox_api::{Command, PlayerController, PlayerKind, PRIORITY};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::{kind_index, ManagerConfig, PreferredFallback};
use crate::model::PlayerStatus;
use crate::publish;

// ============================================================
// Pure decision core
// ============================================================

/// Cross-tick memory of one manager device
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArbitrationMemory {
    /// Playing state observed on the previous tick, for edge detection
    pub last_playing: [bool; 3],
    /// Most recently selected active player, kept while nothing plays
    pub last_active: Option<PlayerKind>,
}

/// One tick's input to the decision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArbitrationInput {
    /// Which players are configured and reachable this tick
    pub configured: [bool; 3],
    /// Current playing state per player, priority order
    pub playing: [bool; 3],
    pub auto_exclusive: bool,
    pub preferred: PreferredFallback,
}

/// One tick's decision
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// Peers that must be paused this tick
    pub pause: Vec<PlayerKind>,
    /// Playing flags after the optimistic pause override
    pub playing: [bool; 3],
    /// Selected active player; `None` only when nothing is configured
    pub active: Option<PlayerKind>,
}

/// Run one arbitration tick
///
/// Edge detection first: a player "just started" when it is playing now
/// but was not on the previous tick. Under auto-exclusive the first such
/// player in priority order (Spotify, Apple Music, VLC) wins and every
/// other playing peer is paused - first match, no fallthrough, so a
/// same-tick tie always resolves to the higher-priority player.
///
/// Paused peers are optimistically marked not-playing for the rest of
/// this tick even though their own confirmation only arrives on their
/// next refresh. The peer's next independent poll may briefly overwrite
/// that with pre-pause data; that window is accepted, matching how the
/// exclusivity has always behaved, and corrects itself within one poll
/// interval.
pub fn arbitrate(input: &ArbitrationInput, memory: &mut ArbitrationMemory) -> Outcome {
    // Unconfigured players never count as playing
    let mut playing = input.playing;
    for i in 0..3 {
        playing[i] = playing[i] && input.configured[i];
    }

    let just_started: Vec<PlayerKind> = PRIORITY
        .into_iter()
        .filter(|&kind| {
            let i = kind_index(kind);
            playing[i] && !memory.last_playing[i]
        })
        .collect();

    let mut pause = Vec::new();
    if input.auto_exclusive {
        if let Some(&winner) = just_started.first() {
            for kind in PRIORITY {
                if kind != winner && playing[kind_index(kind)] {
                    pause.push(kind);
                    playing[kind_index(kind)] = false;
                }
            }
            if !pause.is_empty() {
                debug!(winner = %winner, pausing = ?pause, "exclusivity takeover");
            }
        }
    }

    memory.last_playing = playing;

    let active = select_active(&playing, &input.configured, input.preferred, memory.last_active);
    if let Some(active) = active {
        memory.last_active = Some(active);
    }

    Outcome {
        pause,
        playing,
        active,
    }
}

/// Step-4 selection: first playing player in priority order, else the
/// configured fallback chain (preferred player, last active, first
/// configured). `None` when nothing is configured at all.
fn select_active(
    playing: &[bool; 3],
    configured: &[bool; 3],
    preferred: PreferredFallback,
    last_active: Option<PlayerKind>,
) -> Option<PlayerKind> {
    for kind in PRIORITY {
        if playing[kind_index(kind)] {
            return Some(kind);
        }
    }

    if let PreferredFallback::Service(kind) = preferred {
        if configured[kind_index(kind)] {
            return Some(kind);
        }
    }
    if !matches!(preferred, PreferredFallback::FirstConfigured) {
        if let Some(kind) = last_active {
            if configured[kind_index(kind)] {
                return Some(kind);
            }
        }
    }
    PRIORITY
        .into_iter()
        .find(|&kind| configured[kind_index(kind)])
}

// ============================================================
// Device wrapper
// ============================================================

/// The manager virtual device
pub struct ManagerDevice {
    id: DeviceId,
    registry: DeviceRegistry,
    config: ManagerConfig,
    memory: Mutex<ArbitrationMemory>,
    /// Controllers for the configured players, priority order
    controllers: [Option<Arc<dyn PlayerController>>; 3],
    variables: Option<VariableStore>,
}

impl ManagerDevice {
    pub fn new(
        device: &DeviceRecord,
        registry: DeviceRegistry,
        controllers: Vec<Arc<dyn PlayerController>>,
        variables: Option<VariableStore>,
    ) -> Self {
        let config = ManagerConfig::from_device(device);
        let mut slots: [Option<Arc<dyn PlayerController>>; 3] = [None, None, None];
        for controller in controllers {
            let i = kind_index(controller.kind());
            slots[i] = Some(controller);
        }
        Self {
            id: device.id,
            registry,
            variables: if config.update_variables {
                variables
            } else {
                None
            },
            config,
            memory: Mutex::new(ArbitrationMemory::default()),
            controllers: slots,
        }
    }

    pub fn id(&self) -> DeviceId {
        self.id
    }

    /// A player counts as configured this tick only when its id is set,
    /// its backing device exists, and a controller is wired up. A missing
    /// backing device is never fatal; the player simply drops out until
    /// it reappears.
    fn backing_device(&self, kind: PlayerKind) -> Option<DeviceRecord> {
        let i = kind_index(kind);
        let id = self.config.services[i]?;
        self.controllers[i].as_ref()?;
        self.registry.get(id)
    }

    /// Run one full arbitration tick: gather, decide, pause peers, publish
    pub fn tick(&self) {
        let mut configured = [false; 3];
        let mut playing = [false; 3];
        let mut statuses: [Option<PlayerStatus>; 3] = [None, None, None];

        for kind in PRIORITY {
            let i = kind_index(kind);
            if let Some(device) = self.backing_device(kind) {
                configured[i] = true;
                playing[i] = device.state_bool("isPlaying", false);
                statuses[i] = Some(publish::status_from_states(kind, &device));
            }
        }

        let input = ArbitrationInput {
            configured,
            playing,
            auto_exclusive: self.config.auto_exclusive,
            preferred: self.config.preferred,
        };
        let outcome = arbitrate(&input, &mut self.memory.lock());

        // Fire-and-forget: no acknowledgment is awaited, the decision
        // below already assumes the pause took effect
        for kind in &outcome.pause {
            if let Some(controller) = &self.controllers[kind_index(*kind)] {
                info!(player = %kind, "pausing for exclusivity");
                controller.execute(&Command::Pause);
            }
        }

        let Some(active) = outcome.active else {
            // Idle: nothing configured, nothing to publish
            return;
        };
        let Some(status) = statuses[kind_index(active)].take() else {
            return;
        };

        let updates = publish::manager_updates(&status, outcome.playing, active.tag());
        if !self.registry.update_states(self.id, &updates) {
            debug!(device = %self.id, "manager device gone, dropping tick");
            return;
        }
        if let Some(variables) = &self.variables {
            variables.mirror(&self.config.variable_prefix, &updates);
        }
    }

    /// The player commands route to: the last published active player,
    /// else the fallback chain over this tick's configured players
    fn route_target(&self) -> Option<PlayerKind> {
        let published = self
            .registry
            .get(self.id)
            .and_then(|d| PlayerKind::from_tag(d.state_str("activeService", "")));
        if let Some(kind) = published {
            if self.backing_device(kind).is_some() {
                return Some(kind);
            }
        }

        let mut configured = [false; 3];
        for kind in PRIORITY {
            configured[kind_index(kind)] = self.backing_device(kind).is_some();
        }
        select_active(
            &[false; 3],
            &configured,
            self.config.preferred,
            self.memory.lock().last_active,
        )
    }

    /// Forward a command to the active player, then re-arbitrate
    pub fn route(&self, command: &Command) {
        let Some(target) = self.route_target() else {
            debug!(?command, "no active player to route to");
            return;
        };
        if let Some(controller) = &self.controllers[kind_index(target)] {
            controller.execute(command);
        }
        self.tick();
    }

    /// Stop is broadcast to every configured player, not routed
    pub fn stop_all(&self) {
        for kind in PRIORITY {
            if self.backing_device(kind).is_some() {
                if let Some(controller) = &self.controllers[kind_index(kind)] {
                    controller.execute(&Command::Stop);
                }
            }
        }
        self.tick();
    }

    /// Make `kind` the active player without requiring it to be playing
    ///
    /// Optionally pauses the other configured players first (the default).
    pub fn switch_to(&self, kind: PlayerKind, pause_other: bool) {
        if self.backing_device(kind).is_none() {
            debug!(player = %kind, "switch target not configured");
            return;
        }
        if pause_other {
            for other in PRIORITY {
                if other != kind && self.backing_device(other).is_some() {
                    if let Some(controller) = &self.controllers[kind_index(other)] {
                        controller.execute(&Command::Pause);
                    }
                }
            }
        }
        self.memory.lock().last_active = Some(kind);
        self.tick();
    }

    /// Force an immediate re-evaluation outside the poll cadence
    pub fn update_now(&self) {
        for controller in self.controllers.iter().flatten() {
            controller.refresh();
        }
        self.tick();
    }

    /// Entry point for host action invocations on the manager device
    ///
    /// Transport/volume actions route to the active player; `stop` is a
    /// broadcast; the `switchTo*` actions force the active player
    /// (honoring the `pauseOther` parameter, default true). Unknown
    /// actions log and do nothing.
    pub fn handle_action(&self, action: &str, params: &jukebox_api::ActionParams<'_>) {
        match action {
            "stop" => self.stop_all(),
            "updateNow" => self.update_now(),
            "switchToSpotify" => {
                self.switch_to(PlayerKind::Spotify, params.bool_or("pauseOther", true))
            }
            "switchToAppleMusic" => {
                self.switch_to(PlayerKind::AppleMusic, params.bool_or("pauseOther", true))
            }
            "switchToVlc" => self.switch_to(PlayerKind::Vlc, params.bool_or("pauseOther", true)),
            _ => match jukebox_api::command_from_action(action, params) {
                Some(command) => self.route(&command),
                None => debug!(action, "unknown manager action ignored"),
            },
        }
    }
}

impl crate::poller::Monitored for ManagerDevice {
    fn id(&self) -> DeviceId {
        self.id
    }

    fn interval(&self) -> std::time::Duration {
        ManagerConfig::UPDATE_INTERVAL
    }

    fn tick(&self) {
        ManagerDevice::tick(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(playing: [bool; 3]) -> ArbitrationInput {
        ArbitrationInput {
            configured: [true; 3],
            playing,
            auto_exclusive: true,
            preferred: PreferredFallback::LastActive,
        }
    }

    #[test]
    fn test_single_player_becomes_active() {
        let mut memory = ArbitrationMemory::default();
        let outcome = arbitrate(&input([false, true, false]), &mut memory);
        assert!(outcome.pause.is_empty());
        assert_eq!(outcome.active, Some(PlayerKind::AppleMusic));
        assert_eq!(memory.last_active, Some(PlayerKind::AppleMusic));
    }

    #[test]
    fn test_new_player_pauses_running_peer() {
        let mut memory = ArbitrationMemory {
            last_playing: [false, true, false],
            last_active: Some(PlayerKind::AppleMusic),
        };
        // VLC starts while Apple Music is already playing
        let outcome = arbitrate(&input([false, true, true]), &mut memory);
        assert_eq!(outcome.pause, vec![PlayerKind::AppleMusic]);
        assert_eq!(outcome.active, Some(PlayerKind::Vlc));
        assert_eq!(outcome.playing, [false, false, true]);
    }

    #[test]
    fn test_same_tick_tie_resolves_by_priority() {
        let mut memory = ArbitrationMemory::default();
        // Spotify and Apple Music both start on the same tick
        let outcome = arbitrate(&input([true, true, false]), &mut memory);
        assert_eq!(outcome.pause, vec![PlayerKind::AppleMusic]);
        assert_eq!(outcome.active, Some(PlayerKind::Spotify));
    }

    #[test]
    fn test_auto_exclusive_off_leaves_peers_playing() {
        let mut memory = ArbitrationMemory {
            last_playing: [false, true, false],
            last_active: Some(PlayerKind::AppleMusic),
        };
        let mut inp = input([true, true, false]);
        inp.auto_exclusive = false;
        let outcome = arbitrate(&inp, &mut memory);
        assert!(outcome.pause.is_empty());
        assert_eq!(outcome.playing, [true, true, false]);
        // Status display still follows priority
        assert_eq!(outcome.active, Some(PlayerKind::Spotify));
    }

    #[test]
    fn test_fallback_to_last_active() {
        let mut memory = ArbitrationMemory {
            last_playing: [false; 3],
            last_active: Some(PlayerKind::AppleMusic),
        };
        let outcome = arbitrate(&input([false; 3]), &mut memory);
        assert_eq!(outcome.active, Some(PlayerKind::AppleMusic));
    }

    #[test]
    fn test_fallback_to_preferred_service() {
        let mut memory = ArbitrationMemory {
            last_playing: [false; 3],
            last_active: Some(PlayerKind::Spotify),
        };
        let mut inp = input([false; 3]);
        inp.preferred = PreferredFallback::Service(PlayerKind::Vlc);
        let outcome = arbitrate(&inp, &mut memory);
        assert_eq!(outcome.active, Some(PlayerKind::Vlc));
    }

    #[test]
    fn test_preferred_service_unconfigured_falls_through() {
        let mut memory = ArbitrationMemory {
            last_playing: [false; 3],
            last_active: Some(PlayerKind::Spotify),
        };
        let mut inp = input([false; 3]);
        inp.configured = [true, true, false];
        inp.preferred = PreferredFallback::Service(PlayerKind::Vlc);
        let outcome = arbitrate(&inp, &mut memory);
        assert_eq!(outcome.active, Some(PlayerKind::Spotify));
    }

    #[test]
    fn test_fallback_to_first_configured() {
        let mut memory = ArbitrationMemory::default();
        let mut inp = input([false; 3]);
        inp.configured = [false, true, true];
        let outcome = arbitrate(&inp, &mut memory);
        assert_eq!(outcome.active, Some(PlayerKind::AppleMusic));
    }

    #[test]
    fn test_nothing_configured_is_idle() {
        let mut memory = ArbitrationMemory::default();
        let mut inp = input([false; 3]);
        inp.configured = [false; 3];
        let outcome = arbitrate(&inp, &mut memory);
        assert_eq!(outcome.active, None);
        assert_eq!(memory.last_active, None);
    }

    #[test]
    fn test_unconfigured_player_never_plays() {
        let mut memory = ArbitrationMemory::default();
        let mut inp = input([true, false, true]);
        inp.configured = [false, true, true];
        let outcome = arbitrate(&inp, &mut memory);
        // Spotify's playing flag is ignored while unconfigured
        assert_eq!(outcome.playing, [false, false, true]);
        assert_eq!(outcome.active, Some(PlayerKind::Vlc));
    }

    #[test]
    fn test_steady_state_does_not_repause() {
        let mut memory = ArbitrationMemory::default();
        let first = arbitrate(&input([false, false, true]), &mut memory);
        assert!(first.pause.is_empty());
        // Same playing state next tick: no edge, no pause
        let second = arbitrate(&input([false, false, true]), &mut memory);
        assert!(second.pause.is_empty());
        assert_eq!(second.active, Some(PlayerKind::Vlc));
    }

    #[test]
    fn test_idempotent_for_identical_inputs() {
        let mut memory = ArbitrationMemory {
            last_playing: [true, false, false],
            last_active: Some(PlayerKind::Spotify),
        };
        let inp = input([true, false, false]);
        let first = arbitrate(&inp, &mut memory.clone());
        let second = arbitrate(&inp, &mut memory);
        assert_eq!(first, second);
    }

    #[test]
    fn test_last_active_retained_while_stopped() {
        let mut memory = ArbitrationMemory::default();
        arbitrate(&input([false, false, true]), &mut memory);
        assert_eq!(memory.last_active, Some(PlayerKind::Vlc));

        // VLC stops; it stays the fallback choice
        let outcome = arbitrate(&input([false; 3]), &mut memory);
        assert_eq!(outcome.active, Some(PlayerKind::Vlc));
        assert_eq!(memory.last_active, Some(PlayerKind::Vlc));
    }
}
