// Input manager - routes keyboard events to players

use super::action::{global_bindings, Action, InputSource};
use super::config::InputConfig;
use super::player::PlayerInput;
use crate::core::InputSnapshot;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::PhysicalKey;

/// Main input manager that coordinates all input for all players
pub struct InputManager {
    /// Bindings for each player
    configs: Vec<InputConfig>,

    /// Bindings shared by everyone (pause, quit)
    global_config: InputConfig,

    /// Input state for each player
    players: Vec<PlayerInput>,
}

impl InputManager {
    /// Create a new input manager with default bindings
    pub fn new(max_players: usize) -> Self {
        let configs = (0..max_players).map(InputConfig::for_player).collect();
        let players = (0..max_players).map(PlayerInput::new).collect();

        Self {
            configs,
            global_config: InputConfig::from_bindings(global_bindings()),
            players,
        }
    }

    /// Process a keyboard event from winit.
    ///
    /// Returns a global action (pause, quit) when one was just pressed.
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) -> Option<Action> {
        let PhysicalKey::Code(key_code) = event.physical_key else {
            return None;
        };
        self.process_key(InputSource::key(key_code), event.state, event.repeat)
    }

    /// Apply one key transition to every player bound to it
    pub fn process_key(
        &mut self,
        source: InputSource,
        state: ElementState,
        repeat: bool,
    ) -> Option<Action> {
        for (config, player) in self.configs.iter().zip(self.players.iter_mut()) {
            if let Some(action) = config.action_for(source) {
                match state {
                    ElementState::Pressed => player.press(source, action),
                    ElementState::Released => player.release(source, action),
                }
            }
        }

        match (self.global_config.action_for(source), state) {
            (Some(action), ElementState::Pressed) if !repeat => Some(action),
            _ => None,
        }
    }

    /// Snapshot of a player's held controls; no input for unknown players
    pub fn snapshot(&self, player_id: usize) -> InputSnapshot {
        self.players
            .get(player_id)
            .map(PlayerInput::snapshot)
            .unwrap_or_default()
    }

    /// Get input state for a specific player
    pub fn player(&self, player_id: usize) -> Option<&PlayerInput> {
        self.players.get(player_id)
    }

    /// Get a player's bindings for remapping
    pub fn config_mut(&mut self, player_id: usize) -> Option<&mut InputConfig> {
        self.configs.get_mut(player_id)
    }

    /// Reset all player input states (e.g. when the window loses focus)
    pub fn reset_all(&mut self) {
        for player in &mut self.players {
            player.reset();
        }
    }

    /// Get the number of players
    pub fn num_players(&self) -> usize {
        self.players.len()
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(1)
    }
}
