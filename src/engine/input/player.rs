// Per-player held-key tracking

use super::action::{Action, InputSource};
use crate::core::InputSnapshot;
use std::collections::{HashMap, HashSet};

/// Represents the input state for a single player
#[derive(Debug)]
pub struct PlayerInput {
    /// Player ID
    player_id: usize,

    /// Sources currently held down for each action. An action stays pressed
    /// while any of its keys is held.
    held: HashMap<Action, HashSet<InputSource>>,
}

impl PlayerInput {
    /// Create a new player input state
    pub fn new(player_id: usize) -> Self {
        Self {
            player_id,
            held: HashMap::new(),
        }
    }

    /// Get the player ID
    pub fn player_id(&self) -> usize {
        self.player_id
    }

    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.held.get(&action).is_some_and(|sources| !sources.is_empty())
    }

    /// Register a key going down
    pub(crate) fn press(&mut self, source: InputSource, action: Action) {
        self.held.entry(action).or_default().insert(source);
    }

    /// Register a key going up
    pub(crate) fn release(&mut self, source: InputSource, action: Action) {
        if let Some(sources) = self.held.get_mut(&action) {
            sources.remove(&source);
            if sources.is_empty() {
                self.held.remove(&action);
            }
        }
    }

    /// Reset all input state
    pub fn reset(&mut self) {
        self.held.clear();
    }

    /// Held state of the character controls
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            move_left: self.is_pressed(Action::MoveLeft),
            move_right: self.is_pressed(Action::MoveRight),
            jump: self.is_pressed(Action::Jump),
        }
    }
}
