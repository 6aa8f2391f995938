// Key bindings and remapping

use super::action::{default_p1_bindings, Action, InputSource};
use std::collections::HashMap;

/// Key bindings of one player. Each key drives at most one action; an
/// action may have several keys.
#[derive(Debug, Clone, Default)]
pub struct InputConfig {
    bindings: HashMap<InputSource, Action>,
}

impl InputConfig {
    /// An empty binding table
    pub fn new() -> Self {
        Self::default()
    }

    /// Default bindings for a player slot. Only the first player has keys
    /// bound out of the box.
    pub fn for_player(player_id: usize) -> Self {
        match player_id {
            0 => Self::from_bindings(default_p1_bindings()),
            _ => Self::new(),
        }
    }

    /// Build a table from `(key, action)` pairs; later pairs win
    pub fn from_bindings(bindings: Vec<(InputSource, Action)>) -> Self {
        Self {
            bindings: bindings.into_iter().collect(),
        }
    }

    /// Bind a key, replacing whatever it was bound to before
    pub fn bind(&mut self, source: InputSource, action: Action) -> Option<Action> {
        self.bindings.insert(source, action)
    }

    /// Remove a key's binding
    pub fn unbind(&mut self, source: InputSource) -> Option<Action> {
        self.bindings.remove(&source)
    }

    /// Remove every key bound to `action`
    pub fn unbind_action(&mut self, action: Action) {
        self.bindings.retain(|_, bound| *bound != action);
    }

    /// The action a key drives
    pub fn action_for(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }

    /// All keys bound to `action`, in no particular order
    pub fn sources_for(&self, action: Action) -> Vec<InputSource> {
        self.bindings
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(source, _)| *source)
            .collect()
    }

    /// Is at least one key bound to `action`
    pub fn is_bound(&self, action: Action) -> bool {
        self.bindings.values().any(|bound| *bound == action)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
