// Game action definitions and mappings

use winit::keyboard::KeyCode;

/// Everything a key can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    /// Toggle pause (global)
    Pause,
    /// Close the game (global)
    Quit,
}

impl Action {
    /// Is this a per-player character control (as opposed to a meta action)
    pub fn is_movement(&self) -> bool {
        matches!(self, Self::MoveLeft | Self::MoveRight | Self::Jump)
    }
}

/// A physical control an action can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }
}

/// Default keyboard bindings for Player 1: WASD layout plus the arrow keys
pub fn default_p1_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::key(KeyCode::KeyA), Action::MoveLeft),
        (InputSource::key(KeyCode::KeyD), Action::MoveRight),
        (InputSource::key(KeyCode::KeyW), Action::Jump),
        (InputSource::key(KeyCode::ArrowLeft), Action::MoveLeft),
        (InputSource::key(KeyCode::ArrowRight), Action::MoveRight),
        (InputSource::key(KeyCode::ArrowUp), Action::Jump),
    ]
}

/// Keys that work regardless of player
pub fn global_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::key(KeyCode::KeyP), Action::Pause),
        (InputSource::key(KeyCode::Escape), Action::Quit),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_movement_actions() {
        assert!(Action::MoveLeft.is_movement());
        assert!(Action::Jump.is_movement());
        assert!(!Action::Pause.is_movement());
        assert!(!Action::Quit.is_movement());
    }

    #[test]
    fn test_p1_has_wasd_and_arrows() {
        let bindings = default_p1_bindings();
        for action in [Action::MoveLeft, Action::MoveRight, Action::Jump] {
            let keys = bindings.iter().filter(|(_, a)| *a == action).count();
            assert_eq!(keys, 2, "{:?} should have two keys", action);
        }
    }

    #[test]
    fn test_global_bindings_are_meta_only() {
        let bindings = global_bindings();
        assert_eq!(bindings.len(), 2);
        assert!(bindings.iter().all(|(_, action)| !action.is_movement()));
    }

    #[test]
    fn test_no_key_bound_twice() {
        let all: Vec<InputSource> = default_p1_bindings()
            .into_iter()
            .chain(global_bindings())
            .map(|(source, _)| source)
            .collect();
        let unique: HashSet<_> = all.iter().collect();
        assert_eq!(unique.len(), all.len());
    }
}
