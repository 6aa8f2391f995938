// Keyboard input for the host loop
//
// winit key events go in, one `InputSnapshot` per player comes out each tick:
//
// - `action`: actions and their default keys
// - `config`: per-player key bindings
// - `player`: which keys a player is holding
// - `manager`: routes key events to players and reports pause/quit
//
// ```ignore
// let mut input = InputManager::new(1);
// if let Some(Action::Pause) = input.process_keyboard_event(&key_event) {
//     game_loop.toggle_pause();
// }
// character.tick(input.snapshot(0), frametime);
// ```

pub mod action;
pub mod config;
pub mod manager;
pub mod player;

pub use action::{Action, InputSource};
pub use config::InputConfig;
pub use manager::InputManager;
pub use player::PlayerInput;
