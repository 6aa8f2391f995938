//! Cat fighter: a 2D side-view fighting game character controller.
//!
//! - [`core`]: input snapshots, facing, frametime validation, lookup helpers
//! - [`engine`]: sprite sheets, keyboard input, frame clock
//! - [`game`]: animation clips, the character state machine, the cat fighter
//!
//! The binary in `main.rs` is a thin winit host around this library.

pub mod core;
pub mod engine;
pub mod game;
