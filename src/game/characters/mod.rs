// Character system
//
// This module contains everything related to playable characters:
// - Character data structure and management
// - Character stats and move sets
// - State machine for character behavior
// - Time-driven sprite animation clips
// - The cat fighter's clip set

pub mod animation;
pub mod cat;
pub mod character;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use animation::{AnimationClip, AnimationError, ClipSet, RenderFrame};
pub use cat::{cat_clips, ClipSetError};
pub use character::{Character, CharacterId, CharacterManager};
pub use state::{Body, CharacterState, CharacterStateMachine, TransitionError};
pub use stats::{CharacterStats, MoveSet};
