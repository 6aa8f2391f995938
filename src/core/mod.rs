// Core types shared by the engine and game layers

pub mod input;
pub mod math;
pub mod time;

pub use input::{Facing, InputSnapshot};
pub use time::{sanitize_frametime, validate_frametime, InputError};
