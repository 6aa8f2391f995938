// Character stats and move sets
//
// Positions follow screen convention: x grows to the right, y grows downward.
// Speeds are applied once per tick, not scaled by frametime.

use glam::Vec2;

use super::state::CharacterState;

/// Fixed characteristics of a character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterStats {
    // Movement
    /// Horizontal speed while walking or steering in the air (units/tick)
    pub walk_speed: f32,
    /// Upward speed given on take-off (units/tick)
    pub jump_speed: f32,

    // Physics
    /// Vertical speed lost every airborne tick
    pub gravity: f32,
    /// Minimum touchdown speed that forces a landing recovery
    pub landing_threshold: f32,
    /// Screen y of the floor; the character's bottom edge never goes below it
    pub ground_y: f32,

    // Placement
    /// Bottom-left corner of the sprite when spawned
    pub spawn: Vec2,
    /// Width and height of one sprite tile in pixels
    pub tile_size: u32,
}

/// The stats of the cat fighter
pub const BASE_STATS: CharacterStats = CharacterStats {
    walk_speed: 5.0,
    jump_speed: 20.0,
    gravity: 0.8,
    // 1.5x the take-off speed, so only long falls need a recovery
    landing_threshold: 30.0,
    ground_y: 600.0,

    spawn: Vec2::new(600.0, 600.0),
    tile_size: 64,
};

impl Default for CharacterStats {
    fn default() -> Self {
        BASE_STATS
    }
}

impl CharacterStats {
    /// Get the standard cat stats
    pub fn standard() -> Self {
        BASE_STATS
    }

    /// Same stats with a different take-off speed; the landing threshold
    /// keeps its 1.5x ratio
    pub fn with_jump_speed(mut self, jump_speed: f32) -> Self {
        self.jump_speed = jump_speed;
        self.landing_threshold = jump_speed * 1.5;
        self
    }
}

/// Which states a character build supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MoveSet {
    /// Standing and walking only; jump input is ignored
    Basic,
    /// Standing, walking, jumping and landing
    #[default]
    Full,
}

impl MoveSet {
    /// Parse a move set name ("basic" or "full", any case)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "basic" => Some(Self::Basic),
            "full" => Some(Self::Full),
            _ => None,
        }
    }

    pub fn can_jump(&self) -> bool {
        matches!(self, Self::Full)
    }

    /// Can a character with this move set ever be in `state`
    pub fn allows(&self, state: CharacterState) -> bool {
        match self {
            Self::Basic => matches!(state, CharacterState::Standing | CharacterState::Walking),
            Self::Full => true,
        }
    }

    /// Names of the clips a character with this move set must carry
    pub fn required_clips(&self) -> &'static [&'static str] {
        match self {
            Self::Basic => &["idle", "walk"],
            Self::Full => &["idle", "walk", "jump", "landing"],
        }
    }
}
