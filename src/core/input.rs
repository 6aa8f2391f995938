// Per-tick input snapshot and facing direction

/// Direction a character faces. Frames are drawn mirrored when facing left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1.0 for left, 1.0 for right
    pub fn sign(&self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    pub fn is_mirrored(&self) -> bool {
        matches!(self, Self::Left)
    }
}

/// Held state of the controls, sampled once at the top of a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct InputSnapshot {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
}

impl InputSnapshot {
    /// Nothing held
    pub const NONE: Self = Self {
        move_left: false,
        move_right: false,
        jump: false,
    };

    pub fn new(move_left: bool, move_right: bool, jump: bool) -> Self {
        Self {
            move_left,
            move_right,
            jump,
        }
    }

    pub fn left() -> Self {
        Self::new(true, false, false)
    }

    pub fn right() -> Self {
        Self::new(false, true, false)
    }

    pub fn jump() -> Self {
        Self::new(false, false, true)
    }

    /// Is either horizontal key held
    pub fn is_moving(&self) -> bool {
        self.move_left || self.move_right
    }

    /// Resolved horizontal intent.
    ///
    /// Left is checked first and right second, and the later check
    /// overwrites: with both keys held the result is `Right`.
    pub fn horizontal(&self) -> Option<Facing> {
        let mut intent = None;
        if self.move_left {
            intent = Some(Facing::Left);
        }
        if self.move_right {
            intent = Some(Facing::Right);
        }
        intent
    }
}
