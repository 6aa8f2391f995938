// Character state machine
//
// Each state reads the input snapshot once per tick, moves the body, picks the
// frame to show and either stays (`None`) or names the state to switch to.
// A state that is switched to gets its enter hook in the same tick but no
// update until the next one.

use glam::Vec2;
use log::{debug, error, trace, warn};

use crate::core::{sanitize_frametime, Facing, InputSnapshot};

use super::animation::{ClipSet, RenderFrame};
use super::stats::{CharacterStats, MoveSet};

/// Rejected state changes
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum TransitionError {
    #[error("{state:?} is not part of the {move_set:?} move set")]
    NotInMoveSet {
        state: CharacterState,
        move_set: MoveSet,
    },
}

/// Physical state of a character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Bottom-left corner of the sprite, screen coordinates (y down)
    pub position: Vec2,
    /// Horizontal speed (x, right positive) and vertical speed (y, up positive)
    pub velocity: Vec2,
    pub facing: Facing,
}

impl Body {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            facing: Facing::Right,
        }
    }

    /// Bottom edge of the sprite
    pub fn bottom(&self) -> f32 {
        self.position.y
    }

    /// Apply the current velocity for one tick. Vertical speed is up-positive,
    /// so it is subtracted from the screen y.
    fn step(&mut self) {
        self.position += Vec2::new(self.velocity.x, -self.velocity.y);
    }
}

/// Everything a state may touch while running its hooks
pub struct StateContext<'a, F> {
    pub body: &'a mut Body,
    pub clips: &'a mut ClipSet<F>,
    pub sprite: &'a mut RenderFrame<F>,
    pub stats: &'a CharacterStats,
    pub move_set: MoveSet,
}

impl<F: Clone> StateContext<'_, F> {
    /// Show the current frame of a clip, mirrored if facing left
    fn present(&mut self, name: &str) {
        debug_assert!(self.clips.contains(name), "no '{}' clip", name);
        let Some(clip) = self.clips.get(name) else {
            error!("No '{}' clip, keeping the previous frame", name);
            self.sprite.flip_horizontal = self.body.facing.is_mirrored();
            return;
        };
        *self.sprite = RenderFrame {
            frame: clip.current_frame().clone(),
            flip_horizontal: self.body.facing.is_mirrored(),
        };
        trace!("Showing {} frame {}", name, clip.current_index());
    }

    /// Rewind a clip and show its first frame without advancing it
    fn restart(&mut self, name: &str) {
        if let Some(clip) = self.clips.get_mut(name) {
            clip.reset();
        }
        self.present(name);
    }

    /// Advance a clip by `dt` and show the resulting frame
    fn animate(&mut self, name: &str, dt: f32) {
        if let Some(clip) = self.clips.get_mut(name) {
            clip.advance(dt);
        }
        self.present(name);
    }

    fn repetitions(&self, name: &str) -> u32 {
        self.clips.get(name).map_or(0, |clip| clip.repetitions())
    }
}

/// Represents the current state of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharacterState {
    /// Idle on the ground
    #[default]
    Standing,
    /// Moving horizontally on the ground
    Walking,
    /// Airborne after a jump, steering and falling
    Jumping,
    /// Recovering from a hard landing; ignores input
    Landing,
}

impl CharacterState {
    /// Get the animation name for this state
    pub fn animation_name(&self) -> &'static str {
        match self {
            Self::Standing => "idle",
            Self::Walking => "walk",
            Self::Jumping => "jump",
            Self::Landing => "landing",
        }
    }

    /// Check if the character is on the ground
    pub fn is_grounded(&self) -> bool {
        !self.is_airborne()
    }

    /// Check if the character is in the air
    pub fn is_airborne(&self) -> bool {
        matches!(self, Self::Jumping)
    }

    /// Check if the state reads movement and jump input
    pub fn accepts_input(&self) -> bool {
        !matches!(self, Self::Landing)
    }

    /// Run when this state becomes current
    pub fn on_enter<F: Clone>(&self, ctx: &mut StateContext<'_, F>) {
        if let Self::Jumping = self {
            ctx.body.velocity.y = ctx.stats.jump_speed;
        }
        ctx.restart(self.animation_name());
    }

    /// Run when this state stops being current
    pub fn on_exit<F>(&self, ctx: &mut StateContext<'_, F>) {
        match self {
            Self::Walking => ctx.body.velocity.x = 0.0,
            Self::Jumping => ctx.body.velocity = Vec2::ZERO,
            Self::Standing | Self::Landing => {}
        }
    }

    /// Run one tick of this state's logic.
    ///
    /// Returns the state to switch to, or `None` to stay.
    pub fn update<F: Clone>(
        &self,
        ctx: &mut StateContext<'_, F>,
        input: InputSnapshot,
        dt: f32,
    ) -> Option<CharacterState> {
        match self {
            Self::Standing => Self::update_standing(ctx, input, dt),
            Self::Walking => Self::update_walking(ctx, input, dt),
            Self::Jumping => Self::update_jumping(ctx, input, dt),
            Self::Landing => Self::update_landing(ctx, dt),
        }
    }

    fn update_standing<F: Clone>(
        ctx: &mut StateContext<'_, F>,
        input: InputSnapshot,
        dt: f32,
    ) -> Option<CharacterState> {
        if input.is_moving() {
            return Some(Self::Walking);
        }
        if input.jump && ctx.move_set.can_jump() {
            return Some(Self::Jumping);
        }

        ctx.animate(Self::Standing.animation_name(), dt);
        None
    }

    fn update_walking<F: Clone>(
        ctx: &mut StateContext<'_, F>,
        input: InputSnapshot,
        dt: f32,
    ) -> Option<CharacterState> {
        if input.jump && ctx.move_set.can_jump() {
            return Some(Self::Jumping);
        }

        let Some(facing) = input.horizontal() else {
            return Some(Self::Standing);
        };

        ctx.body.facing = facing;
        ctx.body.velocity.x = facing.sign() * ctx.stats.walk_speed;
        ctx.body.step();
        ctx.animate(Self::Walking.animation_name(), dt);
        None
    }

    fn update_jumping<F: Clone>(
        ctx: &mut StateContext<'_, F>,
        input: InputSnapshot,
        dt: f32,
    ) -> Option<CharacterState> {
        ctx.body.velocity.x = 0.0;
        if let Some(facing) = input.horizontal() {
            ctx.body.facing = facing;
            ctx.body.velocity.x = facing.sign() * ctx.stats.walk_speed;
        }

        ctx.body.velocity.y -= ctx.stats.gravity;
        ctx.body.step();

        if ctx.body.bottom() >= ctx.stats.ground_y {
            ctx.body.position.y = ctx.stats.ground_y;
            let impact = ctx.body.velocity.y.abs();
            return if impact >= ctx.stats.landing_threshold {
                debug!("Hard landing at speed {:.2}", impact);
                Some(Self::Landing)
            } else {
                Some(Self::Walking)
            };
        }

        ctx.animate(Self::Jumping.animation_name(), dt);
        None
    }

    fn update_landing<F: Clone>(ctx: &mut StateContext<'_, F>, dt: f32) -> Option<CharacterState> {
        let name = Self::Landing.animation_name();
        if let Some(clip) = ctx.clips.get_mut(name) {
            clip.advance(dt);
        }
        if ctx.repetitions(name) > 0 {
            return Some(Self::Standing);
        }

        ctx.present(name);
        None
    }
}

/// State machine that owns the current state and performs transitions
#[derive(Debug)]
pub struct CharacterStateMachine {
    current_state: CharacterState,
    previous_state: CharacterState,
    state_time: f32,
    transition_count: u64,
    just_entered: bool,
}

impl Default for CharacterStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacterStateMachine {
    pub fn new() -> Self {
        Self {
            current_state: CharacterState::Standing,
            previous_state: CharacterState::Standing,
            state_time: 0.0,
            transition_count: 0,
            just_entered: false,
        }
    }

    /// Get the current state
    pub fn state(&self) -> CharacterState {
        self.current_state
    }

    /// Get the previous state
    pub fn previous_state(&self) -> CharacterState {
        self.previous_state
    }

    /// Get time spent in current state
    pub fn state_time(&self) -> f32 {
        self.state_time
    }

    /// Number of transitions since construction
    pub fn transition_count(&self) -> u64 {
        self.transition_count
    }

    /// True from entering a state until its first update
    pub fn state_just_changed(&self) -> bool {
        self.just_entered
    }

    /// Run the enter hook of the initial state
    pub fn start<F: Clone>(&mut self, ctx: &mut StateContext<'_, F>) {
        self.current_state.on_enter(ctx);
        self.just_entered = true;
    }

    /// Run the current state's logic for one tick without switching states
    pub fn update<F: Clone>(
        &mut self,
        ctx: &mut StateContext<'_, F>,
        input: InputSnapshot,
        dt: f32,
    ) -> Option<CharacterState> {
        let dt = sanitize_frametime(dt);
        self.just_entered = false;
        self.state_time += dt;
        self.current_state.update(ctx, input, dt)
    }

    /// Exit the current state, swap in `next` and enter it.
    ///
    /// States outside the character's move set are refused and leave the
    /// machine untouched.
    pub fn transition<F: Clone>(
        &mut self,
        ctx: &mut StateContext<'_, F>,
        next: CharacterState,
    ) -> Result<(), TransitionError> {
        if !ctx.move_set.allows(next) {
            return Err(TransitionError::NotInMoveSet {
                state: next,
                move_set: ctx.move_set,
            });
        }

        debug!("{:?} -> {:?}", self.current_state, next);
        self.current_state.on_exit(ctx);
        self.previous_state = self.current_state;
        self.current_state = next;
        self.state_time = 0.0;
        self.transition_count += 1;
        self.just_entered = true;
        self.current_state.on_enter(ctx);
        Ok(())
    }

    /// Update, then apply any requested transition. Returns the entered state.
    pub fn tick<F: Clone>(
        &mut self,
        ctx: &mut StateContext<'_, F>,
        input: InputSnapshot,
        dt: f32,
    ) -> Option<CharacterState> {
        let next = self.update(ctx, input, dt)?;
        if let Err(err) = self.transition(ctx, next) {
            warn!("Ignoring transition: {}", err);
            return None;
        }
        Some(next)
    }
}
