// Character entity and management

use glam::Vec2;
use log::info;

use crate::core::{Facing, InputSnapshot};

use super::animation::{AnimationError, ClipSet, RenderFrame};
use super::state::{Body, CharacterState, CharacterStateMachine, StateContext, TransitionError};
use super::stats::{CharacterStats, MoveSet};

/// Unique identifier for a character
pub type CharacterId = u32;

/// A player-controlled character: body, clips and the state driving both
#[derive(Debug)]
pub struct Character<F> {
    /// Unique identifier
    pub id: CharacterId,
    /// Character name (for display)
    pub name: String,
    /// Player index controlling this character
    pub player_index: Option<usize>,

    /// Character properties
    pub stats: CharacterStats,
    /// States this build can reach
    pub move_set: MoveSet,

    body: Body,
    clips: ClipSet<F>,
    sprite: RenderFrame<F>,
    state_machine: CharacterStateMachine,
}

impl<F: Clone> Character<F> {
    /// Create a character standing at its spawn point.
    ///
    /// Fails if `clips` lacks any clip the move set needs.
    pub fn new(
        id: CharacterId,
        name: &str,
        player_index: Option<usize>,
        stats: CharacterStats,
        move_set: MoveSet,
        clips: ClipSet<F>,
    ) -> Result<Self, AnimationError> {
        clips.require(move_set.required_clips())?;

        let initial = CharacterState::default();
        let first_frame = clips
            .get(initial.animation_name())
            .map(|clip| clip.frames()[0].clone())
            .ok_or_else(|| AnimationError::MissingClip(initial.animation_name().to_string()))?;

        let mut character = Self {
            id,
            name: name.to_string(),
            player_index,
            body: Body::new(stats.spawn),
            stats,
            move_set,
            clips,
            sprite: RenderFrame {
                frame: first_frame,
                flip_horizontal: false,
            },
            state_machine: CharacterStateMachine::new(),
        };

        let (state_machine, mut ctx) = character.split();
        state_machine.start(&mut ctx);

        Ok(character)
    }

    /// Run one tick: update the current state and apply any transition it
    /// asks for. Returns the newly entered state, if any.
    pub fn tick(&mut self, input: InputSnapshot, dt: f32) -> Option<CharacterState> {
        let (state_machine, mut ctx) = self.split();
        state_machine.tick(&mut ctx, input, dt)
    }

    /// Run the current state's logic only, returning the requested next
    /// state without switching to it
    pub fn update(&mut self, input: InputSnapshot, dt: f32) -> Option<CharacterState> {
        let (state_machine, mut ctx) = self.split();
        state_machine.update(&mut ctx, input, dt)
    }

    /// Exit the current state and enter `next`.
    ///
    /// Fails without touching the character if `next` is outside its move set.
    pub fn transition(&mut self, next: CharacterState) -> Result<(), TransitionError> {
        let (state_machine, mut ctx) = self.split();
        state_machine.transition(&mut ctx, next)
    }

    fn split(&mut self) -> (&mut CharacterStateMachine, StateContext<'_, F>) {
        (
            &mut self.state_machine,
            StateContext {
                body: &mut self.body,
                clips: &mut self.clips,
                sprite: &mut self.sprite,
                stats: &self.stats,
                move_set: self.move_set,
            },
        )
    }
}

impl<F> Character<F> {
    /// Get the current state
    pub fn state(&self) -> CharacterState {
        self.state_machine.state()
    }

    pub fn state_machine(&self) -> &CharacterStateMachine {
        &self.state_machine
    }

    /// Frame to draw this tick and whether to mirror it
    pub fn render_frame(&self) -> &RenderFrame<F> {
        &self.sprite
    }

    /// Bottom-left corner of the sprite
    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    /// Horizontal speed and upward vertical speed
    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    pub fn facing(&self) -> Facing {
        self.body.facing
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Place the character (for spawning or test setup)
    pub fn set_position(&mut self, position: Vec2) {
        self.body.position = position;
    }

    pub fn set_facing(&mut self, facing: Facing) {
        self.body.facing = facing;
    }

    pub fn clips(&self) -> &ClipSet<F> {
        &self.clips
    }
}

/// Manages all characters in the game
#[derive(Debug)]
pub struct CharacterManager<F> {
    characters: Vec<Character<F>>,
    next_id: CharacterId,
}

impl<F> Default for CharacterManager<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> CharacterManager<F> {
    pub fn new() -> Self {
        Self {
            characters: Vec::new(),
            next_id: 0,
        }
    }

    /// Get a character by ID
    pub fn get(&self, id: CharacterId) -> Option<&Character<F>> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// Get a mutable character by ID
    pub fn get_mut(&mut self, id: CharacterId) -> Option<&mut Character<F>> {
        self.characters.iter_mut().find(|c| c.id == id)
    }

    /// Get a character by player index
    pub fn get_by_player(&self, player_index: usize) -> Option<&Character<F>> {
        self.characters
            .iter()
            .find(|c| c.player_index == Some(player_index))
    }

    /// Get all characters
    pub fn all(&self) -> &[Character<F>] {
        &self.characters
    }

    /// Remove a character by ID
    pub fn remove(&mut self, id: CharacterId) -> Option<Character<F>> {
        let pos = self.characters.iter().position(|c| c.id == id)?;
        Some(self.characters.remove(pos))
    }

    /// Get the number of characters
    pub fn count(&self) -> usize {
        self.characters.len()
    }

    /// Check if a player index is already taken
    pub fn is_player_taken(&self, player_index: usize) -> bool {
        self.characters
            .iter()
            .any(|c| c.player_index == Some(player_index))
    }
}

impl<F: Clone> CharacterManager<F> {
    /// Spawn a new character
    pub fn spawn_character(
        &mut self,
        name: &str,
        player_index: Option<usize>,
        stats: CharacterStats,
        move_set: MoveSet,
        clips: ClipSet<F>,
    ) -> Result<CharacterId, AnimationError> {
        let id = self.next_id;
        let character = Character::new(id, name, player_index, stats, move_set, clips)?;
        self.next_id += 1;
        self.characters.push(character);

        info!("Spawned {} (id {}, {:?})", name, id, move_set);
        Ok(id)
    }

    /// Tick every character once. `input_for` supplies each player's
    /// snapshot; characters without a player get no input.
    pub fn update<I>(&mut self, dt: f32, mut input_for: I)
    where
        I: FnMut(usize) -> InputSnapshot,
    {
        for character in &mut self.characters {
            let input = character
                .player_index
                .map(&mut input_for)
                .unwrap_or_default();
            character.tick(input, dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::animation::AnimationClip;
    use approx::assert_relative_eq;

    fn clips() -> ClipSet<u32> {
        ClipSet::new()
            .with_clip("idle", AnimationClip::uniform(vec![0, 1, 2, 3], 0.25).unwrap())
            .with_clip("walk", AnimationClip::uniform(vec![10, 11, 12, 13], 0.25).unwrap())
            .with_clip(
                "jump",
                AnimationClip::new(vec![20, 21, 22, 23], vec![0.05, 0.05, 0.5, 100.0]).unwrap(),
            )
            .with_clip(
                "landing",
                AnimationClip::new(vec![30, 31, 32, 33], vec![0.0, 0.0, 0.5, 0.25]).unwrap(),
            )
    }

    fn cat(move_set: MoveSet) -> Character<u32> {
        Character::new(0, "cat", Some(0), CharacterStats::standard(), move_set, clips()).unwrap()
    }

    #[test]
    fn test_new_character_standing_on_first_idle_frame() {
        let cat = cat(MoveSet::Full);
        assert_eq!(cat.state(), CharacterState::Standing);
        assert_eq!(cat.render_frame().frame, 0);
        assert!(!cat.render_frame().flip_horizontal);
        assert_eq!(cat.position(), CharacterStats::standard().spawn);
    }

    #[test]
    fn test_missing_clip_rejected() {
        let clips = ClipSet::new()
            .with_clip("idle", AnimationClip::uniform(vec![0], 0.1).unwrap())
            .with_clip("walk", AnimationClip::uniform(vec![1], 0.1).unwrap());
        let err = Character::new(0, "cat", None, CharacterStats::standard(), MoveSet::Full, clips)
            .unwrap_err();
        assert_eq!(err, AnimationError::MissingClip("jump".to_string()));
    }

    #[test]
    fn test_basic_build_needs_only_idle_and_walk() {
        let clips = ClipSet::new()
            .with_clip("idle", AnimationClip::uniform(vec![0], 0.1).unwrap())
            .with_clip("walk", AnimationClip::uniform(vec![1], 0.1).unwrap());
        assert!(Character::new(0, "cat", None, CharacterStats::standard(), MoveSet::Basic, clips)
            .is_ok());
    }

    #[test]
    fn test_standing_to_walking_scenario() {
        let mut cat = cat(MoveSet::Full);
        let start = cat.position();

        let next = cat.update(InputSnapshot::right(), 0.1);
        assert_eq!(next, Some(CharacterState::Walking));
        cat.transition(CharacterState::Walking).unwrap();
        assert_eq!(cat.state(), CharacterState::Walking);
        assert_eq!(cat.render_frame().frame, 10);

        let next = cat.update(InputSnapshot::right(), 0.1);
        assert_eq!(next, None);
        assert_eq!(cat.state(), CharacterState::Walking);
        assert_relative_eq!(cat.position().x, start.x + cat.stats.walk_speed);
        assert_relative_eq!(cat.position().y, start.y);
    }

    #[test]
    fn test_walking_to_standing_scenario() {
        let mut cat = cat(MoveSet::Full);
        cat.tick(InputSnapshot::left(), 0.1);
        assert_eq!(cat.state(), CharacterState::Walking);

        let entered = cat.tick(InputSnapshot::NONE, 0.1);
        assert_eq!(entered, Some(CharacterState::Standing));
        assert_eq!(cat.velocity().x, 0.0);
    }

    #[test]
    fn test_entered_state_is_not_updated_same_tick() {
        let mut cat = cat(MoveSet::Full);
        let start = cat.position();
        cat.tick(InputSnapshot::right(), 0.1);
        // Walking was entered but has not moved the cat yet
        assert_eq!(cat.position(), start);
        cat.tick(InputSnapshot::right(), 0.1);
        assert_relative_eq!(cat.position().x, start.x + 5.0);
    }

    #[test]
    fn test_jump_arc_soft_landing() {
        let mut cat = cat(MoveSet::Full);
        let stats = cat.stats;
        let ground = stats.ground_y;

        assert_eq!(cat.tick(InputSnapshot::jump(), 1.0 / 60.0), Some(CharacterState::Jumping));
        assert_eq!(cat.velocity().y, stats.jump_speed);
        assert_eq!(cat.render_frame().frame, 20);

        let mut expected_vy = stats.jump_speed;
        let mut peak = ground;
        let mut ticks = 0;
        let landed_in = loop {
            ticks += 1;
            assert!(ticks < 200, "cat never landed");
            match cat.update(InputSnapshot::NONE, 1.0 / 60.0) {
                Some(next) => break next,
                None => {
                    expected_vy -= stats.gravity;
                    assert_relative_eq!(cat.velocity().y, expected_vy, epsilon = 1e-3);
                    assert!(cat.position().y < ground);
                    peak = peak.min(cat.position().y);
                }
            }
        };

        // Rose before coming back down to the ground
        assert!(peak < ground - 200.0);
        assert_eq!(cat.position().y, ground);
        // Take-off speed of 20 lands at about 20, under the threshold of 30
        assert!(cat.velocity().y.abs() < stats.landing_threshold);
        assert_eq!(landed_in, CharacterState::Walking);

        cat.transition(landed_in).unwrap();
        assert_eq!(cat.tick(InputSnapshot::NONE, 0.1), Some(CharacterState::Standing));
    }

    #[test]
    fn test_jump_arc_hard_landing() {
        let mut cat = cat(MoveSet::Full);
        let stats = cat.stats;
        cat.tick(InputSnapshot::jump(), 0.1);

        // Drop from high above the ground to build up speed
        cat.set_position(Vec2::new(600.0, -2000.0));
        let landed_in = loop {
            if let Some(next) = cat.update(InputSnapshot::NONE, 0.1) {
                break next;
            }
        };

        assert!(cat.velocity().y.abs() >= stats.landing_threshold);
        assert_eq!(landed_in, CharacterState::Landing);
        assert_eq!(cat.position().y, stats.ground_y);
    }

    #[test]
    fn test_jump_steering() {
        let mut cat = cat(MoveSet::Full);
        cat.tick(InputSnapshot::jump(), 0.1);
        let start = cat.position();

        cat.tick(InputSnapshot::new(true, false, false), 0.1);
        assert_eq!(cat.facing(), Facing::Left);
        assert_relative_eq!(cat.position().x, start.x - 5.0);
        assert!(cat.render_frame().flip_horizontal);

        cat.tick(InputSnapshot::NONE, 0.1);
        assert_relative_eq!(cat.position().x, start.x - 5.0);
        assert_eq!(cat.facing(), Facing::Left);
    }

    #[test]
    fn test_landing_recovers_on_first_repetition() {
        let mut cat = cat(MoveSet::Full);
        cat.transition(CharacterState::Landing).unwrap();
        // At offset zero the first frame is picked even though it has no length
        assert_eq!(cat.render_frame().frame, 30);

        assert_eq!(cat.tick(InputSnapshot::right(), 0.25), None);
        assert_eq!(cat.render_frame().frame, 32);
        assert_eq!(cat.tick(InputSnapshot::jump(), 0.25), None);
        assert_eq!(cat.tick(InputSnapshot::NONE, 0.125), None);
        assert_eq!(cat.render_frame().frame, 33);
        assert_eq!(cat.state(), CharacterState::Landing);

        let entered = cat.tick(InputSnapshot::NONE, 0.125);
        assert_eq!(entered, Some(CharacterState::Standing));
        assert_eq!(cat.render_frame().frame, 0);
    }

    #[test]
    fn test_mirroring_keeps_frame() {
        let mut left = cat(MoveSet::Full);
        let mut right = cat(MoveSet::Full);
        left.set_facing(Facing::Left);
        right.set_facing(Facing::Right);

        left.tick(InputSnapshot::NONE, 0.3);
        right.tick(InputSnapshot::NONE, 0.3);

        assert_eq!(left.render_frame().frame, right.render_frame().frame);
        assert!(left.render_frame().flip_horizontal);
        assert!(!right.render_frame().flip_horizontal);
    }

    #[test]
    fn test_basic_build_cannot_be_forced_airborne() {
        let mut cat = cat(MoveSet::Basic);
        cat.set_facing(Facing::Left);

        let err = cat.transition(CharacterState::Jumping).unwrap_err();
        assert_eq!(
            err,
            TransitionError::NotInMoveSet {
                state: CharacterState::Jumping,
                move_set: MoveSet::Basic,
            }
        );
        assert!(cat.transition(CharacterState::Landing).is_err());
        assert_eq!(cat.state(), CharacterState::Standing);
        assert_eq!(cat.velocity(), Vec2::ZERO);

        // Still grounded and drawn mirrored on the next tick
        cat.tick(InputSnapshot::NONE, 0.1);
        assert_eq!(cat.state(), CharacterState::Standing);
        assert_eq!(cat.position(), CharacterStats::standard().spawn);
        assert!(cat.render_frame().flip_horizontal);
    }

    #[test]
    fn test_basic_build_ignores_jump() {
        let mut cat = cat(MoveSet::Basic);
        assert_eq!(cat.tick(InputSnapshot::jump(), 0.1), None);
        assert_eq!(cat.state(), CharacterState::Standing);
    }

    #[test]
    fn test_character_manager_new() {
        let manager = CharacterManager::<u32>::new();
        assert_eq!(manager.count(), 0);
    }

    #[test]
    fn test_manager_ticks_each_player() {
        let mut manager = CharacterManager::new();
        let p0 = manager
            .spawn_character("cat", Some(0), CharacterStats::standard(), MoveSet::Full, clips())
            .unwrap();
        let p1 = manager
            .spawn_character("cat", Some(1), CharacterStats::standard(), MoveSet::Full, clips())
            .unwrap();
        assert_ne!(p0, p1);
        assert!(manager.is_player_taken(1));
        assert!(!manager.is_player_taken(2));

        manager.update(0.1, |player| {
            if player == 0 {
                InputSnapshot::right()
            } else {
                InputSnapshot::NONE
            }
        });

        assert_eq!(manager.get(p0).unwrap().state(), CharacterState::Walking);
        assert_eq!(manager.get(p1).unwrap().state(), CharacterState::Standing);
        assert_eq!(
            manager.get_by_player(1).map(|c| c.id),
            Some(p1)
        );

        assert!(manager.remove(p0).is_some());
        assert_eq!(manager.count(), 1);
    }
}
