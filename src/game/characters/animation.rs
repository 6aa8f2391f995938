// Character animation system
//
// A clip maps elapsed time onto one of its frames. Held ("sticky") frames are
// just frames with a very long duration, so looping and effectively one-shot
// animations share the same code path.

use std::collections::HashMap;

use log::trace;

use crate::core::math::{lower_bound, prefix_sums};
use crate::core::validate_frametime;

/// Errors raised while building clips or the clip set of a character
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnimationError {
    #[error("Animation clip has no frames")]
    Empty,

    #[error("Animation clip has {frames} frames but {durations} durations")]
    LengthMismatch { frames: usize, durations: usize },

    #[error("Frame {index} has an invalid duration: {duration}")]
    NegativeDuration { index: usize, duration: f32 },

    #[error("Animation clip has a total duration of zero")]
    ZeroLength,

    #[error("Missing animation clip: {0}")]
    MissingClip(String),
}

/// A sequence of frames with per-frame display durations and its own timer
#[derive(Debug, Clone)]
pub struct AnimationClip<F> {
    frames: Vec<F>,
    /// Prefix sums of `durations`; the last entry is the loop length
    cumulative_offsets: Vec<f32>,
    /// Time offset within the loop, always in `[0, total_duration)`
    elapsed: f32,
    /// Completed loops since the last reset
    loop_count: u32,
}

impl<F> AnimationClip<F> {
    /// Create a new animation clip
    pub fn new(frames: Vec<F>, durations: Vec<f32>) -> Result<Self, AnimationError> {
        if frames.len() != durations.len() {
            return Err(AnimationError::LengthMismatch {
                frames: frames.len(),
                durations: durations.len(),
            });
        }
        if frames.is_empty() {
            return Err(AnimationError::Empty);
        }
        // `!(d >= 0.0)` also rejects NaN
        if let Some((index, &duration)) = durations.iter().enumerate().find(|(_, d)| !(**d >= 0.0))
        {
            return Err(AnimationError::NegativeDuration { index, duration });
        }

        let cumulative_offsets = prefix_sums(&durations);
        let total = cumulative_offsets[cumulative_offsets.len() - 1];
        if !(total > 0.0) || !total.is_finite() {
            return Err(AnimationError::ZeroLength);
        }

        Ok(Self {
            frames,
            cumulative_offsets,
            elapsed: 0.0,
            loop_count: 0,
        })
    }

    /// Create a clip that shows every frame for the same amount of time
    pub fn uniform(frames: Vec<F>, frame_duration: f32) -> Result<Self, AnimationError> {
        let durations = vec![frame_duration; frames.len()];
        Self::new(frames, durations)
    }

    /// Rewind to the first frame with its full duration remaining and clear
    /// the repetition counter
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.loop_count = 0;
    }

    /// Advance the clip's timer by `dt` seconds.
    ///
    /// Negative or non-finite `dt` is ignored. Every loop boundary crossed
    /// counts as one repetition.
    pub fn advance(&mut self, dt: f32) {
        let Ok(dt) = validate_frametime(dt) else {
            trace!("Ignoring invalid clip advance of {}s", dt);
            return;
        };

        let total = self.total_duration();
        self.elapsed += dt;
        if self.elapsed >= total {
            let loops = (self.elapsed / total).floor();
            self.elapsed -= loops * total;
            // Float error can leave the remainder a hair outside [0, total)
            if self.elapsed >= total || self.elapsed < 0.0 {
                self.elapsed = 0.0;
            }
            self.loop_count = self.loop_count.saturating_add(loops as u32);
        }
    }

    /// Index of the frame whose display window contains the current offset
    pub fn current_index(&self) -> usize {
        self.index_at(self.elapsed)
    }

    /// The frame that should be displayed right now
    pub fn current_frame(&self) -> &F {
        &self.frames[self.current_index()]
    }

    /// Number of full loops completed since the last reset.
    ///
    /// A play-once animation is finished once this is above zero.
    pub fn repetitions(&self) -> u32 {
        self.loop_count
    }

    /// Current time offset within the loop
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Length of one full loop in seconds
    pub fn total_duration(&self) -> f32 {
        self.cumulative_offsets[self.cumulative_offsets.len() - 1]
    }

    /// Number of frames in the clip
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[F] {
        &self.frames
    }

    fn index_at(&self, offset: f32) -> usize {
        lower_bound(&self.cumulative_offsets, offset).min(self.frames.len() - 1)
    }
}

/// Named collection of clips owned by one character
#[derive(Debug, Clone)]
pub struct ClipSet<F> {
    clips: HashMap<String, AnimationClip<F>>,
}

impl<F> Default for ClipSet<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> ClipSet<F> {
    pub fn new() -> Self {
        Self {
            clips: HashMap::new(),
        }
    }

    /// Add a clip under `name`, replacing any clip with the same name
    pub fn insert(&mut self, name: &str, clip: AnimationClip<F>) {
        self.clips.insert(name.to_string(), clip);
    }

    /// Builder-style variant of [`ClipSet::insert`]
    pub fn with_clip(mut self, name: &str, clip: AnimationClip<F>) -> Self {
        self.insert(name, clip);
        self
    }

    pub fn get(&self, name: &str) -> Option<&AnimationClip<F>> {
        self.clips.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut AnimationClip<F>> {
        self.clips.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }

    /// Fail with [`AnimationError::MissingClip`] unless every name is present
    pub fn require(&self, names: &[&str]) -> Result<(), AnimationError> {
        match names.iter().find(|name| !self.contains(name)) {
            Some(missing) => Err(AnimationError::MissingClip(missing.to_string())),
            None => Ok(()),
        }
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

/// Data needed to render the current animation frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderFrame<F> {
    pub frame: F,
    /// Mirror the frame horizontally when drawing (character faces left)
    pub flip_horizontal: bool,
}
