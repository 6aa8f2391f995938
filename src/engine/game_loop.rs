// Frame clock for the host loop
//
// One simulation tick runs per rendered frame. The clock measures the
// wall-clock frametime handed to that tick and paces frames to a target
// rate. Character movement is still a fixed amount per tick; only
// animation timing consumes the frametime.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Target frame rate of the host loop
pub const TARGET_FRAMERATE: u32 = 60;

/// Longest frametime handed to the simulation, so a stall (window drag,
/// debugger) does not skip whole animations
pub const MAX_FRAMETIME: f32 = 0.25;

/// Frames averaged for the FPS readout
const FPS_WINDOW: usize = 60;

/// Rolling average of recent frame durations
#[derive(Debug, Default)]
struct FpsCounter {
    samples: VecDeque<Duration>,
    total: Duration,
}

impl FpsCounter {
    fn record(&mut self, sample: Duration) {
        self.samples.push_back(sample);
        self.total += sample;
        if self.samples.len() > FPS_WINDOW {
            if let Some(oldest) = self.samples.pop_front() {
                self.total -= oldest;
            }
        }
    }

    fn fps(&self) -> f32 {
        if self.samples.is_empty() || self.total.is_zero() {
            return 0.0;
        }
        self.samples.len() as f32 / self.total.as_secs_f32()
    }
}

/// Measures frametime between ticks and tracks pause state
#[derive(Debug)]
pub struct GameLoop {
    last_tick: Instant,
    target_frame: Duration,
    paused: bool,
    fps: FpsCounter,
    frame_count: u64,
    frametime: f32,
}

impl GameLoop {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// A clock whose first frametime is measured from `now`
    pub fn starting_at(now: Instant) -> Self {
        Self {
            last_tick: now,
            target_frame: Duration::from_secs(1) / TARGET_FRAMERATE,
            paused: false,
            fps: FpsCounter::default(),
            frame_count: 0,
            frametime: 0.0,
        }
    }

    /// Start a frame now. Returns the frametime to tick with, or `None`
    /// while paused.
    pub fn begin_frame(&mut self) -> Option<f32> {
        self.begin_frame_at(Instant::now())
    }

    /// Start a frame at `now`
    pub fn begin_frame_at(&mut self, now: Instant) -> Option<f32> {
        let since_last = now.saturating_duration_since(self.last_tick);
        self.last_tick = now;
        self.frame_count += 1;
        self.fps.record(since_last);

        // Paused frames still move `last_tick`, so resuming does not hand
        // the whole pause to the next tick
        self.frametime = since_last.as_secs_f32().min(MAX_FRAMETIME);
        (!self.paused).then_some(self.frametime)
    }

    /// When the next frame is due to hold the target frame rate
    pub fn next_frame_deadline(&self) -> Instant {
        self.last_tick + self.target_frame
    }

    /// Frametime of the latest frame, in seconds
    pub fn frametime(&self) -> f32 {
        self.frametime
    }

    /// Average frames per second over the recent window
    pub fn fps(&self) -> f32 {
        self.fps.fps()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.toggle_pause();
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.toggle_pause();
        }
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        log::info!("Game {}", if self.paused { "paused" } else { "resumed" });
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
