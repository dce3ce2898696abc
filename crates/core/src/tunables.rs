//! Handling and timing configuration
//!
//! Values are authored the way players quote them (gravity in G, delays in
//! frames at 60 fps) and stored as seconds, which is what the per-frame
//! entry points consume.

use crate::error::RulesError;
use crate::types::{
    GameMode, DEFAULT_ARR_FRAMES, DEFAULT_CHEESE_ROWS, DEFAULT_DAS_FRAMES, DEFAULT_GRAVITY,
    DEFAULT_SOFT_DROP_FRAMES, FRAMES_PER_SECOND, LOCK_MOVE_THRESHOLD, LOCK_TIME_THRESHOLD,
};

/// Timing tunables, all durations in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tunables {
    /// Seconds per gravity step
    pub gravity_interval: f32,
    /// Delayed auto shift
    pub das: f32,
    /// Auto repeat rate; 0 snaps to the wall
    pub arr: f32,
    /// Seconds per soft drop step; 0 snaps to the floor
    pub soft_drop_interval: f32,
    /// Grounded time before the piece is dropped
    pub lock_time_threshold: f32,
    /// Moves/rotations while locking before the piece is dropped
    pub lock_move_threshold: u32,
}

fn frames_to_seconds(frames: f32) -> f32 {
    frames / FRAMES_PER_SECOND
}

impl Tunables {
    /// Gravity in cells per frame (1.0 = 1G)
    pub fn with_gravity(mut self, cells_per_frame: f32) -> Self {
        self.gravity_interval = (1.0 / FRAMES_PER_SECOND) / cells_per_frame;
        self
    }

    /// Current gravity in cells per frame
    pub fn gravity(&self) -> f32 {
        (1.0 / FRAMES_PER_SECOND) / self.gravity_interval
    }

    pub fn with_das_frames(mut self, frames: f32) -> Self {
        self.das = frames_to_seconds(frames);
        self
    }

    pub fn with_arr_frames(mut self, frames: f32) -> Self {
        self.arr = frames_to_seconds(frames);
        self
    }

    pub fn with_soft_drop_frames(mut self, frames: f32) -> Self {
        self.soft_drop_interval = frames_to_seconds(frames);
        self
    }

    pub fn with_lock_time(mut self, seconds: f32) -> Self {
        self.lock_time_threshold = seconds;
        self
    }

    pub fn with_lock_moves(mut self, moves: u32) -> Self {
        self.lock_move_threshold = moves;
        self
    }
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            gravity_interval: (1.0 / FRAMES_PER_SECOND) / DEFAULT_GRAVITY,
            das: frames_to_seconds(DEFAULT_DAS_FRAMES),
            arr: frames_to_seconds(DEFAULT_ARR_FRAMES),
            soft_drop_interval: frames_to_seconds(DEFAULT_SOFT_DROP_FRAMES),
            lock_time_threshold: LOCK_TIME_THRESHOLD,
            lock_move_threshold: LOCK_MOVE_THRESHOLD,
        }
    }
}

/// Everything needed to build a board
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardConfig {
    pub mode: GameMode,
    /// Seconds (score attack), lines (line clear) or garbage rows (cheese)
    pub mode_param: u32,
    pub tunables: Tunables,
    pub seed: u32,
}

impl BoardConfig {
    /// Config with the mode's default parameter
    pub fn new(mode: GameMode) -> Self {
        let mode_param = match mode {
            GameMode::Cheese => DEFAULT_CHEESE_ROWS,
            GameMode::ScoreAttack | GameMode::LineClear => 0,
        };
        Self {
            mode,
            mode_param,
            tunables: Tunables::default(),
            seed: 1,
        }
    }

    /// Config for a mode given by name (`score-attack`, `line-clear`, `cheese`)
    pub fn named(mode: &str) -> Result<Self, RulesError> {
        GameMode::from_str(mode)
            .map(Self::new)
            .ok_or_else(|| RulesError::UnknownGameMode(mode.to_string()))
    }

    pub fn cheese(rows: u32) -> Self {
        Self::new(GameMode::Cheese).with_mode_param(rows)
    }

    pub fn line_clear(lines: u32) -> Self {
        Self::new(GameMode::LineClear).with_mode_param(lines)
    }

    pub fn score_attack(seconds: u32) -> Self {
        Self::new(GameMode::ScoreAttack).with_mode_param(seconds)
    }

    pub fn with_mode_param(mut self, param: u32) -> Self {
        self.mode_param = param;
        self
    }

    pub fn with_tunables(mut self, tunables: Tunables) -> Self {
        self.tunables = tunables;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }
}
