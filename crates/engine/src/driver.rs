//! Frame driver - applies one frame of input to a board in a fixed order
//!
//! Order within a frame:
//!
//! 1. finish check (top-out, objective reached, score attack time up)
//! 2. rotations: clockwise, counter-clockwise, 180
//! 3. left tap, then left held (DAS/ARR) or its release
//! 4. right tap, then right held or its release
//! 5. soft drop held or its release
//! 6. hard drop
//! 7. hold
//! 8. gravity and lock delay
//!
//! Rotations and moves land before the accumulators, since gravity may
//! hard-drop the active piece.

use arrayvec::ArrayVec;
use tracing::debug;

use crate::core::{Board, RandomSource, RulesError};
use crate::types::{GameAction, GameMode};

/// Most discrete presses carried by one frame
pub const MAX_PRESSES: usize = 8;

/// Keys held down during a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub down: bool,
}

/// One frame of input
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Seconds since the previous frame
    pub elapsed: f32,
    pub held: HeldKeys,
    /// Actions whose key went down this frame
    pub pressed: ArrayVec<GameAction, MAX_PRESSES>,
}

impl FrameInput {
    pub fn new(elapsed: f32) -> Self {
        Self {
            elapsed,
            ..Self::default()
        }
    }

    /// Add a just-pressed action; held actions also start being held
    pub fn press(mut self, action: GameAction) -> Self {
        if !self.pressed.contains(&action) && !self.pressed.is_full() {
            self.pressed.push(action);
        }
        self.hold_key(action)
    }

    /// Keep a held action down without a new press
    pub fn hold_key(mut self, action: GameAction) -> Self {
        match action {
            GameAction::MoveLeft => self.held.left = true,
            GameAction::MoveRight => self.held.right = true,
            GameAction::SoftDrop => self.held.down = true,
            _ => {}
        }
        self
    }

    pub fn was_pressed(&self, action: GameAction) -> bool {
        self.pressed.contains(&action)
    }
}

/// Game status after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Playing,
    ToppedOut,
    ObjectiveComplete,
    /// Score attack clock ran out
    TimeUp,
}

impl FrameOutcome {
    pub fn is_finished(self) -> bool {
        self != FrameOutcome::Playing
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FrameOutcome::Playing => "playing",
            FrameOutcome::ToppedOut => "topped_out",
            FrameOutcome::ObjectiveComplete => "objective_complete",
            FrameOutcome::TimeUp => "time_up",
        }
    }
}

/// Drives a board frame by frame and keeps the game clock
#[derive(Debug, Clone, Default)]
pub struct FrameDriver {
    clock: f32,
    frames: u64,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds of play applied so far
    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Current status without applying input
    pub fn status<R: RandomSource>(&self, board: &Board<R>) -> FrameOutcome {
        let objective = board.objective();
        if board.topped_out() {
            FrameOutcome::ToppedOut
        } else if objective.is_complete() {
            FrameOutcome::ObjectiveComplete
        } else if objective.mode() == GameMode::ScoreAttack
            && objective.target() > 0.0
            && self.clock >= objective.target()
        {
            FrameOutcome::TimeUp
        } else {
            FrameOutcome::Playing
        }
    }

    /// Apply one frame; a finished game ignores its input
    pub fn step<R: RandomSource>(
        &mut self,
        board: &mut Board<R>,
        input: &FrameInput,
    ) -> Result<FrameOutcome, RulesError> {
        let status = self.status(board);
        if status.is_finished() {
            return Ok(status);
        }

        apply_frame(board, input)?;
        self.clock += input.elapsed;
        self.frames += 1;

        let status = self.status(board);
        if status.is_finished() {
            debug!(
                outcome = status.as_str(),
                frames = self.frames,
                clock = self.clock,
                "game finished"
            );
        }
        Ok(status)
    }
}

/// Apply one frame of input to a board in the fixed order
pub fn apply_frame<R: RandomSource>(
    board: &mut Board<R>,
    input: &FrameInput,
) -> Result<(), RulesError> {
    let elapsed = input.elapsed;

    for action in [
        GameAction::RotateCw,
        GameAction::RotateCcw,
        GameAction::Rotate180,
    ] {
        if let Some(turn) = action.turn().filter(|_| input.was_pressed(action)) {
            board.rotate(turn);
        }
    }

    if input.was_pressed(GameAction::MoveLeft) {
        board.move_left();
    }
    if input.held.left {
        board.left_pressed(elapsed);
    } else {
        board.unpressed_key(GameAction::MoveLeft)?;
    }

    if input.was_pressed(GameAction::MoveRight) {
        board.move_right();
    }
    if input.held.right {
        board.right_pressed(elapsed);
    } else {
        board.unpressed_key(GameAction::MoveRight)?;
    }

    if input.held.down {
        board.soft_drop(elapsed);
    } else {
        board.unpressed_key(GameAction::SoftDrop)?;
    }

    if input.was_pressed(GameAction::HardDrop) {
        board.hard_drop()?;
    }

    if input.was_pressed(GameAction::Hold) {
        board.hold();
    }

    board.gravitate(elapsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BoardConfig, Cell, Tunables};

    const FRAME: f32 = 1.0 / 64.0;

    fn board() -> Board {
        Board::new(BoardConfig::line_clear(2).with_seed(5))
    }

    #[test]
    fn test_press_also_holds() {
        let input = FrameInput::new(FRAME).press(GameAction::MoveLeft);
        assert!(input.was_pressed(GameAction::MoveLeft));
        assert!(input.held.left);

        let input = FrameInput::new(FRAME).press(GameAction::HardDrop);
        assert_eq!(input.held, HeldKeys::default());
    }

    #[test]
    fn test_duplicate_presses_collapse() {
        let input = FrameInput::new(FRAME)
            .press(GameAction::Hold)
            .press(GameAction::Hold);
        assert_eq!(input.pressed.len(), 1);
    }

    #[test]
    fn test_tap_moves_once() {
        let mut board = board();
        let start = board.position().column;
        apply_frame(&mut board, &FrameInput::new(FRAME).press(GameAction::MoveRight)).unwrap();
        assert_eq!(board.position().column, start + 1);
    }

    #[test]
    fn test_hard_drop_press_locks() {
        let mut board = board();
        let mut driver = FrameDriver::new();
        let outcome = driver
            .step(&mut board, &FrameInput::new(FRAME).press(GameAction::HardDrop))
            .unwrap();
        assert_eq!(outcome, FrameOutcome::Playing);
        assert_eq!(board.pieces_locked(), 1);
        assert_eq!(driver.frames(), 1);
    }

    #[test]
    fn test_hold_then_second_hold_ignored() {
        let mut board = board();
        let first = board.active().kind();
        let input = FrameInput::new(FRAME).press(GameAction::Hold);
        apply_frame(&mut board, &input).unwrap();
        assert_eq!(board.hold_piece().kind(), first);
        let after_hold = board.active().kind();
        apply_frame(&mut board, &input).unwrap();
        assert_eq!(board.active().kind(), after_hold);
    }

    #[test]
    fn test_objective_complete_stops_input() {
        let mut board = board();
        for row in [38, 39] {
            for col in 0..10 {
                board.matrix_mut().set(row, col, Cell::placed(2));
            }
        }
        board.refresh().unwrap();
        assert_eq!(board.objective().score(), 2);

        let mut driver = FrameDriver::new();
        let outcome = driver
            .step(&mut board, &FrameInput::new(FRAME).press(GameAction::HardDrop))
            .unwrap();
        assert_eq!(outcome, FrameOutcome::ObjectiveComplete);
        assert_eq!(board.pieces_locked(), 0);
        assert_eq!(driver.frames(), 0);
    }

    #[test]
    fn test_score_attack_times_out() {
        let mut board = Board::new(BoardConfig::score_attack(1));
        let mut driver = FrameDriver::new();
        let mut outcome = FrameOutcome::Playing;
        for _ in 0..64 {
            outcome = driver.step(&mut board, &FrameInput::new(FRAME)).unwrap();
        }
        assert_eq!(outcome, FrameOutcome::TimeUp);
        assert_eq!(driver.clock(), 1.0);
    }

    #[test]
    fn test_idle_frames_lock_piece_on_floor() {
        let tunables = Tunables::default().with_gravity(20.0);
        let mut board = Board::new(BoardConfig::line_clear(0).with_tunables(tunables));
        let mut driver = FrameDriver::new();
        for _ in 0..64 {
            driver.step(&mut board, &FrameInput::new(FRAME)).unwrap();
        }
        assert!(board.pieces_locked() >= 1);
    }
}
