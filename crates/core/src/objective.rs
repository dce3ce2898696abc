//! Per-mode objective tracking, fed by line-clear events

use crate::error::RulesError;
use crate::matrix::Cell;
use crate::types::{GameMode, GARBAGE_COLOR, MATRIX_WIDTH};

/// Score and target for the board's game mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Objective {
    mode: GameMode,
    score: u32,
    target: f32,
}

impl Objective {
    pub fn new(mode: GameMode, target: f32) -> Self {
        Self {
            mode,
            score: 0,
            target,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Points earned by clearing `row` (a full row of placed cells)
    pub fn score_on_clear(&self, row: &[Cell]) -> Result<u32, RulesError> {
        match self.mode {
            GameMode::ScoreAttack => Err(RulesError::Unsupported(self.mode)),
            GameMode::LineClear => Ok(1),
            GameMode::Cheese => {
                let garbage = row
                    .iter()
                    .filter(|cell| cell.color() == Some(GARBAGE_COLOR))
                    .count();
                Ok(u32::from(garbage == MATRIX_WIDTH - 1))
            }
        }
    }

    /// Score a cleared row and add it to the total
    pub fn record_clear(&mut self, row: &[Cell]) -> Result<u32, RulesError> {
        let delta = self.score_on_clear(row)?;
        self.score += delta;
        Ok(delta)
    }

    /// True once the score reaches a positive target
    ///
    /// A target of zero means the mode runs without a goal. Score attack
    /// never completes through scoring.
    pub fn is_complete(&self) -> bool {
        match self.mode {
            GameMode::ScoreAttack => false,
            GameMode::LineClear | GameMode::Cheese => {
                self.target > 0.0 && self.score as f32 >= self.target
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn garbage_row(piece_color: u8) -> [Cell; MATRIX_WIDTH] {
        let mut row = [Cell::placed(GARBAGE_COLOR); MATRIX_WIDTH];
        row[4] = Cell::placed(piece_color);
        row
    }

    #[test]
    fn test_line_clear_counts_every_row() {
        let mut objective = Objective::new(GameMode::LineClear, 2.0);
        let row = [Cell::placed(5); MATRIX_WIDTH];
        assert_eq!(objective.record_clear(&row), Ok(1));
        assert!(!objective.is_complete());
        assert_eq!(objective.record_clear(&row), Ok(1));
        assert!(objective.is_complete());
    }

    #[test]
    fn test_cheese_counts_only_garbage_rows() {
        let mut objective = Objective::new(GameMode::Cheese, 10.0);
        assert_eq!(objective.record_clear(&garbage_row(7)), Ok(1));
        assert_eq!(objective.record_clear(&[Cell::placed(7); MATRIX_WIDTH]), Ok(0));
        assert_eq!(objective.score(), 1);
    }

    #[test]
    fn test_score_attack_is_unsupported() {
        let mut objective = Objective::new(GameMode::ScoreAttack, 120.0);
        assert_eq!(
            objective.record_clear(&garbage_row(1)),
            Err(RulesError::Unsupported(GameMode::ScoreAttack))
        );
        assert_eq!(objective.score(), 0);
        assert!(!objective.is_complete());
    }

    #[test]
    fn test_zero_target_never_completes() {
        let mut objective = Objective::new(GameMode::LineClear, 0.0);
        let _ = objective.record_clear(&[Cell::placed(2); MATRIX_WIDTH]);
        assert!(!objective.is_complete());
    }
}
