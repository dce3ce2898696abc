//! JSON report of a finished simulator session

use serde::Serialize;

use crate::core::{BoardSnapshot, Cell};
use crate::engine::{FrameDriver, FrameOutcome};
use crate::types::BlockKind;

/// Visible matrix and side panels, one string per row
///
/// Row strings use `.` for empty, the colour digit for placed blocks, `@`
/// for the active piece and `+` for its shadow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardReport {
    pub mode: &'static str,
    pub score: u32,
    pub target: f32,
    pub topped_out: bool,
    pub active: Option<&'static str>,
    pub hold: Option<&'static str>,
    pub next: Vec<&'static str>,
    pub rows: Vec<String>,
}

fn cell_char(cell: &Cell) -> char {
    match cell.kind() {
        BlockKind::Empty => '.',
        BlockKind::Active => '@',
        BlockKind::Shadow => '+',
        BlockKind::Placed => cell
            .color()
            .and_then(|c| char::from_digit(u32::from(c), 10))
            .unwrap_or('#'),
    }
}

impl From<&BoardSnapshot> for BoardReport {
    fn from(snapshot: &BoardSnapshot) -> Self {
        Self {
            mode: snapshot.mode.as_str(),
            score: snapshot.score,
            target: snapshot.target,
            topped_out: snapshot.topped_out,
            active: snapshot.active.map(|k| k.as_str()),
            hold: snapshot.hold.map(|k| k.as_str()),
            next: snapshot.next.iter().map(|k| k.as_str()).collect(),
            rows: snapshot
                .cells
                .iter()
                .map(|row| row.iter().map(cell_char).collect())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub outcome: &'static str,
    pub frames: u64,
    pub seconds: f32,
    pub pieces_locked: u32,
    pub board: BoardReport,
}

impl SessionReport {
    pub fn new(snapshot: &BoardSnapshot, driver: &FrameDriver, outcome: FrameOutcome) -> Self {
        Self {
            outcome: outcome.as_str(),
            frames: driver.frames(),
            seconds: driver.clock(),
            pieces_locked: snapshot.pieces_locked,
            board: BoardReport::from(snapshot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, BoardConfig};

    #[test]
    fn board_report_renders_rows() {
        let board = Board::new(BoardConfig::cheese(1).with_seed(4));
        let report = BoardReport::from(&board.snapshot());

        assert_eq!(report.mode, "cheese");
        assert_eq!(report.rows.len(), 21);
        assert_eq!(report.next.len(), 6);
        assert_eq!(report.hold, None);

        let bottom = &report.rows[20];
        assert_eq!(bottom.chars().filter(|&c| c == '0').count(), 9);
        assert_eq!(bottom.chars().filter(|&c| c == '.').count(), 1);
        assert!(report.rows.iter().any(|row| row.contains('@')));
        assert!(report.rows.iter().any(|row| row.contains('+')));
    }

    #[test]
    fn session_report_serializes() {
        let board = Board::new(BoardConfig::line_clear(40));
        let report = SessionReport::new(&board.snapshot(), &FrameDriver::new(), FrameOutcome::Playing);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcome"], "playing");
        assert_eq!(json["board"]["mode"], "line-clear");
        assert_eq!(json["board"]["rows"].as_array().map(|r| r.len()), Some(21));
    }
}
