use crate::matrix::Cell;
use crate::types::{GameMode, PieceKind, MATRIX_WIDTH, NEXT_QUEUE_LEN, VISIBLE_ROWS};

/// Read-only copy of what a presentation layer draws
///
/// `cells[0]` is matrix row 19, the row just above the playfield.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSnapshot {
    pub cells: [[Cell; MATRIX_WIDTH]; VISIBLE_ROWS],
    pub mode: GameMode,
    pub score: u32,
    pub target: f32,
    pub topped_out: bool,
    pub active: Option<PieceKind>,
    pub hold: Option<PieceKind>,
    pub next: [PieceKind; NEXT_QUEUE_LEN],
    pub can_hold: bool,
    pub pieces_locked: u32,
}

impl BoardSnapshot {
    /// Colour ids row by row, `-1` for empty cells
    pub fn color_ids(&self) -> [[i8; MATRIX_WIDTH]; VISIBLE_ROWS] {
        let mut ids = [[0i8; MATRIX_WIDTH]; VISIBLE_ROWS];
        for (out, row) in ids.iter_mut().zip(self.cells.iter()) {
            for (id, cell) in out.iter_mut().zip(row.iter()) {
                *id = cell.color_id();
            }
        }
        ids
    }

    pub fn playable(&self) -> bool {
        !self.topped_out
    }
}
