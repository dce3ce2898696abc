//! Matrix module - the 40x10 cell grid
//!
//! Uses a flat array for cache locality and zero allocation.
//! Coordinates are `(row, col)`: row 0 is the top of the off-screen buffer,
//! row 39 the bottom of the playfield; col 0 is the left wall.

use crate::types::{BlockKind, ColorId, EMPTY_COLOR_ID, MATRIX_HEIGHT, MATRIX_WIDTH};

/// Total number of cells in the matrix
const MATRIX_SIZE: usize = MATRIX_WIDTH * MATRIX_HEIGHT;

/// One matrix cell: block kind and colour, always set together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    kind: BlockKind,
    color: Option<ColorId>,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        kind: BlockKind::Empty,
        color: None,
    };

    pub const fn placed(color: ColorId) -> Self {
        Self {
            kind: BlockKind::Placed,
            color: Some(color),
        }
    }

    pub const fn active(color: ColorId) -> Self {
        Self {
            kind: BlockKind::Active,
            color: Some(color),
        }
    }

    pub const fn shadow(color: ColorId) -> Self {
        Self {
            kind: BlockKind::Shadow,
            color: Some(color),
        }
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    pub fn color(&self) -> Option<ColorId> {
        self.color
    }

    /// Colour as a sprite index, `-1` for empty cells
    pub fn color_id(&self) -> i8 {
        self.color.map(|c| c as i8).unwrap_or(EMPTY_COLOR_ID)
    }

    pub fn is_placed(&self) -> bool {
        self.kind == BlockKind::Placed
    }

    pub fn is_empty(&self) -> bool {
        self.kind == BlockKind::Empty
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// The 40x10 matrix using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    /// Row-major cells (row * WIDTH + col)
    cells: [Cell; MATRIX_SIZE],
}

impl Matrix {
    /// Create an empty matrix
    pub fn new() -> Self {
        Self {
            cells: [Cell::EMPTY; MATRIX_SIZE],
        }
    }

    /// Calculate flat index from signed coordinates
    #[inline(always)]
    fn index(row: i32, col: i32) -> Option<usize> {
        if row < 0 || row >= MATRIX_HEIGHT as i32 || col < 0 || col >= MATRIX_WIDTH as i32 {
            return None;
        }
        Some(row as usize * MATRIX_WIDTH + col as usize)
    }

    /// Get cell at `(row, col)`, `None` if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at `(row, col)`; returns false if out of bounds
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// True if `(row, col)` is inside the matrix and not a placed block
    pub fn is_free(&self, row: i32, col: i32) -> bool {
        matches!(self.get(row, col), Some(cell) if !cell.is_placed())
    }

    /// Borrow a whole row
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * MATRIX_WIDTH;
        &self.cells[start..start + MATRIX_WIDTH]
    }

    fn row_mut(&mut self, row: usize) -> &mut [Cell] {
        let start = row * MATRIX_WIDTH;
        &mut self.cells[start..start + MATRIX_WIDTH]
    }

    /// Check if every cell of a row is a placed block
    pub fn is_row_full(&self, row: usize) -> bool {
        row < MATRIX_HEIGHT && self.row(row).iter().all(Cell::is_placed)
    }

    /// Remove a row, shift everything above it down by one and empty row 0
    pub fn remove_row(&mut self, row: usize) {
        if row >= MATRIX_HEIGHT {
            return;
        }
        // copy_within handles the overlapping ranges.
        self.cells.copy_within(0..row * MATRIX_WIDTH, MATRIX_WIDTH);
        self.row_mut(0).fill(Cell::EMPTY);
    }

    /// Shift every row up by one (row 0 is lost) and return the bottom row
    /// for the caller to fill
    pub fn push_up(&mut self) -> &mut [Cell] {
        self.cells.copy_within(MATRIX_WIDTH.., 0);
        self.row_mut(MATRIX_HEIGHT - 1)
    }

    /// Count placed cells in the whole matrix
    pub fn placed_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_placed()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_index_calculation() {
        assert_eq!(Matrix::index(0, 0), Some(0));
        assert_eq!(Matrix::index(0, 9), Some(9));
        assert_eq!(Matrix::index(1, 0), Some(10));
        assert_eq!(Matrix::index(39, 9), Some(399));
        assert_eq!(Matrix::index(-1, 0), None);
        assert_eq!(Matrix::index(0, 10), None);
        assert_eq!(Matrix::index(40, 0), None);
    }

    #[test]
    fn test_cell_kind_and_color_move_together() {
        assert_eq!(Cell::EMPTY.color_id(), -1);
        assert_eq!(Cell::EMPTY.kind(), BlockKind::Empty);
        let placed = Cell::placed(3);
        assert_eq!(placed.color_id(), 3);
        assert!(placed.is_placed());
        assert_eq!(Cell::shadow(0).kind(), BlockKind::Shadow);
        assert_eq!(Cell::active(7).color(), Some(7));
    }

    #[test]
    fn test_is_free_ignores_overlay_cells() {
        let mut matrix = Matrix::new();
        matrix.set(30, 4, Cell::active(1));
        matrix.set(31, 4, Cell::shadow(1));
        matrix.set(32, 4, Cell::placed(1));
        assert!(matrix.is_free(30, 4));
        assert!(matrix.is_free(31, 4));
        assert!(!matrix.is_free(32, 4));
        assert!(!matrix.is_free(40, 4));
        assert!(!matrix.is_free(0, -1));
    }

    #[test]
    fn test_remove_row_shifts_down() {
        let mut matrix = Matrix::new();
        for col in 0..10 {
            matrix.set(39, col, Cell::placed(2));
        }
        matrix.set(38, 3, Cell::placed(5));
        matrix.set(0, 0, Cell::placed(6));

        matrix.remove_row(39);

        assert_eq!(matrix.get(39, 3), Some(Cell::placed(5)));
        assert_eq!(matrix.get(39, 0), Some(Cell::EMPTY));
        assert_eq!(matrix.get(1, 0), Some(Cell::placed(6)));
        assert!(matrix.row(0).iter().all(Cell::is_empty));
    }

    #[test]
    fn test_push_up_drops_top_row() {
        let mut matrix = Matrix::new();
        matrix.set(0, 0, Cell::placed(1));
        matrix.set(39, 5, Cell::placed(4));

        let bottom = matrix.push_up();
        bottom.fill(Cell::placed(0));

        assert_eq!(matrix.get(38, 5), Some(Cell::placed(4)));
        assert_eq!(matrix.get(0, 0), Some(Cell::EMPTY));
        assert!(matrix.is_row_full(39));
    }
}
