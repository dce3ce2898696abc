//! Pieces module - tetromino templates and template rotation
//!
//! Every piece lives in a 4x4 template. Row 0 is the top of the template and
//! row 3 sits on the spawn baseline. Rotation rewrites the template itself:
//! the long bar turns about the exact centre of the 4x4 grid, every other
//! kind turns about the fixed pivot at (row 2, col 1) inside the lower-left
//! 3x3 area. The O piece never changes shape.

use crate::types::{ColorId, PieceKind, Rotation, Turn, TEMPLATE_SIZE};

/// A 4x4 template; `Some(colour)` marks an occupied cell
pub type Shape = [[Option<ColorId>; TEMPLATE_SIZE]; TEMPLATE_SIZE];

const N: bool = false;
const X: bool = true;

/// Spawn templates indexed by [`PieceKind::index`]
const TEMPLATES: [[[bool; TEMPLATE_SIZE]; TEMPLATE_SIZE]; 7] = [
    // I
    [[N, N, N, N], [X, X, X, X], [N, N, N, N], [N, N, N, N]],
    // J
    [[N, N, N, N], [X, N, N, N], [X, X, X, N], [N, N, N, N]],
    // L
    [[N, N, N, N], [N, N, X, N], [X, X, X, N], [N, N, N, N]],
    // O
    [[N, N, N, N], [N, X, X, N], [N, X, X, N], [N, N, N, N]],
    // S
    [[N, N, N, N], [N, X, X, N], [X, X, N, N], [N, N, N, N]],
    // Z
    [[N, N, N, N], [X, X, N, N], [N, X, X, N], [N, N, N, N]],
    // T
    [[N, N, N, N], [N, X, N, N], [X, X, X, N], [N, N, N, N]],
];

/// Which rotation area a shape uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationArea {
    /// Whole 4x4 grid, pivot at its centre (long bar)
    Full,
    /// Lower-left 3x3, pivot at template (row 2, col 1)
    Compact,
}

/// Build the spawn template of a kind
pub fn spawn_shape(kind: PieceKind) -> Shape {
    let template = &TEMPLATES[kind.index()];
    let color = kind.color();
    let mut shape = [[None; TEMPLATE_SIZE]; TEMPLATE_SIZE];
    for (row, cells) in template.iter().enumerate() {
        for (col, &filled) in cells.iter().enumerate() {
            if filled {
                shape[row][col] = Some(color);
            }
        }
    }
    shape
}

/// Rotate a template into a fresh buffer
///
/// Coordinates are `(x, y)` = `(col, row)`; clockwise-positive turns.
pub fn rotate_shape(old: &Shape, turn: Turn, area: RotationArea) -> Shape {
    let mut new = [[None; TEMPLATE_SIZE]; TEMPLATE_SIZE];
    match area {
        RotationArea::Full => {
            // Offsets from the (non-integer) centre of the 4x4 grid, with 0 skipped.
            fn to_relative(i: usize) -> i32 {
                let i = i as i32;
                if i >= 2 {
                    i - 1
                } else {
                    i - 2
                }
            }
            fn to_index(i: i32) -> usize {
                ((if i > 0 { 1 } else { 2 }) + i) as usize
            }
            for x in 0..TEMPLATE_SIZE {
                for y in 0..TEMPLATE_SIZE {
                    let rx = to_relative(x);
                    let ry = to_relative(y);
                    let (row, col) = match turn {
                        Turn::Cw => (to_index(rx), to_index(-ry)),
                        Turn::Ccw => (to_index(-rx), to_index(ry)),
                        Turn::Half => (to_index(-ry), to_index(-rx)),
                    };
                    new[row][col] = old[y][x];
                }
            }
        }
        RotationArea::Compact => {
            const PIVOT_X: i32 = 1;
            const PIVOT_Y: i32 = 2;
            for x in 0..3i32 {
                for y in 1..4i32 {
                    let rx = x - PIVOT_X;
                    let ry = y - PIVOT_Y;
                    let (row, col) = match turn {
                        Turn::Cw => (PIVOT_Y + rx, PIVOT_X - ry),
                        Turn::Ccw => (PIVOT_Y - rx, PIVOT_X + ry),
                        Turn::Half => (PIVOT_Y - ry, PIVOT_X - rx),
                    };
                    new[row as usize][col as usize] = old[y as usize][x as usize];
                }
            }
        }
    }
    new
}

/// A tetromino template plus its rotation state
///
/// `kind == None` is the blank piece used for an empty hold slot.
#[derive(Debug, PartialEq, Eq)]
pub struct Piece {
    kind: Option<PieceKind>,
    shape: Shape,
    rotation: Rotation,
}

impl Piece {
    /// Create a piece in spawn orientation
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind: Some(kind),
            shape: spawn_shape(kind),
            rotation: Rotation::North,
        }
    }

    /// Create the blank piece (no cells, no kind)
    pub fn blank() -> Self {
        Self {
            kind: None,
            shape: [[None; TEMPLATE_SIZE]; TEMPLATE_SIZE],
            rotation: Rotation::North,
        }
    }

    pub fn kind(&self) -> Option<PieceKind> {
        self.kind
    }

    pub fn is_blank(&self) -> bool {
        self.width() == 0
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Occupied template cells as `(row, col, colour)`
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, ColorId)> + '_ {
        self.shape.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(col, cell)| cell.map(|color| (row, col, color)))
        })
    }

    fn column_filled(&self, col: usize) -> bool {
        self.shape.iter().any(|row| row[col].is_some())
    }

    fn row_filled(&self, row: usize) -> bool {
        self.shape[row].iter().any(|cell| cell.is_some())
    }

    /// Number of template columns holding a block
    pub fn width(&self) -> usize {
        (0..TEMPLATE_SIZE).filter(|&c| self.column_filled(c)).count()
    }

    /// Number of template rows holding a block
    pub fn height(&self) -> usize {
        (0..TEMPLATE_SIZE).filter(|&r| self.row_filled(r)).count()
    }

    /// Empty template rows below the lowest block
    pub fn row_offset(&self) -> usize {
        (0..TEMPLATE_SIZE)
            .rev()
            .find(|&r| self.row_filled(r))
            .map(|r| TEMPLATE_SIZE - 1 - r)
            .unwrap_or(0)
    }

    /// Empty template columns left of the leftmost block
    pub fn col_offset(&self) -> usize {
        (0..TEMPLATE_SIZE)
            .find(|&c| self.column_filled(c))
            .unwrap_or(0)
    }

    /// Block count and leftmost block column of one template row
    ///
    /// An empty row reports `(0, 0)`.
    pub fn row_width(&self, row: usize) -> (usize, usize) {
        let cells = &self.shape[row];
        let width = cells.iter().filter(|c| c.is_some()).count();
        let offset = cells.iter().position(|c| c.is_some()).unwrap_or(0);
        (width, offset)
    }

    /// Area the next rotation of this shape pivots in
    pub fn rotation_area(&self) -> RotationArea {
        if self.height() == TEMPLATE_SIZE || self.width() == TEMPLATE_SIZE {
            RotationArea::Full
        } else {
            RotationArea::Compact
        }
    }

    /// Rotate the template by a quarter or half turn
    pub fn rotate(&mut self, turn: Turn) {
        self.rotation = self.rotation.turned(turn);

        match self.kind {
            None | Some(PieceKind::O) => {}
            Some(_) => {
                self.shape = rotate_shape(&self.shape, turn, self.rotation_area());
            }
        }
    }

    /// Restore the spawn template and orientation
    pub fn reset_rotation(&mut self) {
        if let Some(kind) = self.kind {
            *self = Piece::new(kind);
        }
    }
}

/// Cloning rebuilds the piece from its kind and replays the rotation, so a
/// clone always carries a canonical template for its orientation.
impl Clone for Piece {
    fn clone(&self) -> Self {
        let mut clone = match self.kind {
            Some(kind) => Piece::new(kind),
            None => return Piece::blank(),
        };
        if let Some(turn) = self.rotation.from_north() {
            clone.rotate(turn);
        }
        clone
    }
}

impl Default for Piece {
    fn default() -> Self {
        Self::blank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occupied(piece: &Piece) -> Vec<(usize, usize)> {
        piece.cells().map(|(r, c, _)| (r, c)).collect()
    }

    #[test]
    fn test_spawn_geometry() {
        let t = Piece::new(PieceKind::T);
        assert_eq!(t.width(), 3);
        assert_eq!(t.height(), 2);
        assert_eq!(t.row_offset(), 1);
        assert_eq!(t.col_offset(), 0);
        assert_eq!(t.row_width(1), (1, 1));
        assert_eq!(t.row_width(2), (3, 0));
        assert_eq!(t.row_width(0), (0, 0));

        let i = Piece::new(PieceKind::I);
        assert_eq!(i.width(), 4);
        assert_eq!(i.height(), 1);
        assert_eq!(i.row_offset(), 2);
        assert_eq!(i.rotation_area(), RotationArea::Full);

        let o = Piece::new(PieceKind::O);
        assert_eq!(o.width(), 2);
        assert_eq!(o.col_offset(), 1);
    }

    #[test]
    fn test_blank_piece() {
        let blank = Piece::blank();
        assert_eq!(blank.width(), 0);
        assert_eq!(blank.height(), 0);
        assert!(blank.is_blank());
        assert_eq!(blank.kind(), None);
        assert_eq!(blank.clone(), blank);
    }

    #[test]
    fn test_t_rotates_clockwise_about_compact_pivot() {
        let mut t = Piece::new(PieceKind::T);
        t.rotate(Turn::Cw);
        assert_eq!(t.rotation(), Rotation::East);
        // Stem in column 1, nub pointing right.
        assert_eq!(occupied(&t), vec![(1, 1), (2, 1), (2, 2), (3, 1)]);
    }

    #[test]
    fn test_i_rotates_in_full_area() {
        let mut i = Piece::new(PieceKind::I);
        i.rotate(Turn::Cw);
        assert_eq!(occupied(&i), vec![(0, 2), (1, 2), (2, 2), (3, 2)]);

        let mut i = Piece::new(PieceKind::I);
        i.rotate(Turn::Ccw);
        assert_eq!(occupied(&i), vec![(0, 1), (1, 1), (2, 1), (3, 1)]);

        let mut i = Piece::new(PieceKind::I);
        i.rotate(Turn::Half);
        assert_eq!(occupied(&i), vec![(2, 0), (2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_o_shape_never_changes() {
        let mut o = Piece::new(PieceKind::O);
        let spawn = *o.shape();
        o.rotate(Turn::Cw);
        o.rotate(Turn::Half);
        assert_eq!(*o.shape(), spawn);
        assert_eq!(o.rotation(), Rotation::West);
    }

    #[test]
    fn test_clone_replays_rotation() {
        let mut s = Piece::new(PieceKind::S);
        s.rotate(Turn::Ccw);
        let clone = s.clone();
        assert_eq!(clone.rotation(), Rotation::West);
        assert_eq!(clone.shape(), s.shape());
    }

    #[test]
    fn test_reset_rotation() {
        let mut j = Piece::new(PieceKind::J);
        j.rotate(Turn::Half);
        j.reset_rotation();
        assert_eq!(j, Piece::new(PieceKind::J));
    }
}
