//! SRS offset tables
//!
//! Each rotation state owns five `(x, y)` offsets (y up). The kick for test
//! `i` of a transition is `offset[from][i] - offset[to][i]`; test 0 is the
//! unkicked rotation for the generic table. Reference: https://tetris.wiki/SRS

use crate::types::{PieceKind, Rotation};

/// Offset `(x, y)`, x to the right, y upward
pub type Offset = (i32, i32);

/// Five offsets per rotation state, indexed by [`Rotation::index`]
pub type OffsetTable = [[Offset; 5]; 4];

/// Offsets shared by J, L, S, T, Z (and O, whose offsets are all zero in effect)
pub const GENERIC_OFFSETS: OffsetTable = [
    // North
    [(0, 0), (0, 0), (0, 0), (0, 0), (0, 0)],
    // East
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // South
    [(0, 0), (0, 0), (0, 0), (0, 0), (0, 0)],
    // West
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
];

/// Long-bar offsets
pub const I_OFFSETS: OffsetTable = [
    // North
    [(0, 0), (-1, 0), (2, 0), (-1, 0), (2, 0)],
    // East
    [(-1, 0), (0, 0), (0, 0), (0, 1), (0, -2)],
    // South
    [(-1, 1), (1, 1), (-2, 1), (1, 0), (-2, 0)],
    // West
    [(0, 1), (0, 1), (0, 1), (0, -1), (0, 2)],
];

/// Offset table used by a piece kind
pub fn offset_table(kind: PieceKind) -> &'static OffsetTable {
    match kind {
        PieceKind::I => &I_OFFSETS,
        _ => &GENERIC_OFFSETS,
    }
}

/// The five ordered kick candidates for a transition, as `(dx, dy)`
pub fn kick_candidates(kind: PieceKind, from: Rotation, to: Rotation) -> [Offset; 5] {
    let table = offset_table(kind);
    let before = &table[from.index()];
    let after = &table[to.index()];
    let mut kicks = [(0, 0); 5];
    for (i, kick) in kicks.iter_mut().enumerate() {
        *kick = (before[i].0 - after[i].0, before[i].1 - after[i].1);
    }
    kicks
}
