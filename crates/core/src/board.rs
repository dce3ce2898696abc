//! Board module - the rules engine proper
//!
//! The board owns the matrix, the falling piece, the hold slot, the next
//! queue, the randomizer and every timing counter. External drivers call the
//! per-frame entry points (`left_pressed`, `soft_drop`, `gravitate`, ...)
//! with elapsed seconds and the discrete ones (`rotate`, `hard_drop`,
//! `hold`) on key presses.
//!
//! # Coordinates
//!
//! A [`Position`] is measured from the bottom of the matrix: row 0 is the
//! lowest row and rows grow upward. It addresses the bottom-left corner of
//! the piece's 4x4 template, so template row `t` lands on matrix row
//! `39 - position.row - 3 + t`.
//!
//! # Overlay
//!
//! The falling piece and its landing shadow are drawn into the matrix as
//! `Active`/`Shadow` cells after every state change. The overlay is lifted
//! out again before anything shifts the stack (line clears, garbage), so
//! those shifts only ever move placed blocks.

use arrayvec::ArrayVec;
use tracing::{debug, trace};

use crate::error::RulesError;
use crate::kicks::kick_candidates;
use crate::matrix::{Cell, Matrix};
use crate::objective::Objective;
use crate::piece::Piece;
use crate::rng::{PieceBag, RandomSource, SimpleRng};
use crate::snapshot::BoardSnapshot;
use crate::tunables::{BoardConfig, Tunables};
use crate::types::{
    ColorId, GameAction, GameMode, PieceKind, Turn, GARBAGE_COLOR, MATRIX_HEIGHT, MATRIX_WIDTH,
    NEXT_QUEUE_LEN, PLAYFIELD_TOP, TEMPLATE_SIZE, TOP_OUT_ROW, VISIBLE_ROWS,
};

/// Chance of each column becoming the hole when no previous hole is given
const FRESH_HOLE_CHANCE: f64 = 0.1;

/// Chance of each remaining column becoming the hole when the previous one did not repeat
const MOVED_HOLE_CHANCE: f64 = 1.0 / 9.0;

/// Slack for comparing summed frame times against thresholds
const TIME_EPSILON: f64 = 1e-6;

/// Piece position, rows counted upward from the bottom of the matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub row: i32,
    pub column: i32,
}

impl Position {
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Shifted by `(dx, dy)`, x to the right and y upward
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            row: self.row + dy,
            column: self.column + dx,
        }
    }

    /// Matrix row of a template row at this position
    pub const fn matrix_row(self, template_row: usize) -> i32 {
        MATRIX_HEIGHT as i32 - 1 - self.row - (TEMPLATE_SIZE as i32 - 1) + template_row as i32
    }

    /// Matrix column of a template column at this position
    pub const fn matrix_col(self, template_col: usize) -> i32 {
        self.column + template_col as i32
    }
}

/// Grid cells currently holding the active piece or its shadow
type Overlay = ArrayVec<(i32, i32), { 2 * TEMPLATE_SIZE }>;

/// The rules engine state for one game
#[derive(Debug, Clone)]
pub struct Board<R: RandomSource = SimpleRng> {
    matrix: Matrix,
    overlay: Overlay,
    active: Piece,
    position: Position,
    /// Blank while the hold slot is empty
    hold: Piece,
    next: [PieceKind; NEXT_QUEUE_LEN],
    just_held: bool,
    rng: R,
    bag: PieceBag,
    objective: Objective,
    tunables: Tunables,
    topped_out: bool,
    pieces_locked: u32,
    left_count: f64,
    right_count: f64,
    drop_count: f64,
    gravity_count: f64,
    lock_time: f64,
    lock_moves: u32,
    locking: bool,
}

impl Board<SimpleRng> {
    /// Create a board seeded from the config
    pub fn new(config: BoardConfig) -> Self {
        Self::with_rng(config, SimpleRng::new(config.seed))
    }
}

impl<R: RandomSource> Board<R> {
    /// Create a board drawing from the given random source
    ///
    /// Fills the next queue, spawns the first piece, then lays the mode's
    /// starting garbage.
    pub fn with_rng(config: BoardConfig, mut rng: R) -> Self {
        let mut bag = PieceBag::new();
        let next = std::array::from_fn(|_| bag.draw(&mut rng));

        let mut board = Self {
            matrix: Matrix::new(),
            overlay: Overlay::new(),
            active: Piece::blank(),
            position: Position::default(),
            hold: Piece::blank(),
            next,
            just_held: false,
            rng,
            bag,
            objective: Objective::new(config.mode, config.mode_param as f32),
            tunables: config.tunables,
            topped_out: false,
            pieces_locked: 0,
            left_count: 0.0,
            right_count: 0.0,
            drop_count: 0.0,
            gravity_count: 0.0,
            lock_time: 0.0,
            lock_moves: 0,
            locking: false,
        };
        board.next_piece();

        if config.mode == GameMode::Cheese {
            for _ in 0..config.mode_param {
                board.generate_garbage(None, 0.0);
            }
        }

        board.draw_overlay();
        debug!(
            mode = config.mode.as_str(),
            param = config.mode_param,
            seed = config.seed,
            "board created"
        );
        board
    }

    // ---- accessors ----

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Mutable matrix access; call [`Board::refresh`] after editing
    pub fn matrix_mut(&mut self) -> &mut Matrix {
        &mut self.matrix
    }

    pub fn active(&self) -> &Piece {
        &self.active
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Held piece, blank while the slot is empty
    pub fn hold_piece(&self) -> &Piece {
        &self.hold
    }

    pub fn next_queue(&self) -> &[PieceKind; NEXT_QUEUE_LEN] {
        &self.next
    }

    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    pub fn tunables(&self) -> &Tunables {
        &self.tunables
    }

    pub fn topped_out(&self) -> bool {
        self.topped_out
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn can_hold(&self) -> bool {
        !self.just_held
    }

    pub fn is_locking(&self) -> bool {
        self.locking
    }

    pub fn lock_time(&self) -> f64 {
        self.lock_time
    }

    pub fn lock_moves(&self) -> u32 {
        self.lock_moves
    }

    // ---- piece lifecycle ----

    /// Draw the next kind from the 7-bag
    pub fn generate_piece(&mut self) -> PieceKind {
        self.bag.draw(&mut self.rng)
    }

    /// Promote the head of the queue to the active piece and refill the tail
    pub fn next_piece(&mut self) {
        let refill = self.generate_piece();
        let head = self.next[0];
        self.next.rotate_left(1);
        self.next[NEXT_QUEUE_LEN - 1] = refill;
        self.active = Piece::new(head);
        self.reset_position();
    }

    /// Move the active piece to its spawn position, centred above the playfield
    pub fn reset_position(&mut self) {
        let width = self.active.width() as i32;
        self.position = Position::new(
            PLAYFIELD_TOP as i32 - self.active.row_offset() as i32,
            (MATRIX_WIDTH as i32 - width).div_euclid(2) - self.active.col_offset() as i32,
        );
    }

    /// Swap the active piece with the hold slot, once per placement
    ///
    /// An empty slot pulls the next queued piece. Returns false when a hold
    /// already happened since the last placement.
    pub fn hold(&mut self) -> bool {
        if self.topped_out || self.just_held {
            return false;
        }

        let previous = if self.hold.is_blank() {
            let previous = self.active.clone();
            self.next_piece();
            previous
        } else {
            std::mem::replace(&mut self.active, self.hold.clone())
        };
        self.hold = previous;
        self.hold.reset_rotation();
        self.reset_position();

        self.just_held = true;
        self.gravity_count = 0.0;
        self.reset_lock();
        self.draw_overlay();
        debug!(held = ?self.hold.kind(), active = ?self.active.kind(), "hold");
        true
    }

    /// Push a garbage row in at the bottom and return its hole column
    ///
    /// With a previous hole, `same_column_rate` is the chance the hole stays
    /// in that column. Otherwise columns are rolled left to right and the
    /// first hit becomes the hole; the last eligible column is the fallback.
    pub fn generate_garbage(&mut self, previous_hole: Option<usize>, same_column_rate: f64) -> usize {
        let previous_hole = previous_hole.filter(|&col| col < MATRIX_WIDTH);
        let mut hole = None;

        let chance = match previous_hole {
            None => FRESH_HOLE_CHANCE,
            Some(prev) => {
                if self.rng.next_unit() < same_column_rate {
                    hole = Some(prev);
                    0.0
                } else {
                    MOVED_HOLE_CHANCE
                }
            }
        };

        for col in 0..MATRIX_WIDTH - 1 {
            if hole.is_some() {
                break;
            }
            if Some(col) == previous_hole {
                continue;
            }
            if self.rng.next_unit() < chance {
                hole = Some(col);
            }
        }

        let fallback = if previous_hole == Some(MATRIX_WIDTH - 1) {
            MATRIX_WIDTH - 2
        } else {
            MATRIX_WIDTH - 1
        };
        let hole = hole.unwrap_or(fallback);

        self.lift_overlay();
        let bottom = self.matrix.push_up();
        bottom.fill(Cell::placed(GARBAGE_COLOR));
        bottom[hole] = Cell::EMPTY;
        self.draw_overlay();

        debug!(hole, ?previous_hole, "garbage row");
        hole
    }

    // ---- collision ----

    /// True if `piece` at `position` stays inside the matrix and off placed blocks
    pub fn piece_collision_check(&self, piece: &Piece, position: Position) -> bool {
        piece.cells().all(|(row, col, _)| {
            self.matrix
                .is_free(position.matrix_row(row), position.matrix_col(col))
        })
    }

    /// Lowest row the piece reaches falling straight down from `position`
    pub fn lowest_free_space(&self, piece: &Piece, position: Position) -> i32 {
        let floor = -(piece.row_offset() as i32);
        let mut resting = position.row;
        let mut row = position.row;
        while row >= floor && self.piece_collision_check(piece, Position::new(row, position.column))
        {
            resting = row;
            row -= 1;
        }
        resting
    }

    fn fits(&self, position: Position) -> bool {
        self.piece_collision_check(&self.active, position)
    }

    fn resting_row(&self) -> i32 {
        self.lowest_free_space(&self.active, self.position)
    }

    // ---- movement ----

    /// Move the active piece one column left; false if blocked
    pub fn move_left(&mut self) -> bool {
        self.shift(-1)
    }

    /// Move the active piece one column right; false if blocked
    pub fn move_right(&mut self) -> bool {
        self.shift(1)
    }

    fn shift(&mut self, dx: i32) -> bool {
        if self.topped_out || !self.step_sideways(dx) {
            return false;
        }
        self.register_move();
        self.draw_overlay();
        true
    }

    fn step_sideways(&mut self, dx: i32) -> bool {
        let target = self.position.offset(dx, 0);
        if !self.fits(target) {
            return false;
        }
        self.position = target;
        true
    }

    /// Lateral moves restart the lock timer and count against the move cap
    fn register_move(&mut self) {
        if self.locking {
            self.lock_moves += 1;
        }
        self.lock_time = 0.0;
    }

    /// Left held for another `elapsed` seconds
    pub fn left_pressed(&mut self, elapsed: f32) {
        if self.topped_out {
            return;
        }
        self.left_count += f64::from(elapsed);
        self.left_count = self.auto_shift(self.left_count, -1);
    }

    /// Right held for another `elapsed` seconds
    pub fn right_pressed(&mut self, elapsed: f32) {
        if self.topped_out {
            return;
        }
        self.right_count += f64::from(elapsed);
        self.right_count = self.auto_shift(self.right_count, 1);
    }

    /// Apply DAS/ARR to a direction counter and return what is left of it
    fn auto_shift(&mut self, mut count: f64, dx: i32) -> f64 {
        let das = f64::from(self.tunables.das);
        let arr = f64::from(self.tunables.arr);
        if count + TIME_EPSILON < das {
            return count;
        }

        if arr <= 0.0 {
            let mut moved = false;
            while self.step_sideways(dx) {
                moved = true;
            }
            if moved {
                self.register_move();
                self.draw_overlay();
            }
            return count;
        }

        while count - das + TIME_EPSILON >= arr {
            self.shift(dx);
            count -= arr;
        }
        count
    }

    /// Reset the counter of a released key
    ///
    /// Only the held actions (left, right, soft drop) have counters.
    pub fn unpressed_key(&mut self, action: GameAction) -> Result<(), RulesError> {
        match action {
            GameAction::MoveLeft => self.left_count = 0.0,
            GameAction::MoveRight => self.right_count = 0.0,
            GameAction::SoftDrop => self.drop_count = 0.0,
            other => return Err(RulesError::InvalidRelease(other)),
        }
        Ok(())
    }

    /// Soft drop held for another `elapsed` seconds
    pub fn soft_drop(&mut self, elapsed: f32) {
        if self.topped_out {
            return;
        }
        self.drop_count += f64::from(elapsed);

        let interval = f64::from(self.tunables.soft_drop_interval);
        if interval <= 0.0 {
            self.position.row = self.resting_row();
        } else {
            while self.drop_count + TIME_EPSILON >= interval {
                self.step_down();
                self.drop_count -= interval;
            }
        }
        self.draw_overlay();
    }

    /// Move one row down unless resting
    fn step_down(&mut self) -> bool {
        let target = self.position.offset(0, -1);
        if !self.fits(target) {
            return false;
        }
        self.position = target;
        true
    }

    /// Place the active piece at its resting row and spawn the next one
    ///
    /// A rejected line clear still spawns the next piece and leaves the full
    /// rows in place before the error is returned.
    pub fn hard_drop(&mut self) -> Result<(), RulesError> {
        if self.topped_out {
            return Ok(());
        }

        self.reset_lock();
        self.gravity_count = 0.0;
        self.just_held = false;

        let landing = Position::new(self.resting_row(), self.position.column);
        self.lift_overlay();
        for (row, col, color) in self.active.cells() {
            self.matrix.set(
                landing.matrix_row(row),
                landing.matrix_col(col),
                Cell::placed(color),
            );
        }
        self.pieces_locked += 1;
        debug!(kind = ?self.active.kind(), row = landing.row, column = landing.column, "piece locked");

        let cleared = self.clear_lines();
        self.next_piece();

        self.topped_out = self.check_top_out();
        if self.topped_out {
            debug!(pieces = self.pieces_locked, "topped out");
        }
        self.draw_overlay();
        cleared.map(|_| ())
    }

    /// Apply `elapsed` seconds of gravity and lock delay
    ///
    /// A piece resting on its lowest row accumulates lock time; reaching
    /// the lock time or move threshold forces a hard drop.
    pub fn gravitate(&mut self, elapsed: f32) -> Result<(), RulesError> {
        if self.topped_out {
            return Ok(());
        }
        self.gravity_count += f64::from(elapsed);

        let interval = f64::from(self.tunables.gravity_interval);
        if interval <= 0.0 {
            self.position.row = self.resting_row();
            self.gravity_count = 0.0;
        } else {
            while self.gravity_count > interval + TIME_EPSILON {
                self.step_down();
                self.gravity_count -= interval;
            }
        }

        if self.position.row == self.resting_row() {
            self.locking = true;
            self.lock_time += f64::from(elapsed);
        }

        if self.lock_time + TIME_EPSILON >= f64::from(self.tunables.lock_time_threshold)
            || self.lock_moves >= self.tunables.lock_move_threshold
        {
            debug!(lock_time = self.lock_time, lock_moves = self.lock_moves, "lock delay expired");
            return self.hard_drop();
        }

        self.draw_overlay();
        Ok(())
    }

    fn reset_lock(&mut self) {
        self.locking = false;
        self.lock_time = 0.0;
        self.lock_moves = 0;
    }

    // ---- rotation ----

    /// Rotate by 90, -90 or 180 degrees clockwise
    pub fn rotate_degrees(&mut self, degrees: i32) -> Result<bool, RulesError> {
        let turn = Turn::from_degrees(degrees).ok_or(RulesError::InvalidRotation(degrees))?;
        Ok(self.rotate(turn))
    }

    /// Rotate with SRS kicks; false if every kick candidate collides
    pub fn rotate(&mut self, turn: Turn) -> bool {
        if self.topped_out {
            return false;
        }
        let Some(kind) = self.active.kind() else {
            return false;
        };

        let mut rotated = self.active.clone();
        rotated.rotate(turn);

        let kicks = kick_candidates(kind, self.active.rotation(), rotated.rotation());
        let Some((test, target)) = kicks
            .iter()
            .map(|&(dx, dy)| self.position.offset(dx, dy))
            .enumerate()
            .find(|&(_, target)| self.piece_collision_check(&rotated, target))
        else {
            trace!(?kind, ?turn, "rotation blocked");
            return false;
        };

        trace!(?kind, ?turn, test, row = target.row, column = target.column, "rotation kick");
        self.active = rotated;
        self.position = target;
        if self.locking {
            self.lock_moves += 1;
        }
        self.draw_overlay();
        true
    }

    // ---- placement outcome ----

    /// True if the active piece's spawn footprint is blocked
    ///
    /// Checks the footprint columns on the top-out row, and whether the
    /// active piece fits where it stands.
    pub fn check_top_out(&self) -> bool {
        let width = self.active.width();
        let start = (MATRIX_WIDTH - width) / 2;
        let footprint_blocked = (start..start + width).any(|col| {
            self.matrix
                .get(TOP_OUT_ROW as i32, col as i32)
                .is_some_and(|cell| cell.is_placed())
        });
        footprint_blocked || !self.fits(self.position)
    }

    /// Remove every full row, scoring each one; returns the rows cleared
    pub fn clear_lines(&mut self) -> Result<usize, RulesError> {
        self.lift_overlay();
        let result = self.clear_full_rows();
        self.draw_overlay();
        result
    }

    fn clear_full_rows(&mut self) -> Result<usize, RulesError> {
        let mut cleared = 0;
        for row in 0..MATRIX_HEIGHT {
            if !self.matrix.is_row_full(row) {
                continue;
            }
            self.objective.record_clear(self.matrix.row(row))?;
            self.matrix.remove_row(row);
            cleared += 1;
        }
        if cleared > 0 {
            debug!(
                cleared,
                score = self.objective.score(),
                target = self.objective.target(),
                "lines cleared"
            );
        }
        Ok(cleared)
    }

    /// Clear full rows and redraw the overlay after external matrix edits
    pub fn refresh(&mut self) -> Result<usize, RulesError> {
        self.clear_lines()
    }

    // ---- overlay ----

    fn lift_overlay(&mut self) {
        for (row, col) in self.overlay.drain(..) {
            if let Some(cell) = self.matrix.get(row, col) {
                if !cell.is_placed() {
                    self.matrix.set(row, col, Cell::EMPTY);
                }
            }
        }
    }

    fn draw_overlay(&mut self) {
        self.lift_overlay();
        if self.active.is_blank() {
            return;
        }
        let shadow = Position::new(self.resting_row(), self.position.column);
        self.paint(shadow, Cell::shadow);
        self.paint(self.position, Cell::active);
    }

    /// Draw the active piece at `position`, never over placed blocks
    fn paint(&mut self, position: Position, cell: fn(ColorId) -> Cell) {
        for (row, col, color) in self.active.cells() {
            let (row, col) = (position.matrix_row(row), position.matrix_col(col));
            if !self.matrix.is_free(row, col) {
                continue;
            }
            self.matrix.set(row, col, cell(color));
            if !self.overlay.contains(&(row, col)) {
                self.overlay.push((row, col));
            }
        }
    }

    /// Copy the visible rows and side panels out for presentation
    pub fn snapshot(&self) -> BoardSnapshot {
        let first = MATRIX_HEIGHT - VISIBLE_ROWS;
        let mut cells = [[Cell::EMPTY; MATRIX_WIDTH]; VISIBLE_ROWS];
        for (i, row) in cells.iter_mut().enumerate() {
            row.copy_from_slice(self.matrix.row(first + i));
        }
        BoardSnapshot {
            cells,
            mode: self.objective.mode(),
            score: self.objective.score(),
            target: self.objective.target(),
            topped_out: self.topped_out,
            active: self.active.kind(),
            hold: self.hold.kind(),
            next: self.next,
            can_hold: !self.just_held,
            pieces_locked: self.pieces_locked,
        }
    }
}
