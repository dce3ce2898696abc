//! Core rules module - pure, deterministic, and testable
//!
//! This crate contains the rules of the game: the matrix, pieces, rotation
//! with kicks, the randomizer, garbage, line clears, objectives and all
//! timing-driven transitions. It has no rendering, input polling or I/O.
//!
//! # Module Structure
//!
//! - [`board`]: the rules engine; owns the matrix, queues and timers
//! - [`piece`]: tetromino templates and template rotation
//! - [`kicks`]: SRS offset tables for generic pieces and the long bar
//! - [`matrix`]: 40x10 cell storage with row shifting
//! - [`rng`]: seeded random source and the 7-bag randomizer
//! - [`objective`]: per-mode scoring of cleared rows
//! - [`tunables`]: handling/timing configuration
//! - [`snapshot`]: read-only view for presentation layers
//! - [`error`]: rejected calls
//!
//! # Game Rules
//!
//! - **7-Bag Randomizer**: every kind appears once per seven draws
//! - **SRS Rotation**: five ordered kick tests per transition; the long bar
//!   has its own table
//! - **Lock Delay**: 0.5 s on the ground, reset by lateral moves, capped at
//!   15 moves/rotations
//! - **Hold**: once per placement
//! - **Modes**: line clear counts rows, cheese counts cleared garbage rows
//!
//! # Example
//!
//! ```
//! use srs_tetris_core::{Board, BoardConfig, Tunables};
//! use srs_tetris_types::Turn;
//!
//! let tunables = Tunables::default().with_soft_drop_frames(0.0);
//! let mut board = Board::new(BoardConfig::line_clear(40).with_tunables(tunables));
//!
//! board.move_right();
//! board.rotate(Turn::Cw);
//! board.hard_drop().unwrap();
//!
//! assert_eq!(board.pieces_locked(), 1);
//! assert_eq!(board.matrix().placed_count(), 4);
//! ```
//!
//! # Timing
//!
//! All per-frame entry points take elapsed seconds. Within a frame, apply
//! rotations and moves before `left_pressed`/`right_pressed`/`soft_drop`/
//! `gravitate`, because gravity may hard-drop the active piece.

pub mod board;
pub mod error;
pub mod kicks;
pub mod matrix;
pub mod objective;
pub mod piece;
pub mod rng;
pub mod snapshot;
pub mod tunables;

pub use srs_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Position};
pub use error::RulesError;
pub use kicks::kick_candidates;
pub use matrix::{Cell, Matrix};
pub use objective::Objective;
pub use piece::{rotate_shape, Piece, RotationArea, Shape};
pub use rng::{PieceBag, RandomSource, SimpleRng};
pub use snapshot::BoardSnapshot;
pub use tunables::{BoardConfig, Tunables};
