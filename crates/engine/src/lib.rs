//! Frame driver for the rules engine
//!
//! Presentation layers poll their input devices, fill a [`FrameInput`] per
//! frame and hand it to [`FrameDriver::step`], which forwards the input to
//! the board in the order the rules require and reports when the game ends.
//!
//! # Example
//!
//! ```
//! use srs_tetris_core::{Board, BoardConfig};
//! use srs_tetris_engine::{FrameDriver, FrameInput, FrameOutcome};
//! use srs_tetris_types::GameAction;
//!
//! let mut board = Board::new(BoardConfig::line_clear(40));
//! let mut driver = FrameDriver::new();
//!
//! let input = FrameInput::new(1.0 / 60.0).press(GameAction::HardDrop);
//! let outcome = driver.step(&mut board, &input).unwrap();
//!
//! assert_eq!(outcome, FrameOutcome::Playing);
//! assert_eq!(board.pieces_locked(), 1);
//! ```

pub mod driver;

pub use srs_tetris_core as core;
pub use srs_tetris_types as types;

pub use driver::{apply_frame, FrameDriver, FrameInput, FrameOutcome, HeldKeys, MAX_PRESSES};
