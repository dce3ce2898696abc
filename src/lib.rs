//! SRS Tetris rules engine (workspace facade crate).
//!
//! Re-exports the member crates as `srs_tetris::{core, engine, types}` and
//! hosts the pieces of the headless simulator that are worth testing.

pub mod report;
pub mod sim;

pub use srs_tetris_core as core;
pub use srs_tetris_engine as engine;
pub use srs_tetris_types as types;
