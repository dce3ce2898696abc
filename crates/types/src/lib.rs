//! Core types module - shared data structures and constants
//!
//! This module defines the vocabulary shared by the rules engine, the frame
//! driver and any presentation layer. All types are plain data with no
//! external dependencies.
//!
//! # Matrix Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 40 rows (indexed 0-39, top to bottom)
//! - Rows 0-19 are an off-screen buffer, rows 20-39 are the playfield
//! - Snapshots expose 21 rows (19-39) so the spawn row peeks into view
//!
//! # Timing Defaults
//!
//! Tunables are authored in frames at a fixed 60 frames per second and
//! stored in seconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_GRAVITY` | 1/64 G | Cells fallen per frame |
//! | `DEFAULT_DAS_FRAMES` | 8 | Delay before auto-repeat starts |
//! | `DEFAULT_ARR_FRAMES` | 1 | Interval between auto-repeats |
//! | `DEFAULT_SOFT_DROP_FRAMES` | 3 | Interval between soft drop steps |
//! | `LOCK_TIME_THRESHOLD` | 0.5 s | Grounded time before a forced drop |
//! | `LOCK_MOVE_THRESHOLD` | 15 | Moves/rotations while locking before a forced drop |
//!
//! # Examples
//!
//! ```
//! use srs_tetris_types::{GameMode, PieceKind, Rotation, Turn, MATRIX_HEIGHT};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Rotation::North.turned(Turn::Cw), Rotation::East);
//! assert_eq!(Turn::from_degrees(180), Some(Turn::Half));
//! assert_eq!(GameMode::from_str("cheese"), Some(GameMode::Cheese));
//! assert_eq!(MATRIX_HEIGHT, 40);
//! ```

/// Matrix width in cells (10 columns)
pub const MATRIX_WIDTH: usize = 10;

/// Matrix height in cells, buffer included (40 rows)
pub const MATRIX_HEIGHT: usize = 40;

/// First matrix row of the visible playfield
pub const PLAYFIELD_TOP: usize = 20;

/// Number of rows published in snapshots (rows 19-39)
pub const VISIBLE_ROWS: usize = 21;

/// Matrix row checked for top-out after every placement
pub const TOP_OUT_ROW: usize = 18;

/// Side length of a piece template
pub const TEMPLATE_SIZE: usize = 4;

/// Number of upcoming pieces kept in the next queue
pub const NEXT_QUEUE_LEN: usize = 6;

/// Frames per second used to convert frame-unit tunables into seconds
pub const FRAMES_PER_SECOND: f32 = 60.0;

/// Default gravity in cells per frame (1/64 G)
pub const DEFAULT_GRAVITY: f32 = 1.0 / 64.0;

/// Delayed auto shift in frames
pub const DEFAULT_DAS_FRAMES: f32 = 8.0;

/// Auto repeat rate in frames
pub const DEFAULT_ARR_FRAMES: f32 = 1.0;

/// Soft drop interval in frames
pub const DEFAULT_SOFT_DROP_FRAMES: f32 = 3.0;

/// Seconds a grounded piece may rest before it is dropped
pub const LOCK_TIME_THRESHOLD: f32 = 0.5;

/// Moves and rotations allowed while locking before the piece is dropped
pub const LOCK_MOVE_THRESHOLD: u32 = 15;

/// Cheese rows generated when no count is given
pub const DEFAULT_CHEESE_ROWS: u32 = 10;

/// Colour id of garbage cells
pub const GARBAGE_COLOR: ColorId = 0;

/// Sentinel colour id reported for empty cells
pub const EMPTY_COLOR_ID: i8 = -1;

/// Sprite colour index of a block (0 = garbage gray, 1-7 = piece colours)
pub type ColorId = u8;

/// The seven tetromino piece kinds
///
/// Each piece has a distinct sprite colour:
/// - **I**: light blue, long bar
/// - **J**: blue
/// - **L**: orange
/// - **O**: yellow, 2x2 square
/// - **S**: green
/// - **Z**: red
/// - **T**: magenta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    Z,
    T,
}

impl PieceKind {
    /// Every kind, in randomizer draw order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use srs_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "t" => Some(PieceKind::T),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::T => "t",
        }
    }

    /// Index into per-kind lookup tables
    pub fn index(self) -> usize {
        self as usize
    }

    /// Sprite colour of this kind's blocks
    pub fn color(self) -> ColorId {
        match self {
            PieceKind::Z => 1,
            PieceKind::L => 2,
            PieceKind::O => 3,
            PieceKind::S => 4,
            PieceKind::I => 5,
            PieceKind::J => 6,
            PieceKind::T => 7,
        }
    }
}

/// Rotation states, named by where the spawn-orientation top points
///
/// - **North**: spawn orientation (0°)
/// - **East**: 90° clockwise ("R")
/// - **South**: 180°
/// - **West**: 90° counter-clockwise ("L", stored as -90°)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotation in degrees, normalized into {-90, 0, 90, 180}
    pub fn degrees(self) -> i32 {
        match self {
            Rotation::North => 0,
            Rotation::East => 90,
            Rotation::South => 180,
            Rotation::West => -90,
        }
    }

    /// Apply a turn, wrapping through ±360
    pub fn turned(self, turn: Turn) -> Self {
        let mut deg = self.degrees() + turn.degrees();
        if deg < -90 {
            deg += 360;
        }
        if deg > 180 {
            deg -= 360;
        }
        match deg {
            0 => Rotation::North,
            90 => Rotation::East,
            180 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// The turn that reaches this state from North, if any
    pub fn from_north(self) -> Option<Turn> {
        Turn::from_degrees(self.degrees())
    }

    /// Table index (North, East, South, West)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// A requested rotation, clockwise-positive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    /// 90° clockwise
    Cw,
    /// 90° counter-clockwise
    Ccw,
    /// 180°
    Half,
}

impl Turn {
    /// Accepts exactly 90, -90 and 180
    pub fn from_degrees(deg: i32) -> Option<Self> {
        match deg {
            90 => Some(Turn::Cw),
            -90 => Some(Turn::Ccw),
            180 => Some(Turn::Half),
            _ => None,
        }
    }

    pub fn degrees(self) -> i32 {
        match self {
            Turn::Cw => 90,
            Turn::Ccw => -90,
            Turn::Half => 180,
        }
    }
}

/// Discrete inputs a driver can forward to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left (held: DAS/ARR)
    MoveLeft,
    /// Move piece one cell right (held: DAS/ARR)
    MoveRight,
    /// Move piece down at the soft drop rate while held
    SoftDrop,
    /// Drop and place the piece immediately
    HardDrop,
    RotateCw,
    RotateCcw,
    Rotate180,
    /// Swap with the hold slot (once per placement)
    Hold,
}

impl GameAction {
    /// Parse action from string (case-insensitive camelCase)
    ///
    /// # Examples
    ///
    /// ```
    /// use srs_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotate180"), Some(GameAction::Rotate180));
    /// assert_eq!(GameAction::from_str("pause"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "rotate180" => Some(GameAction::Rotate180),
            "hold" => Some(GameAction::Hold),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Rotate180 => "rotate180",
            GameAction::Hold => "hold",
        }
    }

    /// Rotation requested by this action, if it is one
    pub fn turn(self) -> Option<Turn> {
        match self {
            GameAction::RotateCw => Some(Turn::Cw),
            GameAction::RotateCcw => Some(Turn::Ccw),
            GameAction::Rotate180 => Some(Turn::Half),
            _ => None,
        }
    }
}

/// Game modes and their objectives
///
/// - **ScoreAttack**: timed mode; its scoring is not implemented
/// - **LineClear**: clear a target number of lines
/// - **Cheese**: dig through a number of garbage rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    ScoreAttack,
    LineClear,
    Cheese,
}

impl GameMode {
    /// Parse mode from string (case-insensitive, `-`/`_` tolerant)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(|c: char| c == '-' || c == '_', "").as_str() {
            "scoreattack" => Some(GameMode::ScoreAttack),
            "lineclear" => Some(GameMode::LineClear),
            "cheese" => Some(GameMode::Cheese),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::ScoreAttack => "score-attack",
            GameMode::LineClear => "line-clear",
            GameMode::Cheese => "cheese",
        }
    }
}

/// What occupies a matrix cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Empty,
    /// Locked into the stack (includes garbage)
    Placed,
    /// Part of the falling piece
    Active,
    /// Landing preview of the falling piece
    Shadow,
}
