//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! Everything here is plain data: directions, board positions, the per-line and
//! board-space action records produced by the move resolver, and the actions a
//! player (or the helper) can request.
//!
//! # Board Dimensions
//!
//! The playable board is 4x4. The engine itself is generic over the board size,
//! [`BOARD_SIZE`] only fixes the size used by the game session and the UI.
//!
//! # Spawn Policy Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SPAWN_TWO_PROBABILITY` | 0.9 | Chance that a spawned tile is a 2 |
//! | `SPAWN_LOW_VALUE` | 2 | Common spawn value |
//! | `SPAWN_HIGH_VALUE` | 4 | Rare spawn value |
//! | `INITIAL_TILES` | 2 | Tiles placed on a fresh board |
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval of the terminal loop (~60 FPS) |
//! | `SLIDE_ANIMATION_MS` | 120 | Duration of the slide/merge animation |
//!
//! # Action Stream
//!
//! [`Action`] serializes to the JSON shape consumed by animation drivers:
//!
//! ```
//! use tui_2048_types::{Action, Position};
//!
//! let merge = Action::Merge {
//!     line: 0,
//!     stay: Position::new(0, 0),
//!     absorbed: Position::new(0, 1),
//!     to: Position::new(0, 0),
//!     value: 4,
//! };
//! let json = serde_json::to_string(&merge).unwrap();
//! assert!(json.starts_with(r#"{"type":"merge","line":0"#));
//! ```

use serde::{Deserialize, Serialize};

/// Side length of the playable board (4x4)
pub const BOARD_SIZE: usize = 4;

/// Largest tile value the engine accepts (2^31). Two tiles of this value never merge.
pub const MAX_TILE: u32 = 1 << 31;

/// Probability that a spawned tile is [`SPAWN_LOW_VALUE`]
pub const SPAWN_TWO_PROBABILITY: f64 = 0.9;

/// Value of a common spawn
pub const SPAWN_LOW_VALUE: u32 = 2;

/// Value of a rare spawn
pub const SPAWN_HIGH_VALUE: u32 = 4;

/// Number of tiles placed on a freshly started board
pub const INITIAL_TILES: usize = 2;

/// Fixed frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Default duration of the slide/merge animation
pub const SLIDE_ANIMATION_MS: u32 = 120;

/// The four slide directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in the order the auto-move helper evaluates them.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Parse a direction (case-insensitive, full name only)
    ///
    /// Single letters are not accepted: the key map binds `d` to Right and `r`
    /// to restart.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("left"), Some(Direction::Left));
    /// assert_eq!(Direction::from_str("UP"), Some(Direction::Up));
    /// assert_eq!(Direction::from_str("sideways"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Lines run along columns (board is read transposed).
    pub fn is_vertical(&self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Lines are read back to front before sliding toward index 0.
    pub fn is_reversed(&self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }

    /// The direction pointing the other way
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// A cell coordinate on the board (row 0 is the top, col 0 is the left edge)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Effect of resolving a single line, in line-local indices.
///
/// Index 0 is the end of the line tiles slide toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineAction {
    /// A tile shifted without merging.
    Move { from: usize, to: usize, value: u32 },
    /// Two tiles combined. `stay` is the tile nearer the wall, `absorbed` the one
    /// that slid into it; `value` is the resulting (doubled) value.
    Merge {
        stay: usize,
        absorbed: usize,
        to: usize,
        value: u32,
    },
}

impl LineAction {
    /// Destination index within the line
    pub fn to(&self) -> usize {
        match *self {
            LineAction::Move { to, .. } | LineAction::Merge { to, .. } => to,
        }
    }
}

/// Effect of a move on the board, in board coordinates.
///
/// `line` is the row (Left/Right) or column (Up/Down) the action belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    Move {
        line: usize,
        from: Position,
        to: Position,
        value: u32,
    },
    Merge {
        line: usize,
        stay: Position,
        absorbed: Position,
        to: Position,
        value: u32,
    },
}

impl Action {
    pub fn line(&self) -> usize {
        match *self {
            Action::Move { line, .. } | Action::Merge { line, .. } => line,
        }
    }

    /// Cell the tile(s) end up in
    pub fn to(&self) -> Position {
        match *self {
            Action::Move { to, .. } | Action::Merge { to, .. } => to,
        }
    }

    /// Value sitting at [`Action::to`] once the action is applied
    pub fn value(&self) -> u32 {
        match *self {
            Action::Move { value, .. } | Action::Merge { value, .. } => value,
        }
    }

    pub fn is_merge(&self) -> bool {
        matches!(self, Action::Merge { .. })
    }
}

/// Player-facing requests, produced by key mapping and consumed by the session loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Slide the board
    Slide(Direction),
    /// Play the auto-move helper's suggestion
    Assist,
    /// Start over with a fresh board
    Restart,
}

impl GameAction {
    /// Parse an action name (`up`, `down`, `left`, `right`, `assist`, `restart`)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::{Direction, GameAction};
    ///
    /// assert_eq!(GameAction::from_str("Left"), Some(GameAction::Slide(Direction::Left)));
    /// assert_eq!(GameAction::from_str("restart"), Some(GameAction::Restart));
    /// assert_eq!(GameAction::from_str("undo"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "assist" | "help" => Some(GameAction::Assist),
            "restart" => Some(GameAction::Restart),
            other => Direction::from_str(other).map(GameAction::Slide),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Slide(dir) => dir.as_str(),
            GameAction::Assist => "assist",
            GameAction::Restart => "restart",
        }
    }
}
