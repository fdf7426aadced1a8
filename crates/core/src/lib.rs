//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the 2048 move rules and the game lifecycle. It has no
//! dependencies on the terminal or any other I/O, so the same code drives the
//! interactive game, the `resolve` oracle and the benchmarks.
//!
//! # Module Structure
//!
//! - [`board`]: N x N board of tile values with the terminal-state checks
//! - [`line`]: the slide-and-merge resolver for a single line
//! - [`resolve`]: direction adapter mapping the four directions onto [`line`]
//! - [`spawn`]: random tile placement after an accepted move
//! - [`game_state`]: move orchestration (resolve, score, spawn, terminal check)
//! - [`helper`]: greedy one-ply move suggestion
//! - [`session`]: lifecycle phases and the busy flag
//! - [`snapshot`]: plain copy of a session for rendering
//!
//! # Move Rules
//!
//! - Tiles slide as far as possible toward the chosen side.
//! - Two equal tiles that become adjacent merge once per move; the tile closer
//!   to the destination side merges first, so `[2, 2, 2, 0]` left is `[4, 2, 0, 0]`.
//! - A merged tile does not merge again in the same move.
//! - The score gain of a move is the sum of the merged values.
//! - A move that changes nothing is not a move: no spawn, no score.
//!
//! # Example
//!
//! ```
//! use tui_2048_core::{resolve_board, Grid};
//! use tui_2048_types::Direction;
//!
//! let board = Grid::from_rows([[2, 2, 2, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
//! let result = resolve_board(&board, Direction::Left);
//!
//! assert!(result.moved);
//! assert_eq!(result.board.rows()[0], [4, 2, 0, 0]);
//! assert_eq!(result.score_gain, 4);
//! ```

pub mod board;
pub mod error;
pub mod game_state;
pub mod helper;
pub mod line;
pub mod resolve;
pub mod session;
pub mod snapshot;
pub mod spawn;

pub use tui_2048_types as types;

// Re-export commonly used types for convenience
pub use board::{is_valid_tile, Board, Grid};
pub use error::InvalidBoardShape;
pub use game_state::{spawn_and_check, GameState, Transition};
pub use helper::{best_move, evaluate, Evaluation};
pub use line::{resolve_line, LineResolution};
pub use resolve::{extract_line, locate, resolve_board, MoveResult};
pub use session::{InFlight, Phase, Rejected, Session};
pub use snapshot::GameSnapshot;
pub use spawn::{spawn_tile, spawn_value, Spawn};
