//! Error types for board construction.
//!
//! Resolution itself is total over well-formed boards. The only failure the core
//! reports is a caller handing it something that is not a board: wrong
//! dimensions, negative cells, or values that are not powers of two.

use thiserror::Error;

/// A board supplied from outside the engine failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidBoardShape {
    /// The board does not have exactly N rows.
    #[error("invalid board shape: expected {expected} rows, got {got}")]
    RowCount { expected: usize, got: usize },

    /// A row does not have exactly N cells.
    #[error("invalid board shape: row {row} has {got} cells, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        got: usize,
    },

    /// A cell is negative, not a power of two, or larger than the biggest tile.
    #[error("invalid board shape: cell ({row}, {col}) holds {value}, expected 0 or a power of two")]
    TileValue { row: usize, col: usize, value: i64 },
}
