//! Board module - manages the tile grid
//!
//! The board is an N x N grid of tile values where 0 marks an empty cell.
//! Storage is a fixed-size array (no allocation, `Copy`), row-major.
//! Coordinates: (row, col) where row 0 is the top edge and col 0 the left edge.
//!
//! Every cell holds 0 or a power of two no larger than [`MAX_TILE`]. Boards built
//! from caller data go through [`Board::from_rows`] / [`Board::try_from_rows`],
//! which enforce that; the engine only writes values it derived itself.

use crate::error::InvalidBoardShape;
use crate::types::{Position, BOARD_SIZE, MAX_TILE};

/// The 4x4 board used by the game session.
pub type Grid = Board<BOARD_SIZE>;

/// An N x N board of tile values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board<const N: usize> {
    cells: [[u32; N]; N],
}

/// True for 0 (empty) and powers of two up to [`MAX_TILE`].
#[inline(always)]
pub fn is_valid_tile(value: u32) -> bool {
    value == 0 || (value.is_power_of_two() && value <= MAX_TILE)
}

impl<const N: usize> Board<N> {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [[0; N]; N],
        }
    }

    /// Build a board from rows, validating every cell.
    pub fn from_rows(rows: [[u32; N]; N]) -> Result<Self, InvalidBoardShape> {
        for (row, cells) in rows.iter().enumerate() {
            for (col, &value) in cells.iter().enumerate() {
                if !is_valid_tile(value) {
                    return Err(InvalidBoardShape::TileValue {
                        row,
                        col,
                        value: value as i64,
                    });
                }
            }
        }
        Ok(Self { cells: rows })
    }

    /// Build a board from untrusted, dynamically sized rows (e.g. parsed JSON).
    ///
    /// Rejects the wrong number of rows, ragged rows, negative values and values
    /// that are not powers of two.
    pub fn try_from_rows<R: AsRef<[i64]>>(rows: &[R]) -> Result<Self, InvalidBoardShape> {
        if rows.len() != N {
            return Err(InvalidBoardShape::RowCount {
                expected: N,
                got: rows.len(),
            });
        }

        let mut cells = [[0u32; N]; N];
        for (row, src) in rows.iter().enumerate() {
            let src = src.as_ref();
            if src.len() != N {
                return Err(InvalidBoardShape::RowLength {
                    row,
                    expected: N,
                    got: src.len(),
                });
            }
            for (col, &value) in src.iter().enumerate() {
                let tile = u32::try_from(value)
                    .ok()
                    .filter(|&v| is_valid_tile(v))
                    .ok_or(InvalidBoardShape::TileValue { row, col, value })?;
                cells[row][col] = tile;
            }
        }
        Ok(Self { cells })
    }

    /// Side length of the board
    pub fn size(&self) -> usize {
        N
    }

    /// Get the value at `pos`, `None` if out of bounds
    pub fn get(&self, pos: Position) -> Option<u32> {
        self.cells.get(pos.row).and_then(|r| r.get(pos.col)).copied()
    }

    /// In-bounds read for positions the engine computed itself.
    #[inline(always)]
    pub(crate) fn at(&self, pos: Position) -> u32 {
        self.cells[pos.row][pos.col]
    }

    /// In-bounds write for positions and values the engine computed itself.
    #[inline(always)]
    pub(crate) fn put(&mut self, pos: Position, value: u32) {
        debug_assert!(is_valid_tile(value));
        self.cells[pos.row][pos.col] = value;
    }

    /// Borrow the rows
    pub fn rows(&self) -> &[[u32; N]; N] {
        &self.cells
    }

    /// Copy the rows into nested vectors (for serialization)
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        self.cells.iter().map(|r| r.to_vec()).collect()
    }

    /// Positions of all empty cells, row-major order
    pub fn empty_cells(&self) -> Vec<Position> {
        self.positions().filter(|&p| self.at(p) == 0).collect()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&v| v == 0).count()
    }

    pub fn has_empty_cell(&self) -> bool {
        self.cells.iter().flatten().any(|&v| v == 0)
    }

    /// Check whether two horizontally or vertically adjacent tiles share a value
    pub fn has_adjacent_pair(&self) -> bool {
        for r in 0..N {
            for c in 0..N {
                let v = self.cells[r][c];
                if v == 0 || v >= MAX_TILE {
                    continue;
                }
                if c + 1 < N && self.cells[r][c + 1] == v {
                    return true;
                }
                if r + 1 < N && self.cells[r + 1][c] == v {
                    return true;
                }
            }
        }
        false
    }

    /// Terminal state: no empty cell and no adjacent equal tiles
    pub fn is_terminal(&self) -> bool {
        !self.has_empty_cell() && !self.has_adjacent_pair()
    }

    /// Sum of all tile values
    pub fn sum(&self) -> u64 {
        self.cells.iter().flatten().map(|&v| v as u64).sum()
    }

    /// Largest tile on the board (0 when empty)
    pub fn max_tile(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Swap rows and columns
    pub fn transpose(&self) -> Self {
        let mut out = Self::new();
        for r in 0..N {
            for c in 0..N {
                out.cells[c][r] = self.cells[r][c];
            }
        }
        out
    }

    /// Reverse every row (left-right reflection)
    pub fn mirror(&self) -> Self {
        let mut out = *self;
        for row in &mut out.cells {
            row.reverse();
        }
        out
    }

    /// Every position on the board, row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        (0..N).flat_map(|row| (0..N).map(move |col| Position::new(row, col)))
    }
}

impl<const N: usize> Default for Board<N> {
    fn default() -> Self {
        Self::new()
    }
}
