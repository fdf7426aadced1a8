//! `resolve` oracle: one pure move over a JSON board.
//!
//! Input is a JSON array of rows (`[[2,2,0,0],[0,0,0,0],...]`). Square boards
//! from 2x2 to 8x8 are accepted. The output carries the moved flag, the board
//! after sliding (no spawn), the score gain and the action stream.

use anyhow::{bail, Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::{resolve_board, Board};
use crate::types::{Action, Direction};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveOutput {
    pub moved: bool,
    pub board: Vec<Vec<u32>>,
    pub score_gain: u64,
    pub actions: Vec<Action>,
}

/// Parse a board from JSON and resolve one move.
pub fn resolve_json(board_json: &str, direction: Direction) -> Result<ResolveOutput> {
    let rows: Vec<Vec<i64>> =
        serde_json::from_str(board_json).context("board must be a JSON array of integer rows")?;
    debug!("resolve {} on {}x{} board", direction.as_str(), rows.len(), rows.len());

    match rows.len() {
        2 => resolve_rows::<2>(&rows, direction),
        3 => resolve_rows::<3>(&rows, direction),
        4 => resolve_rows::<4>(&rows, direction),
        5 => resolve_rows::<5>(&rows, direction),
        6 => resolve_rows::<6>(&rows, direction),
        7 => resolve_rows::<7>(&rows, direction),
        8 => resolve_rows::<8>(&rows, direction),
        n => bail!("unsupported board size {n} (expected 2 to 8 rows)"),
    }
}

fn resolve_rows<const N: usize>(rows: &[Vec<i64>], direction: Direction) -> Result<ResolveOutput> {
    let board = Board::<N>::try_from_rows(rows)?;
    let result = resolve_board(&board, direction);
    Ok(ResolveOutput {
        moved: result.moved,
        board: result.board.to_rows(),
        score_gain: result.score_gain,
        actions: result.actions,
    })
}
