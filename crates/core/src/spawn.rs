//! Spawn policy - place a new tile after an accepted move
//!
//! A new tile goes to an empty cell chosen uniformly at random and is a 2 with
//! probability [`SPAWN_TWO_PROBABILITY`], otherwise a 4. The random source is
//! supplied by the caller so games are reproducible from a seed.

use log::trace;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::Board;
use crate::types::{Position, SPAWN_HIGH_VALUE, SPAWN_LOW_VALUE, SPAWN_TWO_PROBABILITY};

/// A tile placed by the spawn policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Spawn {
    pub pos: Position,
    pub value: u32,
}

/// Draw the value of the next spawned tile.
pub fn spawn_value<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    if rng.gen_bool(SPAWN_TWO_PROBABILITY) {
        SPAWN_LOW_VALUE
    } else {
        SPAWN_HIGH_VALUE
    }
}

/// Place one tile into a random empty cell.
///
/// Returns `None` (and leaves the board untouched) when the board is full.
pub fn spawn_tile<const N: usize, R: Rng + ?Sized>(
    board: &mut Board<N>,
    rng: &mut R,
) -> Option<Spawn> {
    let empty = board.empty_cells();
    let &pos = empty.choose(rng)?;
    let value = spawn_value(rng);
    board.put(pos, value);
    trace!("spawned {} at ({}, {})", value, pos.row, pos.col);
    Some(Spawn { pos, value })
}
