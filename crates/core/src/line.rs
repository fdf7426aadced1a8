//! Line resolver - slide and merge a single row or column
//!
//! Every direction is reduced to the same canonical problem: a line of N cells
//! where tiles slide toward index 0. [`resolve_line`] compacts the non-empty
//! cells, merges equal neighbours left to right (each tile merges at most once
//! per move), and records what happened to every tile that changed.
//!
//! Tile identity only exists for the duration of one call: each non-empty input
//! cell is tagged with its original index, and that tag is what the emitted
//! actions refer to.
//!
//! # Action rules
//!
//! - A tile that slides without merging yields one [`LineAction::Move`].
//! - Two tiles that merge yield one [`LineAction::Merge`] and nothing else; the
//!   tile nearer index 0 is `stay`, the other is `absorbed`.
//! - A tile that neither moves nor merges yields nothing.
//!
//! Actions are listed in the order the three phases would record them:
//!
//! 1. `Move`s for tiles the initial slide shifted (they keep that slot even if
//!    a later merge shifts them further),
//! 2. the first `Merge`, then `Move`s for tiles that only the gap closing
//!    behind it shifted,
//! 3. the remaining `Merge`s.
//!
//! ```
//! use tui_2048_core::line::resolve_line;
//! use tui_2048_core::types::LineAction;
//!
//! let res = resolve_line([2, 2, 2, 0]);
//! assert_eq!(res.line, [4, 2, 0, 0]);
//! assert_eq!(res.merge_score, 4);
//! assert_eq!(
//!     res.actions.as_slice(),
//!     &[
//!         LineAction::Merge { stay: 0, absorbed: 1, to: 0, value: 4 },
//!         LineAction::Move { from: 2, to: 1, value: 2 },
//!     ]
//! );
//! ```

use arrayvec::ArrayVec;

use crate::types::{LineAction, MAX_TILE};

/// Result of resolving one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineResolution<const N: usize> {
    /// The line after sliding and merging
    pub line: [u32; N],
    /// One entry per tile that moved or merged; at most N
    pub actions: ArrayVec<LineAction, N>,
    /// Sum of the values produced by merges
    pub merge_score: u64,
}

impl<const N: usize> LineResolution<N> {
    /// Whether any tile in the line changed position or value
    pub fn moved(&self) -> bool {
        !self.actions.is_empty()
    }
}

/// A non-empty input cell, tagged with where it came from.
#[derive(Debug, Clone, Copy)]
struct Tagged {
    origin: usize,
    value: u32,
}

#[inline(always)]
fn can_merge(a: u32, b: u32) -> bool {
    a == b && a < MAX_TILE
}

/// Slide a line toward index 0, merging equal neighbours once.
pub fn resolve_line<const N: usize>(input: [u32; N]) -> LineResolution<N> {
    // Slide: the compacted order is just the non-zero cells in input order.
    let tiles: ArrayVec<Tagged, N> = input
        .iter()
        .enumerate()
        .filter(|&(_, &value)| value != 0)
        .map(|(origin, &value)| Tagged { origin, value })
        .collect();

    let mut line = [0u32; N];
    let mut slid: ArrayVec<LineAction, N> = ArrayVec::new();
    let mut resettled: ArrayVec<LineAction, N> = ArrayVec::new();
    let mut merges: ArrayVec<LineAction, N> = ArrayVec::new();
    let mut merge_score = 0u64;

    // Merge: `to` is the next free slot, so closing the gap after a merge is
    // implicit; every tile is placed once at its final index. A tile whose
    // compacted index `i` equals its origin was not shifted by the slide.
    let mut to = 0;
    let mut i = 0;
    while i < tiles.len() {
        let tile = tiles[i];
        match tiles.get(i + 1) {
            Some(next) if can_merge(tile.value, next.value) => {
                let value = tile.value * 2;
                line[to] = value;
                merge_score += value as u64;
                merges.push(LineAction::Merge {
                    stay: tile.origin,
                    absorbed: next.origin,
                    to,
                    value,
                });
                i += 2;
            }
            _ => {
                line[to] = tile.value;
                if tile.origin != to {
                    let action = LineAction::Move {
                        from: tile.origin,
                        to,
                        value: tile.value,
                    };
                    if tile.origin != i {
                        slid.push(action);
                    } else {
                        resettled.push(action);
                    }
                }
                i += 1;
            }
        }
        to += 1;
    }

    // Each tile appears in at most one action, so the total fits in N.
    let mut actions = slid;
    let mut merges = merges.into_iter();
    actions.extend(merges.next());
    actions.extend(resettled);
    actions.extend(merges);

    LineResolution {
        line,
        actions,
        merge_score,
    }
}
