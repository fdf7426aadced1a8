//! Auto-move helper - greedy one-ply suggestion
//!
//! Tries every direction on the current board (no spawn) and picks the one with
//! the largest score gain; ties go to the direction leaving more empty cells,
//! then to the earlier direction in [`Direction::ALL`].

use crate::board::Board;
use crate::resolve::resolve_board;
use crate::types::Direction;

/// What a single direction would achieve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub direction: Direction,
    pub score_gain: u64,
    pub empty_cells: usize,
}

/// Evaluate one direction; `None` if it would not change the board.
pub fn evaluate<const N: usize>(board: &Board<N>, direction: Direction) -> Option<Evaluation> {
    let res = resolve_board(board, direction);
    res.moved.then(|| Evaluation {
        direction,
        score_gain: res.score_gain,
        empty_cells: res.board.empty_count(),
    })
}

/// Suggest a direction, or `None` when no move changes the board.
pub fn best_move<const N: usize>(board: &Board<N>) -> Option<Direction> {
    let mut best: Option<Evaluation> = None;
    for dir in Direction::ALL {
        let Some(eval) = evaluate(board, dir) else {
            continue;
        };
        let better = match best {
            None => true,
            Some(b) => {
                eval.score_gain > b.score_gain
                    || (eval.score_gain == b.score_gain && eval.empty_cells > b.empty_cells)
            }
        };
        if better {
            best = Some(eval);
        }
    }
    best.map(|e| e.direction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_highest_score() {
        // Vertical merges the 4s (+8), horizontal only the 2s (+4).
        let board = Board::<4>::from_rows([[2, 2, 0, 4], [0, 0, 0, 4], [0; 4], [0; 4]]).unwrap();
        let dir = best_move(&board).unwrap();
        assert!(dir.is_vertical(), "expected a vertical move, got {:?}", dir);
    }

    #[test]
    fn test_tie_prefers_earlier_direction() {
        // Up and Down both merge the column for +4 and leave the same empties.
        let board = Board::<4>::from_rows([[2, 0, 0, 0], [2, 0, 0, 0], [0; 4], [0; 4]]).unwrap();
        assert_eq!(best_move(&board), Some(Direction::Up));
    }

    #[test]
    fn test_tie_on_score_prefers_more_empty_cells() {
        // Every direction scores +8; vertical needs one merge, horizontal two.
        let board = Board::<4>::from_rows([[4, 0, 0, 0], [4, 0, 0, 0], [0; 4], [2, 2, 2, 2]])
            .unwrap();
        assert_eq!(evaluate(&board, Direction::Up).unwrap().empty_cells, 11);
        assert_eq!(evaluate(&board, Direction::Left).unwrap().empty_cells, 12);
        assert_eq!(best_move(&board), Some(Direction::Left));
    }

    #[test]
    fn test_terminal_board_has_no_suggestion() {
        let board = Board::<2>::from_rows([[2, 4], [4, 2]]).unwrap();
        assert_eq!(best_move(&board), None);
        assert!(Direction::ALL.iter().all(|&d| evaluate(&board, d).is_none()));
    }
}
