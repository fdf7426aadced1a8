//! Direction adapter - resolve a whole board in one direction
//!
//! All four directions go through the same [`resolve_line`]. The only thing that
//! differs per direction is how a line is read out of the board and written
//! back, which is captured by [`locate`]:
//!
//! | Direction | line k, index i → cell |
//! |-----------|------------------------|
//! | Left | (k, i) |
//! | Right | (k, N-1-i) |
//! | Up | (i, k) |
//! | Down | (N-1-i, k) |
//!
//! Lines are processed in order k = 0..N, so rows are visited top to bottom and
//! columns left to right. The action stream preserves that order.

use log::debug;

use crate::board::Board;
use crate::line::resolve_line;
use crate::types::{Action, Direction, LineAction, Position};

/// Outcome of sliding a board in one direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult<const N: usize> {
    /// True iff at least one tile moved or merged
    pub moved: bool,
    /// The board after sliding (no spawn applied)
    pub board: Board<N>,
    /// Sum of all merge results
    pub score_gain: u64,
    /// Per-tile actions in board coordinates, line by line
    pub actions: Vec<Action>,
}

/// Board position of index `idx` on line `line` when sliding toward `dir`.
#[inline(always)]
pub fn locate<const N: usize>(dir: Direction, line: usize, idx: usize) -> Position {
    let along = if dir.is_reversed() { N - 1 - idx } else { idx };
    if dir.is_vertical() {
        Position::new(along, line)
    } else {
        Position::new(line, along)
    }
}

/// Read line `line` in canonical (slide toward index 0) orientation.
pub fn extract_line<const N: usize>(board: &Board<N>, dir: Direction, line: usize) -> [u32; N] {
    std::array::from_fn(|i| board.at(locate::<N>(dir, line, i)))
}

fn inject_line<const N: usize>(
    board: &mut Board<N>,
    dir: Direction,
    line: usize,
    cells: &[u32; N],
) {
    for (i, &value) in cells.iter().enumerate() {
        board.put(locate::<N>(dir, line, i), value);
    }
}

fn to_board_action<const N: usize>(dir: Direction, line: usize, action: LineAction) -> Action {
    let at = |idx| locate::<N>(dir, line, idx);
    match action {
        LineAction::Move { from, to, value } => Action::Move {
            line,
            from: at(from),
            to: at(to),
            value,
        },
        LineAction::Merge {
            stay,
            absorbed,
            to,
            value,
        } => Action::Merge {
            line,
            stay: at(stay),
            absorbed: at(absorbed),
            to: at(to),
            value,
        },
    }
}

/// Slide every line of `board` toward `dir`.
///
/// Pure: the input board is not modified. When nothing moves, the returned
/// board equals the input, the score gain is 0 and there are no actions.
pub fn resolve_board<const N: usize>(board: &Board<N>, dir: Direction) -> MoveResult<N> {
    let mut out = Board::new();
    let mut actions = Vec::new();
    let mut score_gain = 0u64;
    let mut moved = false;

    for line in 0..N {
        let res = resolve_line(extract_line(board, dir, line));
        moved |= res.moved();
        score_gain += res.merge_score;
        inject_line(&mut out, dir, line, &res.line);
        actions.extend(
            res.actions
                .iter()
                .map(|&a| to_board_action::<N>(dir, line, a)),
        );
    }

    if moved {
        debug!(
            "resolved {}: {} action(s), +{}",
            dir.as_str(),
            actions.len(),
            score_gain
        );
    }

    MoveResult {
        moved,
        board: out,
        score_gain,
        actions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Grid;

    fn grid(rows: [[u32; 4]; 4]) -> Grid {
        Grid::from_rows(rows).unwrap()
    }

    #[test]
    fn test_locate_covers_each_cell_once() {
        for dir in Direction::ALL {
            let mut hits = [[0u8; 4]; 4];
            for line in 0..4 {
                for i in 0..4 {
                    let p = locate::<4>(dir, line, i);
                    hits[p.row][p.col] += 1;
                }
            }
            assert_eq!(hits, [[1; 4]; 4], "{:?}", dir);
        }
    }

    #[test]
    fn test_left_end_to_end() {
        let board = grid([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let res = resolve_board(&board, Direction::Left);
        assert!(res.moved);
        assert_eq!(res.score_gain, 4);
        assert_eq!(res.board.rows(), &[[4, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(
            res.actions,
            vec![Action::Merge {
                line: 0,
                stay: Position::new(0, 0),
                absorbed: Position::new(0, 1),
                to: Position::new(0, 0),
                value: 4,
            }]
        );
    }

    #[test]
    fn test_right_reflects_indices() {
        let board = grid([[0; 4], [2, 0, 2, 4], [0; 4], [0; 4]]);
        let res = resolve_board(&board, Direction::Right);
        assert_eq!(res.board.rows()[1], [0, 0, 4, 4]);
        assert_eq!(
            res.actions,
            vec![Action::Merge {
                line: 1,
                stay: Position::new(1, 2),
                absorbed: Position::new(1, 0),
                to: Position::new(1, 2),
                value: 4,
            }]
        );
    }

    #[test]
    fn test_up_uses_columns() {
        let board = grid([[0, 0, 0, 0], [0, 0, 0, 2], [0, 0, 0, 0], [0, 0, 0, 2]]);
        let res = resolve_board(&board, Direction::Up);
        assert_eq!(res.board.rows()[0], [0, 0, 0, 4]);
        assert_eq!(
            res.actions,
            vec![Action::Merge {
                line: 3,
                stay: Position::new(1, 3),
                absorbed: Position::new(3, 3),
                to: Position::new(0, 3),
                value: 4,
            }]
        );
    }

    #[test]
    fn test_down_moves_to_bottom() {
        let board = grid([[8, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let res = resolve_board(&board, Direction::Down);
        assert_eq!(res.board.rows()[3], [8, 0, 0, 0]);
        assert_eq!(
            res.actions,
            vec![Action::Move {
                line: 0,
                from: Position::new(0, 0),
                to: Position::new(3, 0),
                value: 8,
            }]
        );
    }

    #[test]
    fn test_no_op_returns_same_board() {
        let board = grid([[2, 4, 0, 0], [8, 0, 0, 0], [0; 4], [0; 4]]);
        let res = resolve_board(&board, Direction::Left);
        assert!(!res.moved);
        assert_eq!(res.board, board);
        assert_eq!(res.score_gain, 0);
        assert!(res.actions.is_empty());
    }

    #[test]
    fn test_actions_follow_line_order() {
        let board = grid([[0, 2, 0, 0], [0, 0, 4, 0], [0; 4], [0, 0, 0, 8]]);
        let res = resolve_board(&board, Direction::Left);
        let lines: Vec<usize> = res.actions.iter().map(|a| a.line()).collect();
        assert_eq!(lines, vec![0, 1, 3]);
    }
}
