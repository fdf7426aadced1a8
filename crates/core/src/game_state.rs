//! Game state module - the move orchestrator
//!
//! [`GameState`] is a plain value: board, score and the terminal flag. Every
//! operation takes a state and returns a new one; nothing is held globally.
//!
//! One accepted move is: resolve the board, add the score gain, spawn a tile,
//! then recompute the terminal flag. A move that changes nothing is a no-op and
//! produces no new state.

use log::debug;
use rand::Rng;

use crate::board::Board;
use crate::resolve::{resolve_board, MoveResult};
use crate::spawn::{spawn_tile, Spawn};
use crate::types::{Direction, INITIAL_TILES};

/// Board, score and terminal flag of one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState<const N: usize> {
    board: Board<N>,
    score: u64,
    game_over: bool,
}

/// Everything produced by one accepted move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition<const N: usize> {
    /// Board before the move (what an animation starts from)
    pub previous: Board<N>,
    /// Slide/merge result, before the spawn
    pub result: MoveResult<N>,
    /// Tile added after the slide, if there was room
    pub spawned: Option<Spawn>,
    /// State after slide, spawn and terminal check
    pub state: GameState<N>,
}

/// Spawn a tile into `board` and compute the terminal flag afterwards.
///
/// The terminal check always runs after the spawn attempt; a full board simply
/// gets no spawn.
pub fn spawn_and_check<const N: usize, R: Rng + ?Sized>(
    board: Board<N>,
    score: u64,
    rng: &mut R,
) -> (GameState<N>, Option<Spawn>) {
    let mut board = board;
    let spawned = spawn_tile(&mut board, rng);
    (GameState::from_board(board, score), spawned)
}

impl<const N: usize> GameState<N> {
    /// Start a game: empty board plus the initial random tiles, score 0.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut board = Board::new();
        for _ in 0..INITIAL_TILES {
            spawn_tile(&mut board, rng);
        }
        Self::from_board(board, 0)
    }

    /// Wrap an existing board; the terminal flag is derived from the board.
    pub fn from_board(board: Board<N>, score: u64) -> Self {
        Self {
            game_over: board.is_terminal(),
            board,
            score,
        }
    }

    pub fn board(&self) -> &Board<N> {
        &self.board
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Recompute the terminal flag from the board.
    ///
    /// Used when an input turned out to be a no-op: the board did not change,
    /// but the caller still wants an up-to-date verdict.
    pub fn refresh_game_over(&mut self) -> bool {
        self.game_over = self.board.is_terminal();
        self.game_over
    }

    /// Preview a move without spawning (the pure half of [`GameState::apply_move`]).
    pub fn preview(&self, dir: Direction) -> MoveResult<N> {
        resolve_board(&self.board, dir)
    }

    /// Apply a move. Returns `None` when the board would not change.
    pub fn apply_move<R: Rng + ?Sized>(
        &self,
        dir: Direction,
        rng: &mut R,
    ) -> Option<Transition<N>> {
        let result = resolve_board(&self.board, dir);
        if !result.moved {
            return None;
        }

        let (state, spawned) = spawn_and_check(result.board, self.score + result.score_gain, rng);
        debug!(
            "move {} accepted: score {} -> {}, game_over={}",
            dir.as_str(),
            self.score,
            state.score,
            state.game_over
        );

        Some(Transition {
            previous: self.board,
            result,
            spawned,
            state,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_game_has_two_tiles() {
        let mut rng = StdRng::seed_from_u64(1);
        let state = GameState::<4>::new(&mut rng);
        assert_eq!(state.board().empty_count(), 14);
        assert_eq!(state.score(), 0);
        assert!(!state.game_over());
        for pos in state.board().positions() {
            let v = state.board().get(pos).unwrap();
            assert!(v == 0 || v == 2 || v == 4);
        }
    }

    #[test]
    fn test_apply_move_merges_scores_and_spawns() {
        let mut rng = StdRng::seed_from_u64(3);
        let board = Board::<4>::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
        let state = GameState::from_board(board, 10);

        let t = state.apply_move(Direction::Left, &mut rng).unwrap();
        assert_eq!(t.previous, board);
        assert_eq!(t.result.score_gain, 4);
        assert_eq!(t.state.score(), 14);

        let spawn = t.spawned.unwrap();
        assert_eq!(t.result.board.get(spawn.pos), Some(0));
        assert_eq!(t.state.board().get(spawn.pos), Some(spawn.value));
        assert_eq!(t.state.board().sum(), 4 + spawn.value as u64);
    }

    #[test]
    fn test_no_op_move_returns_none() {
        let mut rng = StdRng::seed_from_u64(3);
        let board = Board::<4>::from_rows([[2, 4, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
        let state = GameState::from_board(board, 0);
        assert!(state.apply_move(Direction::Left, &mut rng).is_none());
        assert!(state.apply_move(Direction::Up, &mut rng).is_none());
        assert!(state.apply_move(Direction::Right, &mut rng).is_some());
    }

    #[test]
    fn test_from_board_detects_terminal() {
        let board = Board::<2>::from_rows([[2, 4], [4, 2]]).unwrap();
        let mut state = GameState::from_board(board, 0);
        assert!(state.game_over());
        assert!(state.refresh_game_over());
    }

    #[test]
    fn test_move_into_terminal_state() {
        // The merge leaves one hole at (0, 1); the spawn there decides the outcome.
        let mut rng = StdRng::seed_from_u64(5);
        let board = Board::<2>::from_rows([[2, 2], [8, 16]]).unwrap();
        let state = GameState::from_board(board, 0);
        let t = state.apply_move(Direction::Left, &mut rng).unwrap();
        assert!(!t.state.board().has_empty_cell());
        let x = t.state.board().get(crate::types::Position::new(0, 1)).unwrap();
        assert_eq!(t.state.game_over(), x != 4);
    }

    #[test]
    fn test_spawn_and_check_full_board() {
        let mut rng = StdRng::seed_from_u64(11);
        let board = Board::<2>::from_rows([[2, 4], [4, 2]]).unwrap();
        let (state, spawned) = spawn_and_check(board, 6, &mut rng);
        assert!(spawned.is_none());
        assert!(state.game_over());
        assert_eq!(state.score(), 6);
    }
}
