//! Session module - game lifecycle and the busy flag
//!
//! A [`Session`] owns the current [`GameState`], the seeded random source and
//! the lifecycle phase:
//!
//! ```text
//! NotStarted --start--> Playing --move accepted--> Animating --settle--> Playing
//!                          |                                     \
//!                          +--(no move possible)--> GameOver <----+
//! GameOver --restart--> Playing
//! ```
//!
//! `Animating` is the busy flag: the logical state has already advanced but the
//! presentation is still showing the move. Any input in that phase is rejected,
//! not queued. [`Session::in_flight`] hands out an [`InFlight`] guard that
//! settles the session when dropped, on every exit path including early returns
//! and panics, so the session can never stay busy.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::board::Grid;
use crate::game_state::{GameState, Transition};
use crate::helper::best_move;
use crate::snapshot::GameSnapshot;
use crate::types::{Direction, BOARD_SIZE};

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    NotStarted,
    Playing,
    /// A move was accepted and is being presented; input is ignored.
    Animating,
    GameOver,
}

/// Why an input was not applied
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejected {
    #[error("game has not started")]
    NotStarted,
    #[error("a move is still in flight")]
    Busy,
    #[error("game is over")]
    GameOver,
}

/// A single game session on the 4x4 board
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState<BOARD_SIZE>,
    rng: StdRng,
    phase: Phase,
    seed: u64,
    /// Monotonic episode id (increments on restart)
    episode_id: u32,
    /// Accepted moves in the current episode
    moves: u32,
}

impl Session {
    /// Create a session with the given RNG seed. Call [`Session::start`] to play.
    pub fn new(seed: u64) -> Self {
        Self {
            state: GameState::from_board(Grid::new(), 0),
            rng: StdRng::seed_from_u64(seed),
            phase: Phase::NotStarted,
            seed,
            episode_id: 0,
            moves: 0,
        }
    }

    /// Place the two opening tiles and begin playing
    pub fn start(&mut self) {
        if self.phase != Phase::NotStarted {
            return;
        }
        self.deal();
        info!("session started (seed {})", self.seed);
    }

    fn deal(&mut self) {
        self.state = GameState::new(&mut self.rng);
        self.moves = 0;
        self.phase = if self.state.game_over() {
            Phase::GameOver
        } else {
            Phase::Playing
        };
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The busy flag
    pub fn is_animating(&self) -> bool {
        self.phase == Phase::Animating
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn state(&self) -> &GameState<BOARD_SIZE> {
        &self.state
    }

    pub fn board(&self) -> &Grid {
        self.state.board()
    }

    pub fn score(&self) -> u64 {
        self.state.score()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    fn check_accepting(&self) -> Result<(), Rejected> {
        match self.phase {
            Phase::Playing => Ok(()),
            Phase::NotStarted => Err(Rejected::NotStarted),
            Phase::Animating => Err(Rejected::Busy),
            Phase::GameOver => Err(Rejected::GameOver),
        }
    }

    /// Try a move.
    ///
    /// - `Err(_)`: the session is not accepting input; nothing changed.
    /// - `Ok(None)`: the move would not change the board; only the terminal
    ///   state is re-checked.
    /// - `Ok(Some(t))`: the move was applied and the session is now busy until
    ///   [`Session::settle`] is called.
    pub fn begin_move(
        &mut self,
        dir: Direction,
    ) -> Result<Option<Transition<BOARD_SIZE>>, Rejected> {
        self.check_accepting()?;

        match self.state.apply_move(dir, &mut self.rng) {
            None => {
                if self.state.refresh_game_over() {
                    self.phase = Phase::GameOver;
                    info!("game over: score {}", self.state.score());
                }
                Ok(None)
            }
            Some(t) => {
                self.state = t.state;
                self.moves = self.moves.wrapping_add(1);
                self.phase = Phase::Animating;
                Ok(Some(t))
            }
        }
    }

    /// Clear the busy flag. Safe to call in any phase; only `Animating` changes.
    pub fn settle(&mut self) -> Phase {
        if self.phase == Phase::Animating {
            self.phase = if self.state.game_over() {
                info!("game over: score {}", self.state.score());
                Phase::GameOver
            } else {
                Phase::Playing
            };
        }
        self.phase
    }

    /// Like [`Session::begin_move`], but the busy flag is cleared when the
    /// returned guard goes out of scope.
    pub fn in_flight(&mut self, dir: Direction) -> Result<Option<InFlight<'_>>, Rejected> {
        match self.begin_move(dir)? {
            Some(transition) => Ok(Some(InFlight {
                session: self,
                transition,
            })),
            None => Ok(None),
        }
    }

    /// Direction suggested by the auto-move helper
    pub fn assist(&self) -> Option<Direction> {
        best_move(self.state.board())
    }

    /// Start a new episode: fresh board, score 0. Rejected while a move is in flight.
    pub fn restart(&mut self) -> Result<(), Rejected> {
        if self.phase == Phase::Animating {
            return Err(Rejected::Busy);
        }
        self.episode_id = self.episode_id.wrapping_add(1);
        self.deal();
        debug!("restarted, episode {}", self.episode_id);
        Ok(())
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.board = *self.state.board().rows();
        out.score = self.state.score();
        out.max_tile = self.state.board().max_tile();
        out.phase = self.phase;
        out.episode_id = self.episode_id;
        out.moves = self.moves;
        out.seed = self.seed;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(1)
    }
}

/// A move that has been applied but not yet presented.
///
/// Holding the guard keeps the session mutably borrowed, so a second move
/// cannot be started; dropping it settles the session.
#[derive(Debug)]
pub struct InFlight<'a> {
    session: &'a mut Session,
    transition: Transition<BOARD_SIZE>,
}

impl InFlight<'_> {
    pub fn transition(&self) -> &Transition<BOARD_SIZE> {
        &self.transition
    }

    pub fn session(&self) -> &Session {
        self.session
    }

    /// Settle now and report the resulting phase.
    pub fn finish(self) -> Phase {
        self.session.settle()
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.session.settle();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_not_started() {
        let mut s = Session::new(42);
        assert_eq!(s.phase(), Phase::NotStarted);
        assert_eq!(s.begin_move(Direction::Left), Err(Rejected::NotStarted));
        s.start();
        assert_eq!(s.phase(), Phase::Playing);
        assert_eq!(s.board().empty_count(), 14);
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut s = Session::new(42);
        s.start();
        let board = *s.board();
        s.start();
        assert_eq!(*s.board(), board);
    }

    #[test]
    fn test_busy_rejects_input_until_settled() {
        let mut s = Session::new(42);
        s.start();
        let dir = s.assist().unwrap();
        let t = s.begin_move(dir).unwrap().unwrap();
        assert!(s.is_animating());
        assert_eq!(s.state(), &t.state);
        assert_eq!(s.begin_move(dir), Err(Rejected::Busy));
        assert_eq!(s.restart(), Err(Rejected::Busy));
        assert_eq!(s.settle(), Phase::Playing);
        assert!(!s.is_animating());
        assert_eq!(s.moves(), 1);
    }

    #[test]
    fn test_settle_is_idempotent() {
        let mut s = Session::new(3);
        assert_eq!(s.settle(), Phase::NotStarted);
        s.start();
        assert_eq!(s.settle(), Phase::Playing);
    }

    #[test]
    fn test_restart_increments_episode_id() {
        let mut s = Session::new(12345);
        s.start();
        assert_eq!(s.episode_id(), 0);
        assert!(s.restart().is_ok());
        assert_eq!(s.episode_id(), 1);
        assert_eq!(s.score(), 0);
        assert_eq!(s.phase(), Phase::Playing);
    }

    #[test]
    fn test_snapshot_mirrors_session() {
        let mut s = Session::new(9);
        s.start();
        let snap = s.snapshot();
        assert_eq!(&snap.board, s.board().rows());
        assert_eq!(snap.phase, Phase::Playing);
        assert_eq!(snap.seed, 9);
        assert_eq!(snap.max_tile, s.board().max_tile());
    }

    #[test]
    fn test_in_flight_guard_settles_on_drop() {
        let mut s = Session::new(7);
        s.start();
        let dir = s.assist().unwrap();
        {
            let guard = s.in_flight(dir).unwrap().unwrap();
            assert!(guard.session().is_animating());
            assert!(guard.transition().result.moved);
        }
        assert_eq!(s.phase(), Phase::Playing);
    }

    #[test]
    fn test_in_flight_guard_settles_on_early_return() {
        fn present(s: &mut Session, dir: Direction) -> Result<(), &'static str> {
            let _guard = s.in_flight(dir).map_err(|_| "rejected")?;
            Err("terminal went away")
        }

        let mut s = Session::new(7);
        s.start();
        let dir = s.assist().unwrap();
        assert!(present(&mut s, dir).is_err());
        assert!(!s.is_animating());
        assert_eq!(s.moves(), 1);
    }

    #[test]
    fn test_in_flight_guard_settles_on_panic() {
        use std::panic::{catch_unwind, AssertUnwindSafe};

        let mut s = Session::new(7);
        s.start();
        let dir = s.assist().unwrap();
        let res = catch_unwind(AssertUnwindSafe(|| {
            let _guard = s.in_flight(dir).unwrap();
            panic!("renderer crashed");
        }));
        assert!(res.is_err());
        assert!(!s.is_animating());
    }

    #[test]
    fn test_finish_reports_phase() {
        let mut s = Session::new(7);
        s.start();
        let dir = s.assist().unwrap();
        let guard = s.in_flight(dir).unwrap().unwrap();
        assert_eq!(guard.finish(), Phase::Playing);
        assert_eq!(s.phase(), Phase::Playing);
    }

    #[test]
    fn test_no_op_move_keeps_playing() {
        let mut s = Session::new(5);
        s.start();
        let stuck = Direction::ALL
            .into_iter()
            .find(|&d| !s.state().preview(d).moved);
        if let Some(dir) = stuck {
            assert_eq!(s.begin_move(dir), Ok(None));
            assert_eq!(s.phase(), Phase::Playing);
            assert_eq!(s.moves(), 0);
        }
    }

    #[test]
    fn test_restart_from_game_over() {
        let mut s = Session::new(1);
        s.start();
        while !s.game_over() {
            let dir = s.assist().unwrap();
            s.begin_move(dir).unwrap();
            s.settle();
        }
        assert_eq!(s.begin_move(Direction::Left), Err(Rejected::GameOver));
        assert!(s.restart().is_ok());
        assert_eq!(s.phase(), Phase::Playing);
        assert_eq!(s.moves(), 0);
    }
}
