use crate::session::Phase;
use crate::types::BOARD_SIZE;

/// Read-only copy of a session for the view layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[u32; BOARD_SIZE]; BOARD_SIZE],
    pub score: u64,
    pub max_tile: u32,
    pub phase: Phase,
    pub episode_id: u32,
    pub moves: u32,
    pub seed: u64,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0; BOARD_SIZE]; BOARD_SIZE],
            score: 0,
            max_tile: 0,
            phase: Phase::NotStarted,
            episode_id: 0,
            moves: 0,
            seed: 0,
        }
    }
}
