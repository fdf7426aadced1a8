//! Slide animation built from a move's action stream.
//!
//! The animation has two stages. First every tile glides from its source cell
//! to its destination (merging pairs overlap at the target). Then the final
//! board is shown with merged tiles and the spawned tile highlighted. The
//! logical state has already advanced; this only decides what to draw.

use crate::core::{Grid, Spawn, Transition};
use crate::types::{Action, Position, BOARD_SIZE};

/// Share of the duration spent sliding; the rest shows the result.
const SLIDE_SHARE: f32 = 0.75;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    /// Tile that does not move this turn.
    Static,
    Sliding,
    /// Result of a merge, drawn once sliding is over.
    Merged,
    Spawned,
}

/// A tile at a fractional board position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub row: f32,
    pub col: f32,
    pub value: u32,
    pub kind: SpriteKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Track {
    from: Position,
    to: Position,
    value: u32,
}

#[derive(Debug, Clone)]
pub struct SlideAnimation {
    tracks: Vec<Track>,
    after: Grid,
    merged: Vec<Position>,
    spawned: Option<Spawn>,
    duration_ms: u32,
    elapsed_ms: u32,
}

impl SlideAnimation {
    pub fn new(transition: &Transition<BOARD_SIZE>, duration_ms: u32) -> Self {
        let mut tracks = Vec::with_capacity(BOARD_SIZE * BOARD_SIZE);
        let mut merged = Vec::new();
        let mut moving = [[false; BOARD_SIZE]; BOARD_SIZE];

        for action in &transition.result.actions {
            match *action {
                Action::Move { from, to, value, .. } => {
                    moving[from.row][from.col] = true;
                    tracks.push(Track { from, to, value });
                }
                Action::Merge {
                    stay,
                    absorbed,
                    to,
                    value,
                    ..
                } => {
                    moving[stay.row][stay.col] = true;
                    moving[absorbed.row][absorbed.col] = true;
                    let half = value / 2;
                    tracks.push(Track { from: stay, to, value: half });
                    tracks.push(Track { from: absorbed, to, value: half });
                    merged.push(to);
                }
            }
        }

        for pos in transition.previous.positions() {
            let value = transition.previous.get(pos).unwrap_or(0);
            if value != 0 && !moving[pos.row][pos.col] {
                tracks.push(Track { from: pos, to: pos, value });
            }
        }

        Self {
            tracks,
            after: *transition.state.board(),
            merged,
            spawned: transition.spawned,
            duration_ms,
            elapsed_ms: 0,
        }
    }

    /// Advance the clock. Returns true once the animation is over.
    pub fn advance(&mut self, dt_ms: u32) -> bool {
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms).min(self.duration_ms);
        self.is_done()
    }

    pub fn is_done(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }

    /// 0.0 at the start, 1.0 when done.
    pub fn progress(&self) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        self.elapsed_ms as f32 / self.duration_ms as f32
    }

    /// Emit the sprites for the current frame into `out` (cleared first).
    pub fn sprites_into(&self, out: &mut Vec<Sprite>) {
        out.clear();
        let p = self.progress();

        if p < SLIDE_SHARE {
            let t = ease_out(p / SLIDE_SHARE);
            // Static tiles first so sliding ones are drawn on top.
            for track in self.tracks.iter().filter(|t| t.from == t.to) {
                out.push(Sprite {
                    row: track.from.row as f32,
                    col: track.from.col as f32,
                    value: track.value,
                    kind: SpriteKind::Static,
                });
            }
            for track in self.tracks.iter().filter(|t| t.from != t.to) {
                out.push(Sprite {
                    row: lerp(track.from.row, track.to.row, t),
                    col: lerp(track.from.col, track.to.col, t),
                    value: track.value,
                    kind: SpriteKind::Sliding,
                });
            }
            return;
        }

        for pos in self.after.positions() {
            let value = self.after.get(pos).unwrap_or(0);
            if value == 0 {
                continue;
            }
            let kind = if self.spawned.map(|s| s.pos) == Some(pos) {
                SpriteKind::Spawned
            } else if self.merged.contains(&pos) {
                SpriteKind::Merged
            } else {
                SpriteKind::Static
            };
            out.push(Sprite {
                row: pos.row as f32,
                col: pos.col as f32,
                value,
                kind,
            });
        }
    }

    pub fn sprites(&self) -> Vec<Sprite> {
        let mut out = Vec::new();
        self.sprites_into(&mut out);
        out
    }
}

fn lerp(a: usize, b: usize, t: f32) -> f32 {
    a as f32 + (b as f32 - a as f32) * t
}

fn ease_out(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameState;
    use crate::types::Direction;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn transition(rows: [[u32; 4]; 4], dir: Direction) -> Transition<4> {
        let mut rng = StdRng::seed_from_u64(1);
        let state = GameState::from_board(Grid::from_rows(rows).unwrap(), 0);
        state.apply_move(dir, &mut rng).unwrap()
    }

    #[test]
    fn test_first_frame_matches_previous_board() {
        let t = transition([[2, 2, 0, 8], [0, 4, 0, 0], [0; 4], [0; 4]], Direction::Left);
        let anim = SlideAnimation::new(&t, 100);
        let mut sprites = anim.sprites();
        sprites.sort_by(|a, b| (a.row, a.col).partial_cmp(&(b.row, b.col)).unwrap());

        let cells: Vec<(f32, f32, u32)> = sprites.iter().map(|s| (s.row, s.col, s.value)).collect();
        assert_eq!(
            cells,
            vec![(0.0, 0.0, 2), (0.0, 1.0, 2), (0.0, 3.0, 8), (1.0, 1.0, 4)]
        );
    }

    #[test]
    fn test_stationary_tiles_are_static() {
        let t = transition([[2, 0, 0, 0], [0, 0, 0, 4], [0; 4], [0; 4]], Direction::Left);
        let anim = SlideAnimation::new(&t, 100);
        let sprites = anim.sprites();
        let still = sprites.iter().find(|s| s.value == 2).unwrap();
        assert_eq!(still.kind, SpriteKind::Static);
        let sliding = sprites.iter().find(|s| s.value == 4).unwrap();
        assert_eq!(sliding.kind, SpriteKind::Sliding);
    }

    #[test]
    fn test_tiles_move_toward_destination() {
        let t = transition([[0, 0, 0, 4], [0; 4], [0; 4], [0; 4]], Direction::Left);
        let mut anim = SlideAnimation::new(&t, 100);
        anim.advance(30);
        let s = anim.sprites().into_iter().find(|s| s.value == 4).unwrap();
        assert!(s.col < 3.0 && s.col > 0.0, "col {}", s.col);
    }

    #[test]
    fn test_final_stage_highlights_merge_and_spawn() {
        let t = transition([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]], Direction::Left);
        let mut anim = SlideAnimation::new(&t, 100);
        assert!(anim.advance(100));
        assert_eq!(anim.progress(), 1.0);

        let sprites = anim.sprites();
        let merged = sprites.iter().find(|s| s.kind == SpriteKind::Merged).unwrap();
        assert_eq!((merged.row, merged.col, merged.value), (0.0, 0.0, 4));

        let spawn = t.spawned.unwrap();
        let spawned = sprites.iter().find(|s| s.kind == SpriteKind::Spawned).unwrap();
        assert_eq!(
            (spawned.row, spawned.col, spawned.value),
            (spawn.pos.row as f32, spawn.pos.col as f32, spawn.value)
        );
    }

    #[test]
    fn test_zero_duration_is_done() {
        let t = transition([[0, 2, 0, 0], [0; 4], [0; 4], [0; 4]], Direction::Left);
        let anim = SlideAnimation::new(&t, 0);
        assert!(anim.is_done());
        assert_eq!(anim.progress(), 1.0);
    }
}
