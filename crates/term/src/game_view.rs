//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::anim::{SlideAnimation, Sprite, SpriteKind};
use crate::core::{GameSnapshot, Phase};
use crate::fb::{format_u64, CellStyle, FrameBuffer, Rgb};
use crate::types::BOARD_SIZE;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const SCREEN_BG: Rgb = Rgb::hex(0x1e1c19);
const BOARD_BG: Rgb = Rgb::hex(0xbbada0);
const EMPTY_BG: Rgb = Rgb::hex(0xcdc1b4);
const DARK_TEXT: Rgb = Rgb::hex(0x776e65);
const LIGHT_TEXT: Rgb = Rgb::hex(0xf9f6f2);

/// Background and text style of a tile.
pub fn tile_style(value: u32) -> CellStyle {
    let (bg, fg) = match value {
        0 => (EMPTY_BG, DARK_TEXT),
        2 => (Rgb::hex(0xeee4da), DARK_TEXT),
        4 => (Rgb::hex(0xede0c8), DARK_TEXT),
        8 => (Rgb::hex(0xf2b179), LIGHT_TEXT),
        16 => (Rgb::hex(0xf59563), LIGHT_TEXT),
        32 => (Rgb::hex(0xf67c5f), LIGHT_TEXT),
        64 => (Rgb::hex(0xf65e3b), LIGHT_TEXT),
        128 => (Rgb::hex(0xedcf72), LIGHT_TEXT),
        256 => (Rgb::hex(0xedcc61), LIGHT_TEXT),
        512 => (Rgb::hex(0xedc850), LIGHT_TEXT),
        1024 => (Rgb::hex(0xedc53f), LIGHT_TEXT),
        2048 => (Rgb::hex(0xedc22e), LIGHT_TEXT),
        _ => (Rgb::hex(0x3c3a32), LIGHT_TEXT),
    };
    CellStyle::new(fg, bg).bold()
}

/// A lightweight terminal renderer for the 2048 board.
pub struct GameView {
    /// Tile width in terminal columns.
    tile_w: u16,
    /// Tile height in terminal rows.
    tile_h: u16,
    /// Gap between tiles (columns; rows use half of it, at least 1).
    gap: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 8x3 keeps tiles roughly square with typical glyph aspect ratio.
        Self {
            tile_w: 8,
            tile_h: 3,
            gap: 2,
        }
    }
}

impl GameView {
    pub fn new(tile_w: u16, tile_h: u16, gap: u16) -> Self {
        Self {
            tile_w: tile_w.max(1),
            tile_h: tile_h.max(1),
            gap,
        }
    }

    fn gap_y(&self) -> u16 {
        if self.gap == 0 {
            0
        } else {
            (self.gap / 2).max(1)
        }
    }

    /// Size of the board area in terminal cells.
    pub fn board_size(&self) -> (u16, u16) {
        let n = BOARD_SIZE as u16;
        (
            n * self.tile_w + (n + 1) * self.gap,
            n * self.tile_h + (n + 1) * self.gap_y(),
        )
    }

    /// Render the current snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_animation(snap, None, viewport, fb);
    }

    /// Like [`GameView::render_into`], but tiles come from `anim` when one is running.
    pub fn render_into_with_animation(
        &self,
        snap: &GameSnapshot,
        anim: Option<&SlideAnimation>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(LIGHT_TEXT, SCREEN_BG).into_cell(' '));

        let (board_w, board_h) = self.board_size();
        let panel_w = 20;
        let start_x = viewport.width.saturating_sub(board_w + panel_w) / 2;
        let start_y = viewport.height.saturating_sub(board_h) / 2;

        fb.fill_rect(start_x, start_y, board_w, board_h, ' ', CellStyle::new(LIGHT_TEXT, BOARD_BG));
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                self.draw_tile(fb, start_x, start_y, row as f32, col as f32, 0, SpriteKind::Static);
            }
        }

        match anim {
            Some(anim) => {
                for sprite in anim.sprites() {
                    let Sprite {
                        row,
                        col,
                        value,
                        kind,
                    } = sprite;
                    self.draw_tile(fb, start_x, start_y, row, col, value, kind);
                }
            }
            None => {
                for (row, cells) in snap.board.iter().enumerate() {
                    for (col, &value) in cells.iter().enumerate() {
                        if value != 0 {
                            self.draw_tile(
                                fb,
                                start_x,
                                start_y,
                                row as f32,
                                col as f32,
                                value,
                                SpriteKind::Static,
                            );
                        }
                    }
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x + board_w + 2, start_y);

        match snap.phase {
            Phase::GameOver => {
                self.draw_overlay_text(
                    fb,
                    start_x,
                    start_y,
                    board_w,
                    board_h,
                    "GAME OVER",
                    "press r to restart",
                );
            }
            Phase::NotStarted => {
                self.draw_overlay_text(
                    fb,
                    start_x,
                    start_y,
                    board_w,
                    board_h,
                    "2048",
                    "press any key",
                );
            }
            Phase::Playing | Phase::Animating => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Terminal cell of the top-left corner of the tile at a (possibly fractional) board position.
    pub fn tile_origin(&self, start_x: u16, start_y: u16, row: f32, col: f32) -> (u16, u16) {
        let step_x = (self.tile_w + self.gap) as f32;
        let step_y = (self.tile_h + self.gap_y()) as f32;
        let x = start_x as f32 + self.gap as f32 + col * step_x;
        let y = start_y as f32 + self.gap_y() as f32 + row * step_y;
        (x.round().max(0.0) as u16, y.round().max(0.0) as u16)
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        row: f32,
        col: f32,
        value: u32,
        kind: SpriteKind,
    ) {
        let (x, y) = self.tile_origin(start_x, start_y, row, col);
        let mut style = tile_style(value);
        if kind == SpriteKind::Spawned {
            style = style.dim();
        }
        fb.fill_rect(x, y, self.tile_w, self.tile_h, ' ', style);

        if value == 0 {
            return;
        }
        let mut digits = [0u8; 20];
        let text = format_u64(value as u64, &mut digits);
        let mid = y + self.tile_h / 2;
        fb.put_str_centered(x, self.tile_w, mid, text, style);

        if kind == SpriteKind::Merged && self.tile_h >= 3 {
            fb.put_str_centered(x, self.tile_w, y, "+", style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 10 {
            return;
        }

        let label = CellStyle::new(Rgb::hex(0xeee4da), SCREEN_BG).bold();
        let value = CellStyle::new(LIGHT_TEXT, SCREEN_BG);
        let dim = value.dim();

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u64(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "BEST TILE", label);
        y = y.saturating_add(1);
        fb.put_u64(panel_x, y, snap.max_tile as u64, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "MOVES", label);
        y = y.saturating_add(1);
        fb.put_u64(panel_x, y, snap.moves as u64, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "GAME", label);
        y = y.saturating_add(1);
        let end = fb.put_str(panel_x, y, "#", dim);
        fb.put_u64(end, y, snap.episode_id as u64 + 1, value);
        y = y.saturating_add(2);

        for line in ["arrows move", "space hint", "r restart", "q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, dim);
            y = y.saturating_add(1);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        board_w: u16,
        board_h: u16,
        title: &str,
        hint: &str,
    ) {
        let style = CellStyle::new(LIGHT_TEXT, Rgb::hex(0x000000)).bold();
        let mid_y = start_y.saturating_add(board_h / 2);
        let width = (title.chars().count().max(hint.chars().count()) as u16 + 4).min(board_w);
        let x = start_x.saturating_add(board_w.saturating_sub(width) / 2);
        fb.fill_rect(x, mid_y.saturating_sub(1), width, 3, ' ', style);
        fb.put_str_centered(x, width, mid_y.saturating_sub(1), title, style);
        fb.put_str_centered(x, width, mid_y.saturating_add(1), hint, style.dim());
    }
}
