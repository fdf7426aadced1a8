//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It renders
//! into a plain framebuffer that is diffed and flushed to the terminal, instead
//! of going through a widget/layout library.
//!
//! - [`fb`]: framebuffer, colors and cell styles
//! - [`game_view`]: pure snapshot → framebuffer mapping
//! - [`anim`]: slide/merge animation frames from a move's action stream
//! - [`renderer`]: diffing flush to a crossterm terminal

pub mod anim;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_2048_core as core;
pub use tui_2048_types as types;

pub use anim::{SlideAnimation, Sprite, SpriteKind};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{tile_style, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
