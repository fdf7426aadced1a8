//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! events into [`crate::types::GameAction`]. Key repeat and release events are
//! filtered out here so that holding an arrow key does not queue up moves.

pub mod map;

pub use tui_2048_types as types;

pub use map::{handle_key_event, is_press, should_quit};
