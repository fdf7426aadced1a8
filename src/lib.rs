//! TUI 2048 (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `tui_2048::{core,input,term,types}` and adds the pieces
//! shared by the binary: configuration and the `resolve` oracle.

pub mod config;
pub mod oracle;

pub use tui_2048_core as core;
pub use tui_2048_input as input;
pub use tui_2048_term as term;
pub use tui_2048_types as types;
