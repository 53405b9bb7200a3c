//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It avoids widget
//! toolkits and renders into a simple framebuffer that is flushed to the
//! terminal with diffing.
//!
//! The renderer never reads the engine's board directly: a [`BoardMirror`]
//! is kept in sync by replaying engine events.

pub mod fb;
pub mod game_view;
pub mod mirror;
pub mod renderer;

pub use tui_match3_core as core;
pub use tui_match3_engine as engine;
pub use tui_match3_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{CursorView, GameView, Viewport};
pub use mirror::BoardMirror;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
