//! Terminal input module (engine-facing).
//!
//! Independent of any UI framework beyond `crossterm` key events. Keys map to
//! [`BoardAction`]s, and a [`Cursor`] turns those into swap requests for the
//! resolution engine.

pub mod cursor;
pub mod map;

pub use tui_match3_types as types;

pub use cursor::{Cursor, CursorOutput};
pub use map::{handle_key_event, should_quit, BoardAction, Direction};
